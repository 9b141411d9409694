use crate::foundation::error::{BokehError, BokehResult};

pub use kurbo::{Point, Vec2};

/// Axis-aligned pixel rectangle, half-open on both axes.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Area {
    /// Left edge (inclusive).
    pub x: u32,
    /// Top edge (inclusive).
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Area {
    /// Build an area from its origin and size.
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Origin-anchored square of the given side.
    pub fn square(side: u32) -> Self {
        Self::new(0, 0, side, side)
    }

    /// Right edge (exclusive).
    pub fn x_end(self) -> u64 {
        u64::from(self.x) + u64::from(self.width)
    }

    /// Bottom edge (exclusive).
    pub fn y_end(self) -> u64 {
        u64::from(self.y) + u64::from(self.height)
    }

    /// `true` when the area covers no pixels.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of pixels covered.
    pub fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// `true` when `other` lies entirely inside `self`.
    pub fn contains_area(self, other: Area) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.x_end() <= self.x_end()
            && other.y_end() <= self.y_end()
    }

    /// Partition into row-major tiles of at most `tile_size` pixels per side.
    ///
    /// Tiles on the right and bottom edges are clipped, so the union of the
    /// returned tiles is exactly `self` and no two tiles overlap.
    pub fn split_tiles(self, tile_size: u32) -> BokehResult<Vec<Area>> {
        if tile_size == 0 {
            return Err(BokehError::validation("tile size must be >= 1"));
        }
        if self.is_empty() {
            return Ok(Vec::new());
        }

        let cols = self.width.div_ceil(tile_size);
        let rows = self.height.div_ceil(tile_size);
        let mut out = Vec::with_capacity(cols as usize * rows as usize);
        for row in 0..rows {
            let ty = row * tile_size;
            let th = tile_size.min(self.height - ty);
            for col in 0..cols {
                let tx = col * tile_size;
                let tw = tile_size.min(self.width - tx);
                out.push(Area::new(self.x + tx, self.y + ty, tw, th));
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
