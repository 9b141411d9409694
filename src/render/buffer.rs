use crate::foundation::{
    core::Area,
    error::{BokehError, BokehResult},
};

/// Owned storage for one tile: `area.pixel_count() * channels` interleaved `f32` values.
///
/// Every tile carries its own storage, so concurrently evaluated tiles never share memory.
#[derive(Clone, Debug, PartialEq)]
pub struct TileBuffer {
    area: Area,
    channels: usize,
    data: Vec<f32>,
}

impl TileBuffer {
    /// Zero-filled tile covering `area`.
    pub fn new(area: Area, channels: usize) -> Self {
        Self {
            area,
            channels,
            data: vec![0.0; area.pixel_count() * channels],
        }
    }

    /// Canvas region covered, in canvas coordinates.
    pub fn area(&self) -> Area {
        self.area
    }

    /// Channels per pixel.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Raw row-major samples.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Channels of the pixel at canvas coordinates `(x, y)`, if inside the tile.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[f32]> {
        let a = self.area;
        if x < a.x || y < a.y || u64::from(x) >= a.x_end() || u64::from(y) >= a.y_end() {
            return None;
        }
        let idx = ((y - a.y) as usize * a.width as usize + (x - a.x) as usize) * self.channels;
        self.data.get(idx..idx + self.channels)
    }

    /// Mutable rows paired with their canvas y coordinate.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = (u32, &mut [f32])> {
        let stride = (self.area.width as usize * self.channels).max(1);
        let y0 = self.area.y;
        self.data
            .chunks_exact_mut(stride)
            .zip(y0..)
            .map(|(row, y)| (y, row))
    }
}

/// Full canvas: `width * height * channels` interleaved `f32` values, row-major, origin at 0.
#[derive(Clone, Debug, PartialEq)]
pub struct MaskBuffer {
    width: u32,
    height: u32,
    channels: usize,
    data: Vec<f32>,
}

impl MaskBuffer {
    /// Zero-filled canvas.
    pub fn new(width: u32, height: u32, channels: usize) -> Self {
        Self {
            width,
            height,
            channels,
            data: vec![0.0; width as usize * height as usize * channels],
        }
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channels per pixel.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Origin-anchored area covered by the canvas.
    pub fn area(&self) -> Area {
        Area::new(0, 0, self.width, self.height)
    }

    /// Raw row-major samples.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Channels of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[f32]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * self.channels;
        self.data.get(idx..idx + self.channels)
    }

    /// Copy a finished tile into place.
    pub fn blit(&mut self, tile: &TileBuffer) -> BokehResult<()> {
        let area = tile.area();
        if !self.area().contains_area(area) {
            return Err(BokehError::evaluation(format!(
                "tile {area:?} does not fit a {}x{} canvas",
                self.width, self.height
            )));
        }
        if tile.channels() != self.channels {
            return Err(BokehError::evaluation(format!(
                "tile has {} channels, canvas has {}",
                tile.channels(),
                self.channels
            )));
        }
        if area.is_empty() {
            return Ok(());
        }

        let row_len = area.width as usize * self.channels;
        for (ty, src) in tile.data().chunks_exact(row_len).enumerate() {
            let y = area.y as usize + ty;
            let start = (y * self.width as usize + area.x as usize) * self.channels;
            self.data[start..start + row_len].copy_from_slice(src);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/buffer.rs"]
mod tests;
