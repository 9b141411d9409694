use std::path::Path;

use anyhow::Context as _;
use image::{GrayImage, ImageFormat, RgbaImage};

use crate::{
    foundation::error::{BokehError, BokehResult},
    render::buffer::MaskBuffer,
};

fn unit_to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl MaskBuffer {
    /// Quantize a single-channel mask to 8-bit luma (1.0 maps to 255).
    pub fn to_luma8(&self) -> BokehResult<GrayImage> {
        if self.channels() != 1 {
            return Err(BokehError::validation(format!(
                "luma export needs 1 channel, buffer has {}",
                self.channels()
            )));
        }
        let bytes = self.data().iter().copied().map(unit_to_u8).collect();
        GrayImage::from_raw(self.width(), self.height(), bytes)
            .ok_or_else(|| BokehError::evaluation("luma buffer size mismatch"))
    }

    /// Quantize to 8-bit RGBA. Single-channel masks become opaque gray.
    pub fn to_rgba8(&self) -> BokehResult<RgbaImage> {
        let bytes: Vec<u8> = match self.channels() {
            1 => self
                .data()
                .iter()
                .flat_map(|&v| {
                    let g = unit_to_u8(v);
                    [g, g, g, 255]
                })
                .collect(),
            4 => self.data().iter().copied().map(unit_to_u8).collect(),
            n => {
                return Err(BokehError::validation(format!(
                    "rgba export needs 1 or 4 channels, buffer has {n}"
                )));
            }
        };
        RgbaImage::from_raw(self.width(), self.height(), bytes)
            .ok_or_else(|| BokehError::evaluation("rgba buffer size mismatch"))
    }

    /// Write a PNG: luma for masks, RGBA for dispersion output.
    pub fn save_png(&self, path: impl AsRef<Path>) -> BokehResult<()> {
        let path = path.as_ref();
        if self.channels() == 1 {
            self.to_luma8()?
                .save_with_format(path, ImageFormat::Png)
                .with_context(|| format!("write png '{}'", path.display()))?;
        } else {
            self.to_rgba8()?
                .save_with_format(path, ImageFormat::Png)
                .with_context(|| format!("write png '{}'", path.display()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/export.rs"]
mod tests;
