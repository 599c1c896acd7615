//! JPEG renderer.
//!
//! Fills the estimated resolution with a random base color plus per-pixel
//! noise. The noise keeps the JPEG encoder from collapsing the image to a
//! few kilobytes, so file size tracks the resolution tier.

use super::{RenderContext, Renderer};
use crate::estimate::ContentParameter;
use image::{ImageBuffer, Rgb, RgbImage};
use rand::Rng;
use std::path::Path;

pub struct JpegRenderer;

impl Renderer for JpegRenderer {
    fn render(
        &self,
        dest: &Path,
        param: &ContentParameter,
        ctx: &mut RenderContext,
    ) -> anyhow::Result<()> {
        let ContentParameter::Resolution { width, height } = param else {
            anyhow::bail!("jpeg renderer expects a resolution parameter, got {param:?}");
        };

        let base = [
            ctx.rng.random_range(0..200u8),
            ctx.rng.random_range(0..200u8),
            ctx.rng.random_range(0..200u8),
        ];

        let mut img: RgbImage = ImageBuffer::new(*width, *height);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            let noise: u8 = ctx.rng.random_range(0..48);
            let gradient = ((x + y) % 64) as u8;
            *pixel = Rgb([
                base[0].saturating_add(noise),
                base[1].saturating_add(gradient),
                base[2].saturating_add(noise / 2),
            ]);
        }
        img.save(dest)?;
        Ok(())
    }
}
