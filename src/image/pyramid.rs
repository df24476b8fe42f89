//! Image pyramid for the multi-scale voting bands.
//!
//! Downsampling halves each dimension with a 2x2 box filter and integer
//! rounding: `dst = (a + b + c + d + 2) / 4`. Level `k` is the base image
//! downscaled by `2^k`, which is the resampling the radius bands assume.

use crate::image::{ImageView, OwnedImage};
use crate::util::CircleDetResult;

/// Owned image pyramid built from a base level.
pub struct ImagePyramid {
    levels: Vec<OwnedImage>,
}

impl ImagePyramid {
    /// Builds a pyramid from a base grayscale view.
    ///
    /// `max_levels` is clamped to at least 1 so the base level is always
    /// present; the chain stops early once a level cannot be halved.
    pub fn build_u8(base: ImageView<'_, u8>, max_levels: usize) -> CircleDetResult<Self> {
        let max_levels = max_levels.max(1);
        let mut base_data = vec![0u8; base.width() * base.height()];
        for y in 0..base.height() {
            let row = base.row(y).expect("row within base view");
            base_data[y * base.width()..(y + 1) * base.width()].copy_from_slice(row);
        }
        let mut levels = vec![OwnedImage::new(base_data, base.width(), base.height())?];

        while levels.len() < max_levels {
            let prev = levels.last().expect("levels is not empty");
            if prev.width() < 2 || prev.height() < 2 {
                break;
            }

            let dst_width = prev.width() / 2;
            let dst_height = prev.height() / 2;
            let src = prev.data();
            let src_width = prev.width();
            let mut dst = vec![0u8; dst_width * dst_height];
            for y in 0..dst_height {
                let row0 = &src[2 * y * src_width..];
                let row1 = &src[(2 * y + 1) * src_width..];
                for x in 0..dst_width {
                    let sum = u16::from(row0[2 * x])
                        + u16::from(row0[2 * x + 1])
                        + u16::from(row1[2 * x])
                        + u16::from(row1[2 * x + 1]);
                    dst[y * dst_width + x] = ((sum + 2) / 4) as u8;
                }
            }
            levels.push(OwnedImage::new(dst, dst_width, dst_height)?);
        }

        Ok(Self { levels })
    }

    /// Returns all pyramid levels (level 0 is the base resolution).
    pub fn levels(&self) -> &[OwnedImage] {
        &self.levels
    }

    /// Returns a view for a specific pyramid level.
    pub fn level(&self, index: usize) -> Option<ImageView<'_, u8>> {
        self.levels.get(index).map(|level| level.view())
    }
}
