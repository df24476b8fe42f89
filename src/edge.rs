//! Gradient extraction: smoothing, Sobel derivatives, and the merged
//! edge-strength map that drives Hough voting.
//!
//! The pipeline is a 3x3 Gaussian blur followed by horizontal and vertical
//! Sobel derivatives with signed 16-bit intermediates. The two absolute
//! gradients are merged with equal weights and saturated back to 8 bits.
//! The voting threshold is a fixed fraction of the map's global maximum.

use crate::image::ImageView;

/// Default fraction of the edge-map maximum used as the vote threshold.
pub const DEFAULT_THRESHOLD_COEF: f32 = 0.5;

/// Scalar per-pixel edge-strength map; immutable once computed.
pub struct EdgeMap {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl EdgeMap {
    /// Computes the edge map of a grayscale image.
    pub fn compute(gray: ImageView<'_, u8>) -> Self {
        let width = gray.width();
        let height = gray.height();
        let blurred = gaussian3(gray);
        let data = sobel_merged(&blurred, width, height);
        Self {
            data,
            width,
            height,
        }
    }

    /// Returns the map width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the map height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the edge strength at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics when `(x, y)` is outside the map.
    pub fn value(&self, x: usize, y: usize) -> u8 {
        assert!(x < self.width && y < self.height, "pixel outside edge map");
        self.data[y * self.width + x]
    }

    /// Returns the edge strengths in row-major order.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the global maximum edge strength.
    pub fn max(&self) -> u8 {
        self.data.iter().copied().max().unwrap_or(0)
    }

    /// Returns the voting threshold `coef * max`.
    ///
    /// Pixels with strength strictly below this value do not vote.
    pub fn vote_threshold(&self, coef: f32) -> f32 {
        coef * f32::from(self.max())
    }
}

#[inline]
fn clamped(v: isize, len: usize) -> usize {
    v.clamp(0, len as isize - 1) as usize
}

/// 3x3 Gaussian blur (1-2-1 binomial, /16) with replicated borders.
fn gaussian3(src: ImageView<'_, u8>) -> Vec<u8> {
    const KERNEL: [[u16; 3]; 3] = [[1, 2, 1], [2, 4, 2], [1, 2, 1]];
    let width = src.width();
    let height = src.height();
    let mut out = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let mut sum = 0u16;
            for (dy, kernel_row) in KERNEL.iter().enumerate() {
                let sy = clamped(y as isize + dy as isize - 1, height);
                let row = src.row(sy).expect("row within bounds");
                for (dx, k) in kernel_row.iter().enumerate() {
                    let sx = clamped(x as isize + dx as isize - 1, width);
                    sum += k * u16::from(row[sx]);
                }
            }
            out[y * width + x] = ((sum + 8) / 16) as u8;
        }
    }
    out
}

/// Sobel x/y on a contiguous buffer, merged as `(|gx| + |gy|) / 2` with
/// rounding, each term saturated to 255 first.
fn sobel_merged(src: &[u8], width: usize, height: usize) -> Vec<u8> {
    let at = |x: isize, y: isize| -> i16 {
        i16::from(src[clamped(y, height) * width + clamped(x, width)])
    };
    let mut out = vec![0u8; width * height];
    for y in 0..height {
        let yi = y as isize;
        for x in 0..width {
            let xi = x as isize;
            let gx = -at(xi - 1, yi - 1) + at(xi + 1, yi - 1) - 2 * at(xi - 1, yi)
                + 2 * at(xi + 1, yi)
                - at(xi - 1, yi + 1)
                + at(xi + 1, yi + 1);
            let gy = -at(xi - 1, yi - 1) - 2 * at(xi, yi - 1) - at(xi + 1, yi - 1)
                + at(xi - 1, yi + 1)
                + 2 * at(xi, yi + 1)
                + at(xi + 1, yi + 1);
            let abs_x = gx.unsigned_abs().min(255);
            let abs_y = gy.unsigned_abs().min(255);
            out[y * width + x] = ((abs_x + abs_y + 1) / 2) as u8;
        }
    }
    out
}
