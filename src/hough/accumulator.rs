//! Dense 3D vote accumulator over (row, column, radius).
//!
//! One voting pass exclusively owns one accumulator; values only grow
//! while votes are cast and the whole grid is discarded after maxima
//! extraction. Cell addressing is O(1) on a flat buffer strided by the
//! column count, so non-square grids cannot alias.

use crate::util::{CircleDetError, CircleDetResult};

/// 3D voting grid for circle hypotheses.
pub struct Accumulator {
    data: Vec<f32>,
    rows: usize,
    cols: usize,
    radius_min: usize,
    radius_max: usize,
}

impl Accumulator {
    /// Creates a zeroed accumulator for radii in `[radius_min, radius_max)`.
    pub fn new(
        rows: usize,
        cols: usize,
        radius_min: usize,
        radius_max: usize,
    ) -> CircleDetResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(CircleDetError::InvalidDimensions {
                width: cols,
                height: rows,
            });
        }
        if radius_max <= radius_min {
            return Err(CircleDetError::InvalidRadiusRange {
                radius_min,
                radius_max,
            });
        }
        let len = rows
            .checked_mul(cols)
            .and_then(|v| v.checked_mul(radius_max - radius_min))
            .ok_or(CircleDetError::InvalidDimensions {
                width: cols,
                height: rows,
            })?;
        Ok(Self {
            data: vec![0.0; len],
            rows,
            cols,
            radius_min,
            radius_max,
        })
    }

    /// Returns the number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the inclusive lower radius bound.
    pub fn radius_min(&self) -> usize {
        self.radius_min
    }

    /// Returns the exclusive upper radius bound.
    pub fn radius_max(&self) -> usize {
        self.radius_max
    }

    /// Returns a zeroed accumulator with the same shape.
    #[cfg(feature = "rayon")]
    pub(crate) fn like(&self) -> Self {
        Self {
            data: vec![0.0; self.data.len()],
            rows: self.rows,
            cols: self.cols,
            radius_min: self.radius_min,
            radius_max: self.radius_max,
        }
    }

    /// Adds the cells of an identically shaped accumulator into this one.
    #[cfg(feature = "rayon")]
    pub(crate) fn merge(&mut self, other: &Self) {
        debug_assert_eq!(self.data.len(), other.data.len());
        for (dst, src) in self.data.iter_mut().zip(other.data.iter()) {
            *dst += *src;
        }
    }

    /// Flat index of a cell, strided by the column count.
    ///
    /// Out-of-range addresses are programming errors; the assertions fire
    /// in release builds too so a bad address can never alias another
    /// cell's storage.
    #[inline]
    fn index(&self, row: usize, col: usize, radius: usize) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({row}, {col}) outside {}x{} accumulator",
            self.rows,
            self.cols
        );
        assert!(
            radius >= self.radius_min && radius < self.radius_max,
            "radius {radius} outside [{}, {})",
            self.radius_min,
            self.radius_max
        );
        (row * self.cols + col) * (self.radius_max - self.radius_min) + (radius - self.radius_min)
    }

    /// Returns the accumulated score of a cell.
    ///
    /// # Panics
    ///
    /// Panics when the address is outside the grid or the radius band.
    pub fn at(&self, row: usize, col: usize, radius: usize) -> f32 {
        self.data[self.index(row, col, radius)]
    }

    /// Adds a vote to a cell.
    ///
    /// # Panics
    ///
    /// Panics when the address is outside the grid or the radius band.
    pub fn add(&mut self, row: usize, col: usize, radius: usize, vote: f32) {
        let idx = self.index(row, col, radius);
        self.data[idx] += vote;
    }

    /// Tests whether a cell strictly dominates its cubic neighborhood.
    ///
    /// The cell must hold a strictly positive value and exceed every other
    /// cell within `neighbor_distance` along all three axes. Neighbor
    /// offsets that fall outside the grid or the radius band are skipped.
    pub fn is_local_max(
        &self,
        row: usize,
        col: usize,
        radius: usize,
        neighbor_distance: usize,
    ) -> bool {
        let value = self.at(row, col, radius);
        if value <= 0.0 {
            return false;
        }
        let dist = neighbor_distance as isize;
        for i in -dist..=dist {
            let r = row as isize + i;
            if r < 0 || r >= self.rows as isize {
                continue;
            }
            for j in -dist..=dist {
                let c = col as isize + j;
                if c < 0 || c >= self.cols as isize {
                    continue;
                }
                for k in -dist..=dist {
                    let rad = radius as isize + k;
                    if (i == 0 && j == 0 && k == 0)
                        || rad < self.radius_min as isize
                        || rad >= self.radius_max as isize
                    {
                        continue;
                    }
                    if value <= self.at(r as usize, c as usize, rad as usize) {
                        return false;
                    }
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::Accumulator;
    use crate::util::CircleDetError;

    #[test]
    fn construction_rejects_bad_parameters() {
        let err = Accumulator::new(0, 4, 1, 3).err().unwrap();
        assert_eq!(
            err,
            CircleDetError::InvalidDimensions {
                width: 4,
                height: 0,
            }
        );

        let err = Accumulator::new(4, 4, 3, 3).err().unwrap();
        assert_eq!(
            err,
            CircleDetError::InvalidRadiusRange {
                radius_min: 3,
                radius_max: 3,
            }
        );
    }

    #[test]
    fn votes_accumulate_exactly() {
        let mut acc = Accumulator::new(4, 4, 2, 5).unwrap();
        acc.add(1, 2, 3, 1.5);
        acc.add(1, 2, 3, 2.25);
        acc.add(1, 2, 3, 0.25);
        assert!((acc.at(1, 2, 3) - 4.0).abs() < 1e-6);
        assert_eq!(acc.at(2, 1, 3), 0.0);
    }

    #[test]
    #[should_panic(expected = "radius 5 outside [2, 5)")]
    fn radius_above_band_panics() {
        let acc = Accumulator::new(4, 4, 2, 5).unwrap();
        let _ = acc.at(0, 0, 5);
    }

    #[test]
    #[should_panic(expected = "outside 4x4 accumulator")]
    fn row_outside_grid_panics() {
        let acc = Accumulator::new(4, 4, 2, 5).unwrap();
        let _ = acc.at(4, 0, 2);
    }

    #[test]
    fn zero_cell_is_never_a_local_max() {
        let acc = Accumulator::new(3, 3, 1, 4).unwrap();
        for row in 0..3 {
            for col in 0..3 {
                for radius in 1..4 {
                    assert!(!acc.is_local_max(row, col, radius, 1));
                }
            }
        }
    }

    #[test]
    fn isolated_peak_is_a_local_max() {
        let mut acc = Accumulator::new(5, 5, 1, 5).unwrap();
        acc.add(2, 2, 3, 10.0);
        acc.add(2, 3, 3, 4.0);
        assert!(acc.is_local_max(2, 2, 3, 1));
        assert!(!acc.is_local_max(2, 3, 3, 1));
    }

    #[test]
    fn peak_at_band_edge_skips_out_of_range_neighbors() {
        // Corner cell at the lowest radius: most neighbor offsets fall
        // outside the grid or the band and must be skipped, not read.
        let mut acc = Accumulator::new(3, 3, 2, 4).unwrap();
        acc.add(0, 0, 2, 1.0);
        assert!(acc.is_local_max(0, 0, 2, 3));
    }

    #[test]
    fn non_square_grid_does_not_alias() {
        let rows = 10;
        let cols = 20;
        let radius_min = 3;
        let radius_max = 7;
        let mut acc = Accumulator::new(rows, cols, radius_min, radius_max).unwrap();

        // Give every cell a unique value; any stride defect would fold
        // two addresses onto the same slot and corrupt one of them.
        let mut stamp = 1.0f32;
        for row in 0..rows {
            for col in 0..cols {
                for radius in radius_min..radius_max {
                    acc.add(row, col, radius, stamp);
                    stamp += 1.0;
                }
            }
        }
        let mut expected = 1.0f32;
        for row in 0..rows {
            for col in 0..cols {
                for radius in radius_min..radius_max {
                    assert_eq!(acc.at(row, col, radius), expected);
                    expected += 1.0;
                }
            }
        }

        // The address class the original row-strided layout corrupted:
        // col > rows on a wide grid. The write must land in exactly one
        // slot and leave its neighbors' stamps intact.
        let stamp_at = |row: usize, col: usize, radius: usize| {
            ((row * cols + col) * (radius_max - radius_min) + (radius - radius_min)) as f32 + 1.0
        };
        let before = acc.at(5, 15, 4);
        acc.add(5, 15, 4, 1000.0);
        assert_eq!(acc.at(5, 15, 4), before + 1000.0);
        assert_eq!(acc.at(5, 16, 4), stamp_at(5, 16, 4));
        assert_eq!(acc.at(6, 15, 4), stamp_at(6, 15, 4));
    }
}
