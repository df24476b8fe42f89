//! Local-maximum extraction from the vote accumulator.

use crate::candidate::CandidatePoint;
use crate::hough::accumulator::Accumulator;

/// Scans the accumulator and returns every strict 3D local maximum as a
/// candidate circle.
///
/// `scale` maps a downscaled band back to full resolution: row, column,
/// and radius are all multiplied by it. Scores are the raw accumulator
/// values at extraction time.
pub fn extract_local_maxima(
    acc: &Accumulator,
    neighbor_distance: usize,
    scale: usize,
) -> Vec<CandidatePoint> {
    let mut maxima = Vec::new();
    for row in 0..acc.rows() {
        for col in 0..acc.cols() {
            for radius in acc.radius_min()..acc.radius_max() {
                if acc.is_local_max(row, col, radius, neighbor_distance) {
                    maxima.push(CandidatePoint {
                        row: row * scale,
                        col: col * scale,
                        radius: radius * scale,
                        score: acc.at(row, col, radius),
                    });
                }
            }
        }
    }
    maxima
}
