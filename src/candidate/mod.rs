//! Circle candidates and selection.

pub mod select;

/// A detected circle hypothesis in full-resolution coordinates.
///
/// Candidates produced on a downscaled band carry already-rescaled
/// coordinates; they are immutable after creation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CandidatePoint {
    /// Row of the circle center.
    pub row: usize,
    /// Column of the circle center.
    pub col: usize,
    /// Circle radius in pixels.
    pub radius: usize,
    /// Accumulator score at extraction time.
    pub score: f32,
}

/// Sorts candidates by descending score.
///
/// The sort is stable, so equally scored candidates keep their detection
/// order.
pub fn sort_candidates_desc(candidates: &mut [CandidatePoint]) {
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
}

#[cfg(test)]
mod tests {
    use super::{sort_candidates_desc, CandidatePoint};

    fn cand(radius: usize, score: f32) -> CandidatePoint {
        CandidatePoint {
            row: 0,
            col: 0,
            radius,
            score,
        }
    }

    #[test]
    fn sort_is_descending_and_stable() {
        let mut candidates = vec![cand(1, 3.0), cand(2, 7.0), cand(3, 3.0), cand(4, 9.0)];
        sort_candidates_desc(&mut candidates);
        let order: Vec<usize> = candidates.iter().map(|c| c.radius).collect();
        assert_eq!(order, vec![4, 2, 1, 3]);
    }
}
