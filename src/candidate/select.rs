//! Relative-score selection over a sorted candidate set.

use crate::candidate::CandidatePoint;
use crate::util::{CircleDetError, CircleDetResult};

/// Keeps every candidate scoring at least `cutoff` times the top score.
///
/// `candidates` must already be sorted by descending score; the scan
/// stops at the first rejection. An empty set is a reportable error, not
/// a panic.
pub fn select_above_cutoff(
    candidates: &[CandidatePoint],
    cutoff: f32,
) -> CircleDetResult<Vec<CandidatePoint>> {
    let top = candidates
        .first()
        .ok_or(CircleDetError::EmptyCandidateSet)?;
    let floor = top.score * cutoff;
    let mut accepted = Vec::new();
    for cand in candidates {
        if cand.score < floor {
            break;
        }
        accepted.push(*cand);
    }
    Ok(accepted)
}

#[cfg(test)]
mod tests {
    use super::select_above_cutoff;
    use crate::candidate::CandidatePoint;
    use crate::util::CircleDetError;

    fn cand(score: f32) -> CandidatePoint {
        CandidatePoint {
            row: 0,
            col: 0,
            radius: 10,
            score,
        }
    }

    #[test]
    fn cutoff_accepts_the_leading_run() {
        let candidates = vec![cand(100.0), cand(70.0), cand(65.0), cand(10.0)];
        let accepted = select_above_cutoff(&candidates, 0.7).unwrap();
        // 70 >= 100 * 0.7 is accepted, 65 is the first rejection.
        assert_eq!(accepted.len(), 2);
        assert_eq!(accepted[0].score, 100.0);
        assert_eq!(accepted[1].score, 70.0);
    }

    #[test]
    fn empty_set_is_a_reportable_error() {
        let err = select_above_cutoff(&[], 0.7).err().unwrap();
        assert_eq!(err, CircleDetError::EmptyCandidateSet);
    }
}
