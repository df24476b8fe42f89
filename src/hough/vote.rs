//! Weighted Hough voting from edge pixels into the accumulator.
//!
//! Every edge pixel at or above the vote threshold casts `value / d` into
//! each center cell at geometric distance `d` inside the radius band.
//! Votes are weighted by `1 / d` so large circles, sampled by more
//! perimeter pixels, are not over-rewarded relative to small ones. The
//! center search is restricted to a box of half-side `radius_max` around
//! the edge pixel, which keeps the pass tractable on large images.

use crate::edge::EdgeMap;
use crate::hough::accumulator::Accumulator;
use crate::trace::trace_span;

/// Per-row progress callback: `(inverted_scale_factor, percent_done)`.
///
/// This is the boxed storage type on `Detector`; `cast_votes` itself
/// spells the trait object out so borrowed observers work too.
pub type ProgressFn = dyn Fn(usize, f32) + Send + Sync;

/// Casts all votes of an edge map into the accumulator.
///
/// The accumulator must share the edge map's dimensions. `scale` is only
/// forwarded to the progress observer so a caller can tell the bands
/// apart.
pub fn cast_votes(
    edges: &EdgeMap,
    threshold: f32,
    acc: &mut Accumulator,
    scale: usize,
    progress: Option<&(dyn Fn(usize, f32) + Send + Sync)>,
) {
    assert_eq!(acc.rows(), edges.height(), "accumulator rows mismatch");
    assert_eq!(acc.cols(), edges.width(), "accumulator cols mismatch");

    let _span = trace_span!("cast_votes", rows = edges.height(), scale = scale).entered();
    let rows = edges.height();
    for i in 0..rows {
        vote_row(edges, threshold, acc, i);
        if let Some(report) = progress {
            report(scale, (i * 100) as f32 / rows as f32);
        }
    }
}

/// Row-parallel voting pass (feature `rayon`).
///
/// Each worker accumulates into its own grid and the partials are merged
/// by addition afterwards; per-cell accumulation is order-independent up
/// to f32 rounding. No progress reporting in this path.
#[cfg(feature = "rayon")]
pub fn cast_votes_par(edges: &EdgeMap, threshold: f32, acc: &mut Accumulator, scale: usize) {
    use rayon::prelude::*;

    assert_eq!(acc.rows(), edges.height(), "accumulator rows mismatch");
    assert_eq!(acc.cols(), edges.width(), "accumulator cols mismatch");

    let _span = trace_span!(
        "cast_votes",
        rows = edges.height(),
        scale = scale,
        parallel = true
    )
    .entered();
    let merged = (0..edges.height())
        .into_par_iter()
        .fold(
            || acc.like(),
            |mut local, i| {
                vote_row(edges, threshold, &mut local, i);
                local
            },
        )
        .reduce(
            || acc.like(),
            |mut a, b| {
                a.merge(&b);
                a
            },
        );
    acc.merge(&merged);
}

fn vote_row(edges: &EdgeMap, threshold: f32, acc: &mut Accumulator, i: usize) {
    let rows = edges.height();
    let cols = edges.width();
    let radius_max = acc.radius_max();
    let radius_min_f = acc.radius_min() as f32;
    let radius_max_f = radius_max as f32;

    for j in 0..cols {
        let value = edges.value(j, i);
        // Zero-strength pixels carry no evidence even when the whole map
        // is flat and the derived threshold is zero.
        if value == 0 || f32::from(value) < threshold {
            continue;
        }
        let weight = f32::from(value);

        let r_lo = i.saturating_sub(radius_max);
        let r_hi = (i + radius_max).min(rows);
        let c_lo = j.saturating_sub(radius_max);
        let c_hi = (j + radius_max).min(cols);
        for r in r_lo..r_hi {
            let dr = i as f32 - r as f32;
            for c in c_lo..c_hi {
                let dc = j as f32 - c as f32;
                let d = (dr * dr + dc * dc).sqrt();
                // d > 0 also rejects the degenerate self-centered circle
                // when the band starts at radius zero.
                if d > 0.0 && d >= radius_min_f && d < radius_max_f {
                    // round(d) can reach radius_max for d just below it;
                    // clamp into the band instead of dropping the vote.
                    let bin = (d.round() as usize).min(radius_max - 1);
                    acc.add(r, c, bin, weight / d);
                }
            }
        }
    }
}
