//! Detection strategies and the multi-scale orchestrator.
//!
//! Voting cost grows with `radius_max^2`, so large radii are expensive at
//! full resolution. `Strategy::MultiScale` splits the radius range into
//! contiguous bands and votes each band on the pyramid level whose
//! downscale factor matches it, keeping the per-band runtime roughly
//! constant. `Strategy::SingleScale` runs one full-resolution pass over
//! the whole range; both run behind the same `Detector::detect` contract.

use crate::candidate::select::select_above_cutoff;
use crate::candidate::{sort_candidates_desc, CandidatePoint};
use crate::edge::{EdgeMap, DEFAULT_THRESHOLD_COEF};
use crate::hough::accumulator::Accumulator;
use crate::hough::maxima::extract_local_maxima;
use crate::hough::vote::{cast_votes, ProgressFn};
#[cfg(feature = "rayon")]
use crate::hough::vote::cast_votes_par;
use crate::image::pyramid::ImagePyramid;
use crate::image::ImageView;
use crate::trace::{trace_event, trace_span};
use crate::util::CircleDetResult;

/// Detection strategy behind the `Detector::detect` contract.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Strategy {
    /// One voting pass over the full radius range at full resolution.
    SingleScale,
    /// Radius range split into bands; larger radii vote on coarser
    /// pyramid levels.
    #[default]
    MultiScale,
}

/// Immutable detector configuration, fixed at construction.
#[derive(Clone, Copy, Debug)]
pub struct DetectorConfig {
    /// Which detection strategy to run.
    pub strategy: Strategy,
    /// Inclusive smallest radius; defaults to 10% of the `radius_max`
    /// default.
    pub radius_min: Option<usize>,
    /// Exclusive largest radius; defaults to half the smaller image side.
    pub radius_max: Option<usize>,
    /// Vote threshold as a fraction of the edge-map maximum.
    pub threshold_coef: f32,
    /// Keep candidates scoring at least this fraction of the top score.
    pub score_cutoff: f32,
    /// Number of downscaled bands for `Strategy::MultiScale`.
    pub downscale_bands: usize,
    /// Cubic neighborhood half-size for the local-maximum test.
    pub neighbor_distance: usize,
    /// Run voting row-parallel (requires the `rayon` feature).
    pub parallel: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::MultiScale,
            radius_min: None,
            radius_max: None,
            threshold_coef: DEFAULT_THRESHOLD_COEF,
            score_cutoff: 0.7,
            downscale_bands: 3,
            neighbor_distance: 3,
            parallel: false,
        }
    }
}

/// Circle detector over grayscale image views.
#[derive(Default)]
pub struct Detector {
    config: DetectorConfig,
    progress: Option<Box<ProgressFn>>,
}

impl Detector {
    /// Creates a detector with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: DetectorConfig) -> Self {
        self.config = config;
        self
    }

    /// Installs a voting progress observer.
    ///
    /// The observer receives the band's inverted scale factor and the
    /// percentage of rows processed. Not invoked by the parallel voting
    /// path.
    pub fn with_progress(mut self, progress: Box<ProgressFn>) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Runs detection and returns the accepted circles, best first.
    ///
    /// An image with no edge evidence yields an empty list, not an error.
    pub fn detect(&self, image: ImageView<'_, u8>) -> CircleDetResult<Vec<CandidatePoint>> {
        let candidates = self.detect_candidates(image)?;
        if candidates.is_empty() {
            return Ok(candidates);
        }
        select_above_cutoff(&candidates, self.config.score_cutoff)
    }

    /// Runs the voting passes and returns all local maxima sorted by
    /// descending score, before cutoff selection.
    pub fn detect_candidates(
        &self,
        image: ImageView<'_, u8>,
    ) -> CircleDetResult<Vec<CandidatePoint>> {
        let radius_max_default = image.width().min(image.height()) / 2;
        let radius_max = self.config.radius_max.unwrap_or(radius_max_default);
        let radius_min = self
            .config
            .radius_min
            .unwrap_or(radius_max_default / 10);

        let mut candidates = match self.config.strategy {
            Strategy::SingleScale => self.run_band(image, radius_min, radius_max, 0)?,
            Strategy::MultiScale => self.run_banded(image, radius_min, radius_max)?,
        };
        sort_candidates_desc(&mut candidates);
        Ok(candidates)
    }

    /// Multi-scale orchestration: band `k` covers
    /// `[k * radius_max / (bands + 1), (k + 1) * radius_max / (bands + 1))`
    /// with the lower bound clamped to `radius_min`, and votes on pyramid
    /// level `k` with its bounds divided by `2^k`. Every radius belongs to
    /// at most one band and none below `radius_min` is reported.
    fn run_banded(
        &self,
        image: ImageView<'_, u8>,
        radius_min: usize,
        radius_max: usize,
    ) -> CircleDetResult<Vec<CandidatePoint>> {
        let bands = self.config.downscale_bands;
        let pyramid = ImagePyramid::build_u8(image, bands + 1)?;

        let mut all = Vec::new();
        for k in 0..=bands {
            let lo = (k * radius_max / (bands + 1)).max(radius_min);
            let hi = (k + 1) * radius_max / (bands + 1);
            let scale = 1usize << k;
            let (lo_scaled, hi_scaled) = (lo / scale, hi / scale);
            if hi_scaled <= lo_scaled {
                continue;
            }
            // The pyramid stops early on tiny images; remaining bands
            // have no level to vote on.
            let Some(level) = pyramid.level(k) else {
                break;
            };
            let mut band = self.run_band(level, lo_scaled, hi_scaled, k)?;
            // lo / scale floors, so a coarse band can still produce a
            // rescaled radius just under radius_min.
            band.retain(|c| c.radius >= radius_min);
            all.append(&mut band);
        }
        Ok(all)
    }

    /// One voting pass: edge map, threshold, accumulator, local maxima.
    fn run_band(
        &self,
        image: ImageView<'_, u8>,
        radius_min: usize,
        radius_max: usize,
        level: usize,
    ) -> CircleDetResult<Vec<CandidatePoint>> {
        let scale = 1usize << level;
        let _span = trace_span!(
            "detect_band",
            level = level,
            radius_min = radius_min,
            radius_max = radius_max
        )
        .entered();

        let edges = EdgeMap::compute(image);
        let threshold = edges.vote_threshold(self.config.threshold_coef);
        let mut acc = Accumulator::new(image.height(), image.width(), radius_min, radius_max)?;
        self.cast(&edges, threshold, &mut acc, scale);

        let maxima = extract_local_maxima(&acc, self.config.neighbor_distance, scale);
        trace_event!("band_maxima", level = level, count = maxima.len());
        Ok(maxima)
    }

    #[cfg(feature = "rayon")]
    fn cast(&self, edges: &EdgeMap, threshold: f32, acc: &mut Accumulator, scale: usize) {
        if self.config.parallel {
            cast_votes_par(edges, threshold, acc, scale);
        } else {
            cast_votes(edges, threshold, acc, scale, self.progress.as_deref());
        }
    }

    #[cfg(not(feature = "rayon"))]
    fn cast(&self, edges: &EdgeMap, threshold: f32, acc: &mut Accumulator, scale: usize) {
        cast_votes(edges, threshold, acc, scale, self.progress.as_deref());
    }
}
