//! CircleDet is a CPU-first circular Hough transform for grayscale images.
//!
//! The detector derives an edge-strength map from image gradients, casts
//! distance-weighted votes into a 3D (row, column, radius) accumulator,
//! keeps strict 3D local maxima as circle candidates, and accepts the best
//! of them by relative score. Large radii can be voted on downscaled
//! pyramid levels to bound the cost, with optional parallelism via the
//! `rayon` feature.

pub mod candidate;
pub mod detect;
pub mod edge;
pub mod hough;
pub mod image;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use image::io;
pub use image::pyramid::ImagePyramid;
pub use image::{ImageView, OwnedImage};
pub use util::{CircleDetError, CircleDetResult};

pub use candidate::select::select_above_cutoff;
pub use candidate::{sort_candidates_desc, CandidatePoint};
pub use detect::{Detector, DetectorConfig, Strategy};
pub use edge::EdgeMap;
pub use hough::accumulator::Accumulator;
pub use hough::maxima::extract_local_maxima;
pub use hough::vote::cast_votes;
#[cfg(feature = "rayon")]
pub use hough::vote::cast_votes_par;
