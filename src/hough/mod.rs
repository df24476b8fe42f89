//! Hough voting space: accumulator, voter, and local-maximum extraction.

pub mod accumulator;
pub mod maxima;
pub mod vote;
