//! Curve fitting.
//!
//! Responsibilities:
//!
//! - pin curve endpoints to the first/last sample
//! - assemble and solve the least-squares normal equations for interior control points
//! - measure how closely the fitted curve follows its samples

pub mod fitter;

pub use fitter::*;
