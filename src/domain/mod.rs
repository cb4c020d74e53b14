//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - geometric primitives (`Point2`) and labeled input (`SampleGroup`)
//! - the curve representation (`BSplineCurve`) and curvature samples
//! - per-group outputs (`GroupFit`, `GroupFailure`) and run config (`FitConfig`)
//! - the portable curve file schema (`CurveFile`)

pub mod types;

pub use types::*;
