//! Input/output helpers.
//!
//! - labeled group ingest + validation (`ingest`)
//! - curve/curvature/sample text exports (`export`)
//! - curve JSON read/write (`curve`)

pub mod curve;
pub mod export;
pub mod ingest;

pub use curve::*;
pub use export::*;
pub use ingest::*;
