//! Mathematical utilities: knot vectors, basis functions and a dense solver.

pub mod basis;
pub mod gauss;
pub mod knots;

pub use basis::*;
pub use gauss::*;
pub use knots::*;
