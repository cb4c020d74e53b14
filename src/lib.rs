//! `gaspath-curves` library crate.
//!
//! The binary (`gaspath`) is a thin wrapper around this library so that:
//!
//! - the spline math is testable without spawning processes
//! - the fitting core can be reused by other tools
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod curve;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
