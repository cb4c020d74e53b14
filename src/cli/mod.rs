//! Command-line parsing for the B-spline path fitter.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the numerical code.
//!
//! Numeric defaults can also come from the environment (or a `.env` file):
//! `GASPATH_DEGREE`, `GASPATH_CONTROL_POINTS`, `GASPATH_SAMPLES`.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "gaspath", version, about = "Fit and evaluate B-spline curves through labeled point groups")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit a curve per labeled group, print diagnostics, and optionally plot/export.
    Fit(FitArgs),
    /// Re-evaluate curves (and curvature) from a curve JSON, e.g. after editing control points.
    Eval(EvalArgs),
    /// Generate a synthetic labeled input file.
    Sample(SampleArgs),
}

/// Curve sampling and output options shared by `fit` and `eval`.
#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    /// Number of curve samples per group.
    #[arg(short = 'm', long, env = "GASPATH_SAMPLES", default_value_t = 100)]
    pub samples: usize,

    /// Write curve samples (label, "x, y" lines) to this file.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Export per-sample curvature to CSV.
    #[arg(long = "export-curvature", value_name = "CSV")]
    pub export_curvature: Option<PathBuf>,

    /// Render ASCII plots of each curve and its curvature.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 24)]
    pub height: usize,
}

/// Options for fitting.
#[derive(Debug, Args, Clone)]
pub struct FitArgs {
    /// Labeled point file (`label <name>` lines followed by `<x> <y>` lines).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// B-spline degree.
    #[arg(short = 'p', long, env = "GASPATH_DEGREE", default_value_t = 3)]
    pub degree: usize,

    /// Number of control points per group.
    #[arg(short = 'c', long = "control-points", env = "GASPATH_CONTROL_POINTS", default_value_t = 5)]
    pub control_points: usize,

    /// Export fitted curves (degree, knots, control points, samples) to JSON.
    #[arg(long = "export-curve", value_name = "JSON")]
    pub export_curve: Option<PathBuf>,

    #[command(flatten)]
    pub out: OutputArgs,
}

/// Options for re-evaluating a saved curve.
#[derive(Debug, Args, Clone)]
pub struct EvalArgs {
    /// Curve JSON file produced by `gaspath fit --export-curve`.
    #[arg(long, value_name = "JSON")]
    pub curve: PathBuf,

    #[command(flatten)]
    pub out: OutputArgs,
}

/// Options for synthetic sample generation.
#[derive(Debug, Args, Clone)]
pub struct SampleArgs {
    /// Output file (labeled point format).
    #[arg(short, long, default_value = "samples.txt")]
    pub output: PathBuf,

    /// Number of groups.
    #[arg(long, default_value_t = 3)]
    pub groups: usize,

    /// Points per group.
    #[arg(long, default_value_t = 20)]
    pub points: usize,

    /// Standard deviation of the y noise.
    #[arg(long, default_value_t = 0.01)]
    pub noise: f64,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_defaults() {
        let cli = Cli::parse_from(["gaspath", "fit", "in.txt"]);
        let Command::Fit(args) = cli.command else {
            panic!("expected fit");
        };
        assert_eq!(args.input, PathBuf::from("in.txt"));
        assert_eq!(args.out.samples, 100);
        assert!(args.out.output.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn fit_flags_parse() {
        let cli = Cli::parse_from([
            "gaspath", "-vv", "fit", "in.txt", "-p", "2", "-c", "7", "-m", "50", "-o", "out.txt", "--plot",
        ]);
        assert_eq!(cli.verbose, 2);
        let Command::Fit(args) = cli.command else {
            panic!("expected fit");
        };
        assert_eq!(args.degree, 2);
        assert_eq!(args.control_points, 7);
        assert_eq!(args.out.samples, 50);
        assert_eq!(args.out.output, Some(PathBuf::from("out.txt")));
        assert!(args.out.plot);
    }

    #[test]
    fn eval_requires_curve() {
        assert!(Cli::try_parse_from(["gaspath", "eval"]).is_err());
        let cli = Cli::parse_from(["gaspath", "eval", "--curve", "c.json"]);
        assert!(matches!(cli.command, Command::Eval(_)));
    }
}
