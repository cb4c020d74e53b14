//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - sets up logging
//! - reads labeled samples or a saved curve JSON
//! - runs fitting / evaluation
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, EvalArgs, FitArgs, OutputArgs, SampleArgs};
use crate::data::{SampleConfig, generate_groups};
use crate::domain::FitConfig;
use crate::error::{AppError, SplineError};
use crate::io::RowError;

pub mod pipeline;

use pipeline::RunOutput;

/// Entry point for the `gaspath` binary.
pub fn run() -> Result<(), AppError> {
    // Environment overrides for numeric defaults may live in `.env`.
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Eval(args) => handle_eval(args),
        Command::Sample(args) => handle_sample(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // RUST_LOG wins over -v.
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| format!("gaspath_curves={level}").into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(&args);
    validate_config(&config)?;

    let ingest = crate::io::load_groups(&args.input)?;
    for e in &ingest.row_errors {
        warn!(line = e.line, "skipped input line: {}", e.message);
    }
    info!(
        groups = ingest.groups.len(),
        points = ingest.point_count(),
        degree = config.degree,
        control_points = config.control_points,
        "fitting groups"
    );

    let run = pipeline::fit_groups(&ingest.groups, &config);
    ensure_any_fit(&run)?;

    let source = args.input.display().to_string();
    emit(&source, &config, &run, &ingest.row_errors)?;

    if let Some(path) = &config.export_curve {
        crate::io::write_curve_json(path, &run.fits)?;
        info!(path = %path.display(), "wrote curve JSON");
    }

    Ok(())
}

fn handle_eval(args: EvalArgs) -> Result<(), AppError> {
    let file = crate::io::read_curve_json(&args.curve)?;
    let mut config = FitConfig::default();
    apply_output_args(&mut config, &args.out);
    if config.curve_samples < 2 {
        return Err(SplineError::TooFewEvaluationPoints {
            requested: config.curve_samples,
        }
        .into());
    }

    info!(curves = file.curves.len(), generated = %file.generated, "re-evaluating saved curves");
    let run = pipeline::evaluate_records(&file.curves, config.curve_samples);
    ensure_any_fit(&run)?;

    // Report the saved settings of the first curve.
    if let Some(first) = run.fits.first() {
        config.degree = first.curve.degree;
        config.control_points = first.curve.control_points.len();
    }

    let source = args.curve.display().to_string();
    emit(&source, &config, &run, &[])
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let config = SampleConfig {
        groups: args.groups,
        points_per_group: args.points,
        noise: args.noise,
        seed: args.seed,
    };
    let groups = generate_groups(&config)?;
    crate::io::write_groups(&args.output, &groups)?;
    println!(
        "Wrote {} groups x {} points to {}",
        config.groups,
        config.points_per_group,
        args.output.display()
    );
    Ok(())
}

pub fn fit_config_from_args(args: &FitArgs) -> FitConfig {
    let mut config = FitConfig {
        degree: args.degree,
        control_points: args.control_points,
        export_curve: args.export_curve.clone(),
        ..FitConfig::default()
    };
    apply_output_args(&mut config, &args.out);
    config
}

fn apply_output_args(config: &mut FitConfig, out: &OutputArgs) {
    config.curve_samples = out.samples;
    config.plot = out.plot;
    config.plot_width = out.width;
    config.plot_height = out.height;
    config.output = out.output.clone();
    config.export_curvature = out.export_curvature.clone();
}

/// Reject settings that would fail identically for every group.
fn validate_config(config: &FitConfig) -> Result<(), AppError> {
    if config.control_points <= config.degree {
        return Err(AppError::new(
            2,
            format!(
                "Control points ({}) must exceed the degree ({}).",
                config.control_points, config.degree
            ),
        ));
    }
    if config.control_points < 2 {
        return Err(AppError::new(2, "At least 2 control points are required."));
    }
    if config.curve_samples < 2 {
        return Err(AppError::new(2, "At least 2 curve samples are required."));
    }
    if config.degree < 2 {
        warn!(degree = config.degree, "curvature needs degree >= 2 and will be skipped");
    }
    Ok(())
}

fn ensure_any_fit(run: &RunOutput) -> Result<(), AppError> {
    if !run.fits.is_empty() {
        return Ok(());
    }
    let reasons: Vec<String> = run
        .failures
        .iter()
        .map(|f| format!("{}: {}", f.label, f.error))
        .collect();
    Err(AppError::new(
        3,
        format!("No group could be processed ({}).", reasons.join("; ")),
    ))
}

/// Print the summary and plots, then write the optional text exports.
fn emit(source: &str, config: &FitConfig, run: &RunOutput, row_errors: &[RowError]) -> Result<(), AppError> {
    println!(
        "{}",
        crate::report::format_run_summary(source, config, &run.fits, &run.failures, row_errors)
    );

    if config.plot {
        for fit in &run.fits {
            println!("{}", crate::plot::render_curve_plot(fit, config.plot_width, config.plot_height));
            if !fit.curvature.is_empty() {
                println!(
                    "{}",
                    crate::plot::render_curvature_plot(fit, config.plot_width, config.plot_height)
                );
            }
        }
    }

    if let Some(path) = &config.output {
        crate::io::write_curve_points(path, &run.fits)?;
        info!(path = %path.display(), "wrote curve samples");
    }
    if let Some(path) = &config.export_curvature {
        crate::io::write_curvature_csv(path, &run.fits)?;
        info!(path = %path.display(), "wrote curvature CSV");
    }

    Ok(())
}
