//! Renders a cubic spline through control points with short tangent segments overlaid.
use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser};
use tracing::info;

use spline_plot::{
    config::CurveConfig,
    logging::{init_tracing, LEVELS},
    plot::render_curve_svg,
    BoundaryCondition, CurveFigure,
};

#[derive(Parser, Debug)]
#[command(name = "spline_tangents", version, about = "Plot a cubic spline with tangent segments")]
struct Cli {
    /// Path to config TOML, defaults reproduce the reference curve
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output SVG file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Number of curve samples
    #[arg(long)]
    samples: Option<usize>,

    /// Half length of tangent segments along x
    #[arg(long, value_name = "LENGTH")]
    tangent_length: Option<f64>,

    /// Spline end condition: not-a-knot, natural, periodic or clamped:<left>,<right>
    #[arg(long, value_name = "KIND")]
    boundary: Option<BoundaryCondition>,

    /// Mark control points
    #[arg(long, action = ArgAction::SetTrue)]
    show_knots: bool,

    /// Draw background grid
    #[arg(long, action = ArgAction::SetTrue)]
    grid: bool,

    /// Console log level
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info", value_parser = LEVELS)]
    log_level: String,
}

impl Cli {
    fn apply(&self, config: &mut CurveConfig) {
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(samples) = self.samples {
            config.samples = samples;
        }
        if let Some(length) = self.tangent_length {
            config.tangents.half_length = length;
        }
        if let Some(boundary) = self.boundary {
            config.boundary = boundary;
        }
        config.style.show_knots |= self.show_knots;
        config.style.grid |= self.grid;
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level).context("failed to install log subscriber")?;

    let mut config = CurveConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    config.validate()?;

    let figure = CurveFigure::build(&config).context("failed to build spline")?;
    render_curve_svg(&config.output, &figure, &config.style)
        .with_context(|| format!("failed to render {}", config.output.display()))?;

    info!(output = %config.output.display(), "done");
    Ok(())
}
