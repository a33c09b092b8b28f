//! Renders up to `--limit` points from a tuple-per-line text file as a 3D scatter plot.
use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser};
use tracing::{info, warn};

use spline_plot::{
    config::ScatterConfig,
    load_points,
    logging::{init_tracing, LEVELS},
    plot::render_scatter_svg,
    ReadOptions,
};

#[derive(Parser, Debug)]
#[command(name = "scatter3d", version, about = "Plot points from a text file as a 3D scatter")]
struct Cli {
    /// Text file with one `(x, y, z)` tuple per line
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Path to config TOML
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output SVG file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Maximum number of points read
    #[arg(long)]
    limit: Option<usize>,

    /// Skip malformed lines instead of failing
    #[arg(long, action = ArgAction::SetTrue)]
    skip_invalid: bool,

    /// Console log level
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info", value_parser = LEVELS)]
    log_level: String,
}

impl Cli {
    fn apply(&self, config: &mut ScatterConfig) {
        if let Some(input) = &self.input {
            config.input = input.clone();
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(limit) = self.limit {
            config.limit = limit;
        }
        config.skip_invalid |= self.skip_invalid;
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level).context("failed to install log subscriber")?;

    let mut config = ScatterConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    config.validate()?;

    let options = ReadOptions { limit: config.limit, skip_invalid: config.skip_invalid };
    let set = load_points(&config.input, &options)?;
    if set.truncated {
        warn!(limit = config.limit, "input truncated");
    }

    render_scatter_svg(&config.output, &set.points, &config.style)
        .with_context(|| format!("failed to render {}", config.output.display()))?;

    info!(output = %config.output.display(), points = set.points.len(), "done");
    Ok(())
}
