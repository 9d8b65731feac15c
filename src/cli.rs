use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use forcegraph::LayoutOptions;

/// Force-directed graph layout with Barnes-Hut repulsion.
#[derive(Parser, Debug)]
#[command(name = "forcegraph")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Lay out a graph file and write node positions
    Layout(LayoutArgs),
    /// Print the default configuration as YAML
    Config,
}

#[derive(Args, Debug)]
pub struct LayoutArgs {
    /// Input graph (.json, .yaml, .yml)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Layout configuration file (.yaml, .yml, .json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format (defaults to the output file extension, then json)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Seed for the random jitter
    #[arg(long)]
    pub seed: Option<u64>,

    /// Stop after this many steps even if not converged
    #[arg(long)]
    pub max_steps: Option<usize>,

    /// Per-node charge (negative repels)
    #[arg(long, allow_negative_numbers = true)]
    pub charge: Option<f64>,

    /// Pull toward the center
    #[arg(long, allow_negative_numbers = true)]
    pub gravity: Option<f64>,

    /// Fit positions into the unit square, inset by the margin
    #[arg(long)]
    pub normalize: bool,
}

impl LayoutArgs {
    /// Apply command-line overrides on top of file or default options
    pub fn apply_overrides(&self, options: &mut LayoutOptions) {
        if let Some(seed) = self.seed {
            options.seed = Some(seed);
        }
        if let Some(max_steps) = self.max_steps {
            options.max_steps = Some(max_steps);
        }
        if let Some(charge) = self.charge {
            options.charge = charge;
        }
        if let Some(gravity) = self.gravity {
            options.gravity = gravity;
        }
    }

    /// Output format id: explicit flag, else output extension, else json
    pub fn output_format(&self) -> String {
        self.format
            .clone()
            .or_else(|| {
                self.output
                    .as_deref()
                    .and_then(|p| p.extension())
                    .and_then(|e| e.to_str())
                    .map(|e| match e {
                        "yml" => "yaml".to_string(),
                        other => other.to_string(),
                    })
            })
            .unwrap_or_else(|| "json".to_string())
    }
}
