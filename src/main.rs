use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use forcegraph::graph::LayoutDocument;
use forcegraph::io::FormatRegistry;
use forcegraph::{LayoutOptions, Simulation};

mod cli;

use cli::{Cli, Commands, LayoutArgs};

fn init_logging(verbose: bool) {
    let default = if verbose {
        "forcegraph=debug"
    } else {
        "forcegraph=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn layout(args: &LayoutArgs) -> anyhow::Result<()> {
    let registry = FormatRegistry::with_defaults();

    let mut options = match &args.config {
        Some(path) => LayoutOptions::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => LayoutOptions::default(),
    };
    args.apply_overrides(&mut options);

    let graph = registry
        .reader_for_path(&args.input)?
        .read(&args.input)
        .with_context(|| format!("failed to read graph {}", args.input.display()))?;
    let (mut nodes, mut edges) = graph.to_simulation_input()?;
    info!(
        nodes = nodes.len(),
        edges = edges.len(),
        "laying out {}",
        args.input.display()
    );

    let (summary, hints) = {
        let mut simulation = Simulation::new(&mut nodes, &mut edges, options)?;
        (simulation.run(), simulation.hints())
    };

    let mut document = LayoutDocument::from_run(&graph, &nodes, hints, summary);
    if args.normalize {
        document.normalize();
    }

    let writer = registry.require_writer(&args.output_format())?;
    match &args.output {
        Some(path) => {
            writer.write(&document, path)?;
            info!(
                steps = summary.steps,
                converged = summary.converged,
                "wrote layout to {}",
                path.display()
            );
        }
        None => print!("{}", writer.render(&document)?),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Layout(args) => layout(&args)?,
        Commands::Config => print!("{}", serde_yaml::to_string(&LayoutOptions::default())?),
    }

    Ok(())
}
