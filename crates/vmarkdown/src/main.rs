//! vmarkdown CLI - render a markdown file to a standalone HTML page.
//!
//! The page goes to stdout unless `--output` names a file.

mod error;
mod output;
mod render;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use output::Output;
use render::RenderArgs;

/// vmarkdown - Markdown to standalone HTML.
#[derive(Parser)]
#[command(name = "vmarkdown", version, about)]
struct Cli {
    #[command(flatten)]
    render: RenderArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.render.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.render.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output.error(&format!("Error: {err}"));
            ExitCode::FAILURE
        }
    }
}
