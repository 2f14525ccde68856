//! Render command implementation.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use vmarkdown_config::{CliSettings, Config};
use vmarkdown_core::{RenderOptions, Renderer};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for rendering one markdown file.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to render.
    md_file: PathBuf,

    /// Style sheet to inline; repeat to concatenate several (overrides config).
    #[arg(long = "css", value_name = "FILE")]
    css: Vec<PathBuf>,

    /// Template containing `{body}`; repeat to nest, innermost first
    /// (overrides config).
    #[arg(long = "template", value_name = "FILE")]
    templates: Vec<PathBuf>,

    /// Inline every image as a base64 data URI.
    #[arg(long)]
    embed_images: bool,

    /// Write the page to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover vmarkdown.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Deepest heading level listed in the table of contents (overrides
    /// config).
    #[arg(long, env = "VMARKDOWN_TOC_MAX_LEVEL")]
    toc_max_level: Option<u8>,

    /// Enable verbose output (log image fetches).
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the output would overwrite
    /// the input, or rendering fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        if let Some(out) = &self.output {
            ensure_distinct(&self.md_file, out)?;
        }

        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }

        let renderer = Renderer::new(RenderOptions::from(&config.render_resolved))?;
        let html = renderer.render_file(&self.md_file)?;

        match &self.output {
            Some(path) => {
                std::fs::write(path, &html)?;
                Output::new().success(&format!("Wrote {}", path.display()));
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(html.as_bytes())?;
                stdout.flush()?;
            }
        }
        Ok(())
    }

    /// Settings from flags that were actually given.
    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            css: (!self.css.is_empty()).then(|| self.css.clone()),
            templates: (!self.templates.is_empty()).then(|| self.templates.clone()),
            toc_max_level: self.toc_max_level,
            embed_images: self.embed_images.then_some(true),
        }
    }
}

/// Refuse to write the page over its own source.
fn ensure_distinct(input: &Path, output: &Path) -> Result<(), CliError> {
    let same = match (input.canonicalize(), output.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => input == output,
    };
    if same {
        return Err(CliError::Validation(format!(
            "Output path {} is the input file",
            output.display()
        )));
    }
    Ok(())
}
