use clap::Args;
use questlayer_core::render_snippet;
use std::path::{Path, PathBuf};

use super::load_config;

#[derive(Args)]
pub struct EmbedArgs {
    /// Origin serving widget-runtime.js (defaults to share.origin)
    #[arg(long)]
    origin: Option<String>,
    /// Write the snippet to a file instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,
}

pub fn run(args: EmbedArgs, file: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(file)?;
    config.validate()?;
    let origin = args.origin.unwrap_or_else(|| config.share.origin.clone());
    let snippet = render_snippet(&config, &origin)?;
    match args.output {
        Some(path) => {
            std::fs::write(&path, snippet)?;
            tracing::info!(path = %path.display(), "embed snippet written");
            println!("Snippet written to {}", path.display());
        }
        None => println!("{snippet}"),
    }
    Ok(())
}
