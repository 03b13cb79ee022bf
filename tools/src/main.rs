use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod error;
mod icons;
mod webp;

/// Offline asset tooling for the KEUB site.
#[derive(Parser, Debug)]
struct Cli {
    /// Site root that image paths are resolved against.
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert images to lossy WebP next to the originals.
    Webp {
        #[arg(long, default_value_t = webp::DEFAULT_QUALITY, value_parser = clap::value_parser!(u8).range(0..=100))]
        quality: u8,
        /// Images relative to the root; defaults to the site's hero, experience and topo images.
        images: Vec<String>,
    },
    /// Generate favicons and app icons from the logo.
    Icons {
        #[arg(long, default_value = icons::DEFAULT_SOURCE)]
        source: PathBuf,
        #[arg(long, default_value = icons::DEFAULT_OUT_DIR)]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    run(Cli::parse())
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Webp { quality, images } => {
            if images.is_empty() {
                webp::convert_all(&cli.root, &webp::DEFAULT_IMAGES, quality);
            } else {
                webp::convert_all(&cli.root, &images, quality);
            }
        }
        Command::Icons { source, out } => {
            let source = cli.root.join(source);
            icons::generate(&source, &cli.root.join(out))
                .with_context(|| format!("generating icons from {}", source.display()))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_failure_names_the_source() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_str().unwrap();
        let cli = Cli::try_parse_from(["keub-tools", "--root", root, "icons"]).unwrap();

        let err = run(cli).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("generating icons from"), "{message}");
        assert!(message.contains("KeubIt.png"), "{message}");
    }
}
