//! CLI for the igmedia media-URL resolver.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use igmedia_core::config::{self, ResolverConfig};
use std::path::PathBuf;

use commands::{run_classify, run_config_path, run_extract, run_resolve};

/// Top-level CLI for the igmedia resolver.
#[derive(Debug, Parser)]
#[command(name = "igmedia")]
#[command(about = "igmedia: resolve Instagram media elements to downloadable URLs", long_about = None)]
pub struct Cli {
    /// More log output (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Config file to use instead of ~/.config/igmedia/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Resolve a media element to its best downloadable URL.
    Resolve(ResolveArgs),

    /// Show the content type and identifiers derived from a page URL.
    Classify {
        /// Page URL, e.g. https://www.instagram.com/reel/XYZ7890/.
        url: String,
    },

    /// Extract a media URL from a saved JSON payload.
    Extract {
        /// Path to the JSON file.
        path: PathBuf,

        /// Use the story pattern order.
        #[arg(long)]
        story: bool,
    },

    /// Print the config file location.
    ConfigPath,
}

/// The element being resolved and the page it sits on.
#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// URL of the page the element was found on.
    #[arg(long, value_name = "URL")]
    pub page_url: String,

    /// Active source of the element (src/currentSrc); may be a blob: URL.
    #[arg(long, default_value = "")]
    pub src: String,

    /// The element is a video.
    #[arg(long)]
    pub video: bool,

    /// Raw srcset attribute.
    #[arg(long)]
    pub srcset: Option<String>,

    /// Child <source> URL; repeat for several.
    #[arg(long = "source", value_name = "URL")]
    pub sources: Vec<String>,

    /// Poster image of a video element.
    #[arg(long, value_name = "URL")]
    pub poster: Option<String>,

    /// Saved HTML of the page (video elements, scripts, globals).
    #[arg(long, value_name = "PATH")]
    pub html: Option<PathBuf>,

    /// HAR capture used as the page's resource-timing buffer.
    #[arg(long, value_name = "PATH")]
    pub har: Option<PathBuf>,

    /// Also print which strategy produced the URL.
    #[arg(long)]
    pub trace: bool,
}

impl Cli {
    fn load_config(&self) -> Result<ResolverConfig> {
        let cfg = match &self.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);
        Ok(cfg)
    }

    pub async fn run(self) -> Result<()> {
        match &self.command {
            CliCommand::Resolve(args) => run_resolve(self.load_config()?, args).await?,
            CliCommand::Classify { url } => run_classify(url)?,
            CliCommand::Extract { path, story } => run_extract(path, *story)?,
            CliCommand::ConfigPath => run_config_path()?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
