// cli.rs
use crate::config::{AppConfig, DEFAULT_CONFIG_PATH};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "complex_scrape", version, about = "Harvest, classify and browse Sejong apartment complexes")]
pub struct Cli {
    /// TOML configuration file; built-in defaults apply when it is missing.
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Walk the portal and write complexes/listings CSV and xlsx.
    Harvest(HarvestArgs),
    /// Classify the latest harvest into sub-areas and bands.
    Classify(ClassifyArgs),
    /// Serve the interactive dashboard.
    Serve(ServeArgs),
    /// Write a static HTML snapshot of the default dashboard view.
    Render(RenderArgs),
}

#[derive(Debug, Args)]
pub struct HarvestArgs {
    #[arg(long)]
    pub region: Option<String>,
    #[arg(long)]
    pub delay_ms: Option<u64>,
    #[arg(long)]
    pub max_retries: Option<u32>,
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ClassifyArgs {
    #[arg(long)]
    pub input: Option<PathBuf>,
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    #[arg(long)]
    pub addr: Option<String>,
    #[arg(long)]
    pub data: Option<PathBuf>,
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    #[arg(long)]
    pub data: Option<PathBuf>,
    #[arg(long)]
    pub summary: Option<PathBuf>,
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Command {
    /// Folds command-line overrides into the loaded configuration.
    pub fn apply_overrides(&self, cfg: &mut AppConfig) {
        match self {
            Command::Harvest(a) => {
                if let Some(v) = &a.region {
                    cfg.harvest.region_code = v.clone();
                }
                if let Some(v) = a.delay_ms {
                    cfg.harvest.delay_ms = v;
                }
                if let Some(v) = a.max_retries {
                    cfg.harvest.max_retries = v;
                }
                if let Some(v) = &a.output_dir {
                    cfg.harvest.output_dir = v.clone();
                }
            }
            Command::Classify(a) => {
                if let Some(v) = &a.input {
                    cfg.classify.input = v.clone();
                }
                if let Some(v) = &a.output_dir {
                    cfg.classify.output_dir = v.clone();
                }
            }
            Command::Serve(a) => {
                if let Some(v) = &a.addr {
                    cfg.dashboard.addr = v.clone();
                }
                if let Some(v) = &a.data {
                    cfg.dashboard.data = v.clone();
                }
                if let Some(v) = &a.summary {
                    cfg.dashboard.summary = v.clone();
                }
            }
            Command::Render(a) => {
                if let Some(v) = &a.data {
                    cfg.dashboard.data = v.clone();
                }
                if let Some(v) = &a.summary {
                    cfg.dashboard.summary = v.clone();
                }
                if let Some(v) = &a.output {
                    cfg.dashboard.render_output = v.clone();
                }
            }
        }
    }
}
