//! CLI for the backarc bulk archive submitter.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use backarc_core::config::{self, BackarcConfig, Mode, Reuse};

use commands::{run_export, run_submit, run_templates};

/// Top-level CLI for the backarc bulk archive submitter.
#[derive(Debug, Parser)]
#[command(name = "backarc")]
#[command(about = "backarc: bulk backlink archive submitter", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Iframe,
    Popup,
    Tab,
}

impl From<ModeArg> for Mode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Iframe => Mode::Iframe,
            ModeArg::Popup => Mode::Popup,
            ModeArg::Tab => Mode::Tab,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReuseArg {
    Fresh,
    Reuse,
}

impl From<ReuseArg> for Reuse {
    fn from(r: ReuseArg) -> Self {
        match r {
            ReuseArg::Fresh => Reuse::Fresh,
            ReuseArg::Reuse => Reuse::Reuse,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Expand the templates for a video and submit every backlink to the
    /// enabled archives.
    Run {
        /// Video URL or bare 11-character id.
        input: String,

        /// Delivery surface for submissions.
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,

        /// Window lifecycle for popup/tab modes.
        #[arg(long, value_enum)]
        reuse: Option<ReuseArg>,

        /// Worker slots for this run.
        #[arg(long, value_name = "N")]
        concurrency: Option<usize>,

        /// Keep backlinks in template order instead of shuffling.
        #[arg(long)]
        no_shuffle: bool,

        /// Start a fresh pass 500 ms after each completed one, until
        /// interrupted.
        #[arg(long)]
        rerun: bool,

        /// Skip the Wayback Machine.
        #[arg(long)]
        no_wayback: bool,

        /// Skip archive.today.
        #[arg(long)]
        no_archive_today: bool,

        /// Template list source: an http(s) URL or a local JSON file.
        #[arg(long, value_name = "SRC")]
        templates: Option<String>,
    },

    /// Expand the templates for a video and print (or write) the backlink
    /// list without submitting anything.
    Export {
        /// Video URL or bare 11-character id.
        input: String,

        /// Write the list to a file instead of stdout.
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Template list source: an http(s) URL or a local JSON file.
        #[arg(long, value_name = "SRC")]
        templates: Option<String>,
    },

    /// Show the template list that runs would use.
    Templates {
        /// Template list source: an http(s) URL or a local JSON file.
        #[arg(long, value_name = "SRC")]
        templates: Option<String>,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Run {
                input,
                mode,
                reuse,
                concurrency,
                no_shuffle,
                rerun,
                no_wayback,
                no_archive_today,
                templates,
            } => {
                let cfg = apply_run_overrides(
                    cfg,
                    mode,
                    reuse,
                    concurrency,
                    no_shuffle,
                    rerun,
                    no_wayback,
                    no_archive_today,
                );
                let source = templates.unwrap_or_else(|| cfg.template_source().to_string());
                run_submit(&cfg, &input, &source).await?;
            }
            CliCommand::Export {
                input,
                output,
                templates,
            } => {
                let source = templates.unwrap_or_else(|| cfg.template_source().to_string());
                run_export(&input, &source, output.as_deref()).await?;
            }
            CliCommand::Templates { templates } => {
                let source = templates.unwrap_or_else(|| cfg.template_source().to_string());
                run_templates(&source).await?;
            }
        }

        Ok(())
    }
}

#[allow(clippy::too_many_arguments)]
fn apply_run_overrides(
    mut cfg: BackarcConfig,
    mode: Option<ModeArg>,
    reuse: Option<ReuseArg>,
    concurrency: Option<usize>,
    no_shuffle: bool,
    rerun: bool,
    no_wayback: bool,
    no_archive_today: bool,
) -> BackarcConfig {
    if let Some(mode) = mode {
        cfg.mode = mode.into();
    }
    if let Some(reuse) = reuse {
        cfg.reuse = reuse.into();
    }
    if let Some(concurrency) = concurrency {
        cfg.concurrency = concurrency;
    }
    if no_shuffle {
        cfg.shuffle = false;
    }
    if rerun {
        cfg.rerun = true;
    }
    if no_wayback {
        cfg.targets.wayback = false;
    }
    if no_archive_today {
        cfg.targets.archivetoday = false;
    }
    cfg
}
