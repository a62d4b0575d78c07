//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod config_cmd;
mod render_cmd;
mod routes_cmd;
mod steps;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use typewriter::config::{Config, LoadOptions, PacingConfig};

#[derive(Parser)]
#[command(name = "typewriter")]
#[command(about = "Reveal markup with a typewriter effect")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

/// Pacing overrides shared by commands that reveal text.
#[derive(Args, Debug, Clone, Default)]
pub struct PacingArgs {
    /// Pause before the first character, in milliseconds
    #[arg(long)]
    start_delay_ms: Option<u64>,
    /// Lower bound of the per-character delay, in milliseconds
    #[arg(long)]
    min_delay_ms: Option<u64>,
    /// Upper bound of the per-character delay, in milliseconds
    #[arg(long)]
    max_delay_ms: Option<u64>,
    /// Seed for reproducible pacing
    #[arg(long, env = "TYPEWRITER_SEED")]
    seed: Option<u64>,
    /// Reveal everything at once
    #[arg(long)]
    instant: bool,
    /// Cancel the reveal after this many seconds
    #[arg(long)]
    timeout: Option<u64>,
}

impl PacingArgs {
    /// Layer these flags over the configured pacing.
    fn apply(&self, mut pacing: PacingConfig) -> PacingConfig {
        if self.instant {
            pacing.start_delay_ms = 0;
            pacing.min_delay_ms = 0;
            pacing.max_delay_ms = 0;
        }
        if let Some(ms) = self.start_delay_ms {
            pacing.start_delay_ms = ms;
        }
        if let Some(ms) = self.min_delay_ms {
            pacing.min_delay_ms = ms;
        }
        if let Some(ms) = self.max_delay_ms {
            pacing.max_delay_ms = ms;
        }
        if self.seed.is_some() {
            pacing.seed = self.seed;
        }
        pacing
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Reveal markup in the terminal
    Render {
        /// Markup to render (reads --file or stdin when omitted)
        markup: Option<String>,
        /// Read markup from a file
        #[arg(short, long, conflicts_with = "markup")]
        file: Option<PathBuf>,
        /// Treat the target as a text input: tags are stripped
        #[arg(long)]
        input: bool,
        /// Clear the target before rendering
        #[arg(long)]
        clear: bool,
        /// Render into an in-memory document and print the resulting markup
        #[arg(long)]
        html: bool,
        #[command(flatten)]
        pacing: PacingArgs,
    },

    /// Browse the assistant step catalog
    Steps {
        #[command(subcommand)]
        command: StepsCommands,
    },

    /// List application routes
    Routes {
        /// Resolve a single path instead of listing all routes
        #[arg(long)]
        resolve: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum StepsCommands {
    /// List all steps
    List {
        /// Output the sidebar step map as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one step and type out its narrative
    Show {
        /// Step ID
        id: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        pacing: PacingArgs,
    },
    /// Print builder node templates as JSON
    Builder {
        /// Number of steps to include (default: all)
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },
    /// List step types and their presentation
    Types,
    /// List data source options
    Sources,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration
    Show,
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config,
    };
    let config = Config::load_with_options(&options).await?;

    match cli.command {
        Commands::Render {
            markup,
            file,
            input,
            clear,
            html,
            pacing,
        } => {
            let source = render_cmd::MarkupSource::from_args(markup, file);
            let mode = render_cmd::RenderMode { input, clear, html };
            render_cmd::cmd_render(&config, source, mode, &pacing).await
        }
        Commands::Steps { command } => match command {
            StepsCommands::List { json } => steps::cmd_steps_list(json),
            StepsCommands::Show { id, json, pacing } => {
                steps::cmd_steps_show(&config, id, json, &pacing).await
            }
            StepsCommands::Builder { count } => steps::cmd_steps_builder(count),
            StepsCommands::Types => steps::cmd_steps_types(),
            StepsCommands::Sources => steps::cmd_steps_sources(),
        },
        Commands::Routes { resolve, json } => routes_cmd::cmd_routes(resolve.as_deref(), json),
        Commands::Config { command } => match command {
            ConfigCommands::Show => config_cmd::cmd_config_show(&config),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_render() {
        let cli = Cli::try_parse_from([
            "typewriter",
            "render",
            "<b>hi</b>",
            "--instant",
            "--html",
            "--timeout",
            "3",
        ])
        .unwrap();
        match cli.command {
            Commands::Render {
                markup,
                html,
                pacing,
                ..
            } => {
                assert_eq!(markup.as_deref(), Some("<b>hi</b>"));
                assert!(html);
                assert!(pacing.instant);
                assert_eq!(pacing.timeout, Some(3));
            }
            _ => panic!("expected render command"),
        }
    }

    #[test]
    fn test_markup_and_file_conflict() {
        let result = Cli::try_parse_from(["typewriter", "render", "x", "--file", "a.html"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_pacing_args_override_config() {
        let args = PacingArgs {
            max_delay_ms: Some(20),
            seed: Some(9),
            ..Default::default()
        };
        let pacing = args.apply(PacingConfig::default());
        assert_eq!(pacing.start_delay_ms, 150);
        assert_eq!(pacing.max_delay_ms, 20);
        assert_eq!(pacing.seed, Some(9));
    }

    #[test]
    fn test_instant_zeroes_delays_before_explicit_flags() {
        let args = PacingArgs {
            instant: true,
            start_delay_ms: Some(5),
            ..Default::default()
        };
        let pacing = args.apply(PacingConfig::default());
        assert_eq!(pacing.start_delay_ms, 5);
        assert_eq!(pacing.min_delay_ms, 0);
        assert_eq!(pacing.max_delay_ms, 0);
    }
}
