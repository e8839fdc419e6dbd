//! CLI entry point for valentine-hub.

use std::io;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};
use valentine_app::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
use valentine_core::Location;

use config::Config;

mod commands;
mod config;
mod tui;

/// A Valentine proposal that lives in your terminal.
#[derive(Parser, Debug)]
#[command(
    name = "valentine",
    version,
    about = "valentine-hub: ask the question, then keep the romance going"
)]
struct Cli {
    /// Preferences file (defaults to the platform data directory).
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    /// Keep preferences in memory only; nothing survives the process.
    #[arg(long, global = true, conflicts_with = "state")]
    ephemeral: bool,

    /// Configuration file (defaults to the platform config directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Launch the interactive terminal UI.
    Tui {
        /// Address to open, e.g. `?view=official&to=Jordan#official-proposal`.
        #[arg(long)]
        url: Option<String>,
    },

    /// Print an invitation link.
    Link {
        #[arg(long)]
        to: String,
        #[arg(long)]
        from: String,
        /// Overrides `link.origin` from the configuration.
        #[arg(long)]
        origin: Option<String>,
    },

    /// Print a message-compose link.
    Share {
        #[arg(long)]
        phone: String,
        #[arg(long)]
        text: String,
    },

    /// Show stored preferences.
    Status,

    /// Forget the acceptance and both names.
    Reset,

    /// Manage the configuration file.
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default configuration.
    Init {
        /// Output path (defaults to the platform config directory).
        #[arg(long)]
        output: Option<PathBuf>,
        /// Overwrite without asking.
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cmd = cli.cmd.unwrap_or(Command::Tui { url: None });

    if should_install_tracing(&cmd) {
        install_tracing();
    }

    if let Command::Config {
        action: ConfigCommand::Init { output, force },
    } = &cmd
    {
        return config::init_config(output.as_deref(), *force);
    }

    let config = config::load_validated(cli.config.as_deref())?;
    if cli.ephemeral {
        return execute_command(MemoryPreferenceStore::new(), config, cmd);
    }
    let path = cli
        .state
        .or_else(FilePreferenceStore::default_path)
        .ok_or_else(|| anyhow!("Could not determine data directory; pass --state or --ephemeral"))?;
    execute_command(FilePreferenceStore::open(path), config, cmd)
}

fn execute_command<S: PreferenceStore>(store: S, config: Config, command: Command) -> Result<()> {
    let mut out = io::stdout().lock();
    match command {
        Command::Tui { url } => {
            let location = url.as_deref().map(Location::parse).unwrap_or_default();
            drop(out);
            tui::run(store, config, location)
        }
        Command::Link { to, from, origin } => {
            commands::print_link(&config, &to, &from, origin.as_deref(), &mut out)
        }
        Command::Share { phone, text } => commands::print_share(&phone, &text, &mut out),
        Command::Status => commands::print_status(&store, &mut out),
        Command::Reset => commands::reset(&store, &mut out),
        Command::Config { .. } => Ok(()),
    }
}

const fn should_install_tracing(cmd: &Command) -> bool {
    !matches!(cmd, Command::Tui { .. })
}

fn install_tracing() {
    // RUST_LOG feeds the filter; INFO otherwise.
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .compact()
        .try_init();
}
