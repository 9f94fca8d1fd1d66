//! subfetch - subtitle lookup by video fingerprint
//!
//! # Usage
//!
//! ```bash
//! subfetch hash movie.mkv
//! subfetch config --path
//! RUST_LOG=subfetch=debug subfetch hash movie.mkv
//! ```

use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use subfetch::cli::{Cli, Command, ExitCode, Output};
use subfetch::commands;

fn main() -> std::process::ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    run_cli(cli).into()
}

/// Run CLI command and return exit code
fn run_cli(cli: Cli) -> ExitCode {
    let output = Output::new(&cli);

    match cli.command {
        Command::Hash(cmd) => commands::hash_cmd(cmd, &output),
        Command::Config(cmd) => commands::config_cmd(cmd, cli.config.as_deref(), &output),
    }
}
