use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{Generator, generate};
use colored::Colorize;
use reaper::ReaperContext;
use reaper::cli::Cli;
use reaper::config::Verbosity;
use reaper::engine::{self, gate::StdinResponder};
use reaper::registry::RegistryError;
use std::io;
use std::process;
use std::time::SystemTime;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(exit_code(&e));
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        print_completions(shell, &mut Cli::command());
        return Ok(());
    }

    let settings = cli.settings();
    init_tracing(settings.verbosity);

    let mode = cli.mode()?;
    let mut ctx = ReaperContext::open(cli.registry.clone(), settings)?;
    engine::run(
        &mut ctx,
        &mode,
        &mut StdinResponder::stdio(),
        SystemTime::now(),
    )
}

fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.filter_directive()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .try_init();

    if verbosity.is_debug() {
        tracing::debug!(target: "reaper", "diagnostic tracing enabled");
    }
}

/// Registry failures get their own exit codes so scripts can tell them apart.
fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<RegistryError>()
        .map_or(1, RegistryError::exit_code)
}

fn print_completions<G: Generator>(g: G, cmd: &mut clap::Command) {
    generate(g, cmd, cmd.get_name().to_string(), &mut io::stdout());
}
