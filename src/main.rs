mod cli;
mod error;

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use excerpt_config::Config;
use exn::ResultExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::error::{ErrorKind, Result};

fn main() -> ExitCode {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter())))
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        },
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.apply(Config::load(cli.config.as_deref()).or_raise(|| ErrorKind::Config)?);
    let html = cli.read_input()?;
    let excerpt = config.truncator().excerpt(&html).or_raise(|| ErrorKind::Truncate)?;
    info!(
        visible = excerpt.visible(),
        truncated = excerpt.is_truncated(),
        closed = excerpt.closed().len(),
        "truncated input"
    );
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(excerpt.as_str().as_bytes()).or_raise(|| ErrorKind::Output)?;
    stdout.flush().or_raise(|| ErrorKind::Output)
}
