mod commands;
mod config;
mod ops;
mod reports;

use eyre::Result;

use crate::commands::{Cli, UsageError};

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = match Cli::parse_lenient(std::env::args_os()) {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // help and version go to stdout and are not failures
            std::process::exit(if err.use_stderr() { 1 } else { 0 });
        }
    };
    init_logging(cli.verbose);

    let result = cli.run();
    if let Err(err) = &result
        && err.downcast_ref::<UsageError>().is_some()
    {
        eprintln!("{}", Cli::usage());
    }
    result
}

/// Logs go to stderr so `--dry-run` output on stdout stays clean.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("HOSTMOCK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
