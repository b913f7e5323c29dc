//! Library half of the `medknow` binary.
//!
//! Every command renders to a `String` so the binary only has to print it,
//! and tests can call the commands directly.

pub mod cli;
pub mod commands;
pub mod input;

pub use cli::{Cli, Command, Format};

/// Runs one command and returns what should go to stdout.
pub fn run(command: &Command) -> anyhow::Result<String> {
    match command {
        Command::Convert {
            input,
            to,
            pretty,
            output,
        } => commands::convert(input, *to, *pretty, output.as_deref()),
        Command::Inspect { input } => commands::inspect(input),
        Command::Children { input, path } => commands::children(input, path),
        Command::TypeInfo { type_name } => commands::type_info(type_name),
    }
}

/// Initializes the tracing subscriber for logging.
///
/// `RUST_LOG` takes precedence over `level` when set. Logs go to stderr so
/// converted documents on stdout stay clean.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "medknow={level},medknow_cli={level},medknow_serde={level}"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
