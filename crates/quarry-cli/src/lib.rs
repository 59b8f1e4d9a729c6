mod compile;
pub use compile::CompileCommand;

mod introspect;
pub use introspect::{write_config, IntrospectCommand, WriteOutcome};

mod query;
pub use query::QueryCommand;

use anyhow::{Context, Result};
use clap::Parser;
use quarry::request::QueryRequest;
use std::path::Path;

/// Parse and execute CLI commands from command-line arguments
pub async fn parse_and_run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);
    cli.run().await
}

/// Parse and execute CLI commands from an iterator of arguments
pub async fn parse_from<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(args).run().await
}

#[derive(Parser, Debug)]
#[command(name = "quarry")]
#[command(about = "Quarry CLI - compile collection queries to SQLite and run them")]
#[command(version)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
enum Command {
    /// Print the SQL plans compiled for a request
    Compile(CompileCommand),

    /// Run a request against a SQLite database and print the row sets
    Query(QueryCommand),

    /// Generate `config.json` from an existing SQLite database
    Introspect(IntrospectCommand),
}

impl Cli {
    async fn run(self) -> Result<()> {
        match self.command {
            Command::Compile(cmd) => cmd.run(),
            Command::Query(cmd) => cmd.run().await,
            Command::Introspect(cmd) => cmd.run(),
        }
    }
}

fn init_tracing(cli: &Cli) {
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_request(path: &Path) -> Result<QueryRequest> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read request `{}`", path.display()))?;

    Ok(QueryRequest::from_json(&json)?)
}
