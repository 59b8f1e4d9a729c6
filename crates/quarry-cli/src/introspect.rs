use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use quarry::schema::{SchemaDocument, CONFIG_FILE_NAME};
use quarry_driver_sqlite::Sqlite;
use std::{fs, path::Path, path::PathBuf};

#[derive(Parser, Debug)]
pub struct IntrospectCommand {
    /// Path to the SQLite database file
    #[arg(short, long)]
    database: PathBuf,

    /// Directory to write `config.json` into
    #[arg(short, long, default_value = ".")]
    output: PathBuf,
}

/// What [`write_config`] did with the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Updated,
    Unchanged,
}

impl IntrospectCommand {
    pub(crate) fn run(self) -> Result<()> {
        let db = Sqlite::open(&self.database)?;
        let document = db.introspect()?;

        let outcome = write_config(&self.output, &document)?;

        let message = match outcome {
            WriteOutcome::Created => style("New file written.").green(),
            WriteOutcome::Updated => style("File updated.").green(),
            WriteOutcome::Unchanged => style("No changes detected.").magenta().dim(),
        };

        println!("{message}");
        Ok(())
    }
}

/// Writes `document` to `<dir>/config.json`, leaving the file untouched
/// when its content would not change.
pub fn write_config(dir: &Path, document: &SchemaDocument) -> Result<WriteOutcome> {
    let path = dir.join(CONFIG_FILE_NAME);
    let json = document.to_json_pretty()?;

    let outcome = match fs::read_to_string(&path) {
        Ok(existing) if existing == json => return Ok(WriteOutcome::Unchanged),
        Ok(_) => WriteOutcome::Updated,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => WriteOutcome::Created,
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read `{}`", path.display()))
        }
    };

    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create `{}`", dir.display()))?;
    fs::write(&path, json).with_context(|| format!("failed to write `{}`", path.display()))?;

    tracing::info!(path = %path.display(), ?outcome, "wrote config");

    Ok(outcome)
}
