use anyhow::Result;
use clap::Parser;
use quarry::Engine;
use quarry_driver_sqlite::Sqlite;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct QueryCommand {
    /// Directory holding `config.json`
    #[arg(short, long, default_value = ".")]
    config: PathBuf,

    /// A `sqlite:` connection URL or a path to a database file
    #[arg(short, long)]
    database: String,

    /// Path to the query request document
    request: PathBuf,
}

impl QueryCommand {
    pub(crate) async fn run(self) -> Result<()> {
        let request = crate::read_request(&self.request)?;

        let mut builder = Engine::builder();
        builder.config_dir(&self.config)?;

        let engine = if self.database.starts_with("sqlite:") {
            builder.connect(&self.database)?
        } else {
            builder.build(Sqlite::open(&self.database)?)?
        };

        let row_sets = engine.execute_and_collect(&request).await?;

        println!("{}", serde_json::to_string_pretty(&row_sets)?);
        Ok(())
    }
}
