use anyhow::Result;
use clap::Parser;
use quarry::Schema;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct CompileCommand {
    /// Directory holding `config.json`
    #[arg(short, long, default_value = ".")]
    config: PathBuf,

    /// Path to the query request document
    request: PathBuf,
}

impl CompileCommand {
    pub(crate) fn run(self) -> Result<()> {
        let schema = Schema::load(&self.config)?;
        let request = crate::read_request(&self.request)?;

        let plans = quarry::compile(&schema, &request)?;

        println!("{}", serde_json::to_string_pretty(&plans)?);
        Ok(())
    }
}
