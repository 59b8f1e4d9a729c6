use super::Engine;
use crate::Result;

use quarry_core::{schema::SchemaDocument, Error, Executor, Schema};

use std::{path::Path, sync::Arc};
use url::Url;

#[derive(Debug, Default)]
pub struct Builder {
    schema: Option<Arc<Schema>>,
}

impl Builder {
    pub fn schema(&mut self, schema: Schema) -> &mut Self {
        self.schema = Some(Arc::new(schema));
        self
    }

    /// Builds the schema from a config document.
    pub fn schema_document(&mut self, document: &SchemaDocument) -> Result<&mut Self> {
        Ok(self.schema(Schema::from_document(document)?))
    }

    /// Loads the schema from `config.json` in a configuration directory.
    pub fn config_dir(&mut self, dir: impl AsRef<Path>) -> Result<&mut Self> {
        Ok(self.schema(Schema::load(dir)?))
    }

    /// Opens the executor named by a connection URL.
    pub fn connect(&mut self, url: &str) -> Result<Engine> {
        let parsed = Url::parse(url).map_err(|err| {
            Error::configuration_source(format!("invalid connection URL `{url}`"), err)
        })?;

        let executor = match parsed.scheme() {
            "sqlite" => connect_sqlite(url)?,
            scheme => {
                return Err(Error::configuration(format!(
                    "unsupported database; scheme={scheme}; url={url}"
                )))
            }
        };

        self.build_shared(executor)
    }

    pub fn build(&mut self, executor: impl Executor) -> Result<Engine> {
        self.build_shared(Arc::new(executor))
    }

    fn build_shared(&mut self, executor: Arc<dyn Executor>) -> Result<Engine> {
        let Some(schema) = self.schema.clone() else {
            return Err(Error::configuration("no schema configured"));
        };

        tracing::debug!(collections = schema.collections().len(), "built engine");

        Ok(Engine { schema, executor })
    }
}

#[cfg(feature = "sqlite")]
fn connect_sqlite(url: &str) -> Result<Arc<dyn Executor>> {
    Ok(Arc::new(quarry_driver_sqlite::Sqlite::new(url)?))
}

#[cfg(not(feature = "sqlite"))]
fn connect_sqlite(_url: &str) -> Result<Arc<dyn Executor>> {
    Err(Error::configuration("`sqlite` feature not enabled"))
}
