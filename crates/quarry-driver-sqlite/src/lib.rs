mod introspect;

mod value;
pub(crate) use value::Value;

use quarry_core::{
    async_trait,
    driver::{Executor, Response, Row},
    stmt, Error, Result,
};
use rusqlite::Connection;
use std::{
    path::Path,
    sync::{Mutex, MutexGuard, PoisonError},
};
use url::Url;

/// Runs compiled plans against a local SQLite database.
#[derive(Debug)]
pub struct Sqlite {
    connection: Mutex<Connection>,
}

impl Sqlite {
    /// Open a database from a `sqlite:` connection URL. `sqlite::memory:`
    /// opens a fresh in-memory database.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(|err| {
            Error::configuration_source(format!("invalid connection URL `{url_str}`"), err)
        })?;

        if url.scheme() != "sqlite" {
            return Err(Error::configuration(format!(
                "connection URL does not have a `sqlite` scheme; url={url_str}"
            )));
        }

        if url.path() == ":memory:" {
            Self::in_memory()
        } else {
            Self::open(url.path())
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Result<Self> {
        let connection = Connection::open_in_memory().map_err(Error::execution_failed)?;
        Ok(Self::from_connection(connection))
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).map_err(Error::execution_failed)?;
        Ok(Self::from_connection(connection))
    }

    pub fn from_connection(connection: Connection) -> Self {
        Self {
            connection: Mutex::new(connection),
        }
    }

    /// Runs a batch of `;`-separated statements, such as a seed script.
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        self.connection()
            .execute_batch(sql)
            .map_err(Error::execution_failed)
    }

    fn connection(&self) -> MutexGuard<'_, Connection> {
        // A panic while holding the lock leaves the connection itself usable
        self.connection
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn query(&self, sql: &str, args: &[stmt::Value]) -> Result<Vec<Row>> {
        let connection = self.connection();

        let mut stmt = connection
            .prepare_cached(sql)
            .map_err(Error::execution_failed)?;

        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();

        let params = args.iter().map(Value::from);
        let mut rows = stmt
            .query(rusqlite::params_from_iter(params))
            .map_err(Error::execution_failed)?;

        let mut ret = vec![];

        loop {
            match rows.next() {
                Ok(Some(row)) => {
                    let mut item = Row::new();

                    for (index, name) in columns.iter().enumerate() {
                        item.insert(name.clone(), Value::json_from_sql(row, index)?);
                    }

                    ret.push(item);
                }
                Ok(None) => break,
                Err(err) => return Err(Error::execution_failed(err)),
            }
        }

        Ok(ret)
    }
}

#[async_trait]
impl Executor for Sqlite {
    async fn execute(&self, sql: &str, args: &[stmt::Value]) -> Result<Response> {
        tracing::trace!(sql, args = args.len(), "executing on sqlite");

        let rows = self.query(sql, args)?;
        Ok(Response::new(rows))
    }
}
