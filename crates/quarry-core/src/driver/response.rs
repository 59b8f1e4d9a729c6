use crate::{Error, Result};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

/// One result row, column name to value.
pub type Row = Map<String, Json>;

/// Raw rows returned by an [`Executor`](super::Executor).
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Response {
    pub rows: Vec<Row>,
}

/// Rows (and aggregates) produced by one compiled plan.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregates: Option<Map<String, Json>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<Map<String, Json>>>,
}

impl Response {
    pub fn new(rows: Vec<Row>) -> Response {
        Response { rows }
    }

    /// Response holding a single row with a single column.
    pub fn single(column: impl Into<String>, value: impl Into<Json>) -> Response {
        let mut row = Row::new();
        row.insert(column.into(), value.into());
        Response { rows: vec![row] }
    }

    /// Decodes the row set a compiled plan returns: exactly one row, with
    /// exactly one column, holding a JSON document with a `rows` key.
    pub fn into_row_set(self) -> Result<RowSet> {
        let [row] = <[Row; 1]>::try_from(self.rows).map_err(|rows| {
            Error::invalid_result(format!("expected exactly one row, got {}", rows.len()))
        })?;

        if row.len() != 1 {
            return Err(Error::invalid_result(format!(
                "expected exactly one column, got {}",
                row.len()
            )));
        }

        let Some((_, value)) = row.into_iter().next() else {
            return Err(Error::invalid_result("expected exactly one column, got 0"));
        };

        let row_set: RowSet = match value {
            Json::String(text) => serde_json::from_str(&text),
            // Some executors decode JSON columns before returning them
            value @ Json::Object(_) => serde_json::from_value(value),
            other => {
                return Err(Error::invalid_result(format!(
                    "expected a JSON document, got `{other}`"
                )))
            }
        }
        .map_err(|err| Error::invalid_result(format!("malformed row set: {err}")))?;

        if row_set.rows.is_none() {
            return Err(Error::invalid_result("row set is missing `rows`"));
        }

        Ok(row_set)
    }
}

impl RowSet {
    /// The rows, or an empty slice when none were returned.
    pub fn rows(&self) -> &[Map<String, Json>] {
        self.rows.as_deref().unwrap_or_default()
    }
}
