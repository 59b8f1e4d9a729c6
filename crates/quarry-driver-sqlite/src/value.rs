use quarry_core::{stmt, Error, Result};
use rusqlite::{
    types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef},
    Row,
};
use serde_json::Value as Json;

/// A bound argument in the form rusqlite accepts.
#[derive(Debug)]
pub struct Value<'a>(&'a stmt::Value);

impl<'a> From<&'a stmt::Value> for Value<'a> {
    fn from(value: &'a stmt::Value) -> Self {
        Self(value)
    }
}

impl Value<'_> {
    /// Reads column `index` of `row` as JSON.
    pub fn json_from_sql(row: &Row<'_>, index: usize) -> Result<Json> {
        let value = row.get_ref(index).map_err(Error::execution_failed)?;

        Ok(match value {
            ValueRef::Null => Json::Null,
            ValueRef::Integer(value) => Json::from(value),
            ValueRef::Real(value) => serde_json::Number::from_f64(value)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            ValueRef::Text(value) => Json::String(String::from_utf8_lossy(value).into_owned()),
            ValueRef::Blob(_) => return Err(Error::not_implemented("BLOB values")),
        })
    }
}

impl ToSql for Value<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        use stmt::Value;

        match self.0 {
            Value::Null => Ok(ToSqlOutput::Owned(SqlValue::Null)),
            Value::Bool(true) => Ok(ToSqlOutput::Owned(SqlValue::Integer(1))),
            Value::Bool(false) => Ok(ToSqlOutput::Owned(SqlValue::Integer(0))),
            Value::Int(v) => Ok(ToSqlOutput::Owned(SqlValue::Integer(*v))),
            Value::Float(v) => Ok(ToSqlOutput::Owned(SqlValue::Real(*v))),
            Value::String(v) => Ok(ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes()))),
        }
    }
}
