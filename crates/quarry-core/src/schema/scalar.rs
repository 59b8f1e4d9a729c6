use crate::{Error, Result};

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The scalar types a field may have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarType {
    String,
    Int,
    Float,
}

impl ScalarType {
    /// Maps a SQLite declared column type to a scalar type.
    ///
    /// Matching is case-insensitive. `BLOB` columns and unrecognized
    /// declarations are rejected.
    pub fn from_declared_type(decl: &str) -> Result<ScalarType> {
        let decl = decl.trim().to_ascii_uppercase();

        match decl.as_str() {
            "TEXT" | "DATETIME" => Ok(ScalarType::String),
            "INTEGER" => Ok(ScalarType::Int),
            "REAL" => Ok(ScalarType::Float),
            "BLOB" => Err(Error::not_implemented("BLOB columns")),
            _ if decl.starts_with("NVARCHAR") => Ok(ScalarType::String),
            _ if decl.starts_with("NUMERIC") => Ok(ScalarType::Float),
            _ => Err(Error::not_implemented(format!(
                "columns with declared type `{decl}`"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScalarType::String => "String",
            ScalarType::Int => "Int",
            ScalarType::Float => "Float",
        }
    }
}

impl FromStr for ScalarType {
    type Err = Error;

    fn from_str(s: &str) -> Result<ScalarType> {
        match s {
            "String" => Ok(ScalarType::String),
            "Int" => Ok(ScalarType::Int),
            "Float" => Ok(ScalarType::Float),
            _ => Err(Error::configuration(format!("unknown scalar type `{s}`"))),
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
