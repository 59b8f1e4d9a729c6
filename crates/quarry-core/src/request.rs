//! Wire types for collection-query requests.
//!
//! These mirror the JSON documents sent by the query engine: unions are
//! tagged with a `type` field and maps keep document order. Requests are
//! lowered into [`crate::stmt::Statement`] before compilation.

mod expression;
pub use expression::{
    ComparisonTarget, ComparisonValue, ExistsInCollection, Expression, UnaryComparisonOperator,
};

mod query;
pub use query::{Aggregate, Field, OrderBy, OrderByElement, OrderByTarget, OrderDirection, Query};

mod relationship;
pub use relationship::{PathElement, Relationship, RelationshipType};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Arguments passed to a collection or relationship. Accepted for
/// compatibility; the compiler does not use them.
pub type Arguments = IndexMap<String, serde_json::Value>;

/// One named-variable binding.
pub type VariableSet = IndexMap<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Root collection of the query
    pub collection: String,

    pub query: Query,

    #[serde(default)]
    pub arguments: Arguments,

    /// Relationships referenced anywhere in the query, by name
    #[serde(default)]
    pub collection_relationships: IndexMap<String, Relationship>,

    /// Variable sets for a batch. `None` runs the query once with no
    /// variables bound.
    #[serde(default)]
    pub variables: Option<Vec<VariableSet>>,
}

impl QueryRequest {
    pub fn from_json(json: &str) -> crate::Result<QueryRequest> {
        serde_json::from_str(json)
            .map_err(|err| crate::Error::configuration_source("malformed query request", err))
    }
}
