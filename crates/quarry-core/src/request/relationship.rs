use super::{Arguments, Expression};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// Pairs of (source field, target field) forming the join condition
    pub column_mapping: IndexMap<String, String>,

    pub relationship_type: RelationshipType,

    pub target_collection: String,

    #[serde(default)]
    pub arguments: Arguments,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    Object,
    Array,
}

/// One hop of a relationship path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathElement {
    pub relationship: String,

    #[serde(default)]
    pub arguments: Arguments,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicate: Option<Box<Expression>>,
}
