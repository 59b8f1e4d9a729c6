use super::{ColumnRef, Expr, RelationshipId};

use indexmap::IndexMap;

/// One selection level.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    /// Projected fields, keyed by output name
    pub fields: IndexMap<String, Field>,

    /// Requested aggregates, keyed by output name
    pub aggregates: IndexMap<String, Aggregate>,

    pub filter: Option<Expr>,

    pub order_by: Vec<OrderBy>,

    pub limit: Option<u32>,

    pub offset: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    /// A column of the selection's collection
    Column(String),

    /// A nested selection over a relationship
    Relationship {
        relationship: RelationshipId,
        query: Box<Query>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Aggregate {
    ColumnCount { column: String, distinct: bool },
    SingleColumn { column: String, function: String },
    StarCount,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub target: OrderByTarget,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OrderByTarget {
    Column(ColumnRef),

    SingleColumnAggregate {
        column: String,
        function: String,
        path: Vec<RelationshipId>,
    },

    StarCountAggregate {
        path: Vec<RelationshipId>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Query {
    pub fn column(mut self, name: impl Into<String>) -> Query {
        let name = name.into();
        self.fields.insert(name.clone(), Field::Column(name));
        self
    }

    pub fn is_aggregate(&self) -> bool {
        !self.aggregates.is_empty()
    }
}

impl OrderByTarget {
    pub fn is_aggregate(&self) -> bool {
        !matches!(self, OrderByTarget::Column(_))
    }
}
