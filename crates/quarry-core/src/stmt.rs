//! Typed query representation consumed by the compiler.
//!
//! A [`Statement`] is a request whose relationship names have been resolved
//! into [`RelationshipId`] handles and whose expression and projection trees
//! are closed sum types.

mod expr;
pub use expr::{
    BinaryOp, ColumnRef, ColumnScope, ExistsIn, Expr, ExprAnd, ExprCompare, ExprExists,
    ExprIsNull, ExprNot, ExprOr, Operand,
};

mod lower;

mod query;
pub use query::{Aggregate, Direction, Field, OrderBy, OrderByTarget, Query};

mod relationship;
pub use relationship::{Cardinality, Relationship, RelationshipId, Relationships};

mod value;
pub use value::Value;

mod variables;
pub use variables::VariableSet;

/// A fully resolved query request.
#[derive(Debug, Clone)]
pub struct Statement {
    /// Root collection
    pub collection: String,

    pub query: Query,

    pub relationships: Relationships,

    /// Batch of variable sets. `None` means a single execution with an
    /// empty binding.
    pub variable_sets: Option<Vec<VariableSet>>,
}
