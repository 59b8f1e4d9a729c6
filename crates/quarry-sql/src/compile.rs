//! Lowers a [`Statement`] into a single SQLite statement.
//!
//! Every selection level becomes a subquery producing one `JSON_OBJECT` per
//! row, folded into `{"rows": [...]}` with `JSON_GROUP_ARRAY`. Nested
//! relationship selections are correlated scalar subqueries embedded in
//! their parent's object.

mod expr;

mod join;
use join::Scope;

mod query;

use crate::{stmt::Value, Serializer};

use quarry_core::{
    schema::Collection,
    stmt::{Relationships, Statement, VariableSet},
    Result, Schema,
};
use serde::Serialize;

/// SQL text and the values bound to its placeholders, in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledPlan {
    pub sql: String,
    pub args: Vec<Value>,
}

/// Compiles `stmt` for one variable set.
///
/// Compilation reads nothing but its arguments, so plans for different
/// variable sets can be compiled independently.
pub fn compile(schema: &Schema, stmt: &Statement, variables: &VariableSet) -> Result<CompiledPlan> {
    let compiler = Compiler {
        schema,
        relationships: &stmt.relationships,
        variables,
        root: schema.collection(&stmt.collection)?,
    };

    let select = compiler.root(&stmt.query)?;

    let mut args = vec![];
    let sql = Serializer::new().serialize(&select, &mut args);

    Ok(CompiledPlan { sql, args })
}

struct Compiler<'a> {
    schema: &'a Schema,

    relationships: &'a Relationships,

    /// Values for variable operands
    variables: &'a VariableSet,

    /// Collection the request is rooted at. Its alias is its name.
    root: &'a Collection,
}

impl CompiledPlan {
    /// Number of `?` placeholders in the SQL text. A `?` inside a quoted
    /// identifier or string literal is not a placeholder.
    pub fn placeholders(&self) -> usize {
        let mut quote = None;
        let mut count = 0;

        // Doubled quotes close and reopen the span, which leaves it open
        for ch in self.sql.chars() {
            match (quote, ch) {
                (None, '\'' | '"') => quote = Some(ch),
                (None, '?') => count += 1,
                (Some(open), _) if ch == open => quote = None,
                _ => {}
            }
        }

        count
    }
}
