//! SQL syntax tree for the statements the compiler emits.

mod expr;
pub use expr::{BinaryOp, Expr, ExprBinaryOp, ExprColumn, Func};

mod join;
pub use join::{Join, JoinCondition};

mod select;
pub use select::{Direction, Limit, OrderByExpr, Select, SelectItem, Source};

pub use quarry_core::stmt::Value;
