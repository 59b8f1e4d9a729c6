use super::{RelationshipId, Value};

use std::fmt;

/// A predicate tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `column IS NULL`
    IsNull(ExprIsNull),

    /// `column <op> operand`
    Compare(ExprCompare),

    /// Conjunction. Empty means true.
    And(ExprAnd),

    /// Disjunction. Empty also means true.
    Or(ExprOr),

    Not(ExprNot),

    /// Correlated existence check
    Exists(ExprExists),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprIsNull {
    pub column: ColumnRef,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprCompare {
    pub column: ColumnRef,
    pub op: BinaryOp,
    pub rhs: Operand,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprAnd {
    pub operands: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprOr {
    pub operands: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprNot {
    pub expr: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprExists {
    pub target: ExistsIn,
    pub predicate: Option<Box<Expr>>,
}

/// Reference to a field, possibly reached through relationship hops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    pub name: String,

    /// Relationships to traverse before resolving `name`
    pub path: Vec<RelationshipId>,

    pub scope: ColumnScope,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnScope {
    /// The collection of the selection or subquery being compiled
    Current,

    /// The root collection of the request
    Root,
}

/// Right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Value(Value),

    /// Named variable, bound from the active variable set
    Variable(String),

    /// Another column. Not supported by the compiler.
    Column(ColumnRef),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinaryOp {
    Eq,
    Ne,
    Like,
    Glob,
    Lt,
    Gt,
    Le,
    Ge,

    /// Operator the compiler does not know
    Custom(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExistsIn {
    Related(RelationshipId),

    /// A collection with no declared relationship. Not supported by the
    /// compiler.
    Unrelated(String),
}

impl Expr {
    pub fn and(operands: impl IntoIterator<Item = Expr>) -> Expr {
        ExprAnd {
            operands: operands.into_iter().collect(),
        }
        .into()
    }

    pub fn or(operands: impl IntoIterator<Item = Expr>) -> Expr {
        ExprOr {
            operands: operands.into_iter().collect(),
        }
        .into()
    }

    pub fn not(expr: impl Into<Expr>) -> Expr {
        ExprNot {
            expr: Box::new(expr.into()),
        }
        .into()
    }

    pub fn is_null(column: ColumnRef) -> Expr {
        ExprIsNull { column }.into()
    }

    pub fn compare(column: ColumnRef, op: BinaryOp, rhs: Operand) -> Expr {
        ExprCompare { column, op, rhs }.into()
    }

    pub fn eq(column: ColumnRef, rhs: impl Into<Value>) -> Expr {
        Expr::compare(column, BinaryOp::Eq, Operand::Value(rhs.into()))
    }
}

impl From<ExprIsNull> for Expr {
    fn from(value: ExprIsNull) -> Self {
        Expr::IsNull(value)
    }
}

impl From<ExprCompare> for Expr {
    fn from(value: ExprCompare) -> Self {
        Expr::Compare(value)
    }
}

impl From<ExprAnd> for Expr {
    fn from(value: ExprAnd) -> Self {
        Expr::And(value)
    }
}

impl From<ExprOr> for Expr {
    fn from(value: ExprOr) -> Self {
        Expr::Or(value)
    }
}

impl From<ExprNot> for Expr {
    fn from(value: ExprNot) -> Self {
        Expr::Not(value)
    }
}

impl From<ExprExists> for Expr {
    fn from(value: ExprExists) -> Self {
        Expr::Exists(value)
    }
}

impl ColumnRef {
    /// A column of the current collection.
    pub fn new(name: impl Into<String>) -> ColumnRef {
        ColumnRef {
            name: name.into(),
            path: vec![],
            scope: ColumnScope::Current,
        }
    }

    /// A column of the root collection.
    pub fn root(name: impl Into<String>) -> ColumnRef {
        ColumnRef {
            name: name.into(),
            path: vec![],
            scope: ColumnScope::Root,
        }
    }

    pub fn with_path(mut self, path: impl IntoIterator<Item = RelationshipId>) -> ColumnRef {
        self.path = path.into_iter().collect();
        self
    }
}

impl BinaryOp {
    /// Parses a protocol operator name such as `_eq` or `_lte`.
    pub fn from_name(name: &str) -> BinaryOp {
        match name {
            "_eq" => BinaryOp::Eq,
            "_neq" => BinaryOp::Ne,
            "_like" => BinaryOp::Like,
            "_glob" => BinaryOp::Glob,
            "_lt" => BinaryOp::Lt,
            "_gt" => BinaryOp::Gt,
            "_lte" => BinaryOp::Le,
            "_gte" => BinaryOp::Ge,
            other => BinaryOp::Custom(other.to_string()),
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, BinaryOp::Custom(_))
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BinaryOp::Eq => "=",
            BinaryOp::Ne => "!=",
            BinaryOp::Like => "LIKE",
            BinaryOp::Glob => "GLOB",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
            BinaryOp::Custom(name) => name,
        })
    }
}
