use super::{Select, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `"alias"."column"`
    Column(ExprColumn),

    /// Unqualified reference to a column of a subquery
    Ident(String),

    /// Bound argument, emitted as a placeholder
    Value(Value),

    /// Integer literal emitted inline. Only used for constants produced by
    /// the compiler.
    Integer(i64),

    BinaryOp(ExprBinaryOp),

    IsNull(Box<Expr>),

    /// Conjunction. Empty renders as the tautology `1`.
    And(Vec<Expr>),

    /// Disjunction. Empty also renders as `1`.
    Or(Vec<Expr>),

    Not(Box<Expr>),

    Exists(Box<Select>),

    /// Parenthesized scalar subquery
    Subquery(Box<Select>),

    Func(Func),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExprColumn {
    /// Table alias
    pub table: String,
    pub column: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprBinaryOp {
    pub lhs: Box<Expr>,
    pub op: BinaryOp,
    pub rhs: Box<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Eq,
    Ne,
    Like,
    Glob,
    Lt,
    Gt,
    Le,
    Ge,
}

/// SQLite JSON functions.
#[derive(Debug, Clone, PartialEq)]
pub enum Func {
    /// `JSON_OBJECT('key', value, ...)`
    JsonObject(Vec<(String, Expr)>),

    /// `JSON_GROUP_ARRAY(expr)`
    JsonGroupArray(Box<Expr>),

    /// `JSON(expr)`
    Json(Box<Expr>),
}

impl Expr {
    pub fn column(table: impl Into<String>, column: impl Into<String>) -> Expr {
        Expr::Column(ExprColumn::new(table, column))
    }

    pub fn binary_op(lhs: impl Into<Expr>, op: BinaryOp, rhs: impl Into<Expr>) -> Expr {
        Expr::BinaryOp(ExprBinaryOp {
            lhs: Box::new(lhs.into()),
            op,
            rhs: Box::new(rhs.into()),
        })
    }

    pub fn eq(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        Expr::binary_op(lhs, BinaryOp::Eq, rhs)
    }

    pub fn is_null(expr: impl Into<Expr>) -> Expr {
        Expr::IsNull(Box::new(expr.into()))
    }

    pub fn not(expr: impl Into<Expr>) -> Expr {
        Expr::Not(Box::new(expr.into()))
    }

    pub fn exists(select: Select) -> Expr {
        Expr::Exists(Box::new(select))
    }

    pub fn subquery(select: Select) -> Expr {
        Expr::Subquery(Box::new(select))
    }

    /// Combines conditions with `AND`, skipping the wrapper when there is at
    /// most one of them. Returns `None` when there are no conditions.
    pub fn and_all(mut operands: Vec<Expr>) -> Option<Expr> {
        match operands.len() {
            0 => None,
            1 => operands.pop(),
            _ => Some(Expr::And(operands)),
        }
    }

    pub fn json_object(entries: Vec<(String, Expr)>) -> Expr {
        Expr::Func(Func::JsonObject(entries))
    }

    pub fn json_group_array(expr: impl Into<Expr>) -> Expr {
        Expr::Func(Func::JsonGroupArray(Box::new(expr.into())))
    }

    pub fn json(expr: impl Into<Expr>) -> Expr {
        Expr::Func(Func::Json(Box::new(expr.into())))
    }
}

impl ExprColumn {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> ExprColumn {
        ExprColumn {
            table: table.into(),
            column: column.into(),
        }
    }
}

impl From<ExprColumn> for Expr {
    fn from(value: ExprColumn) -> Self {
        Expr::Column(value)
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Expr::Value(value)
    }
}

impl From<Func> for Expr {
    fn from(value: Func) -> Self {
        Expr::Func(value)
    }
}

impl BinaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Eq => "=",
            BinaryOp::Ne => "!=",
            BinaryOp::Like => "LIKE",
            BinaryOp::Glob => "GLOB",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
        }
    }
}
