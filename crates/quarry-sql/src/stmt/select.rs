use super::{Expr, Join};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Select {
    pub projection: Vec<SelectItem>,
    pub from: Option<Source>,
    pub joins: Vec<Join>,
    pub filter: Option<Expr>,
    pub group_by: Vec<Expr>,
    pub order_by: Vec<OrderByExpr>,
    pub limit: Option<Limit>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectItem {
    pub expr: Expr,
    pub alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// `"name" AS "alias"`
    Table { name: String, alias: String },

    /// `(SELECT ...)`
    Subquery(Box<Select>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderByExpr {
    pub expr: Expr,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    pub limit: u64,
    pub offset: Option<u64>,
}

impl Select {
    /// `SELECT <expr>` with no source.
    pub fn scalar(expr: impl Into<Expr>, alias: Option<String>) -> Select {
        Select {
            projection: vec![SelectItem {
                expr: expr.into(),
                alias,
            }],
            ..Select::default()
        }
    }
}

impl Limit {
    /// Limit used when only an offset was requested, since SQLite ignores
    /// `OFFSET` without `LIMIT`.
    pub const UNBOUNDED: u64 = i32::MAX as u64;

    /// Builds the clause for an optional limit and offset.
    pub fn new(limit: Option<u64>, offset: Option<u64>) -> Option<Limit> {
        match (limit, offset) {
            (None, None) => None,
            (Some(limit), offset) => Some(Limit { limit, offset }),
            (None, Some(offset)) => Some(Limit {
                limit: Limit::UNBOUNDED,
                offset: Some(offset),
            }),
        }
    }
}
