use super::ExprColumn;

/// `JOIN "table" AS "alias" ON lhs = rhs`
///
/// Two joins are the same join when every part matches, which is what the
/// per-scope join set deduplicates on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Join {
    pub table: String,
    pub alias: String,
    pub on: JoinCondition,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JoinCondition {
    pub lhs: ExprColumn,
    pub rhs: ExprColumn,
}
