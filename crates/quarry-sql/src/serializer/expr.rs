use super::{Comma, Delimited, Formatter, Ident, Literal, Params, ToSql};

use crate::stmt;

impl ToSql for &stmt::Expr {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        use stmt::Expr;

        match self {
            Expr::Column(expr) => expr.to_sql(f),
            Expr::Ident(name) => Ident(name).to_sql(f),
            Expr::Value(value) => {
                let placeholder = f.params.push(value);
                placeholder.to_sql(f);
            }
            Expr::Integer(value) => (*value).to_sql(f),
            Expr::BinaryOp(expr) => {
                fmt!(f, &*expr.lhs, " ", expr.op.as_str(), " ", &*expr.rhs);
            }
            Expr::IsNull(expr) => {
                fmt!(f, &**expr, " IS NULL");
            }
            Expr::And(operands) => combinator(f, operands, " AND "),
            Expr::Or(operands) => combinator(f, operands, " OR "),
            Expr::Not(expr) => {
                fmt!(f, "NOT (", &**expr, ")");
            }
            Expr::Exists(select) => {
                fmt!(f, "EXISTS (", &**select, ")");
            }
            Expr::Subquery(select) => {
                fmt!(f, "(", &**select, ")");
            }
            Expr::Func(func) => func.to_sql(f),
        }
    }
}

/// Empty combinators are the tautology `1`.
fn combinator<P: Params>(f: &mut Formatter<'_, P>, operands: &[stmt::Expr], sep: &'static str) {
    if operands.is_empty() {
        fmt!(f, "1");
    } else {
        fmt!(f, "(", Delimited(operands, sep), ")");
    }
}

impl ToSql for &stmt::ExprColumn {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, Ident(&self.table), ".", Ident(&self.column));
    }
}

impl ToSql for &stmt::Func {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            stmt::Func::JsonObject(entries) => {
                let entries = entries.iter().map(|(key, value)| JsonEntry(key, value));
                fmt!(f, "JSON_OBJECT(", Comma(entries), ")");
            }
            stmt::Func::JsonGroupArray(expr) => {
                fmt!(f, "JSON_GROUP_ARRAY(", &**expr, ")");
            }
            stmt::Func::Json(expr) => {
                fmt!(f, "JSON(", &**expr, ")");
            }
        }
    }
}

struct JsonEntry<'a>(&'a str, &'a stmt::Expr);

impl ToSql for JsonEntry<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, Literal(self.0), ", ", self.1);
    }
}
