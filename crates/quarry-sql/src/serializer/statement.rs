use super::{Comma, Formatter, Ident, Params, ToSql};

use crate::stmt;

impl ToSql for &stmt::Select {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, "SELECT ", Comma(&self.projection));

        if let Some(from) = &self.from {
            fmt!(f, " FROM ", from);
        }

        for join in &self.joins {
            fmt!(f, " ", join);
        }

        if let Some(filter) = &self.filter {
            fmt!(f, " WHERE ", filter);
        }

        if !self.group_by.is_empty() {
            fmt!(f, " GROUP BY ", Comma(&self.group_by));
        }

        if !self.order_by.is_empty() {
            fmt!(f, " ORDER BY ", Comma(&self.order_by));
        }

        fmt!(f, self.limit.as_ref());
    }
}

impl ToSql for &stmt::SelectItem {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, &self.expr);

        if let Some(alias) = &self.alias {
            fmt!(f, " AS ", Ident(alias));
        }
    }
}

impl ToSql for &stmt::Source {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            stmt::Source::Table { name, alias } => {
                fmt!(f, Ident(name), " AS ", Ident(alias));
            }
            stmt::Source::Subquery(select) => {
                fmt!(f, "(", &**select, ")");
            }
        }
    }
}

impl ToSql for &stmt::Join {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(
            f,
            "JOIN ",
            Ident(&self.table),
            " AS ",
            Ident(&self.alias),
            " ON ",
            &self.on.lhs,
            " = ",
            &self.on.rhs
        );
    }
}

impl ToSql for &stmt::OrderByExpr {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let direction = match self.direction {
            stmt::Direction::Asc => " ASC",
            stmt::Direction::Desc => " DESC",
        };

        fmt!(f, &self.expr, direction);
    }
}

impl ToSql for &stmt::Limit {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, " LIMIT ", self.limit);

        if let Some(offset) = self.offset {
            fmt!(f, " OFFSET ", offset);
        }
    }
}
