use super::{join, Compiler, Scope};

use crate::stmt::{self as sql, Select, SelectItem};

use quarry_core::{
    stmt::{self, ColumnRef, ColumnScope, ExistsIn, ExprExists, Operand},
    Error, Result,
};

impl<'a> Compiler<'a> {
    /// Compiles a predicate. Joins its column paths need are registered in
    /// `scope`.
    pub(super) fn expr(&self, scope: &mut Scope<'a>, expr: &stmt::Expr) -> Result<sql::Expr> {
        match expr {
            stmt::Expr::IsNull(expr) => Ok(sql::Expr::is_null(self.column(scope, &expr.column)?)),
            stmt::Expr::Compare(expr) => {
                // Operand errors take precedence over path errors
                let rhs = self.operand(&expr.rhs)?;
                let lhs = self.column(scope, &expr.column)?;
                let op = binary_op(&expr.op)?;

                Ok(sql::Expr::binary_op(lhs, op, rhs))
            }
            stmt::Expr::And(expr) => Ok(sql::Expr::And(self.exprs(scope, &expr.operands)?)),
            stmt::Expr::Or(expr) => Ok(sql::Expr::Or(self.exprs(scope, &expr.operands)?)),
            stmt::Expr::Not(expr) => Ok(sql::Expr::not(self.expr(scope, &expr.expr)?)),
            stmt::Expr::Exists(expr) => self.exists(scope, expr),
        }
    }

    fn exprs(&self, scope: &mut Scope<'a>, exprs: &[stmt::Expr]) -> Result<Vec<sql::Expr>> {
        exprs.iter().map(|expr| self.expr(scope, expr)).collect()
    }

    /// Resolves a column reference to `"alias"."column"`.
    pub(super) fn column(&self, scope: &mut Scope<'a>, column: &ColumnRef) -> Result<sql::Expr> {
        let (collection, alias) = match column.scope {
            ColumnScope::Current => self.resolve_path(scope, &column.path)?,
            ColumnScope::Root => (self.root, self.root.name.clone()),
        };

        collection.field(&column.name)?;

        Ok(sql::Expr::column(alias, &column.name))
    }

    fn operand(&self, operand: &Operand) -> Result<sql::Expr> {
        match operand {
            Operand::Value(value) => Ok(sql::Expr::Value(value.clone())),
            Operand::Variable(name) => Ok(sql::Expr::Value(self.variables.get(name)?.clone())),
            Operand::Column(_) => Err(Error::not_implemented(
                "comparisons against another column",
            )),
        }
    }

    /// `EXISTS (SELECT 1 FROM target ...)` correlated through the
    /// relationship's column mapping. The inner predicate compiles in the
    /// subquery's own scope, so its joins stay inside the subquery.
    fn exists(&self, scope: &mut Scope<'a>, expr: &ExprExists) -> Result<sql::Expr> {
        let id = match &expr.target {
            ExistsIn::Related(id) => *id,
            ExistsIn::Unrelated(_) => {
                return Err(Error::not_implemented(
                    "exists checks against unrelated collections",
                ))
            }
        };

        let relationship = self.relationships.get(id);
        let target = self.schema.collection(&relationship.target_collection)?;
        let mut inner = Scope::new(target, join::exists_alias(&scope.alias));

        let mut filter = self.correlate(relationship, scope, &inner)?;

        if let Some(predicate) = &expr.predicate {
            filter.push(self.expr(&mut inner, predicate)?);
        }

        let from = inner.source();

        Ok(sql::Expr::exists(Select {
            projection: vec![SelectItem {
                expr: sql::Expr::Integer(1),
                alias: None,
            }],
            from: Some(from),
            joins: inner.joins.into_vec(),
            filter: sql::Expr::and_all(filter),
            ..Select::default()
        }))
    }
}

fn binary_op(op: &stmt::BinaryOp) -> Result<sql::BinaryOp> {
    Ok(match op {
        stmt::BinaryOp::Eq => sql::BinaryOp::Eq,
        stmt::BinaryOp::Ne => sql::BinaryOp::Ne,
        stmt::BinaryOp::Like => sql::BinaryOp::Like,
        stmt::BinaryOp::Glob => sql::BinaryOp::Glob,
        stmt::BinaryOp::Lt => sql::BinaryOp::Lt,
        stmt::BinaryOp::Gt => sql::BinaryOp::Gt,
        stmt::BinaryOp::Le => sql::BinaryOp::Le,
        stmt::BinaryOp::Ge => sql::BinaryOp::Ge,
        stmt::BinaryOp::Custom(name) => {
            return Err(Error::not_implemented(format!(
                "binary comparison operator `{name}`"
            )))
        }
    })
}
