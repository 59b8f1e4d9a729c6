use super::{join, Compiler, Scope};

use crate::stmt::{self as sql, Limit, OrderByExpr, Select, SelectItem, Source};

use quarry_core::{
    stmt::{Cardinality, Direction, Field, OrderBy, OrderByTarget, Query, RelationshipId},
    Error, Result,
};

/// Column holding each row's JSON object inside a selection level.
const ROW: &str = "r";

/// Key of the aggregated row array.
const ROWS: &str = "rows";

/// Result column of the root statement.
const DATA: &str = "data";

impl<'a> Compiler<'a> {
    /// `SELECT (<rows>) AS "data"`
    pub(super) fn root(&self, query: &Query) -> Result<Select> {
        let scope = Scope::new(self.root, self.root.name.clone());
        let rows = self.rows(scope, query, vec![], false)?;

        Ok(Select::scalar(
            sql::Expr::subquery(rows),
            Some(DATA.to_string()),
        ))
    }

    /// One selection level, folded into a single `{"rows": [...]}` value.
    /// `correlation` ties the level to its parent; `single_row` caps it at
    /// one row.
    fn rows(
        &self,
        mut scope: Scope<'a>,
        query: &Query,
        correlation: Vec<sql::Expr>,
        single_row: bool,
    ) -> Result<Select> {
        if query.is_aggregate() {
            return Err(Error::not_implemented("aggregates"));
        }

        let mut entries = Vec::with_capacity(query.fields.len());

        for (name, field) in &query.fields {
            let value = match field {
                Field::Column(column) => {
                    scope.collection.field(column)?;
                    sql::Expr::column(&scope.alias, column)
                }
                Field::Relationship {
                    relationship,
                    query,
                } => self.nested(&scope, name, *relationship, query)?,
            };

            entries.push((name.clone(), value));
        }

        let mut filter = correlation;

        if let Some(predicate) = &query.filter {
            filter.push(self.expr(&mut scope, predicate)?);
        }

        let order_by = query
            .order_by
            .iter()
            .map(|order_by| self.order_by(&mut scope, order_by))
            .collect::<Result<Vec<_>>>()?;

        let group_by = if scope.joins.fans_out() {
            row_key(&scope)
        } else {
            vec![]
        };

        let mut limit = query.limit.map(u64::from);

        if single_row {
            limit = Some(limit.map_or(1, |limit| limit.min(1)));
        }

        let from = scope.source();

        let inner = Select {
            projection: vec![SelectItem {
                expr: sql::Expr::json_object(entries),
                alias: Some(ROW.to_string()),
            }],
            from: Some(from),
            joins: scope.joins.into_vec(),
            filter: sql::Expr::and_all(filter),
            group_by,
            order_by,
            limit: Limit::new(limit, query.offset.map(u64::from)),
        };

        let rows = sql::Expr::json_group_array(sql::Expr::json(sql::Expr::Ident(ROW.to_string())));

        Ok(Select {
            projection: vec![SelectItem {
                expr: sql::Expr::json_object(vec![(ROWS.to_string(), rows)]),
                alias: None,
            }],
            from: Some(Source::Subquery(Box::new(inner))),
            ..Select::default()
        })
    }

    /// A relationship field: `JSON((<rows of the target>))`.
    fn nested(
        &self,
        parent: &Scope<'a>,
        field: &str,
        id: RelationshipId,
        query: &Query,
    ) -> Result<sql::Expr> {
        let relationship = self.relationships.get(id);
        let target = self.schema.collection(&relationship.target_collection)?;
        let scope = Scope::new(target, join::nested_alias(&parent.alias, field));

        let correlation = self.correlate(relationship, parent, &scope)?;
        let single_row = relationship.cardinality == Cardinality::Object;

        let rows = self.rows(scope, query, correlation, single_row)?;

        Ok(sql::Expr::json(sql::Expr::subquery(rows)))
    }

    fn order_by(&self, scope: &mut Scope<'a>, order_by: &OrderBy) -> Result<OrderByExpr> {
        let column = match &order_by.target {
            OrderByTarget::Column(column) => column,
            OrderByTarget::SingleColumnAggregate { .. } => {
                return Err(Error::not_implemented(
                    "ordering by single column aggregates",
                ))
            }
            OrderByTarget::StarCountAggregate { .. } => {
                return Err(Error::not_implemented("ordering by star count aggregates"))
            }
        };

        Ok(OrderByExpr {
            expr: self.column(scope, column)?,
            direction: match order_by.direction {
                Direction::Asc => sql::Direction::Asc,
                Direction::Desc => sql::Direction::Desc,
            },
        })
    }
}

/// Columns identifying one row of the scope's collection. Grouping on them
/// folds the copies a to-many join produces back into one row.
fn row_key(scope: &Scope<'_>) -> Vec<sql::Expr> {
    let primary_keys = &scope.collection.primary_keys;

    if primary_keys.is_empty() {
        return vec![sql::Expr::column(&scope.alias, "rowid")];
    }

    primary_keys
        .iter()
        .map(|pk| sql::Expr::column(&scope.alias, pk))
        .collect()
}
