use super::Compiler;

use crate::stmt::{self as sql, ExprColumn, Join, JoinCondition};

use indexmap::IndexSet;
use quarry_core::{
    schema::{Collection, ForeignKey},
    stmt::{Cardinality, Relationship, RelationshipId},
    Error, Result,
};

/// One compilation scope: the collection occurrence being filtered and the
/// joins its predicate and ordering need.
#[derive(Debug)]
pub(super) struct Scope<'a> {
    pub(super) collection: &'a Collection,
    pub(super) alias: String,
    pub(super) joins: JoinSet,
}

/// Joins in first-use order. Identical joins are kept once.
#[derive(Debug, Default)]
pub(super) struct JoinSet {
    joins: IndexSet<Join>,

    /// Set once a join may match several rows per row of the scope
    fans_out: bool,
}

impl<'a> Scope<'a> {
    pub(super) fn new(collection: &'a Collection, alias: String) -> Scope<'a> {
        Scope {
            collection,
            alias,
            joins: JoinSet::default(),
        }
    }

    pub(super) fn source(&self) -> sql::Source {
        sql::Source::Table {
            name: self.collection.name.clone(),
            alias: self.alias.clone(),
        }
    }
}

impl JoinSet {
    /// Returns `false` if an identical join was already registered.
    pub(super) fn insert(&mut self, join: Join) -> bool {
        self.joins.insert(join)
    }

    pub(super) fn mark_fan_out(&mut self) {
        self.fans_out = true;
    }

    /// Whether the joins can repeat a row of the scope's collection.
    pub(super) fn fans_out(&self) -> bool {
        self.fans_out
    }

    pub(super) fn into_vec(self) -> Vec<Join> {
        self.joins.into_iter().collect()
    }
}

/// Alias of a nested selection.
pub(super) fn nested_alias(parent: &str, field: &str) -> String {
    format!("{parent}_{field}")
}

/// Alias of the collection reached by following `relationship` from
/// `current`.
pub(super) fn join_alias(current: &str, relationship: &str) -> String {
    format!("{current}_{relationship}")
}

/// Alias of the target of an `EXISTS` subquery.
pub(super) fn exists_alias(current: &str) -> String {
    format!("{current}_exists")
}

impl<'a> Compiler<'a> {
    /// Follows `path` from the scope's collection, registering one join per
    /// hop. Returns the collection and alias of the last hop.
    pub(super) fn resolve_path(
        &self,
        scope: &mut Scope<'a>,
        path: &[RelationshipId],
    ) -> Result<(&'a Collection, String)> {
        let mut collection = scope.collection;
        let mut alias = scope.alias.clone();

        for &id in path {
            let relationship = self.relationships.get(id);
            let target = self.schema.collection(&relationship.target_collection)?;
            let target_alias = join_alias(&alias, &relationship.name);

            let (on, reverse) =
                self.join_condition(relationship, collection, &alias, target, &target_alias)?;

            // A key on the target pointing back is a to-many hop
            if reverse || relationship.cardinality == Cardinality::Array {
                scope.joins.mark_fan_out();
            }

            scope.joins.insert(Join {
                table: target.name.clone(),
                alias: target_alias.clone(),
                on,
            });

            collection = target;
            alias = target_alias;
        }

        Ok((collection, alias))
    }

    /// Infers the join condition for one hop from foreign keys.
    ///
    /// A key agreeing with the relationship's column mapping is preferred,
    /// forward before reverse. Without one, the first key on the current
    /// collection wins over the first key on the target pointing back.
    /// Also returns whether the chosen key is on the target.
    fn join_condition(
        &self,
        relationship: &Relationship,
        current: &Collection,
        current_alias: &str,
        target: &Collection,
        target_alias: &str,
    ) -> Result<(JoinCondition, bool)> {
        let mapped = |from: &str, to: &str| {
            relationship
                .column_mapping
                .iter()
                .any(|(source, target)| source == from && target == to)
        };

        let forward: Vec<_> = current.foreign_keys_to(&target.name).collect();
        let reverse: Vec<_> = self
            .schema
            .foreign_keys_targeting(&current.name)
            .filter(|(owner, _, _)| owner.name == target.name)
            .map(|(_, field, fk)| (field, fk))
            .collect();

        let forward_join = |(field, fk): (&str, &ForeignKey)| JoinCondition {
            lhs: ExprColumn::new(current_alias, field),
            rhs: ExprColumn::new(target_alias, &fk.column),
        };

        let reverse_join = |(field, fk): (&str, &ForeignKey)| JoinCondition {
            lhs: ExprColumn::new(target_alias, field),
            rhs: ExprColumn::new(current_alias, &fk.column),
        };

        // Forward keys read `current.field -> target.column`, reverse keys
        // `target.field -> current.column`; the mapping is `current -> target`.
        let condition = forward
            .iter()
            .find(|(field, fk)| mapped(*field, fk.column.as_str()))
            .map(|&key| (forward_join(key), false))
            .or_else(|| {
                reverse
                    .iter()
                    .find(|(field, fk)| mapped(fk.column.as_str(), *field))
                    .map(|&key| (reverse_join(key), true))
            })
            .or_else(|| forward.first().map(|&key| (forward_join(key), false)))
            .or_else(|| reverse.first().map(|&key| (reverse_join(key), true)));

        condition.ok_or_else(|| {
            Error::unresolvable_relationship(
                &relationship.name,
                format!(
                    "no foreign key between `{}` and `{}`",
                    current.name, target.name
                ),
            )
        })
    }

    /// Conditions tying a child occurrence to its parent through the
    /// relationship's column mapping.
    pub(super) fn correlate(
        &self,
        relationship: &Relationship,
        parent: &Scope<'a>,
        child: &Scope<'a>,
    ) -> Result<Vec<sql::Expr>> {
        relationship
            .column_mapping
            .iter()
            .map(|(source, target)| {
                parent.collection.field(source)?;
                child.collection.field(target)?;

                Ok(sql::Expr::eq(
                    ExprColumn::new(&parent.alias, source),
                    ExprColumn::new(&child.alias, target),
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn join(alias: &str) -> Join {
        Join {
            table: "orgs".to_string(),
            alias: alias.to_string(),
            on: JoinCondition {
                lhs: ExprColumn::new("users", "org_id"),
                rhs: ExprColumn::new(alias, "id"),
            },
        }
    }

    #[test]
    fn join_set_dedups_structurally() {
        let mut joins = JoinSet::default();

        assert!(joins.insert(join("users_org")));
        assert!(!joins.insert(join("users_org")));
        assert!(joins.insert(join("users_employer")));
        assert!(!joins.fans_out());

        joins.mark_fan_out();
        assert!(joins.fans_out());

        let aliases: Vec<_> = joins.into_vec().into_iter().map(|j| j.alias).collect();
        assert_eq!(aliases, ["users_org", "users_employer"]);
    }

    #[test]
    fn aliases() {
        assert_eq!(nested_alias("users", "orders"), "users_orders");
        assert_eq!(join_alias("users_orders", "product"), "users_orders_product");
        assert_eq!(exists_alias("users"), "users_exists");
    }
}
