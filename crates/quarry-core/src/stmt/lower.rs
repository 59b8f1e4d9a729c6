use super::{
    Aggregate, BinaryOp, Cardinality, ColumnRef, ColumnScope, Direction, ExistsIn, Expr,
    ExprExists, Field, Operand, OrderBy, OrderByTarget, Query, Relationship, RelationshipId,
    Relationships, Statement, VariableSet,
};
use crate::{request, Error, Result};

impl Statement {
    /// Lowers a wire request, resolving every relationship name it uses.
    pub fn from_request(request: &request::QueryRequest) -> Result<Statement> {
        let mut relationships = Relationships::default();

        for (name, relationship) in &request.collection_relationships {
            relationships.insert(Relationship {
                name: name.clone(),
                target_collection: relationship.target_collection.clone(),
                column_mapping: relationship
                    .column_mapping
                    .iter()
                    .map(|(source, target)| (source.clone(), target.clone()))
                    .collect(),
                cardinality: match relationship.relationship_type {
                    request::RelationshipType::Object => Cardinality::Object,
                    request::RelationshipType::Array => Cardinality::Array,
                },
            });
        }

        let lower = Lower {
            relationships: &relationships,
        };

        let query = lower.query(&request.query)?;

        let variable_sets = request.variables.as_ref().map(|sets| {
            sets.iter()
                .map(|set| {
                    set.iter()
                        .map(|(name, value)| (name.clone(), value.clone()))
                        .collect::<VariableSet>()
                })
                .collect()
        });

        Ok(Statement {
            collection: request.collection.clone(),
            query,
            relationships,
            variable_sets,
        })
    }
}

struct Lower<'a> {
    relationships: &'a Relationships,
}

impl Lower<'_> {
    fn query(&self, query: &request::Query) -> Result<Query> {
        let mut fields = indexmap::IndexMap::new();

        for (name, field) in query.fields.iter().flatten() {
            let field = match field {
                request::Field::Column { column } => Field::Column(column.clone()),
                request::Field::Relationship {
                    query,
                    relationship,
                    ..
                } => Field::Relationship {
                    relationship: self.relationships.resolve(relationship)?,
                    query: Box::new(self.query(query)?),
                },
            };

            fields.insert(name.clone(), field);
        }

        let aggregates = query
            .aggregates
            .iter()
            .flatten()
            .map(|(name, aggregate)| (name.clone(), self.aggregate(aggregate)))
            .collect();

        let filter = query
            .predicate
            .as_ref()
            .map(|predicate| self.expr(predicate))
            .transpose()?;

        let order_by = match &query.order_by {
            Some(order_by) => order_by
                .elements
                .iter()
                .map(|element| self.order_by(element))
                .collect::<Result<_>>()?,
            None => vec![],
        };

        Ok(Query {
            fields,
            aggregates,
            filter,
            order_by,
            limit: query.limit,
            offset: query.offset,
        })
    }

    fn aggregate(&self, aggregate: &request::Aggregate) -> Aggregate {
        match aggregate {
            request::Aggregate::ColumnCount { column, distinct } => Aggregate::ColumnCount {
                column: column.clone(),
                distinct: *distinct,
            },
            request::Aggregate::SingleColumn { column, function } => Aggregate::SingleColumn {
                column: column.clone(),
                function: function.clone(),
            },
            request::Aggregate::StarCount => Aggregate::StarCount,
        }
    }

    fn order_by(&self, element: &request::OrderByElement) -> Result<OrderBy> {
        let target = match &element.target {
            request::OrderByTarget::Column { name, path } => OrderByTarget::Column(ColumnRef {
                name: name.clone(),
                path: self.path(path)?,
                scope: ColumnScope::Current,
            }),
            request::OrderByTarget::SingleColumnAggregate {
                column,
                function,
                path,
            } => OrderByTarget::SingleColumnAggregate {
                column: column.clone(),
                function: function.clone(),
                path: self.path(path)?,
            },
            request::OrderByTarget::StarCountAggregate { path } => {
                OrderByTarget::StarCountAggregate {
                    path: self.path(path)?,
                }
            }
        };

        let direction = match element.order_direction {
            request::OrderDirection::Asc => Direction::Asc,
            request::OrderDirection::Desc => Direction::Desc,
        };

        Ok(OrderBy { target, direction })
    }

    fn expr(&self, expr: &request::Expression) -> Result<Expr> {
        use request::Expression::*;

        Ok(match expr {
            And { expressions } => Expr::and(self.exprs(expressions)?),
            Or { expressions } => Expr::or(self.exprs(expressions)?),
            Not { expression } => Expr::not(self.expr(expression)?),
            UnaryComparisonOperator { column, operator } => match operator {
                request::UnaryComparisonOperator::IsNull => Expr::is_null(self.column(column)?),
            },
            BinaryComparisonOperator {
                column,
                operator,
                value,
            } => Expr::compare(
                self.column(column)?,
                BinaryOp::from_name(operator),
                self.operand(value)?,
            ),
            Exists {
                in_collection,
                predicate,
            } => {
                let target = match in_collection {
                    request::ExistsInCollection::Related { relationship, .. } => {
                        ExistsIn::Related(self.relationships.resolve(relationship)?)
                    }
                    request::ExistsInCollection::Unrelated { collection, .. } => {
                        ExistsIn::Unrelated(collection.clone())
                    }
                };

                let predicate = predicate
                    .as_deref()
                    .map(|predicate| self.expr(predicate).map(Box::new))
                    .transpose()?;

                ExprExists { target, predicate }.into()
            }
        })
    }

    fn exprs(&self, exprs: &[request::Expression]) -> Result<Vec<Expr>> {
        exprs.iter().map(|expr| self.expr(expr)).collect()
    }

    fn column(&self, target: &request::ComparisonTarget) -> Result<ColumnRef> {
        Ok(match target {
            request::ComparisonTarget::Column { name, path } => ColumnRef {
                name: name.clone(),
                path: self.path(path)?,
                scope: ColumnScope::Current,
            },
            request::ComparisonTarget::RootCollectionColumn { name } => ColumnRef::root(name),
        })
    }

    fn operand(&self, value: &request::ComparisonValue) -> Result<Operand> {
        Ok(match value {
            request::ComparisonValue::Scalar { value } => Operand::Value(value.clone().into()),
            request::ComparisonValue::Variable { name } => Operand::Variable(name.clone()),
            request::ComparisonValue::Column { column } => Operand::Column(self.column(column)?),
        })
    }

    fn path(&self, path: &[request::PathElement]) -> Result<Vec<RelationshipId>> {
        path.iter()
            .map(|element| {
                match element.predicate.as_deref() {
                    None => {}
                    Some(request::Expression::And { expressions }) if expressions.is_empty() => {}
                    Some(_) => {
                        return Err(Error::not_implemented(
                            "predicates on relationship path elements",
                        ))
                    }
                }

                self.relationships.resolve(&element.relationship)
            })
            .collect()
    }
}
