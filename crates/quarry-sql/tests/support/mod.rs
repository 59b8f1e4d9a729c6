#![allow(dead_code)]

use quarry_core::{request::QueryRequest, stmt::Statement, stmt::VariableSet, Schema};
use quarry_sql::CompiledPlan;

use serde_json::json;

/// users -> orgs -> countries, orders -> users, orders -> products, and a
/// `tags` collection with no foreign keys at all.
pub fn schema() -> Schema {
    let config = json!({
        "config": {
            "collection_names": ["users", "orgs", "countries", "orders", "products", "tags"],
            "object_fields": {
                "users": {
                    "field_names": ["id", "name", "email", "age", "org_id"],
                    "field_types": { "id": "Int", "name": "String", "email": "String", "age": "Int", "org_id": "Int" },
                    "primary_keys": ["id"],
                    "nullable_keys": ["email", "org_id"],
                    "foreign_keys": { "org_id": { "table": "orgs", "column": "id" } }
                },
                "orgs": {
                    "field_names": ["id", "name", "country_id"],
                    "field_types": { "id": "Int", "name": "String", "country_id": "Int" },
                    "primary_keys": ["id"],
                    "foreign_keys": { "country_id": { "table": "countries", "column": "id" } }
                },
                "countries": {
                    "field_names": ["id", "name"],
                    "field_types": { "id": "Int", "name": "String" },
                    "primary_keys": ["id"]
                },
                "orders": {
                    "field_names": ["id", "user_id", "product_id", "total"],
                    "field_types": { "id": "Int", "user_id": "Int", "product_id": "Int", "total": "Float" },
                    "primary_keys": ["id"],
                    "foreign_keys": {
                        "user_id": { "table": "users", "column": "id" },
                        "product_id": { "table": "products", "column": "id" }
                    }
                },
                "products": {
                    "field_names": ["id", "title"],
                    "field_types": { "id": "Int", "title": "String" },
                    "primary_keys": ["id"]
                },
                "tags": {
                    "field_names": ["id", "label"],
                    "field_types": { "id": "Int", "label": "String" },
                    "primary_keys": ["id"]
                }
            }
        }
    });

    Schema::from_json(&config.to_string()).unwrap()
}

/// Relationships available to every request.
pub fn relationships() -> serde_json::Value {
    json!({
        "org": {
            "column_mapping": { "org_id": "id" },
            "relationship_type": "object",
            "target_collection": "orgs",
            "arguments": {}
        },
        "country": {
            "column_mapping": { "country_id": "id" },
            "relationship_type": "object",
            "target_collection": "countries",
            "arguments": {}
        },
        "orders": {
            "column_mapping": { "id": "user_id" },
            "relationship_type": "array",
            "target_collection": "orders",
            "arguments": {}
        },
        "members": {
            "column_mapping": { "id": "org_id" },
            "relationship_type": "array",
            "target_collection": "users",
            "arguments": {}
        },
        "product": {
            "column_mapping": { "product_id": "id" },
            "relationship_type": "object",
            "target_collection": "products",
            "arguments": {}
        },
        "tags": {
            "column_mapping": { "id": "id" },
            "relationship_type": "array",
            "target_collection": "tags",
            "arguments": {}
        }
    })
}

/// A request on `users`. `query` is the request's `query` body.
pub fn users(query: serde_json::Value) -> serde_json::Value {
    json!({
        "collection": "users",
        "arguments": {},
        "query": query,
        "collection_relationships": relationships()
    })
}

pub fn column(name: &str) -> serde_json::Value {
    json!({ "type": "column", "column": name })
}

pub fn target(name: &str, path: &[&str]) -> serde_json::Value {
    let path: Vec<_> = path
        .iter()
        .map(|relationship| json!({ "relationship": relationship, "arguments": {} }))
        .collect();

    json!({ "type": "column", "name": name, "path": path })
}

pub fn compare(name: &str, path: &[&str], op: &str, value: serde_json::Value) -> serde_json::Value {
    json!({
        "type": "binary_comparison_operator",
        "column": target(name, path),
        "operator": op,
        "value": { "type": "scalar", "value": value }
    })
}

/// `people` who manage each other, and `sales` with a buyer and a seller
/// that are both people.
pub fn marketplace() -> Schema {
    let config = json!({
        "config": {
            "collection_names": ["people", "sales"],
            "object_fields": {
                "people": {
                    "field_names": ["id", "name", "manager_id"],
                    "field_types": { "id": "Int", "name": "String", "manager_id": "Int" },
                    "primary_keys": ["id"],
                    "nullable_keys": ["manager_id"],
                    "foreign_keys": { "manager_id": { "table": "people", "column": "id" } }
                },
                "sales": {
                    "field_names": ["id", "buyer_id", "seller_id", "total"],
                    "field_types": { "id": "Int", "buyer_id": "Int", "seller_id": "Int", "total": "Float" },
                    "primary_keys": ["id"],
                    "foreign_keys": {
                        "buyer_id": { "table": "people", "column": "id" },
                        "seller_id": { "table": "people", "column": "id" }
                    }
                }
            }
        }
    });

    Schema::from_json(&config.to_string()).unwrap()
}

pub fn marketplace_relationships() -> serde_json::Value {
    json!({
        "buyer": {
            "column_mapping": { "buyer_id": "id" },
            "relationship_type": "object",
            "target_collection": "people",
            "arguments": {}
        },
        "seller": {
            "column_mapping": { "seller_id": "id" },
            "relationship_type": "object",
            "target_collection": "people",
            "arguments": {}
        },
        "manager": {
            "column_mapping": { "manager_id": "id" },
            "relationship_type": "object",
            "target_collection": "people",
            "arguments": {}
        },
        "reports": {
            "column_mapping": { "id": "manager_id" },
            "relationship_type": "array",
            "target_collection": "people",
            "arguments": {}
        },
        "purchases": {
            "column_mapping": { "id": "buyer_id" },
            "relationship_type": "array",
            "target_collection": "sales",
            "arguments": {}
        },
        "listings": {
            "column_mapping": { "id": "seller_id" },
            "relationship_type": "array",
            "target_collection": "sales",
            "arguments": {}
        }
    })
}

/// Compiles a request on `collection` against the marketplace schema.
pub fn compile_marketplace(
    collection: &str,
    query: serde_json::Value,
) -> quarry_core::Result<CompiledPlan> {
    let request = json!({
        "collection": collection,
        "arguments": {},
        "query": query,
        "collection_relationships": marketplace_relationships()
    });

    let request = QueryRequest::from_json(&request.to_string())?;
    let stmt = Statement::from_request(&request)?;
    quarry_sql::compile(&marketplace(), &stmt, &VariableSet::new())
}

/// Compiles a request for a single variable set.
pub fn compile_with(
    request: serde_json::Value,
    variables: &VariableSet,
) -> quarry_core::Result<CompiledPlan> {
    let request = QueryRequest::from_json(&request.to_string())?;
    let stmt = Statement::from_request(&request)?;
    quarry_sql::compile(&schema(), &stmt, variables)
}

pub fn compile(request: serde_json::Value) -> quarry_core::Result<CompiledPlan> {
    compile_with(request, &VariableSet::new())
}

/// Wraps the SQL of one selection level the way the compiler does.
pub fn rows(inner: &str) -> String {
    format!(r#"SELECT JSON_OBJECT('rows', JSON_GROUP_ARRAY(JSON("r"))) FROM ({inner})"#)
}

pub fn root(inner: &str) -> String {
    format!(r#"SELECT ({}) AS "data""#, rows(inner))
}
