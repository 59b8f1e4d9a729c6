#![allow(dead_code)]

use quarry::{request::QueryRequest, Schema};

use serde_json::json;

/// `users` and their `orders`.
pub fn schema() -> Schema {
    let config = json!({
        "config": {
            "collection_names": ["users", "orders"],
            "object_fields": {
                "users": {
                    "field_names": ["id", "name", "age"],
                    "field_types": { "id": "Int", "name": "String", "age": "Int" },
                    "primary_keys": ["id"]
                },
                "orders": {
                    "field_names": ["id", "user_id", "total"],
                    "field_types": { "id": "Int", "user_id": "Int", "total": "Float" },
                    "primary_keys": ["id"],
                    "foreign_keys": { "user_id": { "table": "users", "column": "id" } }
                }
            }
        }
    });

    Schema::from_json(&config.to_string()).unwrap()
}

pub fn request(json: serde_json::Value) -> QueryRequest {
    QueryRequest::from_json(&json.to_string()).unwrap()
}

/// Names of users at least `minAge` old, once per variable set.
pub fn min_age(variables: serde_json::Value) -> QueryRequest {
    request(json!({
        "collection": "users",
        "arguments": {},
        "query": {
            "fields": { "name": { "type": "column", "column": "name" } },
            "predicate": {
                "type": "binary_comparison_operator",
                "column": { "type": "column", "name": "age", "path": [] },
                "operator": "_gte",
                "value": { "type": "variable", "name": "minAge" }
            }
        },
        "collection_relationships": {},
        "variables": variables
    }))
}
