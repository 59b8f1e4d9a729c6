mod support;
use support::*;

use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn offset_without_limit() {
    let plan = compile(users(json!({
        "fields": { "id": column("id") },
        "offset": 5
    })))
    .unwrap();

    assert_eq!(
        plan.sql,
        root(r#"SELECT JSON_OBJECT('id', "users"."id") AS "r" FROM "users" AS "users" LIMIT 2147483647 OFFSET 5"#)
    );
}

#[test]
fn limit_then_offset() {
    let plan = compile(users(json!({
        "fields": { "id": column("id") },
        "limit": 10,
        "offset": 5
    })))
    .unwrap();

    assert!(plan.sql.ends_with(r#" LIMIT 10 OFFSET 5)) AS "data""#));
}

#[test]
fn zero_limit_is_kept() {
    let plan = compile(users(json!({
        "fields": { "id": column("id") },
        "limit": 0
    })))
    .unwrap();

    assert!(plan.sql.ends_with(r#" LIMIT 0)) AS "data""#));
}

#[test]
fn order_by_shares_joins_with_the_predicate() {
    let plan = compile(users(json!({
        "fields": { "id": column("id") },
        "predicate": compare("name", &["org"], "_neq", json!("Acme")),
        "order_by": {
            "elements": [
                { "order_direction": "asc", "target": target("name", &["org"]) },
                { "order_direction": "desc", "target": target("age", &[]) }
            ]
        }
    })))
    .unwrap();

    assert_eq!(
        plan.sql,
        root(concat!(
            r#"SELECT JSON_OBJECT('id', "users"."id") AS "r" FROM "users" AS "users" "#,
            r#"JOIN "orgs" AS "users_org" ON "users"."org_id" = "users_org"."id" "#,
            r#"WHERE "users_org"."name" != ? "#,
            r#"ORDER BY "users_org"."name" ASC, "users"."age" DESC"#,
        ))
    );
}

#[test]
fn empty_projection() {
    let plan = compile(users(json!({}))).unwrap();

    assert_eq!(
        plan.sql,
        root(r#"SELECT JSON_OBJECT() AS "r" FROM "users" AS "users""#)
    );
}

#[test]
fn aggregates_are_not_implemented() {
    let err = compile(users(json!({
        "aggregates": { "how_many": { "type": "star_count" } }
    })))
    .unwrap_err();

    assert!(err.is_not_implemented());
    assert_eq!(err.to_string(), "not implemented: aggregates");

    // An empty map asks for nothing
    compile(users(json!({ "aggregates": {} }))).unwrap();
}

#[test]
fn nested_aggregates_are_not_implemented() {
    let err = compile(users(json!({
        "fields": {
            "orders": {
                "type": "relationship",
                "relationship": "orders",
                "arguments": {},
                "query": { "aggregates": { "n": { "type": "column_count", "column": "id", "distinct": true } } }
            }
        }
    })))
    .unwrap_err();

    assert!(err.is_not_implemented());
}

#[test]
fn aggregate_order_targets_are_not_implemented() {
    for target in [
        json!({ "type": "star_count_aggregate", "path": [] }),
        json!({ "type": "single_column_aggregate", "column": "total", "function": "sum", "path": [] }),
    ] {
        let err = compile(users(json!({
            "order_by": { "elements": [{ "order_direction": "asc", "target": target }] }
        })))
        .unwrap_err();

        assert!(err.is_not_implemented(), "{err}");
    }
}

#[test]
fn order_by_paths_follow_the_column_mapping() {
    let plan = compile_marketplace(
        "sales",
        json!({
            "fields": { "id": column("id") },
            "order_by": {
                "elements": [
                    { "order_direction": "asc", "target": target("name", &["seller"]) },
                    { "order_direction": "desc", "target": target("name", &["buyer", "manager"]) }
                ]
            }
        }),
    )
    .unwrap();

    assert_eq!(
        plan.sql,
        root(concat!(
            r#"SELECT JSON_OBJECT('id', "sales"."id") AS "r" FROM "sales" AS "sales" "#,
            r#"JOIN "people" AS "sales_seller" ON "sales"."seller_id" = "sales_seller"."id" "#,
            r#"JOIN "people" AS "sales_buyer" ON "sales"."buyer_id" = "sales_buyer"."id" "#,
            r#"JOIN "people" AS "sales_buyer_manager" ON "sales_buyer"."manager_id" = "sales_buyer_manager"."id" "#,
            r#"ORDER BY "sales_seller"."name" ASC, "sales_buyer_manager"."name" DESC"#,
        ))
    );
}

#[test]
fn to_many_order_paths_keep_one_row_per_parent() {
    let plan = compile_marketplace(
        "people",
        json!({
            "fields": { "name": column("name") },
            "order_by": {
                "elements": [
                    { "order_direction": "desc", "target": target("name", &["reports"]) }
                ]
            },
            "limit": 2
        }),
    )
    .unwrap();

    assert_eq!(
        plan.sql,
        root(concat!(
            r#"SELECT JSON_OBJECT('name', "people"."name") AS "r" FROM "people" AS "people" "#,
            r#"JOIN "people" AS "people_reports" ON "people_reports"."manager_id" = "people"."id" "#,
            r#"GROUP BY "people"."id" "#,
            r#"ORDER BY "people_reports"."name" DESC LIMIT 2"#,
        ))
    );
}
