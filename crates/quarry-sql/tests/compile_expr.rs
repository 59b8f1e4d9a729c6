mod support;
use support::*;

use quarry_core::stmt::Value;

use pretty_assertions::assert_eq;
use serde_json::json;

fn filter(predicate: serde_json::Value) -> quarry_sql::CompiledPlan {
    compile(users(json!({
        "fields": { "id": column("id") },
        "predicate": predicate
    })))
    .unwrap()
}

fn where_clause(plan: &quarry_sql::CompiledPlan) -> &str {
    let start = plan.sql.find(" WHERE ").expect("no WHERE clause") + " WHERE ".len();
    let end = plan.sql.len() - r#")) AS "data""#.len();
    &plan.sql[start..end]
}

#[test]
fn empty_combinators_are_tautologies() {
    for ty in ["and", "or"] {
        let plan = filter(json!({ "type": ty, "expressions": [] }));
        assert_eq!(where_clause(&plan), "1");
        assert!(!plan.sql.contains("()"));
    }
}

#[test]
fn combinators() {
    let plan = filter(json!({
        "type": "or",
        "expressions": [
            compare("name", &[], "_eq", json!("a")),
            {
                "type": "and",
                "expressions": [
                    compare("age", &[], "_gt", json!(20)),
                    compare("age", &[], "_lte", json!(30))
                ]
            }
        ]
    }));

    assert_eq!(
        where_clause(&plan),
        r#"("users"."name" = ? OR ("users"."age" > ? AND "users"."age" <= ?))"#
    );
    assert_eq!(
        plan.args,
        [Value::from("a"), Value::Int(20), Value::Int(30)]
    );
}

#[test]
fn not_and_is_null() {
    let plan = filter(json!({
        "type": "not",
        "expression": {
            "type": "unary_comparison_operator",
            "column": target("email", &[]),
            "operator": "is_null"
        }
    }));

    assert_eq!(where_clause(&plan), r#"NOT ("users"."email" IS NULL)"#);
    assert!(plan.args.is_empty());
}

#[test]
fn operators() {
    for (op, sql) in [
        ("_eq", "="),
        ("_neq", "!="),
        ("_like", "LIKE"),
        ("_glob", "GLOB"),
        ("_lt", "<"),
        ("_gt", ">"),
        ("_lte", "<="),
        ("_gte", ">="),
    ] {
        let plan = filter(compare("name", &[], op, json!("x")));
        assert_eq!(where_clause(&plan), format!(r#""users"."name" {sql} ?"#));
    }
}

#[test]
fn composite_values_bind_as_json_text() {
    let plan = filter(compare("name", &[], "_eq", json!(["a", "b"])));
    assert_eq!(plan.args, [Value::from(r#"["a","b"]"#)]);
}

#[test]
fn multi_hop_path() {
    let plan = filter(compare("name", &["org", "country"], "_eq", json!("NZ")));

    assert!(plan.sql.contains(concat!(
        r#"FROM "users" AS "users" "#,
        r#"JOIN "orgs" AS "users_org" ON "users"."org_id" = "users_org"."id" "#,
        r#"JOIN "countries" AS "users_org_country" ON "users_org"."country_id" = "users_org_country"."id" "#,
        r#"WHERE "users_org_country"."name" = ?"#,
    )));
}

#[test]
fn repeated_path_is_joined_once() {
    let plan = filter(json!({
        "type": "and",
        "expressions": [
            compare("name", &["org"], "_eq", json!("Acme")),
            compare("name", &["org"], "_like", json!("A%")),
            compare("name", &["org", "country"], "_eq", json!("NZ"))
        ]
    }));

    assert_eq!(plan.sql.matches(r#"JOIN "orgs""#).count(), 1);
    assert_eq!(plan.sql.matches(r#"JOIN "countries""#).count(), 1);
    assert_eq!(plan.args.len(), 3);
}

#[test]
fn reverse_foreign_key() {
    let plan = compile(json!({
        "collection": "orgs",
        "query": {
            "fields": { "name": column("name") },
            "predicate": compare("name", &["members"], "_eq", json!("ann"))
        },
        "collection_relationships": relationships()
    }))
    .unwrap();

    assert!(
        plan.sql.contains(
            r#"JOIN "users" AS "orgs_members" ON "orgs_members"."org_id" = "orgs"."id" WHERE "orgs_members"."name" = ? GROUP BY "orgs"."id""#
        ),
        "{}",
        plan.sql
    );
}

#[test]
fn exists_keeps_its_joins_inside_the_subquery() {
    let plan = filter(json!({
        "type": "exists",
        "in_collection": { "type": "related", "relationship": "orders", "arguments": {} },
        "predicate": compare("title", &["product"], "_eq", json!("Widget"))
    }));

    assert_eq!(
        where_clause(&plan),
        concat!(
            r#"EXISTS (SELECT 1 FROM "orders" AS "users_exists" "#,
            r#"JOIN "products" AS "users_exists_product" ON "users_exists"."product_id" = "users_exists_product"."id" "#,
            r#"WHERE ("users"."id" = "users_exists"."user_id" AND "users_exists_product"."title" = ?))"#,
        )
    );
    assert_eq!(plan.sql.matches("JOIN").count(), 1);
    assert_eq!(plan.args, [Value::from("Widget")]);
}

#[test]
fn exists_without_predicate() {
    let plan = filter(json!({
        "type": "exists",
        "in_collection": { "type": "related", "relationship": "orders", "arguments": {} }
    }));

    assert_eq!(
        where_clause(&plan),
        r#"EXISTS (SELECT 1 FROM "orders" AS "users_exists" WHERE "users"."id" = "users_exists"."user_id")"#
    );
}

#[test]
fn root_collection_column_inside_exists() {
    let plan = filter(json!({
        "type": "exists",
        "in_collection": { "type": "related", "relationship": "orders", "arguments": {} },
        "predicate": {
            "type": "binary_comparison_operator",
            "column": { "type": "root_collection_column", "name": "name" },
            "operator": "_eq",
            "value": { "type": "scalar", "value": "ann" }
        }
    }));

    assert!(
        where_clause(&plan).ends_with(r#"AND "users"."name" = ?))"#),
        "{}",
        plan.sql
    );
}

#[test]
fn hostile_strings_never_reach_the_sql_text() {
    let hostile = "'); DROP TABLE users; --\"\n\0";
    let plan = filter(json!({
        "type": "or",
        "expressions": [
            compare("name", &[], "_eq", json!(hostile)),
            compare("name", &["org"], "_like", json!(hostile))
        ]
    }));

    assert!(!plan.sql.contains(hostile));
    assert!(!plan.sql.contains("DROP TABLE"));
    assert_eq!(plan.args, [Value::from(hostile), Value::from(hostile)]);
}

#[test]
fn quoted_keys_and_identifiers() {
    let plan = compile(users(json!({
        "fields": { "it's": column("name") }
    })))
    .unwrap();

    assert!(plan.sql.contains(r#"JSON_OBJECT('it''s', "users"."name")"#));
}

#[test]
fn placeholder_parity() {
    let requests = [
        json!({ "type": "and", "expressions": [] }),
        compare("name", &["org", "country"], "_eq", json!("NZ")),
        json!({
            "type": "and",
            "expressions": [
                compare("age", &[], "_gte", json!(1)),
                { "type": "not", "expression": compare("name", &[], "_glob", json!("?*")) },
                {
                    "type": "exists",
                    "in_collection": { "type": "related", "relationship": "orders", "arguments": {} },
                    "predicate": compare("total", &[], "_gt", json!(9.5))
                }
            ]
        }),
    ];

    for predicate in requests {
        let plan = filter(predicate);
        // Every `?` in the text is a placeholder
        assert_eq!(plan.placeholders(), plan.args.len(), "{}", plan.sql);
    }
}

#[test]
fn placeholders_ignore_quoted_names() {
    let plan = compile(users(json!({
        "fields": { "ok?": column("name"), "why?\"": column("id") },
        "predicate": compare("name", &[], "_eq", json!("?"))
    })))
    .unwrap();

    assert_eq!(plan.args, [Value::from("?")]);
    assert_eq!(plan.placeholders(), 1, "{}", plan.sql);
}

#[test]
fn foreign_key_follows_the_column_mapping() {
    let plan = compile_marketplace(
        "sales",
        json!({
            "fields": { "id": column("id") },
            "predicate": {
                "type": "and",
                "expressions": [
                    compare("name", &["seller"], "_eq", json!("sam")),
                    compare("name", &["buyer"], "_eq", json!("bea"))
                ]
            }
        }),
    )
    .unwrap();

    assert!(
        plan.sql.contains(concat!(
            r#"FROM "sales" AS "sales" "#,
            r#"JOIN "people" AS "sales_seller" ON "sales"."seller_id" = "sales_seller"."id" "#,
            r#"JOIN "people" AS "sales_buyer" ON "sales"."buyer_id" = "sales_buyer"."id" "#,
            r#"WHERE ("sales_seller"."name" = ? AND "sales_buyer"."name" = ?)"#,
        )),
        "{}",
        plan.sql
    );
    assert!(!plan.sql.contains("GROUP BY"));
}

#[test]
fn reverse_foreign_key_follows_the_column_mapping() {
    let plan = compile_marketplace(
        "people",
        json!({
            "fields": { "name": column("name") },
            "predicate": compare("total", &["listings"], "_gt", json!(10))
        }),
    )
    .unwrap();

    assert!(
        plan.sql.contains(concat!(
            r#"JOIN "sales" AS "people_listings" ON "people_listings"."seller_id" = "people"."id" "#,
            r#"WHERE "people_listings"."total" > ? GROUP BY "people"."id""#,
        )),
        "{}",
        plan.sql
    );
}

#[test]
fn self_referencing_relationships() {
    let manager = compile_marketplace(
        "people",
        json!({
            "fields": { "name": column("name") },
            "predicate": compare("name", &["manager"], "_eq", json!("boss"))
        }),
    )
    .unwrap();

    assert!(
        manager.sql.contains(concat!(
            r#"JOIN "people" AS "people_manager" ON "people"."manager_id" = "people_manager"."id" "#,
            r#"WHERE "people_manager"."name" = ?"#,
        )),
        "{}",
        manager.sql
    );
    assert!(!manager.sql.contains("GROUP BY"));

    let reports = compile_marketplace(
        "people",
        json!({
            "fields": { "name": column("name") },
            "predicate": compare("name", &["reports"], "_eq", json!("ann"))
        }),
    )
    .unwrap();

    assert!(
        reports.sql.contains(concat!(
            r#"JOIN "people" AS "people_reports" ON "people_reports"."manager_id" = "people"."id" "#,
            r#"WHERE "people_reports"."name" = ? GROUP BY "people"."id""#,
        )),
        "{}",
        reports.sql
    );
}
