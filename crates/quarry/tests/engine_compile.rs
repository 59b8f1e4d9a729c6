mod support;

use quarry::{stmt::Value, Engine};
use quarry_driver_sqlite::Sqlite;

use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn one_plan_without_variables() {
    let request = support::request(json!({
        "collection": "users",
        "arguments": {},
        "query": { "fields": { "id": { "type": "column", "column": "id" } } },
        "collection_relationships": {}
    }));

    let plans = quarry::compile(&support::schema(), &request).unwrap();

    assert_eq!(plans.len(), 1);
    assert!(plans[0].args.is_empty());
}

#[test]
fn one_plan_per_variable_set() {
    let request = support::min_age(json!([{ "minAge": 18 }, { "minAge": 21 }, { "minAge": 65 }]));

    let plans = quarry::compile(&support::schema(), &request).unwrap();

    assert_eq!(plans.len(), 3);
    assert_eq!(plans[0].sql, plans[2].sql);

    let args: Vec<_> = plans.iter().map(|plan| plan.args.clone()).collect();
    assert_eq!(
        args,
        [[Value::Int(18)], [Value::Int(21)], [Value::Int(65)]]
    );

    for plan in &plans {
        assert_eq!(plan.placeholders(), plan.args.len());
    }
}

#[test]
fn empty_variable_list_yields_no_plans() {
    let request = support::min_age(json!([]));
    let plans = quarry::compile(&support::schema(), &request).unwrap();
    assert!(plans.is_empty());
}

#[test]
fn missing_variable_fails_the_batch() {
    let request = support::min_age(json!([{ "minAge": 18 }, { "maxAge": 30 }]));

    let err = quarry::compile(&support::schema(), &request).unwrap_err();
    assert!(err.is_unbound_variable(), "{err}");
}

#[test]
fn builder_requires_a_schema() {
    let err = Engine::builder()
        .build(Sqlite::in_memory().unwrap())
        .unwrap_err();

    assert!(err.is_configuration());
}

#[test]
fn builder_rejects_unknown_schemes() {
    let err = Engine::builder()
        .schema(support::schema())
        .connect("mysql://localhost/db")
        .unwrap_err();

    assert!(err.is_configuration());
    assert!(err.to_string().contains("scheme=mysql"), "{err}");
}

#[test]
fn engine_compiles_with_its_schema() {
    let engine = Engine::builder()
        .schema(support::schema())
        .build(Sqlite::in_memory().unwrap())
        .unwrap();

    let request = support::min_age(json!([{ "minAge": 1 }]));

    assert_eq!(
        engine.compile(&request).unwrap(),
        quarry::compile(engine.schema(), &request).unwrap()
    );
}
