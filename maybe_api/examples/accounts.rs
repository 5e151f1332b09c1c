use std::sync::Arc;

use maybe_api::{DataLayout, DataType, EvaluatorCacheConfig, Expr, Maybe, Value};
use tracing::Level;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(Level::TRACE)
        .init();

    let mut layout = DataLayout::from_json(
        r#"{
            "type_defns": {
                "Account": { "fields": { "Balance": { "kind": "Float" } } },
                "Person": {
                    "fields": {
                        "Name": { "kind": "String" },
                        "Account": { "kind": "Object", "data": "Account" }
                    }
                }
            }
        }"#,
    )
    .unwrap();
    layout
        .define_method(
            &"Person".into(),
            "GetAccount",
            vec![],
            DataType::object("Account"),
            |this, _| this.field("Account"),
        )
        .unwrap();

    let config = EvaluatorCacheConfig::from_json(r#"{ "capacity": 16 }"#).unwrap();
    let maybe = Maybe::with_config(layout, &config);
    let balance = Expr::root().call("GetAccount", vec![]).field("Balance");
    let person_type = DataType::object("Person");

    let people = serde_json::json!([
        { "Name": "Ada", "Account": { "Balance": 12.5 } },
        { "Name": "Grace" },
    ]);
    for json in people.as_array().unwrap() {
        let person = maybe
            .layout()
            .object_from_json(&"Person".into(), json)
            .unwrap();
        let name = maybe.eval_with(&person_type, &Expr::root().field("Name"), &person);
        match maybe.eval_with(&person_type, &balance, &person) {
            Value::None => println!("{}: no account", name),
            value => println!("{}: {}", name, value),
        }
    }

    let evaluator = maybe.compile(&person_type, &balance);
    assert!(Arc::ptr_eq(&evaluator, &maybe.compile(&person_type, &balance)));
    assert_eq!(maybe.cached_evaluators(), 2);
}
