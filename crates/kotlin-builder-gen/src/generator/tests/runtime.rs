use serde_json::{Value, json};

use super::fixtures::person_artifact;
use crate::generator::runtime::{Argument, ArgumentError, ArgumentValue, BuilderInstance, Construction};

#[test]
fn test_unknown_setter_is_rejected() {
  let artifact = person_artifact();
  let mut builder = BuilderInstance::new(&artifact);
  let error = builder.set("setName", "Alice").unwrap_err();
  assert_eq!(
    error,
    ArgumentError::UnknownSetter {
      builder: "PersonBuilder".to_string(),
      setter: "setName".to_string(),
    }
  );
  assert_eq!(error.to_string(), "PersonBuilder has no setter named `setName`");
}

#[test]
fn test_null_is_rejected_by_non_nullable_setters() {
  let artifact = person_artifact();
  let mut builder = BuilderInstance::new(&artifact);
  let cases = ["withName", "withAge", "withNickname", "withDates"];
  for setter in cases {
    assert!(
      matches!(builder.set(setter, Value::Null), Err(ArgumentError::NullNotAllowed { .. })),
      "{setter} accepted null"
    );
  }
}

#[test]
fn test_null_clears_nullable_property() {
  let artifact = person_artifact();
  let mut builder = BuilderInstance::new(&artifact);
  builder.set("withEmail", "a@example.com").unwrap();
  assert_eq!(builder.get("email"), Some(&json!("a@example.com")));

  builder.set("withEmail", Value::Null).unwrap();
  assert_eq!(builder.get("email"), None);
}

#[test]
fn test_setters_chain_and_last_write_wins() {
  let artifact = person_artifact();
  let mut builder = BuilderInstance::new(&artifact);
  builder
    .set("withName", "first")
    .unwrap()
    .set("withName", "second")
    .unwrap()
    .set("withAge", 7)
    .unwrap();

  assert_eq!(builder.get("name"), Some(&json!("second")));
  assert_eq!(builder.get("age"), Some(&json!(7)));
}

#[test]
fn test_construction_serializes_argument_kinds() {
  let construction = Construction {
    target: "Person".to_string(),
    arguments: vec![
      Argument {
        name: "nickname".to_string(),
        value: ArgumentValue::Default("defaultNickname()".to_string()),
      },
      Argument {
        name: "email".to_string(),
        value: ArgumentValue::Value(Value::Null),
      },
    ],
  };

  let serialized = serde_json::to_value(&construction).unwrap();
  assert_eq!(
    serialized,
    json!({
      "target": "Person",
      "arguments": [
        { "name": "nickname", "value": { "kind": "default", "value": "defaultNickname()" } },
        { "name": "email", "value": { "kind": "value", "value": null } }
      ]
    })
  );
  assert_eq!(construction.value("email"), None);
  assert_eq!(construction.value("missing"), None);
}
