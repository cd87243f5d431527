//! In-memory execution of a generated builder.
//!
//! [`BuilderInstance`] follows the semantics of the Kotlin code that [`crate::generator::codegen`] renders
//! for the same [`BuilderArtifact`]: properties start unset, setters assign and chain, the copy constructor
//! copies visible properties, and `build()` substitutes defaults, checks required fields and then constructs
//! the target with named arguments. Values are opaque JSON values; `null` means unset.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::generator::ast::BuilderArtifact;

/// Raised by `build()` when required fields were never set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildFailure {
  #[error("Required fields not set: {}", fields.join(", "))]
  MissingRequiredFields { fields: Vec<String> },
}

/// Raised by a setter call that the generated code would reject at compile time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
  #[error("{builder} has no setter named `{setter}`")]
  UnknownSetter { builder: String, setter: String },
  #[error("setter `{setter}` of {builder} does not accept null")]
  NullNotAllowed { builder: String, setter: String },
}

/// An existing target instance: property values by name, private ones included.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetInstance {
  #[serde(default)]
  pub properties: IndexMap<String, Value>,
}

impl TargetInstance {
  pub fn new(properties: impl IntoIterator<Item = (impl Into<String>, Value)>) -> Self {
    Self {
      properties: properties.into_iter().map(|(name, value)| (name.into(), value)).collect(),
    }
  }

  pub fn get(&self, name: &str) -> Option<&Value> {
    self.properties.get(name)
  }
}

/// The value passed for one constructor argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum ArgumentValue {
  /// A value set on the builder, or `null` for an unset nullable property.
  Value(Value),
  /// The default expression spliced in for an unset defaulted property.
  Default(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
  pub name: String,
  pub value: ArgumentValue,
}

/// The constructor call a successful `build()` performs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Construction {
  pub target: String,
  pub arguments: Vec<Argument>,
}

impl Construction {
  pub fn argument(&self, name: &str) -> Option<&ArgumentValue> {
    self
      .arguments
      .iter()
      .find(|argument| argument.name == name)
      .map(|argument| &argument.value)
  }

  /// The explicitly supplied value of `name`, if any.
  pub fn value(&self, name: &str) -> Option<&Value> {
    match self.argument(name) {
      Some(ArgumentValue::Value(value)) if !value.is_null() => Some(value),
      _ => None,
    }
  }
}

/// One mutable builder, independently owned by its caller.
#[derive(Debug, Clone)]
pub struct BuilderInstance<'a> {
  artifact: &'a BuilderArtifact,
  values: BTreeMap<String, Value>,
}

impl<'a> BuilderInstance<'a> {
  /// The no-argument constructor: every property unset.
  pub fn new(artifact: &'a BuilderArtifact) -> Self {
    Self {
      artifact,
      values: BTreeMap::new(),
    }
  }

  /// The copy constructor: every copyable property takes the instance's current value.
  pub fn from_instance(artifact: &'a BuilderArtifact, source: &TargetInstance) -> Self {
    let values = artifact
      .copy_initializer
      .copied
      .iter()
      .filter_map(|name| source.get(name).map(|value| (name.clone(), value.clone())))
      .filter(|(_, value)| !value.is_null())
      .collect();
    Self { artifact, values }
  }

  /// Invokes a setter by its generated name.
  pub fn set(&mut self, setter: &str, value: impl Into<Value>) -> Result<&mut Self, ArgumentError> {
    let artifact = self.artifact;
    let def = artifact.setter(setter).ok_or_else(|| ArgumentError::UnknownSetter {
      builder: artifact.name.clone(),
      setter: setter.to_string(),
    })?;

    let value = value.into();
    if value.is_null() {
      if !def.parameter_type.nullable {
        return Err(ArgumentError::NullNotAllowed {
          builder: artifact.name.clone(),
          setter: setter.to_string(),
        });
      }
      self.values.remove(&def.property);
    } else {
      self.values.insert(def.property.clone(), value);
    }
    Ok(self)
  }

  /// Current value of a builder property; `None` while unset.
  pub fn get(&self, property: &str) -> Option<&Value> {
    self.values.get(property)
  }

  pub fn build(&self) -> Result<Construction, BuildFailure> {
    let build = &self.artifact.build_function;

    let missing: Vec<String> = self
      .artifact
      .required_check
      .fields
      .iter()
      .filter(|field| !self.values.contains_key(field.as_str()))
      .cloned()
      .collect();
    if !missing.is_empty() {
      return Err(BuildFailure::MissingRequiredFields { fields: missing });
    }

    let arguments = build
      .arguments
      .iter()
      .map(|argument| {
        let value = match self.values.get(&argument.name) {
          Some(value) => ArgumentValue::Value(value.clone()),
          None => build
            .defaults
            .iter()
            .find(|default| default.property == argument.name)
            .map_or(ArgumentValue::Value(Value::Null), |default| {
              ArgumentValue::Default(default.expression.clone())
            }),
        };
        Argument {
          name: argument.name.clone(),
          value,
        }
      })
      .collect();

    Ok(Construction {
      target: build.target_reference.clone(),
      arguments,
    })
  }
}
