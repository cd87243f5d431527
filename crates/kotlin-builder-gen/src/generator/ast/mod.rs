mod types;


use serde::{Deserialize, Serialize};
pub use types::{ClassName, TypeName};

use crate::generator::symbols::{ClassDecl, ConstructorDecl, DeclaredType};

/// Name of the generated private function validating required fields.
pub const CHECK_REQUIRED_FIELDS_FUNCTION: &str = "checkRequiredFields";
/// Name of the copy-initializer's parameter.
pub const COPY_SOURCE_PARAMETER: &str = "source";
/// Name of every setter's parameter.
pub const SETTER_PARAMETER: &str = "newValue";
/// Prefix of the failure raised by a generated `build()` when required fields are unset.
pub const MISSING_FIELDS_MESSAGE: &str = "Required fields not set";

/// One builder to generate: the target class and the constructor chosen for it.
#[derive(Debug, Clone)]
pub struct BuilderSpec<'a> {
  pub target: ClassName,
  pub class: &'a ClassDecl,
  pub constructor: &'a ConstructorDecl,
  pub setter_prefix: String,
  pub builder_name: String,
  /// The annotated symbol this spec was extracted from.
  pub origin: String,
}

impl BuilderSpec<'_> {
  pub fn param_count(&self) -> usize {
    self.constructor.parameters.len()
  }

  pub fn qualified_name(&self) -> String {
    self.target.canonical_name()
  }

  pub fn package(&self) -> &str {
    &self.target.package
  }
}

/// Default value of a constructor parameter as recovered from source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "expression", rename_all = "camelCase")]
pub enum DefaultValue {
  /// The parameter declares no default.
  #[default]
  None,
  /// Verbatim source text of the default, comments removed.
  Expression(String),
  /// A default exists but its text could not be recovered; treated as absent.
  Unrecovered,
}

/// A constructor parameter with its resolved type and default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
  pub name: String,
  pub declared_type: DeclaredType,
  /// Effective generated type, top-level nullability included.
  pub type_name: TypeName,
  pub nullable: bool,
  pub has_default: bool,
  pub default: DefaultValue,
  pub nullable_element: bool,
  pub mutable_collection: bool,
  pub line: Option<usize>,
  pub column: Option<usize>,
}

impl ParamSpec {
  pub fn default_expression(&self) -> Option<&str> {
    match &self.default {
      DefaultValue::Expression(expression) => Some(expression),
      DefaultValue::None | DefaultValue::Unrecovered => None,
    }
  }

  /// Must be set explicitly before `build()`: neither nullable nor backed by a recovered default.
  pub fn is_required(&self) -> bool {
    !self.nullable && self.default_expression().is_none()
  }
}

/// A builder spec whose parameters have been resolved.
#[derive(Debug, Clone)]
pub struct ResolvedBuilder<'a> {
  pub spec: BuilderSpec<'a>,
  pub params: Vec<ParamSpec>,
}

impl ResolvedBuilder<'_> {
  pub fn has_defaults(&self) -> bool {
    self.params.iter().any(|param| param.has_default)
  }
}

/// Structural description of a generated builder class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, bon::Builder)]
#[serde(rename_all = "camelCase")]
pub struct BuilderArtifact {
  pub name: String,
  pub package: String,
  pub target: ClassName,
  #[builder(default)]
  pub imports: Vec<Import>,
  #[builder(default)]
  pub properties: Vec<PropertyDef>,
  #[builder(default)]
  pub setters: Vec<SetterDef>,
  pub copy_initializer: CopyInitializerDef,
  #[serde(rename = "build")]
  pub build_function: BuildDef,
  pub required_check: RequiredFieldsCheckDef,
  pub originating_file: Option<String>,
}

impl BuilderArtifact {
  pub fn qualified_name(&self) -> String {
    if self.package.is_empty() {
      self.name.clone()
    } else {
      format!("{}.{}", self.package, self.name)
    }
  }

  pub fn property(&self, name: &str) -> Option<&PropertyDef> {
    self.properties.iter().find(|property| property.name == name)
  }

  pub fn setter(&self, name: &str) -> Option<&SetterDef> {
    self.setters.iter().find(|setter| setter.name == name)
  }
}

/// A file-level import, optionally aliased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Import {
  pub path: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub alias: Option<String>,
}

impl Import {
  pub fn new(path: impl Into<String>) -> Self {
    Self {
      path: path.into(),
      alias: None,
    }
  }

  #[must_use]
  pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
    self.alias = Some(alias.into());
    self
  }
}

/// Mutable builder property, initially `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDef {
  pub name: String,
  /// Always nullable so the unset state is representable.
  pub type_name: TypeName,
}

/// Fluent setter assigning one property and returning the builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetterDef {
  pub name: String,
  pub property: String,
  pub parameter_type: TypeName,
}

/// Secondary constructor copying visible properties from an existing instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyInitializerDef {
  pub parameter: String,
  /// Constructor parameters backed by a non-private property of the target.
  pub copied: Vec<String>,
}

/// Fallback expression spliced into `build()` for an unset defaulted property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultDef {
  pub property: String,
  pub expression: String,
}

/// Named argument passed to the target constructor, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentDef {
  pub name: String,
  /// Argument is asserted non-null (`!!`) when passed.
  pub non_null: bool,
  /// Argument is taken from the default-aware local rather than the property.
  pub defaulted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildDef {
  pub target_reference: String,
  pub defaults: Vec<DefaultDef>,
  pub arguments: Vec<ArgumentDef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredFieldsCheckDef {
  pub function_name: String,
  pub fields: Vec<String>,
}
