//! Read-only snapshot of the declarations visible to one generation round.
//!
//! The snapshot is produced by an external front end (a compiler plugin or a source indexer) and handed to
//! the generator as JSON. Nothing in this module interprets the declarations; it only models them and offers
//! lookups.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

pub const DEFAULT_COMPANION_NAME: &str = "Companion";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolSnapshot {
  /// Processor options, e.g. `builder.setterPrefix`.
  #[serde(default)]
  pub options: BTreeMap<String, String>,
  #[serde(default)]
  pub sources: Vec<SourceFile>,
  #[serde(default)]
  pub classes: Vec<ClassDecl>,
  /// Symbols carrying the builder annotation, in discovery order.
  #[serde(default)]
  pub annotated: Vec<AnnotatedSymbol>,
}

impl SymbolSnapshot {
  pub fn class(&self, qualified_name: &str) -> Option<&ClassDecl> {
    self.classes.iter().find(|class| class.qualified_name == qualified_name)
  }

  pub fn source(&self, path: &str) -> Option<&SourceFile> {
    self.sources.iter().find(|source| source.path == path)
  }

  /// Source text of the file declaring `class`, if it was captured.
  pub fn source_text_for(&self, class: &ClassDecl) -> Option<&str> {
    class
      .source
      .as_deref()
      .and_then(|path| self.source(path))
      .and_then(|source| source.text.as_deref())
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFile {
  pub path: String,
  #[serde(default)]
  pub package: String,
  /// Inline text; when absent the loader reads `path` from disk.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDecl {
  pub qualified_name: String,
  #[serde(default)]
  pub package: String,
  /// Path of the declaring source file, matching a [`SourceFile::path`].
  #[serde(default)]
  pub source: Option<String>,
  #[serde(default)]
  pub primary_constructor: Option<ConstructorDecl>,
  #[serde(default)]
  pub properties: Vec<PropertyDecl>,
  #[serde(default)]
  pub superclass: Option<String>,
  #[serde(default)]
  pub companion: Option<CompanionDecl>,
}

impl ClassDecl {
  pub fn property(&self, name: &str) -> Option<&PropertyDecl> {
    self.properties.iter().find(|property| property.name == name)
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructorDecl {
  #[serde(default)]
  pub parameters: Vec<ParameterDecl>,
}

impl ConstructorDecl {
  pub fn parameter_names(&self) -> Vec<&str> {
    self.parameters.iter().map(|parameter| parameter.name.as_str()).collect()
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDecl {
  pub name: String,
  #[serde(rename = "type")]
  pub ty: DeclaredType,
  #[serde(default)]
  pub has_default: bool,
  /// 1-based line on which the parameter declaration begins.
  #[serde(default)]
  pub line: Option<usize>,
  /// 1-based column of the declaration start, when known.
  #[serde(default)]
  pub column: Option<usize>,
  #[serde(default)]
  pub annotations: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDecl {
  pub name: String,
  #[serde(default)]
  pub visibility: Visibility,
  #[serde(default)]
  pub annotations: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Visibility {
  #[default]
  Public,
  Internal,
  Protected,
  Private,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanionDecl {
  #[serde(default = "default_companion_name")]
  pub name: String,
  #[serde(default)]
  pub functions: Vec<FunctionDecl>,
}

fn default_companion_name() -> String {
  DEFAULT_COMPANION_NAME.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionDecl {
  pub name: String,
  #[serde(default)]
  pub visibility: Visibility,
  #[serde(default)]
  pub returns_companion: bool,
}

/// JVM primitive types, which are never nullable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PrimitiveKind {
  Boolean,
  Byte,
  Char,
  Short,
  Int,
  Long,
  Float,
  Double,
}

impl PrimitiveKind {
  /// Simple name of the Kotlin class boxing this primitive.
  pub fn kotlin_name(self) -> &'static str {
    match self {
      PrimitiveKind::Boolean => "Boolean",
      PrimitiveKind::Byte => "Byte",
      PrimitiveKind::Char => "Char",
      PrimitiveKind::Short => "Short",
      PrimitiveKind::Int => "Int",
      PrimitiveKind::Long => "Long",
      PrimitiveKind::Float => "Float",
      PrimitiveKind::Double => "Double",
    }
  }
}

/// A parameter type as reported by the symbol model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DeclaredType {
  Primitive {
    name: PrimitiveKind,
  },
  Array {
    element: Box<DeclaredType>,
    /// Explicit nullability of the array itself; `None` leaves the decision to the resolver.
    #[serde(default)]
    nullable: Option<bool>,
  },
  Declared {
    name: String,
    #[serde(default)]
    arguments: Vec<DeclaredType>,
    /// Explicit nullability; `None` leaves the decision to the resolver.
    #[serde(default)]
    nullable: Option<bool>,
  },
}

impl DeclaredType {
  pub fn declared(name: impl Into<String>) -> Self {
    DeclaredType::Declared {
      name: name.into(),
      arguments: Vec::new(),
      nullable: Some(false),
    }
  }

  pub fn nullable(name: impl Into<String>) -> Self {
    DeclaredType::Declared {
      name: name.into(),
      arguments: Vec::new(),
      nullable: Some(true),
    }
  }

  pub fn generic(name: impl Into<String>, arguments: Vec<DeclaredType>) -> Self {
    DeclaredType::Declared {
      name: name.into(),
      arguments,
      nullable: Some(false),
    }
  }

  pub fn array(element: DeclaredType) -> Self {
    DeclaredType::Array {
      element: Box::new(element),
      nullable: Some(false),
    }
  }

  pub fn is_primitive(&self) -> bool {
    matches!(self, DeclaredType::Primitive { .. })
  }
}

/// The value of the annotation's `setterPrefix` argument.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderAnnotation {
  #[serde(default)]
  pub setter_prefix: Option<String>,
}

/// A declaration carrying the builder annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AnnotatedSymbol {
  /// An annotated class; its primary constructor is used.
  Class {
    class: String,
    #[serde(default)]
    annotation: BuilderAnnotation,
  },
  /// An annotated constructor; its enclosing class is the target.
  Constructor {
    #[serde(default)]
    parent: Option<String>,
    constructor: ConstructorDecl,
    #[serde(default)]
    annotation: BuilderAnnotation,
  },
}

impl AnnotatedSymbol {
  pub fn annotation(&self) -> &BuilderAnnotation {
    match self {
      AnnotatedSymbol::Class { annotation, .. } | AnnotatedSymbol::Constructor { annotation, .. } => annotation,
    }
  }

  /// Human readable identity used in diagnostics.
  pub fn describe(&self) -> String {
    match self {
      AnnotatedSymbol::Class { class, .. } => format!("class {class}"),
      AnnotatedSymbol::Constructor {
        parent: Some(parent),
        constructor,
        ..
      } => format!("constructor {parent}({})", constructor.parameter_names().join(", ")),
      AnnotatedSymbol::Constructor {
        parent: None,
        constructor,
        ..
      } => format!("constructor <unknown>({})", constructor.parameter_names().join(", ")),
    }
  }
}
