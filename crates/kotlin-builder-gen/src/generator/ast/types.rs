use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Packages whose members are visible in every Kotlin file without an import.
const DEFAULT_IMPORTED_PACKAGES: &[&str] = &[
  "kotlin",
  "kotlin.annotation",
  "kotlin.collections",
  "kotlin.comparisons",
  "kotlin.io",
  "kotlin.ranges",
  "kotlin.sequences",
  "kotlin.text",
];

/// A Kotlin class reference split into its package and (possibly nested) simple names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassName {
  pub package: String,
  pub simple_names: Vec<String>,
}

impl ClassName {
  pub fn new(package: impl Into<String>, simple_names: impl IntoIterator<Item = impl Into<String>>) -> Self {
    Self {
      package: package.into(),
      simple_names: simple_names.into_iter().map(Into::into).collect(),
    }
  }

  /// Splits a qualified name whose package is known, e.g. `com.foo` + `com.foo.Outer.Inner`.
  ///
  /// Falls back to [`ClassName::parse`] when `qualified` does not live in `package`.
  pub fn in_package(package: &str, qualified: &str) -> Self {
    if package.is_empty() {
      return Self::new("", qualified.split('.'));
    }
    match qualified.strip_prefix(package).and_then(|rest| rest.strip_prefix('.')) {
      Some(rest) if !rest.is_empty() => Self::new(package, rest.split('.')),
      _ => Self::parse(qualified),
    }
  }

  /// Splits a qualified name using the JVM naming convention: leading lowercase segments form the package.
  pub fn parse(qualified: &str) -> Self {
    let segments: Vec<&str> = qualified.split('.').collect();
    let first_type = segments
      .iter()
      .position(|segment| segment.chars().next().is_some_and(char::is_uppercase))
      .unwrap_or(segments.len().saturating_sub(1));
    Self::new(segments[..first_type].join("."), segments[first_type..].iter().copied())
  }

  pub fn simple_name(&self) -> &str {
    self.simple_names.last().map_or("", String::as_str)
  }

  /// Dot-joined simple names, e.g. `Outer.Inner`.
  pub fn nested_name(&self) -> String {
    self.simple_names.join(".")
  }

  pub fn canonical_name(&self) -> String {
    if self.package.is_empty() {
      self.nested_name()
    } else {
      format!("{}.{}", self.package, self.nested_name())
    }
  }

  /// The shortest name that resolves to this class from a file in `package`.
  pub fn reference_from(&self, package: &str) -> String {
    if self.package == package || DEFAULT_IMPORTED_PACKAGES.contains(&self.package.as_str()) {
      self.nested_name()
    } else {
      self.canonical_name()
    }
  }
}

impl fmt::Display for ClassName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.canonical_name())
  }
}

/// A resolved Kotlin type: a raw class, its type arguments and its nullability.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeName {
  pub raw: ClassName,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub arguments: Vec<TypeName>,
  #[serde(default)]
  pub nullable: bool,
}

impl TypeName {
  pub fn new(raw: ClassName) -> Self {
    Self {
      raw,
      arguments: Vec::new(),
      nullable: false,
    }
  }

  pub fn parameterized(raw: ClassName, arguments: Vec<TypeName>) -> Self {
    Self {
      raw,
      arguments,
      nullable: false,
    }
  }

  #[must_use]
  pub fn with_nullable(mut self, nullable: bool) -> Self {
    self.nullable = nullable;
    self
  }

  #[must_use]
  pub fn as_nullable(self) -> Self {
    self.with_nullable(true)
  }

  #[must_use]
  pub fn with_raw(mut self, raw: ClassName) -> Self {
    self.raw = raw;
    self
  }

  pub fn is_parameterized(&self) -> bool {
    !self.arguments.is_empty()
  }

  /// Kotlin source form of this type as written from a file in `package`.
  pub fn render(&self, package: &str) -> String {
    let mut result = self.raw.reference_from(package);
    if self.is_parameterized() {
      let arguments = self.arguments.iter().map(|argument| argument.render(package)).join(", ");
      result = format!("{result}<{arguments}>");
    }
    if self.nullable {
      result.push('?');
    }
    result
  }
}

impl fmt::Display for TypeName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.raw)?;
    if self.is_parameterized() {
      write!(f, "<{}>", self.arguments.iter().join(", "))?;
    }
    if self.nullable {
      f.write_str("?")?;
    }
    Ok(())
  }
}
