use std::{collections::HashMap, sync::LazyLock};

use super::annotations::{Capabilities, Marker, capabilities};
use crate::generator::{
  ast::{ClassName, DefaultValue, ParamSpec, TypeName},
  errors::AnnotationMisuseError,
  symbols::{ClassDecl, DeclaredType, ParameterDecl, SymbolSnapshot},
};

const KOTLIN_PACKAGE: &str = "kotlin";
const ARRAY_CLASS: &str = "Array";

/// Platform types and their idiomatic Kotlin names.
static FOREIGN_ALIASES: LazyLock<HashMap<&str, &str>> = LazyLock::new(|| {
  [
    ("java.lang.Object", "kotlin.Any"),
    ("java.lang.String", "kotlin.String"),
    ("java.lang.CharSequence", "kotlin.CharSequence"),
    ("java.lang.Number", "kotlin.Number"),
    ("java.lang.Boolean", "kotlin.Boolean"),
    ("java.lang.Byte", "kotlin.Byte"),
    ("java.lang.Short", "kotlin.Short"),
    ("java.lang.Integer", "kotlin.Int"),
    ("java.lang.Long", "kotlin.Long"),
    ("java.lang.Float", "kotlin.Float"),
    ("java.lang.Double", "kotlin.Double"),
    ("java.lang.Character", "kotlin.Char"),
    ("java.lang.Comparable", "kotlin.Comparable"),
    ("java.lang.Enum", "kotlin.Enum"),
    ("java.lang.Throwable", "kotlin.Throwable"),
    ("java.lang.Cloneable", "kotlin.Cloneable"),
    ("java.lang.annotation.Annotation", "kotlin.Annotation"),
    ("java.lang.Iterable", "kotlin.collections.Iterable"),
    ("java.util.Iterator", "kotlin.collections.Iterator"),
    ("java.util.ListIterator", "kotlin.collections.ListIterator"),
    ("java.util.Collection", "kotlin.collections.Collection"),
    ("java.util.List", "kotlin.collections.List"),
    ("java.util.Set", "kotlin.collections.Set"),
    ("java.util.Map", "kotlin.collections.Map"),
    ("java.util.Map.Entry", "kotlin.collections.Map.Entry"),
  ]
  .into_iter()
  .collect()
});

/// Read-only collection types and the mutable types replacing them under `@Mutable`.
const MUTABLE_COUNTERPARTS: &[(&str, &str)] = &[
  ("kotlin.collections.List", "kotlin.collections.MutableList"),
  ("kotlin.collections.Set", "kotlin.collections.MutableSet"),
  ("kotlin.collections.Collection", "kotlin.collections.MutableCollection"),
  ("kotlin.collections.Map", "kotlin.collections.MutableMap"),
  ("kotlin.collections.Iterator", "kotlin.collections.MutableIterator"),
];

/// Container types that only make sense with type arguments.
const GENERIC_CONTAINERS: &[&str] = &["kotlin.Array", "kotlin.collections.Iterable"];

/// Resolves the generated types of one target's constructor parameters.
pub struct TypeResolver<'a> {
  snapshot: &'a SymbolSnapshot,
  class: &'a ClassDecl,
}

impl<'a> TypeResolver<'a> {
  pub fn new(snapshot: &'a SymbolSnapshot, class: &'a ClassDecl) -> Self {
    Self { snapshot, class }
  }

  /// Computes nullability and the effective generated type of `parameter`.
  ///
  /// The default value is left as declared-only; the scanner fills it in afterwards.
  pub fn resolve_parameter(&self, parameter: &ParameterDecl) -> Result<ParamSpec, AnnotationMisuseError> {
    let caps = capabilities(parameter, self.class);
    let mut type_name = self.to_type_name(&parameter.ty);

    if caps.nullable_element() {
      type_name = Self::with_nullable_element(&parameter.name, type_name)?;
    }
    if caps.mutable_collection() {
      type_name = Self::with_mutable_container(&parameter.name, type_name)?;
    }

    let nullable = Self::is_nullable(&parameter.ty, &caps);

    Ok(ParamSpec {
      name: parameter.name.clone(),
      declared_type: parameter.ty.clone(),
      type_name: type_name.with_nullable(nullable),
      nullable,
      has_default: parameter.has_default,
      default: DefaultValue::None,
      nullable_element: caps.nullable_element(),
      mutable_collection: caps.mutable_collection(),
      line: parameter.line,
      column: parameter.column,
    })
  }

  /// Resolves every parameter, stopping at the first misuse.
  pub fn resolve_parameters(&self, parameters: &[ParameterDecl]) -> Result<Vec<ParamSpec>, AnnotationMisuseError> {
    parameters
      .iter()
      .map(|parameter| self.resolve_parameter(parameter))
      .collect()
  }

  /// Converts a declared type to its Kotlin form; type arguments default to non-null.
  pub fn to_type_name(&self, ty: &DeclaredType) -> TypeName {
    match ty {
      DeclaredType::Primitive { name } => TypeName::new(ClassName::new(KOTLIN_PACKAGE, [name.kotlin_name()])),
      DeclaredType::Array { element, nullable } => TypeName::parameterized(
        ClassName::new(KOTLIN_PACKAGE, [ARRAY_CLASS]),
        vec![self.to_type_name(element)],
      )
      .with_nullable(nullable.unwrap_or(false)),
      DeclaredType::Declared {
        name,
        arguments,
        nullable,
      } => TypeName::parameterized(
        self.class_name(name),
        arguments.iter().map(|argument| self.to_type_name(argument)).collect(),
      )
      .with_nullable(nullable.unwrap_or(false)),
    }
  }

  /// Canonical class for `name`: the Kotlin alias of a platform type, else the name as declared.
  fn class_name(&self, name: &str) -> ClassName {
    if let Some(alias) = FOREIGN_ALIASES.get(name) {
      return ClassName::parse(alias);
    }
    match self.snapshot.class(name) {
      Some(class) => ClassName::in_package(&class.package, name),
      None => ClassName::parse(name),
    }
  }

  fn is_nullable(ty: &DeclaredType, caps: &Capabilities) -> bool {
    match ty {
      DeclaredType::Primitive { .. } => false,
      DeclaredType::Array {
        nullable: Some(nullable),
        ..
      }
      | DeclaredType::Declared {
        nullable: Some(nullable),
        ..
      } => *nullable,
      DeclaredType::Array { nullable: None, .. } | DeclaredType::Declared { nullable: None, .. } => !caps.not_null(),
    }
  }

  /// Marks the last type argument nullable: the element of a collection or the value of a map.
  fn with_nullable_element(parameter: &str, mut type_name: TypeName) -> Result<TypeName, AnnotationMisuseError> {
    Self::ensure_parameterized(parameter, Marker::NullableType, &type_name)?;
    if let Some(last) = type_name.arguments.pop() {
      type_name.arguments.push(last.as_nullable());
    }
    Ok(type_name)
  }

  /// Swaps a read-only collection for its mutable counterpart, keeping type arguments.
  fn with_mutable_container(parameter: &str, type_name: TypeName) -> Result<TypeName, AnnotationMisuseError> {
    Self::ensure_parameterized(parameter, Marker::Mutable, &type_name)?;
    let raw = type_name.raw.canonical_name();
    if MUTABLE_COUNTERPARTS.iter().any(|(_, mutable)| *mutable == raw) {
      return Ok(type_name);
    }
    match MUTABLE_COUNTERPARTS.iter().find(|(immutable, _)| *immutable == raw) {
      Some((_, mutable)) => Ok(type_name.with_raw(ClassName::parse(mutable))),
      None => Err(AnnotationMisuseError::UnsupportedMutableType {
        parameter: parameter.to_string(),
        marker: Marker::Mutable,
        type_name: raw,
      }),
    }
  }

  fn ensure_parameterized(parameter: &str, marker: Marker, type_name: &TypeName) -> Result<(), AnnotationMisuseError> {
    if type_name.is_parameterized() {
      return Ok(());
    }
    let raw = type_name.raw.canonical_name();
    if Self::is_generic_container(&raw) {
      Err(AnnotationMisuseError::NoTypeArguments {
        parameter: parameter.to_string(),
        marker,
        type_name: raw,
      })
    } else {
      Err(AnnotationMisuseError::NotParameterized {
        parameter: parameter.to_string(),
        marker,
        type_name: raw,
      })
    }
  }

  fn is_generic_container(raw: &str) -> bool {
    GENERIC_CONTAINERS.contains(&raw)
      || MUTABLE_COUNTERPARTS
        .iter()
        .any(|(immutable, mutable)| *immutable == raw || *mutable == raw)
  }
}
