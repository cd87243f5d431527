use crate::generator::ast::ClassName;

pub const BUILDER_SUFFIX: &str = "Builder";

/// Builder class name for a target: the name relative to its package with `.` replaced by `_`, plus `Builder`.
///
/// `com.example.Outer.Inner` in `com.example` becomes `Outer_InnerBuilder`.
pub fn builder_name(target: &ClassName) -> String {
  format!("{}{BUILDER_SUFFIX}", target.simple_names.join("_"))
}

/// How generated code in `package` refers to the target, e.g. `Outer.Inner` from its own package.
pub fn target_reference(target: &ClassName, package: &str) -> String {
  if target.package == package {
    target.nested_name()
  } else {
    target.canonical_name()
  }
}

/// Uppercases the first character, leaving the rest untouched.
pub fn capitalize(name: &str) -> String {
  let mut chars = name.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => String::new(),
  }
}

/// Setter method name for a property: the bare name without a prefix, otherwise `prefix + Name`.
pub fn setter_name(prefix: &str, property: &str) -> String {
  let prefix = prefix.trim();
  if prefix.is_empty() {
    property.to_string()
  } else {
    format!("{prefix}{}", capitalize(property))
  }
}

/// Relative directory for generated files of `package`, e.g. `com/example`.
pub fn package_path(package: &str) -> String {
  package.split('.').filter(|segment| !segment.is_empty()).collect::<Vec<_>>().join("/")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_setter_names() {
    let cases = [
      ("", "value", "value"),
      ("with", "value", "withValue"),
      ("with", "x", "withX"),
      ("set", "URL", "setURL"),
      ("  with ", "value", "withValue"),
      ("   ", "value", "value"),
      ("with", "élan", "withÉlan"),
    ];
    for (prefix, property, expected) in cases {
      assert_eq!(setter_name(prefix, property), expected, "failed for {prefix:?} + {property:?}");
    }
  }

  #[test]
  fn test_capitalize() {
    assert_eq!(capitalize(""), "");
    assert_eq!(capitalize("a"), "A");
    assert_eq!(capitalize("alreadyCamel"), "AlreadyCamel");
    assert_eq!(capitalize("ß"), "SS");
  }

  #[test]
  fn test_builder_names() {
    let cases = [
      (ClassName::new("com.example", ["SimpleDataClass"]), "SimpleDataClassBuilder"),
      (
        ClassName::new("com.example", ["InnerDataClass", "DataClassInDataClass"]),
        "InnerDataClass_DataClassInDataClassBuilder",
      ),
      (ClassName::new("", ["TopLevel"]), "TopLevelBuilder"),
    ];
    for (target, expected) in cases {
      assert_eq!(builder_name(&target), expected, "failed for {target}");
    }
  }

  #[test]
  fn test_target_reference() {
    let nested = ClassName::new("com.example", ["Outer", "Inner"]);
    assert_eq!(target_reference(&nested, "com.example"), "Outer.Inner");
    assert_eq!(target_reference(&nested, "com.other"), "com.example.Outer.Inner");
  }

  #[test]
  fn test_package_path() {
    assert_eq!(package_path("com.thinkinglogic.example"), "com/thinkinglogic/example");
    assert_eq!(package_path(""), "");
  }
}
