use super::support::{annotated_param, param, platform, primitive, test_class};
use crate::generator::{
  converter::{annotations::Marker, type_resolver::TypeResolver},
  errors::AnnotationMisuseError,
  symbols::{ClassDecl, DeclaredType, ParameterDecl, PrimitiveKind, PropertyDecl, SymbolSnapshot},
};

fn resolve(parameter: &ParameterDecl) -> Result<String, AnnotationMisuseError> {
  let snapshot = SymbolSnapshot::default();
  let class = test_class();
  let resolver = TypeResolver::new(&snapshot, &class);
  resolver
    .resolve_parameter(parameter)
    .map(|spec| spec.type_name.to_string())
}

fn string_map() -> DeclaredType {
  DeclaredType::generic(
    "kotlin.collections.Map",
    vec![DeclaredType::declared("kotlin.String"), DeclaredType::declared("java.time.LocalDate")],
  )
}

#[test]
fn test_primitives_are_never_nullable() {
  let snapshot = SymbolSnapshot::default();
  let class = test_class();
  let resolver = TypeResolver::new(&snapshot, &class);

  let cases = [
    (PrimitiveKind::Int, "kotlin.Int"),
    (PrimitiveKind::Boolean, "kotlin.Boolean"),
    (PrimitiveKind::Char, "kotlin.Char"),
    (PrimitiveKind::Double, "kotlin.Double"),
  ];
  for (kind, expected) in cases {
    let spec = resolver.resolve_parameter(&param("value", primitive(kind))).unwrap();
    assert!(!spec.nullable, "{kind} must not be nullable");
    assert_eq!(spec.type_name.to_string(), expected);
  }
}

#[test]
fn test_reference_types_nullable_unless_marked_not_null() {
  assert_eq!(resolve(&param("name", platform("java.lang.String"))).unwrap(), "kotlin.String?");
  assert_eq!(
    resolve(&annotated_param(
      "name",
      platform("java.lang.String"),
      &["org.jetbrains.annotations.NotNull"]
    ))
    .unwrap(),
    "kotlin.String"
  );
}

#[test]
fn test_explicit_nullability_wins() {
  assert_eq!(resolve(&param("name", DeclaredType::declared("kotlin.String"))).unwrap(), "kotlin.String");
  assert_eq!(resolve(&param("name", DeclaredType::nullable("kotlin.String"))).unwrap(), "kotlin.String?");
  assert_eq!(
    resolve(&annotated_param("name", DeclaredType::nullable("kotlin.String"), &["NotNull"])).unwrap(),
    "kotlin.String?"
  );
}

#[test]
fn test_field_level_not_null_is_honoured() {
  let snapshot = SymbolSnapshot::default();
  let class = ClassDecl {
    properties: vec![PropertyDecl {
      name: "name".to_string(),
      annotations: vec!["NotNull".to_string()],
      ..PropertyDecl::default()
    }],
    ..test_class()
  };
  let resolver = TypeResolver::new(&snapshot, &class);
  let spec = resolver
    .resolve_parameter(&param("name", platform("java.lang.String")))
    .unwrap();
  assert!(!spec.nullable);
}

#[test]
fn test_platform_types_canonicalise_to_kotlin_aliases() {
  let ty = DeclaredType::generic(
    "java.util.Map",
    vec![
      DeclaredType::declared("java.lang.String"),
      DeclaredType::generic("java.util.List", vec![DeclaredType::declared("java.lang.Integer")]),
    ],
  );
  assert_eq!(
    resolve(&param("lookup", ty)).unwrap(),
    "kotlin.collections.Map<kotlin.String, kotlin.collections.List<kotlin.Int>>"
  );
}

#[test]
fn test_unknown_types_pass_through() {
  assert_eq!(
    resolve(&param("id", DeclaredType::declared("com.example.model.CustomerId"))).unwrap(),
    "com.example.model.CustomerId"
  );
}

#[test]
fn test_snapshot_classes_keep_their_package() {
  let snapshot = SymbolSnapshot {
    classes: vec![ClassDecl {
      qualified_name: "com.example.outer.inner".to_string(),
      package: "com.example".to_string(),
      ..ClassDecl::default()
    }],
    ..SymbolSnapshot::default()
  };
  let class = test_class();
  let resolver = TypeResolver::new(&snapshot, &class);
  let spec = resolver
    .resolve_parameter(&param("nested", DeclaredType::declared("com.example.outer.inner")))
    .unwrap();
  assert_eq!(spec.type_name.raw.package, "com.example");
  assert_eq!(spec.type_name.render("com.example"), "outer.inner");
}

#[test]
fn test_arrays_wrap_their_resolved_element() {
  let cases = [
    (
      DeclaredType::Array {
        element: Box::new(primitive(PrimitiveKind::Int)),
        nullable: None,
      },
      "kotlin.Array<kotlin.Int>?",
    ),
    (
      DeclaredType::Array {
        element: Box::new(DeclaredType::array(DeclaredType::declared("java.lang.String"))),
        nullable: None,
      },
      "kotlin.Array<kotlin.Array<kotlin.String>>?",
    ),
    (DeclaredType::array(primitive(PrimitiveKind::Int)), "kotlin.Array<kotlin.Int>"),
    (
      DeclaredType::Array {
        element: Box::new(DeclaredType::declared("kotlin.String")),
        nullable: Some(true),
      },
      "kotlin.Array<kotlin.String>?",
    ),
  ];
  for (ty, expected) in cases {
    assert_eq!(resolve(&param("values", ty)).unwrap(), expected);
  }
}

#[test]
fn test_non_null_array_is_not_nullable() {
  let snapshot = SymbolSnapshot::default();
  let class = test_class();
  let resolver = TypeResolver::new(&snapshot, &class);

  let spec = resolver
    .resolve_parameter(&param("ints", DeclaredType::array(primitive(PrimitiveKind::Int))))
    .unwrap();
  assert!(!spec.nullable);
  assert_eq!(spec.type_name.to_string(), "kotlin.Array<kotlin.Int>");

  let spec = resolver
    .resolve_parameter(&annotated_param(
      "ints",
      DeclaredType::Array {
        element: Box::new(primitive(PrimitiveKind::Int)),
        nullable: Some(true),
      },
      &["NotNull"],
    ))
    .unwrap();
  assert!(spec.nullable, "explicit nullability outranks @NotNull");
}

#[test]
fn test_nullable_element_wraps_last_type_argument() {
  let list = DeclaredType::generic("kotlin.collections.List", vec![DeclaredType::declared("kotlin.Long")]);
  assert_eq!(
    resolve(&annotated_param("ids", list, &["NullableType"])).unwrap(),
    "kotlin.collections.List<kotlin.Long?>"
  );
  assert_eq!(
    resolve(&annotated_param("dates", string_map(), &["NullableType"])).unwrap(),
    "kotlin.collections.Map<kotlin.String, java.time.LocalDate?>"
  );
}

#[test]
fn test_nullable_element_applies_to_arrays() {
  let array = DeclaredType::Array {
    element: Box::new(DeclaredType::declared("kotlin.String")),
    nullable: None,
  };
  assert_eq!(
    resolve(&annotated_param("names", array, &["NullableType", "NotNull"])).unwrap(),
    "kotlin.Array<kotlin.String?>"
  );
}

#[test]
fn test_mutable_swaps_container() {
  let cases = [
    ("kotlin.collections.List", "kotlin.collections.MutableList<kotlin.String>"),
    ("java.util.Set", "kotlin.collections.MutableSet<kotlin.String>"),
    ("kotlin.collections.Collection", "kotlin.collections.MutableCollection<kotlin.String>"),
    ("kotlin.collections.Iterator", "kotlin.collections.MutableIterator<kotlin.String>"),
    ("kotlin.collections.MutableList", "kotlin.collections.MutableList<kotlin.String>"),
  ];
  for (raw, expected) in cases {
    let ty = DeclaredType::generic(raw, vec![DeclaredType::declared("kotlin.String")]);
    assert_eq!(
      resolve(&annotated_param("items", ty, &["Mutable"])).unwrap(),
      expected,
      "failed for {raw}"
    );
  }
}

#[test]
fn test_combined_markers_are_order_independent() {
  let expected = "kotlin.collections.MutableMap<kotlin.String, java.time.LocalDate?>";
  let first = resolve(&annotated_param("dates", string_map(), &["Mutable", "NullableType"])).unwrap();
  let second = resolve(&annotated_param("dates", string_map(), &["NullableType", "Mutable"])).unwrap();
  assert_eq!(first, expected);
  assert_eq!(second, expected);
}

#[test]
fn test_markers_are_recorded_on_the_spec() {
  let snapshot = SymbolSnapshot::default();
  let class = test_class();
  let resolver = TypeResolver::new(&snapshot, &class);
  let spec = resolver
    .resolve_parameter(&annotated_param("dates", string_map(), &["Mutable"]))
    .unwrap();
  assert!(spec.mutable_collection);
  assert!(!spec.nullable_element);
}

#[test]
fn test_nullable_element_on_plain_type_is_misuse() {
  let error = resolve(&annotated_param("name", DeclaredType::declared("kotlin.String"), &["NullableType"])).unwrap_err();
  assert_eq!(
    error,
    AnnotationMisuseError::NotParameterized {
      parameter: "name".to_string(),
      marker: Marker::NullableType,
      type_name: "kotlin.String".to_string(),
    }
  );
}

#[test]
fn test_marker_on_collection_without_arguments_is_misuse() {
  let error = resolve(&annotated_param(
    "raw",
    DeclaredType::declared("java.util.List"),
    &["NullableType"],
  ))
  .unwrap_err();
  assert!(
    matches!(error, AnnotationMisuseError::NoTypeArguments { ref type_name, .. } if type_name == "kotlin.collections.List"),
    "unexpected error {error:?}"
  );
}

#[test]
fn test_mutable_on_unknown_container_is_misuse() {
  let array = DeclaredType::array(DeclaredType::declared("kotlin.String"));
  let error = resolve(&annotated_param("names", array, &["Mutable"])).unwrap_err();
  assert!(
    matches!(error, AnnotationMisuseError::UnsupportedMutableType { ref type_name, .. } if type_name == "kotlin.Array"),
    "unexpected error {error:?}"
  );

  let error = resolve(&annotated_param("count", primitive(PrimitiveKind::Int), &["Mutable"])).unwrap_err();
  assert!(matches!(error, AnnotationMisuseError::NotParameterized { .. }));
}

#[test]
fn test_misuse_message_names_parameter_and_marker() {
  let error = resolve(&annotated_param("name", DeclaredType::declared("kotlin.String"), &["NullableType"])).unwrap_err();
  assert_eq!(
    error.to_string(),
    "@NullableType should not be applied to `name` of non-parameterized type kotlin.String"
  );
}
