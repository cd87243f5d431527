use crate::generator::symbols::{ClassDecl, DeclaredType, ParameterDecl, PrimitiveKind};

pub(super) fn param(name: &str, ty: DeclaredType) -> ParameterDecl {
  ParameterDecl {
    name: name.to_string(),
    ty,
    has_default: false,
    line: None,
    column: None,
    annotations: Vec::new(),
  }
}

pub(super) fn annotated_param(name: &str, ty: DeclaredType, annotations: &[&str]) -> ParameterDecl {
  ParameterDecl {
    annotations: annotations.iter().map(ToString::to_string).collect(),
    ..param(name, ty)
  }
}

pub(super) fn primitive(kind: PrimitiveKind) -> DeclaredType {
  DeclaredType::Primitive { name: kind }
}

pub(super) fn platform(name: &str) -> DeclaredType {
  DeclaredType::Declared {
    name: name.to_string(),
    arguments: Vec::new(),
    nullable: None,
  }
}

pub(super) fn test_class() -> ClassDecl {
  ClassDecl {
    qualified_name: "com.example.Target".to_string(),
    package: "com.example".to_string(),
    ..ClassDecl::default()
  }
}
