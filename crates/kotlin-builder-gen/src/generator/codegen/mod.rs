//! Renders a [`BuilderArtifact`] as Kotlin source.

use std::fmt::{self, Display, Write as _};

use crate::generator::ast::{BuilderArtifact, TypeName};

pub mod functions;
pub mod imports;


pub(crate) const INDENT: &str = "    ";

/// Kotlin source of one builder file, header included.
pub fn render(artifact: &BuilderArtifact) -> String {
  KotlinSource(artifact).to_string()
}

/// Display adapter writing the complete builder file.
pub struct KotlinSource<'a>(pub &'a BuilderArtifact);

impl Display for KotlinSource<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let artifact = self.0;
    write_header(f, artifact)?;

    if !artifact.package.is_empty() {
      writeln!(f, "package {}\n", artifact.package)?;
    }

    let imports = imports::render_imports(&artifact.imports);
    if !imports.is_empty() {
      writeln!(f, "{imports}")?;
    }

    writeln!(f, "class {}() {{", artifact.name)?;
    for property in &artifact.properties {
      writeln!(
        f,
        "{INDENT}private var {}: {} = null",
        property.name,
        render_type(&property.type_name, artifact)
      )?;
    }

    f.write_char('\n')?;
    functions::copy_constructor(f, artifact)?;
    if !artifact.setters.is_empty() {
      f.write_char('\n')?;
      functions::setters(f, artifact)?;
    }
    f.write_char('\n')?;
    functions::build_function(f, artifact)?;
    f.write_char('\n')?;
    functions::check_required_fields(f, artifact)?;
    f.write_str("}\n")
  }
}

fn write_header(f: &mut impl fmt::Write, artifact: &BuilderArtifact) -> fmt::Result {
  writeln!(f, "// AUTO-GENERATED CODE - DO NOT EDIT!")?;
  writeln!(f, "// Builder for {}", artifact.target)?;
  if let Some(source) = &artifact.originating_file {
    writeln!(f, "// Source: {source}")?;
  }
  writeln!(f, "// Generated by `{}`\n", env!("CARGO_PKG_NAME"))
}

/// A type as written inside the builder's own package.
pub(crate) fn render_type(type_name: &TypeName, artifact: &BuilderArtifact) -> String {
  type_name.render(&artifact.package)
}
