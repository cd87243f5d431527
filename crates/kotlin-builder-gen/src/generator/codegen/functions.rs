//! Member functions of the generated builder class.

use std::fmt::{self, Write};

use super::{INDENT, render_type};
use crate::generator::ast::{BuilderArtifact, MISSING_FIELDS_MESSAGE, SETTER_PARAMETER};

/// `constructor(source: Target) : this()` copying every visible property.
pub(crate) fn copy_constructor(out: &mut impl Write, artifact: &BuilderArtifact) -> fmt::Result {
  let copy = &artifact.copy_initializer;
  let target = &artifact.build_function.target_reference;

  if copy.copied.is_empty() {
    return writeln!(out, "{INDENT}constructor({}: {target}) : this()", copy.parameter);
  }

  writeln!(out, "{INDENT}constructor({}: {target}) : this() {{", copy.parameter)?;
  for field in &copy.copied {
    writeln!(out, "{INDENT}{INDENT}this.{field} = {}.{field}", copy.parameter)?;
  }
  writeln!(out, "{INDENT}}}")
}

/// One fluent setter per property, separated by blank lines.
pub(crate) fn setters(out: &mut impl Write, artifact: &BuilderArtifact) -> fmt::Result {
  for (index, setter) in artifact.setters.iter().enumerate() {
    if index > 0 {
      out.write_char('\n')?;
    }
    writeln!(
      out,
      "{INDENT}fun {}({SETTER_PARAMETER}: {}): {} = apply {{ this.{} = {SETTER_PARAMETER} }}",
      setter.name,
      render_type(&setter.parameter_type, artifact),
      artifact.name,
      setter.property,
    )?;
  }
  Ok(())
}

/// `build()`: defaults for unset properties, the required-field check, then the constructor call.
pub(crate) fn build_function(out: &mut impl Write, artifact: &BuilderArtifact) -> fmt::Result {
  let build = &artifact.build_function;
  writeln!(out, "{INDENT}fun build(): {} {{", build.target_reference)?;

  for default in &build.defaults {
    writeln!(out, "{INDENT}{INDENT}@Suppress(\"NAME_SHADOWING\")")?;
    writeln!(
      out,
      "{INDENT}{INDENT}val {0} = this.{0} ?: ({1})",
      default.property, default.expression
    )?;
  }
  if !build.defaults.is_empty() {
    out.write_char('\n')?;
  }

  writeln!(out, "{INDENT}{INDENT}{}()\n", artifact.required_check.function_name)?;

  if build.arguments.is_empty() {
    writeln!(out, "{INDENT}{INDENT}return {}()", build.target_reference)?;
  } else {
    writeln!(out, "{INDENT}{INDENT}return {}(", build.target_reference)?;
    for argument in &build.arguments {
      let assertion = if argument.non_null { "!!" } else { "" };
      writeln!(out, "{INDENT}{INDENT}{INDENT}{0} = {0}{assertion},", argument.name)?;
    }
    writeln!(out, "{INDENT}{INDENT})")?;
  }

  writeln!(out, "{INDENT}}}")
}

/// `checkRequiredFields()`: collects every unset required field and fails once, naming all of them.
pub(crate) fn check_required_fields(out: &mut impl Write, artifact: &BuilderArtifact) -> fmt::Result {
  let check = &artifact.required_check;

  if check.fields.is_empty() {
    return writeln!(out, "{INDENT}private fun {}() = Unit", check.function_name);
  }

  writeln!(out, "{INDENT}private fun {}() {{", check.function_name)?;
  writeln!(out, "{INDENT}{INDENT}val missing = listOfNotNull(")?;
  for field in &check.fields {
    writeln!(out, "{INDENT}{INDENT}{INDENT}\"{field}\".takeIf {{ {field} == null }},")?;
  }
  writeln!(out, "{INDENT}{INDENT})")?;
  writeln!(
    out,
    "{INDENT}{INDENT}check(missing.isEmpty()) {{ \"{MISSING_FIELDS_MESSAGE}: ${{missing.joinToString(\", \")}}\" }}"
  )?;
  writeln!(out, "{INDENT}}}")
}
