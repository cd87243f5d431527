pub mod annotations;
pub mod default_values;
pub mod type_resolver;

#[cfg(test)]
mod tests;

pub use default_values::{DefaultValueScanner, FALLBACK_EXPRESSION, ScanFailure, resolve_defaults};
pub use type_resolver::TypeResolver;

use crate::generator::{
  ast::{BuilderSpec, ResolvedBuilder},
  errors::AnnotationMisuseError,
  symbols::SymbolSnapshot,
};

/// Resolves the parameter types of one builder spec.
pub fn resolve_builder<'a>(
  snapshot: &'a SymbolSnapshot,
  spec: BuilderSpec<'a>,
) -> Result<ResolvedBuilder<'a>, AnnotationMisuseError> {
  let resolver = TypeResolver::new(snapshot, spec.class);
  let params = resolver.resolve_parameters(&spec.constructor.parameters)?;
  Ok(ResolvedBuilder { spec, params })
}
