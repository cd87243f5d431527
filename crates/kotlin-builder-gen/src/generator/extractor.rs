//! Maps annotated symbols to exactly one builder spec per target class.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use itertools::Itertools;

use crate::generator::{
  ast::{BuilderSpec, ClassName},
  config::GenerationConfig,
  diagnostics::Diagnostics,
  errors::{GenerationError, StructuralError},
  naming,
  symbols::{AnnotatedSymbol, ClassDecl, ConstructorDecl, SymbolSnapshot},
};

/// A target that will not get a builder this round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFailure {
  /// Canonical target name, when the failing symbol identified one.
  pub target: Option<String>,
  pub symbol: String,
  pub error: GenerationError,
}

/// Result of extracting one round's declarations.
#[derive(Debug, Default)]
pub struct Extraction<'a> {
  /// Builder specs keyed by canonical target name, in first-seen order.
  pub specs: IndexMap<String, BuilderSpec<'a>>,
  pub failures: Vec<TargetFailure>,
}

/// Turns the annotated symbols of a snapshot into builder specs.
pub struct DeclarationExtractor<'a> {
  snapshot: &'a SymbolSnapshot,
  config: &'a GenerationConfig,
}

impl<'a> DeclarationExtractor<'a> {
  pub fn new(snapshot: &'a SymbolSnapshot, config: &'a GenerationConfig) -> Self {
    Self { snapshot, config }
  }

  /// Extracts one spec per target.
  ///
  /// When several symbols resolve to the same target the constructor with strictly more parameters wins, ties
  /// keeping the first one seen, and a warning names the discarded candidate. A structural error on any of a
  /// target's symbols fails the whole target.
  pub fn extract(&self, diagnostics: &mut Diagnostics) -> Extraction<'a> {
    let mut extraction = Extraction::default();
    let mut failed = BTreeSet::new();
    let snapshot = self.snapshot;

    for symbol in &snapshot.annotated {
      let spec = match self.spec_for(symbol) {
        Ok(spec) => spec,
        Err((target, error)) => {
          diagnostics.error(error.to_string(), Some(&symbol.describe()));
          if let Some(target) = &target {
            extraction.specs.shift_remove(target);
            failed.insert(target.clone());
          }
          extraction.failures.push(TargetFailure {
            target,
            symbol: symbol.describe(),
            error: error.into(),
          });
          continue;
        }
      };

      let key = spec.qualified_name();
      if failed.contains(&key) {
        continue;
      }

      match extraction.specs.get_mut(&key) {
        None => {
          extraction.specs.insert(key, spec);
        }
        Some(existing) => {
          let discarded = if spec.param_count() > existing.param_count() {
            std::mem::replace(existing, spec)
          } else {
            spec
          };
          diagnostics.warn(
            format!(
              "Found multiple builder annotations for {key} - using the constructor with the most parameters: ({}); discarded {}",
              existing.constructor.parameter_names().iter().join(", "),
              discarded.origin,
            ),
            Some(&key),
          );
        }
      }
    }

    extraction
  }

  fn spec_for(&self, symbol: &'a AnnotatedSymbol) -> Result<BuilderSpec<'a>, (Option<String>, StructuralError)> {
    let (class, constructor) = match symbol {
      AnnotatedSymbol::Class { class, .. } => {
        let decl = self.lookup(class, symbol).map_err(|error| (None, error))?;
        let constructor = decl.primary_constructor.as_ref().ok_or_else(|| {
          (
            Some(class.clone()),
            StructuralError::MissingPrimaryConstructor { class: class.clone() },
          )
        })?;
        (decl, constructor)
      }
      AnnotatedSymbol::Constructor {
        parent, constructor, ..
      } => {
        let parent = parent.as_deref().ok_or_else(|| {
          (
            None,
            StructuralError::MissingEnclosingClass {
              symbol: symbol.describe(),
            },
          )
        })?;
        let decl = self.lookup(parent, symbol).map_err(|error| (None, error))?;
        (decl, constructor)
      }
    };

    Ok(self.build_spec(symbol, class, constructor))
  }

  fn lookup(&self, class: &str, symbol: &AnnotatedSymbol) -> Result<&'a ClassDecl, StructuralError> {
    self.snapshot.class(class).ok_or_else(|| StructuralError::UnknownClass {
      class: class.to_string(),
      symbol: symbol.describe(),
    })
  }

  fn build_spec(
    &self,
    symbol: &'a AnnotatedSymbol,
    class: &'a ClassDecl,
    constructor: &'a ConstructorDecl,
  ) -> BuilderSpec<'a> {
    let target = ClassName::in_package(&class.package, &class.qualified_name);
    BuilderSpec {
      builder_name: naming::builder_name(&target),
      setter_prefix: self.config.setter_prefix_for(symbol.annotation()),
      target,
      class,
      constructor,
      origin: symbol.describe(),
    }
  }
}
