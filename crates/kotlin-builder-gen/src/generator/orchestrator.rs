//! Orchestration of one generation round.
//!
//! The `Orchestrator` owns the symbol snapshot and configuration and runs every annotated target through
//! extraction, type resolution, default-value recovery, emission and rendering. Errors are attributed to the
//! target that caused them; every other target still gets its builder.
//!
//! ## Usage
//!
//! ```no_run
//! use kotlin_builder_gen::generator::{orchestrator::Orchestrator, symbols::SymbolSnapshot};
//!
//! # fn example() -> anyhow::Result<()> {
//! let manifest = std::fs::read_to_string("symbols.json")?;
//! let snapshot: SymbolSnapshot = serde_json::from_str(&manifest)?;
//!
//! let output = Orchestrator::from_snapshot(snapshot).generate();
//! for builder in &output.builders {
//!   println!("{}", builder.code);
//! }
//! println!("{} builders, {} failed", output.stats.builders_generated, output.stats.targets_failed);
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use crate::generator::{
  ast::BuilderArtifact,
  codegen,
  config::GenerationConfig,
  converter::{resolve_builder, resolve_defaults},
  diagnostics::{Diagnostic, Diagnostics, Severity},
  emitter::BuilderEmitter,
  extractor::DeclarationExtractor,
  naming,
  symbols::SymbolSnapshot,
};

pub const KOTLIN_EXTENSION: &str = "kt";

/// High-level driver for builder generation.
#[derive(Debug, Clone)]
pub struct Orchestrator {
  snapshot: SymbolSnapshot,
  config: GenerationConfig,
}

/// One generated builder: its structural description and its Kotlin source.
#[derive(Debug, Clone)]
pub struct GeneratedBuilder {
  /// Canonical name of the target class.
  pub target: String,
  pub artifact: BuilderArtifact,
  pub code: String,
}

impl GeneratedBuilder {
  /// Path of the generated file relative to the output root, e.g. `com/example/PersonBuilder.kt`.
  pub fn relative_path(&self, extension: &str) -> PathBuf {
    let mut path = PathBuf::from(naming::package_path(&self.artifact.package));
    path.push(format!("{}.{extension}", self.artifact.name));
    path
  }
}

/// A target as it will be generated, for listing without running the full round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSummary {
  pub target: String,
  pub builder_name: String,
  pub parameter_count: usize,
  pub setter_prefix: String,
}

/// Statistics about one generation round.
#[derive(Debug, Default)]
pub struct GenerationStats {
  /// Number of symbols carrying the builder annotation
  pub annotated_symbols: usize,
  /// Number of builders produced
  pub builders_generated: usize,
  /// Number of targets or symbols aborted by an error
  pub targets_failed: usize,
  /// Every diagnostic of the round, in emission order
  pub diagnostics: Vec<Diagnostic>,
}

impl GenerationStats {
  pub fn count(&self, severity: Severity) -> usize {
    self
      .diagnostics
      .iter()
      .filter(|diagnostic| diagnostic.severity == severity)
      .count()
  }
}

#[derive(Debug)]
pub struct GenerationOutput {
  pub builders: Vec<GeneratedBuilder>,
  pub stats: GenerationStats,
}

impl Orchestrator {
  pub fn new(snapshot: SymbolSnapshot, config: GenerationConfig) -> Self {
    Self { snapshot, config }
  }

  /// Creates an orchestrator configured from the snapshot's own processor options.
  pub fn from_snapshot(snapshot: SymbolSnapshot) -> Self {
    let config = GenerationConfig::from_options(&snapshot.options);
    Self::new(snapshot, config)
  }

  pub fn config(&self) -> &GenerationConfig {
    &self.config
  }

  pub fn snapshot(&self) -> &SymbolSnapshot {
    &self.snapshot
  }

  /// Targets that extraction resolves to, with their chosen constructor.
  pub fn targets(&self) -> Vec<TargetSummary> {
    let mut diagnostics = Diagnostics::new(false);
    DeclarationExtractor::new(&self.snapshot, &self.config)
      .extract(&mut diagnostics)
      .specs
      .into_iter()
      .map(|(target, spec)| TargetSummary {
        parameter_count: spec.param_count(),
        builder_name: spec.builder_name,
        setter_prefix: spec.setter_prefix,
        target,
      })
      .collect()
  }

  /// Runs the whole round.
  ///
  /// The pipeline for each target:
  /// 1. Extracts one builder spec per target, resolving duplicate annotations
  /// 2. Resolves parameter types and marker annotations
  /// 3. Recovers default-value expressions from the target's source file
  /// 4. Emits the builder artifact and renders it as Kotlin
  ///
  /// A failing target is reported as an error diagnostic and skipped.
  pub fn generate(&self) -> GenerationOutput {
    let mut diagnostics = Diagnostics::new(self.config.debug);
    diagnostics.info(format!(
      "{} invoked for {} annotations, with options: {:?}",
      env!("CARGO_PKG_NAME"),
      self.snapshot.annotated.len(),
      self.snapshot.options
    ));

    let extraction = DeclarationExtractor::new(&self.snapshot, &self.config).extract(&mut diagnostics);
    let mut targets_failed = extraction.failures.len();
    let emitter = BuilderEmitter::new(&self.snapshot, &self.config);
    let mut builders = Vec::with_capacity(extraction.specs.len());

    for (target, spec) in extraction.specs {
      diagnostics.debug(format!("Creating builder for {target}"));

      let mut resolved = match resolve_builder(&self.snapshot, spec) {
        Ok(resolved) => resolved,
        Err(error) => {
          diagnostics.error(error.to_string(), Some(&target));
          targets_failed += 1;
          continue;
        }
      };

      let source = if resolved.has_defaults() {
        self.snapshot.source_text_for(resolved.spec.class)
      } else {
        None
      };
      resolve_defaults(&mut resolved, source, &mut diagnostics);

      let artifact = emitter.emit(&resolved, source, &mut diagnostics);
      let code = codegen::render(&artifact);
      builders.push(GeneratedBuilder { target, artifact, code });
    }

    let stats = GenerationStats {
      annotated_symbols: self.snapshot.annotated.len(),
      builders_generated: builders.len(),
      targets_failed,
      diagnostics: diagnostics.into_entries(),
    };

    GenerationOutput { builders, stats }
  }
}
