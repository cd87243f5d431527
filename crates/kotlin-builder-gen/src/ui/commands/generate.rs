use std::{
  collections::BTreeMap,
  path::{Path, PathBuf},
};

use anyhow::Context;
use chrono::{Local, Timelike};
use crossterm::style::Stylize;
use kotlin_builder_gen::{
  generator::{
    config::SETTER_PREFIX_OPTION,
    diagnostics::{Diagnostic, Severity},
    orchestrator::{GeneratedBuilder, GenerationStats, Orchestrator},
  },
  utils::manifest::ManifestLoader,
};

use crate::ui::{Colors, GenerateCommand, OutputFormat};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone)]
pub struct GenerateConfig {
  pub input: PathBuf,
  pub output: PathBuf,
  pub format: OutputFormat,
  pub verbose: bool,
  pub quiet: bool,
  /// Processor options from the command line; they win over the manifest's own.
  pub options: BTreeMap<String, String>,
}

impl GenerateConfig {
  pub fn from_command(command: GenerateCommand) -> anyhow::Result<Self> {
    let GenerateCommand {
      input,
      output,
      format,
      setter_prefix,
      options,
      verbose,
      quiet,
    } = command;

    let mut options = parse_options(options)?;
    if let Some(prefix) = setter_prefix {
      options.insert(SETTER_PREFIX_OPTION.to_string(), prefix);
    }

    Ok(Self {
      input,
      output,
      format,
      verbose,
      quiet,
      options,
    })
  }

  async fn create_orchestrator(&self) -> anyhow::Result<Orchestrator> {
    let mut snapshot = ManifestLoader::open(&self.input).await?.load().await?;
    snapshot.options.extend(self.options.clone());
    Ok(Orchestrator::from_snapshot(snapshot))
  }

  fn render(&self, builder: &GeneratedBuilder) -> anyhow::Result<String> {
    match self.format {
      OutputFormat::Kotlin => Ok(builder.code.clone()),
      OutputFormat::Json => serde_json::to_string_pretty(&builder.artifact)
        .with_context(|| format!("failed to serialize builder for {}", builder.target)),
    }
  }

  /// Writes one file per builder under the output directory and returns their paths.
  async fn write_output(&self, builders: &[GeneratedBuilder]) -> anyhow::Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(builders.len());
    for builder in builders {
      let path = self.output.join(builder.relative_path(self.format.extension()));
      if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
          .await
          .with_context(|| format!("failed to create {}", parent.display()))?;
      }
      tokio::fs::write(&path, self.render(builder)?)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
      written.push(path);
    }
    Ok(written)
  }
}

fn parse_options(entries: Vec<String>) -> anyhow::Result<BTreeMap<String, String>> {
  let mut map = BTreeMap::new();
  for entry in entries {
    let (key, value) = entry.split_once('=').ok_or_else(|| {
      anyhow::anyhow!("Invalid option format '{entry}': expected KEY=VALUE (e.g., builder.setterPrefix=with)")
    })?;
    map.insert(key.trim().to_string(), value.to_string());
  }
  Ok(map)
}

struct GenerateLogger<'a> {
  config: &'a GenerateConfig,
  colors: &'a Colors,
}

impl<'a> GenerateLogger<'a> {
  fn new(config: &'a GenerateConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn info(&self, message: &str) {
    if !self.config.quiet {
      println!("{} {message}", format_timestamp().with(self.colors.timestamp()));
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.config.quiet {
      println!(
        "           {:<25} {}",
        label.with(self.colors.label()),
        value.with(self.colors.value())
      );
    }
  }

  fn log_loading(&self) {
    self.info(
      &format!("Loading symbol manifest from: {}", self.config.input.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_generating(&self) {
    self.info(&"Generating builders...".with(self.colors.primary()).to_string());
  }

  fn print_statistics(&self, stats: &GenerationStats) {
    self.stat("Annotated symbols:", stats.annotated_symbols.to_string());
    self.stat("Builders generated:", stats.builders_generated.to_string());
    if stats.targets_failed > 0 {
      self.stat("Targets failed:", stats.targets_failed.to_string());
    }
    let warnings = stats.count(Severity::Warning);
    if warnings > 0 {
      self.stat("Warnings:", warnings.to_string());
    }
  }

  fn shows(&self, severity: Severity) -> bool {
    match severity {
      Severity::Error => true,
      Severity::Warning => !self.config.quiet,
      Severity::Info | Severity::Debug => self.config.verbose && !self.config.quiet,
    }
  }

  fn print_diagnostics(&self, diagnostics: &[Diagnostic]) {
    let visible: Vec<&Diagnostic> = diagnostics
      .iter()
      .filter(|diagnostic| self.shows(diagnostic.severity))
      .collect();
    if visible.is_empty() {
      return;
    }

    if !self.config.quiet {
      println!();
    }
    for diagnostic in visible {
      eprintln!(
        "{} {}",
        format!("{}:", diagnostic.severity).with(self.colors.severity(diagnostic.severity)),
        diagnostic.to_string().with(self.colors.primary())
      );
    }
  }

  fn log_writing(&self) {
    self.info(
      &format!("Writing to: {}", self.config.output.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_written(&self, paths: &[PathBuf]) {
    if !self.config.verbose {
      return;
    }
    for path in paths {
      self.stat("", relative_display(path, &self.config.output));
    }
  }

  fn log_success(&self, stats: &GenerationStats) {
    if self.config.quiet {
      return;
    }
    let message = if stats.targets_failed == 0 {
      "Successfully generated builders".with(self.colors.success())
    } else {
      "Generated builders with errors".with(self.colors.accent())
    };
    println!();
    println!("{} {message}", format_timestamp().with(self.colors.timestamp()));
  }
}

fn relative_display(path: &Path, root: &Path) -> String {
  path.strip_prefix(root).unwrap_or(path).display().to_string()
}

pub async fn generate_builders(config: GenerateConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = GenerateLogger::new(&config, colors);

  logger.log_loading();
  let orchestrator = config.create_orchestrator().await?;

  logger.log_generating();
  let output = orchestrator.generate();
  logger.print_statistics(&output.stats);
  logger.print_diagnostics(&output.stats.diagnostics);

  logger.log_writing();
  let written = config.write_output(&output.builders).await?;
  logger.log_written(&written);

  logger.log_success(&output.stats);
  Ok(())
}
