use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use super::colors::{ColorMode, Colors, ThemeMode};

#[derive(Parser, Debug)]
#[command(name = "kotlin-builder-gen")]
#[command(author, version, about = "Generates fluent builders for Kotlin classes annotated with @Builder")]
#[command(styles = Colors::clap_styles())]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// List the builder targets found in a symbol manifest
  List {
    /// Path to the JSON symbol manifest
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,
  },
  /// Generate one builder per annotated target
  Generate(GenerateCommand),
}

#[derive(Args, Debug)]
pub struct GenerateCommand {
  /// Path to the JSON symbol manifest
  #[arg(short, long, value_name = "FILE")]
  pub input: PathBuf,

  /// Directory the generated files are written under, one subdirectory per package
  #[arg(short, long, value_name = "DIR")]
  pub output: PathBuf,

  /// Output format
  #[arg(short, long, value_enum, default_value = "kotlin")]
  pub format: OutputFormat,

  /// Default setter prefix, overriding `builder.setterPrefix` from the manifest
  #[arg(long, value_name = "PREFIX")]
  pub setter_prefix: Option<String>,

  /// Processor option as KEY=VALUE, e.g. builder.debug=true (can be repeated)
  #[arg(long = "option", value_name = "KEY=VALUE")]
  pub options: Vec<String>,

  /// Enable verbose output, including debug and info diagnostics
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false)]
  pub quiet: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
  /// Kotlin source files
  Kotlin,
  /// JSON description of each builder
  Json,
}

impl OutputFormat {
  pub const fn extension(self) -> &'static str {
    match self {
      OutputFormat::Kotlin => kotlin_builder_gen::generator::orchestrator::KOTLIN_EXTENSION,
      OutputFormat::Json => "json",
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_generate_arguments() {
    let cli = Cli::try_parse_from([
      "kotlin-builder-gen",
      "generate",
      "-i",
      "symbols.json",
      "-o",
      "build/generated",
      "--format",
      "json",
      "--option",
      "builder.debug=true",
      "--option",
      "builder.setterPrefix=with",
      "--color",
      "never",
    ])
    .unwrap();

    let Commands::Generate(command) = cli.command else {
      panic!("expected generate command");
    };
    assert_eq!(command.input, PathBuf::from("symbols.json"));
    assert_eq!(command.format, OutputFormat::Json);
    assert_eq!(command.options, vec!["builder.debug=true", "builder.setterPrefix=with"]);
    assert_eq!(command.setter_prefix, None);
    assert!(!command.verbose);
  }

  #[test]
  fn test_output_is_required_for_generate() {
    assert!(Cli::try_parse_from(["kotlin-builder-gen", "generate", "-i", "symbols.json"]).is_err());
  }

  #[test]
  fn test_format_extensions() {
    assert_eq!(OutputFormat::Kotlin.extension(), "kt");
    assert_eq!(OutputFormat::Json.extension(), "json");
  }
}
