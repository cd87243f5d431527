use std::collections::BTreeMap;

use crate::generator::symbols::BuilderAnnotation;

pub const SETTER_PREFIX_OPTION: &str = "builder.setterPrefix";
pub const DEBUG_OPTION: &str = "builder.debug";
pub const ANNOTATION_OPTION: &str = "builder.annotation";

/// Annotation argument value meaning "defer to the configured prefix".
pub const USE_GLOBAL_SETTINGS: &str = "Use global settings";

pub const DEFAULT_ANNOTATION: &str = "com.thinkinglogic.builder.annotation.Builder";

/// Configuration for one generation round, passed explicitly to every stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
  pub setter_prefix: String,
  pub debug: bool,
  /// Fully qualified name of the builder annotation, excluded from carried-over imports.
  pub annotation: String,
}

impl Default for GenerationConfig {
  fn default() -> Self {
    Self {
      setter_prefix: String::new(),
      debug: false,
      annotation: DEFAULT_ANNOTATION.to_string(),
    }
  }
}

impl GenerationConfig {
  /// Builds a configuration from processor options, ignoring unknown keys.
  pub fn from_options(options: &BTreeMap<String, String>) -> Self {
    let defaults = Self::default();
    Self {
      setter_prefix: options.get(SETTER_PREFIX_OPTION).cloned().unwrap_or(defaults.setter_prefix),
      debug: options.get(DEBUG_OPTION).is_some_and(|value| value == "true"),
      annotation: options.get(ANNOTATION_OPTION).cloned().unwrap_or(defaults.annotation),
    }
  }

  #[must_use]
  pub fn with_setter_prefix(mut self, prefix: impl Into<String>) -> Self {
    self.setter_prefix = prefix.into();
    self
  }

  #[must_use]
  pub fn with_debug(mut self, debug: bool) -> Self {
    self.debug = debug;
    self
  }

  /// The trimmed setter prefix for one annotation instance.
  pub fn setter_prefix_for(&self, annotation: &BuilderAnnotation) -> String {
    let prefix = match annotation.setter_prefix.as_deref() {
      Some(prefix) if prefix != USE_GLOBAL_SETTINGS => prefix,
      _ => self.setter_prefix.as_str(),
    };
    prefix.trim().to_string()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn options(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
      .iter()
      .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
      .collect()
  }

  #[test]
  fn test_defaults_without_options() {
    let config = GenerationConfig::from_options(&BTreeMap::new());
    assert_eq!(config, GenerationConfig::default());
    assert_eq!(config.setter_prefix, "");
    assert!(!config.debug);
  }

  #[test]
  fn test_reads_known_options() {
    let config = GenerationConfig::from_options(&options(&[
      (SETTER_PREFIX_OPTION, "with"),
      (DEBUG_OPTION, "true"),
      ("unrelated.option", "ignored"),
    ]));
    assert_eq!(config.setter_prefix, "with");
    assert!(config.debug);
    assert_eq!(config.annotation, DEFAULT_ANNOTATION);
  }

  #[test]
  fn test_debug_requires_exact_true() {
    let config = GenerationConfig::from_options(&options(&[(DEBUG_OPTION, "yes")]));
    assert!(!config.debug);
  }

  #[test]
  fn test_annotation_prefix_overrides_global() {
    let config = GenerationConfig::default().with_setter_prefix("with");
    let cases = [
      (None, "with"),
      (Some(USE_GLOBAL_SETTINGS), "with"),
      (Some("set"), "set"),
      (Some("  set "), "set"),
      (Some(""), ""),
      (Some("   "), ""),
    ];
    for (prefix, expected) in cases {
      let annotation = BuilderAnnotation {
        setter_prefix: prefix.map(String::from),
      };
      assert_eq!(config.setter_prefix_for(&annotation), expected, "failed for {prefix:?}");
    }
  }
}
