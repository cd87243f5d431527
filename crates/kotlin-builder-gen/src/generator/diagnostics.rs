use std::fmt;

use serde::Serialize;
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
  Error,
  Warning,
  Info,
  Debug,
}

/// A message produced while generating, optionally pointing at the symbol it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
  pub severity: Severity,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub symbol: Option<String>,
}

impl fmt::Display for Diagnostic {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.symbol {
      Some(symbol) => write!(f, "{} [{symbol}]", self.message),
      None => f.write_str(&self.message),
    }
  }
}

/// Collects the diagnostics of one round. Debug messages are dropped unless enabled.
#[derive(Debug, Default)]
pub struct Diagnostics {
  entries: Vec<Diagnostic>,
  debug_enabled: bool,
}

impl Diagnostics {
  pub fn new(debug_enabled: bool) -> Self {
    Self {
      entries: Vec::new(),
      debug_enabled,
    }
  }

  pub fn report(&mut self, severity: Severity, message: impl Into<String>, symbol: Option<&str>) {
    if severity == Severity::Debug && !self.debug_enabled {
      return;
    }
    self.entries.push(Diagnostic {
      severity,
      message: message.into(),
      symbol: symbol.map(String::from),
    });
  }

  pub fn error(&mut self, message: impl Into<String>, symbol: Option<&str>) {
    self.report(Severity::Error, message, symbol);
  }

  pub fn warn(&mut self, message: impl Into<String>, symbol: Option<&str>) {
    self.report(Severity::Warning, message, symbol);
  }

  pub fn info(&mut self, message: impl Into<String>) {
    self.report(Severity::Info, message, None);
  }

  pub fn debug(&mut self, message: impl Into<String>) {
    self.report(Severity::Debug, message, None);
  }

  pub fn entries(&self) -> &[Diagnostic] {
    &self.entries
  }

  pub fn count(&self, severity: Severity) -> usize {
    self.entries.iter().filter(|entry| entry.severity == severity).count()
  }

  pub fn into_entries(self) -> Vec<Diagnostic> {
    self.entries
  }
}
