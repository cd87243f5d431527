//! Recovers the source text of constructor parameter defaults.
//!
//! The symbol model only reports *that* a parameter has a default, so the expression is read back from the
//! declaring file. Scanning is bracket, quote and comment aware: commas and parentheses inside literals or
//! comments never end an expression, and comments are dropped from the result.

use thiserror::Error;

use crate::generator::{
  ast::{DefaultValue, ResolvedBuilder},
  diagnostics::Diagnostics,
};

/// Text substituted when a default cannot be recovered.
pub const FALLBACK_EXPRESSION: &str = "null";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanFailure {
  #[error("no source location recorded")]
  MissingLocation,
  #[error("line {line} is outside the source file")]
  LineOutOfRange { line: usize },
  #[error("no declaration found at line {line}")]
  ParameterNotFound { line: usize },
  #[error("no equals sign found at line {line}")]
  AssignmentNotFound { line: usize },
  #[error("empty default expression at line {line}")]
  EmptyExpression { line: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
  Normal,
  InDoubleQuotedString { raw: bool, escaped: bool },
  InSingleQuotedChar { escaped: bool },
  InLineComment,
  InBlockComment { depth: u32 },
}

/// What to do with the characters at the cursor after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
  Copy(usize),
  Discard(usize),
  Terminate,
}

/// Character state machine shared by the operator search and the expression scan.
#[derive(Debug, Clone, Copy)]
struct Lexer {
  state: ScanState,
  bracket_depth: u32,
}

impl Lexer {
  fn new() -> Self {
    Self {
      state: ScanState::Normal,
      bracket_depth: 0,
    }
  }

  fn is_code(&self) -> bool {
    self.state == ScanState::Normal
  }

  /// Applies the transition for `line[index]`, looking ahead where an opener or closer spans two or three
  /// characters.
  fn step(&mut self, line: &[char], index: usize) -> Action {
    let c = line[index];
    let next = line.get(index + 1).copied();
    let starts_with = |pattern: &str| pattern.chars().enumerate().all(|(i, p)| line.get(index + i) == Some(&p));

    match self.state {
      ScanState::Normal => match c {
        '"' if starts_with("\"\"\"") => {
          self.state = ScanState::InDoubleQuotedString {
            raw: true,
            escaped: false,
          };
          Action::Copy(3)
        }
        '"' => {
          self.state = ScanState::InDoubleQuotedString {
            raw: false,
            escaped: false,
          };
          Action::Copy(1)
        }
        '\'' => {
          self.state = ScanState::InSingleQuotedChar { escaped: false };
          Action::Copy(1)
        }
        '/' if next == Some('/') => {
          self.state = ScanState::InLineComment;
          Action::Discard(2)
        }
        '/' if next == Some('*') => {
          self.state = ScanState::InBlockComment { depth: 1 };
          Action::Discard(2)
        }
        ',' | ')' if self.bracket_depth == 0 => Action::Terminate,
        '(' | '{' | '[' => {
          self.bracket_depth += 1;
          Action::Copy(1)
        }
        ')' | '}' | ']' => {
          self.bracket_depth = self.bracket_depth.saturating_sub(1);
          Action::Copy(1)
        }
        _ => Action::Copy(1),
      },
      ScanState::InDoubleQuotedString { raw: true, .. } => {
        if starts_with("\"\"\"") {
          self.state = ScanState::Normal;
          Action::Copy(3)
        } else {
          Action::Copy(1)
        }
      }
      ScanState::InDoubleQuotedString { raw: false, escaped } => {
        self.state = match c {
          '"' if !escaped => ScanState::Normal,
          '\\' => ScanState::InDoubleQuotedString {
            raw: false,
            escaped: !escaped,
          },
          _ => ScanState::InDoubleQuotedString {
            raw: false,
            escaped: false,
          },
        };
        Action::Copy(1)
      }
      ScanState::InSingleQuotedChar { escaped } => {
        self.state = match c {
          '\'' if !escaped => ScanState::Normal,
          '\\' => ScanState::InSingleQuotedChar { escaped: !escaped },
          _ => ScanState::InSingleQuotedChar { escaped: false },
        };
        Action::Copy(1)
      }
      ScanState::InLineComment => Action::Discard(line.len() - index),
      ScanState::InBlockComment { depth } => {
        if c == '*' && next == Some('/') {
          self.state = if depth <= 1 {
            ScanState::Normal
          } else {
            ScanState::InBlockComment { depth: depth - 1 }
          };
          Action::Discard(2)
        } else if c == '/' && next == Some('*') {
          self.state = ScanState::InBlockComment { depth: depth + 1 };
          Action::Discard(2)
        } else {
          Action::Discard(1)
        }
      }
    }
  }

  /// Transition at end of line; returns whether the line break belongs to the expression.
  fn end_of_line(&mut self) -> bool {
    match self.state {
      ScanState::Normal => true,
      ScanState::InDoubleQuotedString { raw, .. } => {
        self.state = ScanState::InDoubleQuotedString { raw, escaped: false };
        true
      }
      ScanState::InSingleQuotedChar { .. } => {
        self.state = ScanState::InSingleQuotedChar { escaped: false };
        true
      }
      ScanState::InLineComment => {
        self.state = ScanState::Normal;
        false
      }
      ScanState::InBlockComment { .. } => false,
    }
  }
}

/// Line-oriented scanner over the text of one source file.
pub struct DefaultValueScanner {
  lines: Vec<Vec<char>>,
}

impl DefaultValueScanner {
  pub fn new(source: &str) -> Self {
    Self {
      lines: source.lines().map(|line| line.chars().collect()).collect(),
    }
  }

  /// Returns the default expression of parameter `name` declared on 1-based `line_number`.
  ///
  /// `column` (1-based) narrows where the declaration starts when several parameters share a line.
  pub fn extract(&self, line_number: usize, column: Option<usize>, name: &str) -> Result<String, ScanFailure> {
    let line_index = line_number
      .checked_sub(1)
      .filter(|index| *index < self.lines.len())
      .ok_or(ScanFailure::LineOutOfRange { line: line_number })?;

    let start = column.map_or(0, |column| column.saturating_sub(1));
    let name_end = self
      .find_identifier(line_index, start, name)
      .ok_or(ScanFailure::ParameterNotFound { line: line_number })?;
    let (operator_line, operator_index) = self
      .find_assignment(line_index, name_end)
      .ok_or(ScanFailure::AssignmentNotFound { line: line_number })?;

    let expression = self.scan_expression(operator_line, operator_index + 1);
    if expression.is_empty() {
      return Err(ScanFailure::EmptyExpression { line: line_number });
    }
    Ok(expression)
  }

  /// Finds the first code occurrence of `name` as a whole identifier at or after `start`; returns the index
  /// just past it.
  fn find_identifier(&self, line_index: usize, start: usize, name: &str) -> Option<usize> {
    let line = &self.lines[line_index];
    let name: Vec<char> = name.chars().collect();
    if name.is_empty() {
      return None;
    }

    let mut lexer = Lexer::new();
    let mut index = 0;
    while index < line.len() {
      if index >= start && lexer.is_code() && Self::identifier_at(line, index, &name) {
        return Some(index + name.len());
      }
      index += match lexer.step(line, index) {
        Action::Copy(n) | Action::Discard(n) => n,
        Action::Terminate => 1,
      };
    }
    None
  }

  fn identifier_at(line: &[char], index: usize, name: &[char]) -> bool {
    let is_ident = |c: &char| c.is_alphanumeric() || *c == '_';
    line[index..].starts_with(name)
      && (index == 0 || !is_ident(&line[index - 1]))
      && !line.get(index + name.len()).is_some_and(is_ident)
  }

  /// Finds the assignment operator after a parameter name, on the same line or the one after it.
  fn find_assignment(&self, line_index: usize, from: usize) -> Option<(usize, usize)> {
    let mut lexer = Lexer::new();
    let last_line = (line_index + 1).min(self.lines.len() - 1);

    for current in line_index..=last_line {
      let line = &self.lines[current];
      let mut index = if current == line_index { from } else { 0 };
      while index < line.len() {
        if lexer.is_code() && line[index] == '=' {
          return Some((current, index));
        }
        index += match lexer.step(line, index) {
          Action::Copy(n) | Action::Discard(n) => n,
          Action::Terminate => 1,
        };
      }
      lexer.end_of_line();
    }
    None
  }

  /// Accumulates expression text from the given position until a `,` or `)` at bracket depth zero, or the
  /// end of the file.
  fn scan_expression(&self, line_index: usize, from: usize) -> String {
    let mut lexer = Lexer::new();
    let mut expression = String::new();

    for (current, line) in self.lines.iter().enumerate().skip(line_index) {
      let mut index = if current == line_index { from } else { 0 };
      while index < line.len() {
        match lexer.step(line, index) {
          Action::Terminate => return expression.trim().to_string(),
          Action::Copy(n) => {
            let end = (index + n).min(line.len());
            expression.extend(&line[index..end]);
            index = end;
          }
          Action::Discard(n) => index += n,
        }
      }
      if lexer.end_of_line() {
        expression.push('\n');
      }
    }

    expression.trim().to_string()
  }
}

/// Fills in the default expression of every parameter that declares one.
///
/// Failures are reported as warnings and leave the default [`DefaultValue::Unrecovered`], so the generated
/// builder treats the parameter as having no default.
pub fn resolve_defaults(builder: &mut ResolvedBuilder<'_>, source: Option<&str>, diagnostics: &mut Diagnostics) {
  if !builder.has_defaults() {
    return;
  }
  let scanner = source.map(DefaultValueScanner::new);
  let target = builder.spec.qualified_name();

  for param in builder.params.iter_mut().filter(|param| param.has_default) {
    let result = match (&scanner, param.line) {
      (Some(scanner), Some(line)) => scanner.extract(line, param.column, &param.name),
      _ => Err(ScanFailure::MissingLocation),
    };
    param.default = match result {
      Ok(expression) => {
        diagnostics.debug(format!("Default value for {target}.{}: {expression}", param.name));
        DefaultValue::Expression(expression)
      }
      Err(failure) => {
        diagnostics.warn(
          format!(
            "Unable to extract default value for {target}.{} - {failure}; falling back to {FALLBACK_EXPRESSION}",
            param.name
          ),
          Some(&target),
        );
        DefaultValue::Unrecovered
      }
    };
  }
}
