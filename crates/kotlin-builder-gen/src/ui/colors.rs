use std::io::IsTerminal;

use clap::{
  ValueEnum,
  builder::styling::{AnsiColor, Color as ClapColor, RgbColor, Style, Styles},
};
use comfy_table::Color as ComfyColor;
use crossterm::style::Color;
use kotlin_builder_gen::generator::diagnostics::Severity;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
  Always,
  Auto,
  Never,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeMode {
  Dark,
  Light,
  Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
  Dark,
  Light,
}

/// Terminal palette; every accessor returns `Color::Reset` when colour is disabled.
#[derive(Debug, Clone, Copy)]
pub struct Colors {
  enabled: bool,
  theme: Theme,
}

impl Colors {
  pub const fn new(enabled: bool, theme: Theme) -> Self {
    Self { enabled, theme }
  }

  const fn pick(&self, dark: Color, light: Color) -> Color {
    if !self.enabled {
      return Color::Reset;
    }
    match self.theme {
      Theme::Dark => dark,
      Theme::Light => light,
    }
  }

  pub const fn timestamp(&self) -> Color {
    self.pick(Color::Rgb { r: 128, g: 140, b: 170 }, Color::Rgb { r: 86, g: 92, b: 120 })
  }

  pub const fn primary(&self) -> Color {
    self.pick(Color::Rgb { r: 177, g: 140, b: 255 }, Color::Rgb { r: 94, g: 53, b: 177 })
  }

  pub const fn accent(&self) -> Color {
    self.pick(Color::Rgb { r: 240, g: 98, b: 146 }, Color::Rgb { r: 194, g: 24, b: 91 })
  }

  pub const fn info(&self) -> Color {
    self.pick(Color::Rgb { r: 100, g: 181, b: 246 }, Color::Rgb { r: 21, g: 101, b: 192 })
  }

  pub const fn success(&self) -> Color {
    self.pick(Color::Rgb { r: 129, g: 199, b: 132 }, Color::Rgb { r: 46, g: 125, b: 50 })
  }

  pub const fn warning(&self) -> Color {
    self.pick(Color::Rgb { r: 255, g: 183, b: 77 }, Color::Rgb { r: 230, g: 81, b: 0 })
  }

  pub const fn label(&self) -> Color {
    self.pick(Color::Rgb { r: 206, g: 147, b: 216 }, Color::Rgb { r: 123, g: 31, b: 162 })
  }

  pub const fn value(&self) -> Color {
    self.pick(Color::Rgb { r: 255, g: 213, b: 79 }, Color::Rgb { r: 161, g: 110, b: 0 })
  }

  pub const fn severity(&self, severity: Severity) -> Color {
    match severity {
      Severity::Error => self.accent(),
      Severity::Warning => self.warning(),
      Severity::Info => self.info(),
      Severity::Debug => self.timestamp(),
    }
  }

  pub const fn comfy(color: Color) -> ComfyColor {
    match color {
      Color::Reset => ComfyColor::Reset,
      Color::Black => ComfyColor::Black,
      Color::DarkGrey => ComfyColor::DarkGrey,
      Color::Red => ComfyColor::Red,
      Color::DarkRed => ComfyColor::DarkRed,
      Color::Green => ComfyColor::Green,
      Color::DarkGreen => ComfyColor::DarkGreen,
      Color::Yellow => ComfyColor::Yellow,
      Color::DarkYellow => ComfyColor::DarkYellow,
      Color::Blue => ComfyColor::Blue,
      Color::DarkBlue => ComfyColor::DarkBlue,
      Color::Magenta => ComfyColor::Magenta,
      Color::DarkMagenta => ComfyColor::DarkMagenta,
      Color::Cyan => ComfyColor::Cyan,
      Color::DarkCyan => ComfyColor::DarkCyan,
      Color::White => ComfyColor::White,
      Color::Grey => ComfyColor::Grey,
      Color::Rgb { r, g, b } => ComfyColor::Rgb { r, g, b },
      Color::AnsiValue(value) => ComfyColor::AnsiValue(value),
    }
  }

  const fn clap(color: Color) -> Option<ClapColor> {
    match color {
      Color::Rgb { r, g, b } => Some(ClapColor::Rgb(RgbColor(r, g, b))),
      Color::Reset => None,
      _ => Some(ClapColor::Ansi(AnsiColor::White)),
    }
  }

  /// Help output styling, always using the dark palette.
  pub const fn clap_styles() -> Styles {
    let colors = Self::new(true, Theme::Dark);

    Styles::styled()
      .header(Style::new().bold().underline().fg_color(Self::clap(colors.label())))
      .usage(Style::new().bold().fg_color(Self::clap(colors.label())))
      .literal(Style::new().fg_color(Self::clap(colors.success())))
      .placeholder(Style::new().fg_color(Self::clap(colors.info())))
      .error(Style::new().bold().fg_color(Self::clap(colors.accent())))
      .valid(Style::new().fg_color(Self::clap(colors.success())))
      .invalid(Style::new().bold().fg_color(Self::clap(colors.accent())))
  }
}

pub fn colors_enabled(mode: ColorMode) -> bool {
  match mode {
    ColorMode::Always => true,
    ColorMode::Never => false,
    ColorMode::Auto => std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
  }
}

pub fn detect_theme(mode: ThemeMode) -> Theme {
  match mode {
    ThemeMode::Dark => Theme::Dark,
    ThemeMode::Light => Theme::Light,
    ThemeMode::Auto => std::env::var("COLORFGBG")
      .ok()
      .as_deref()
      .and_then(theme_from_colorfgbg)
      .unwrap_or(Theme::Dark),
  }
}

/// Interprets `COLORFGBG` (`fg;bg`): background colours 8 and above are light.
fn theme_from_colorfgbg(value: &str) -> Option<Theme> {
  let background = value.rsplit(';').next()?.trim().parse::<u8>().ok()?;
  Some(if background >= 8 { Theme::Light } else { Theme::Dark })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_theme_from_colorfgbg() {
    let cases = [
      ("15;0", Some(Theme::Dark)),
      ("0;15", Some(Theme::Light)),
      ("0;default;7", Some(Theme::Dark)),
      ("default", None),
      ("", None),
    ];
    for (value, expected) in cases {
      assert_eq!(theme_from_colorfgbg(value), expected, "failed for {value:?}");
    }
  }

  #[test]
  fn test_disabled_colors_reset() {
    let colors = Colors::new(false, Theme::Light);
    assert_eq!(colors.primary(), Color::Reset);
    assert_eq!(colors.severity(Severity::Error), Color::Reset);
  }

  #[test]
  fn test_severity_palette() {
    let colors = Colors::new(true, Theme::Dark);
    assert_eq!(colors.severity(Severity::Error), colors.accent());
    assert_eq!(colors.severity(Severity::Warning), colors.warning());
    assert_ne!(colors.severity(Severity::Info), Color::Reset);
  }
}
