use std::path::Path;

use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};
use kotlin_builder_gen::{
  generator::orchestrator::{Orchestrator, TargetSummary},
  utils::manifest::ManifestLoader,
};

use crate::ui::{Colors, term_width};

fn prefix_label(prefix: &str) -> &str {
  if prefix.is_empty() { "(none)" } else { prefix }
}

fn targets_table(targets: Vec<TargetSummary>, colors: &Colors) -> Table {
  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut header = Row::new();
  for title in ["TARGET", "BUILDER", "PARAMS", "SETTER PREFIX"] {
    header.add_cell(Cell::new(title).fg(Colors::comfy(colors.label())));
  }
  table.set_header(header);

  for target in targets {
    let mut row = Row::new();
    row.add_cell(
      Cell::new(&target.target)
        .fg(Colors::comfy(colors.value()))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(Cell::new(&target.builder_name).fg(Colors::comfy(colors.primary())));
    row.add_cell(
      Cell::new(target.parameter_count)
        .fg(Colors::comfy(colors.accent()))
        .set_alignment(CellAlignment::Right),
    );
    row.add_cell(Cell::new(prefix_label(&target.setter_prefix)).fg(Colors::comfy(colors.info())));
    table.add_row(row);
  }

  table
}

pub async fn list_targets(input: &Path, colors: &Colors) -> anyhow::Result<()> {
  let snapshot = ManifestLoader::open(input).await?.load().await?;
  let mut targets = Orchestrator::from_snapshot(snapshot).targets();
  targets.sort_by(|a, b| a.target.cmp(&b.target));

  println!("{}", targets_table(targets, colors));
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ui::colors::Theme;

  #[test]
  fn test_table_lists_every_target() {
    let targets = vec![
      TargetSummary {
        target: "com.example.Person".to_string(),
        builder_name: "PersonBuilder".to_string(),
        parameter_count: 3,
        setter_prefix: "with".to_string(),
      },
      TargetSummary {
        target: "com.example.Outer.Inner".to_string(),
        builder_name: "Outer_InnerBuilder".to_string(),
        parameter_count: 1,
        setter_prefix: String::new(),
      },
    ];
    let table = targets_table(targets, &Colors::new(false, Theme::Dark));

    let rendered = table.to_string();
    for expected in ["PersonBuilder", "Outer_InnerBuilder", "with", "(none)"] {
      assert!(rendered.contains(expected), "missing {expected} in:\n{rendered}");
    }
  }
}
