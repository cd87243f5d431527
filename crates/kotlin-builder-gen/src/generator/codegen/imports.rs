use std::collections::BTreeSet;

use crate::generator::ast::Import;

/// Sorted, de-duplicated import directives, one per line.
pub(crate) fn render_imports(imports: &[Import]) -> String {
  let unique: BTreeSet<&Import> = imports.iter().collect();
  unique
    .into_iter()
    .map(|import| match &import.alias {
      Some(alias) => format!("import {} as {alias}\n", import.path),
      None => format!("import {}\n", import.path),
    })
    .collect()
}
