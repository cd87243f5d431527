use std::collections::BTreeSet;

use serde::Serialize;
use strum::{Display, EnumString};

use crate::generator::symbols::{ClassDecl, ParameterDecl};

/// Marker annotations that influence how a parameter's type is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Display, EnumString)]
pub enum Marker {
  /// The last type argument of a collection or map may hold `null`.
  NullableType,
  /// The collection must be generated with its mutable counterpart.
  Mutable,
  /// A reference type that would otherwise be nullable is not.
  #[strum(to_string = "NotNull", serialize = "NonNull", serialize = "Nonnull")]
  NotNull,
}

impl Marker {
  /// Recognises an annotation by its simple name, ignoring package, `@` and arguments.
  pub fn from_annotation(annotation: &str) -> Option<Self> {
    let name = annotation.trim().trim_start_matches('@');
    let name = name.split('(').next().unwrap_or(name).trim();
    let simple = name.rsplit('.').next().unwrap_or(name);
    simple.parse().ok()
  }
}

/// The markers visible for one logical field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
  markers: BTreeSet<Marker>,
}

impl Capabilities {
  pub fn from_annotations<'a>(annotations: impl IntoIterator<Item = &'a String>) -> Self {
    Self {
      markers: annotations
        .into_iter()
        .filter_map(|annotation| Marker::from_annotation(annotation))
        .collect(),
    }
  }

  pub fn has(&self, marker: Marker) -> bool {
    self.markers.contains(&marker)
  }

  pub fn nullable_element(&self) -> bool {
    self.has(Marker::NullableType)
  }

  pub fn mutable_collection(&self) -> bool {
    self.has(Marker::Mutable)
  }

  pub fn not_null(&self) -> bool {
    self.has(Marker::NotNull)
  }
}

/// Union of the markers on `parameter` and on the property of `class` with the same name.
///
/// Field-level annotations count as if they were written on the parameter.
pub fn capabilities(parameter: &ParameterDecl, class: &ClassDecl) -> Capabilities {
  let field_annotations = class
    .property(&parameter.name)
    .map(|property| property.annotations.as_slice())
    .unwrap_or_default();
  Capabilities::from_annotations(parameter.annotations.iter().chain(field_annotations))
}
