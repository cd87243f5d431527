use thiserror::Error;

use crate::generator::converter::annotations::Marker;

/// The annotation sits somewhere a builder cannot be generated from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
  #[error("unable to find parent class for {symbol}")]
  MissingEnclosingClass { symbol: String },
  #[error("class {class} referenced by {symbol} is not part of the symbol snapshot")]
  UnknownClass { class: String, symbol: String },
  #[error("class {class} has no primary constructor")]
  MissingPrimaryConstructor { class: String },
}

/// A type marker was applied to a parameter whose type cannot carry it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnnotationMisuseError {
  #[error("@{marker} should not be applied to `{parameter}` of non-parameterized type {type_name}")]
  NotParameterized {
    parameter: String,
    marker: Marker,
    type_name: String,
  },
  #[error("@{marker} should not be applied to `{parameter}`, {type_name} has no type arguments")]
  NoTypeArguments {
    parameter: String,
    marker: Marker,
    type_name: String,
  },
  #[error("@{marker} applied to `{parameter}` but {type_name} has no mutable counterpart")]
  UnsupportedMutableType {
    parameter: String,
    marker: Marker,
    type_name: String,
  },
}

/// Aborts generation of a single target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
  #[error(transparent)]
  Structural(#[from] StructuralError),
  #[error(transparent)]
  AnnotationMisuse(#[from] AnnotationMisuseError),
}
