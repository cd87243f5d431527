#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
//! Generates fluent builder classes for Kotlin classes and constructors annotated with `@Builder`.
//!
//! The crate consumes a [`SymbolSnapshot`](generator::symbols::SymbolSnapshot) describing the annotated
//! declarations of one compilation round and produces one builder per target class, either as a structural
//! description ([`BuilderArtifact`](generator::ast::BuilderArtifact)) or as rendered Kotlin source.

pub mod generator;
pub mod utils;
