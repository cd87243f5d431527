pub mod ast;
pub mod codegen;
pub mod config;
pub mod converter;
pub mod diagnostics;
pub mod emitter;
pub mod errors;
pub mod extractor;
pub mod naming;
pub mod orchestrator;
pub mod runtime;
pub mod symbols;

#[cfg(test)]
mod tests;
