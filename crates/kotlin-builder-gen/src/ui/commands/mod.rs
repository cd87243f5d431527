pub mod generate;
pub mod list;

pub use generate::{GenerateConfig, generate_builders};
pub use list::list_targets;
