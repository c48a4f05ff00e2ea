//! Configuration for the library screen store.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, LibraryConfig};
