//! Program image loading.

pub mod loader;

pub use loader::{load_hex_file, load_hex_str};
