//! Configuration for assembled machines.
//!
//! This module defines the machine configuration structure. It provides:
//! 1. **Defaults:** Baseline memory capacities matching the reference design.
//! 2. **Power-on state:** Initial data-memory image and stack-pointer seed.
//! 3. **Deserialization:** JSON configuration via serde.

use serde::Deserialize;

use crate::common::Word;

/// Default configuration constants for the machine.
///
/// These values define the baseline memory geometry when not explicitly
/// overridden.
mod defaults {
    /// Instruction-memory capacity in 32-bit words (4 KiB of code).
    pub const IMEM_WORDS: usize = 1024;

    /// Data-memory capacity in 32-bit words (8 KiB of data).
    pub const DMEM_WORDS: usize = 2048;

    pub(super) const fn imem_words() -> usize {
        IMEM_WORDS
    }

    pub(super) const fn dmem_words() -> usize {
        DMEM_WORDS
    }
}

/// Machine configuration.
///
/// Controls memory geometry and power-on state. Every field has a default,
/// so a partial JSON document (or `Config::default()`) is always valid.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Instruction-memory capacity in words. Fetches at or beyond this
    /// boundary are a non-fatal idle, not a fault.
    pub imem_words: usize,

    /// Data-memory capacity in words. Loads and stores outside this
    /// boundary are inert.
    pub dmem_words: usize,

    /// Initial data-memory contents, placed at word address 0. The rest of
    /// data memory is zeroed. Must not exceed `dmem_words`.
    pub data_image: Vec<Word>,

    /// Power-on value for `x2` (the ABI stack pointer), if any. All other
    /// registers start at zero.
    pub stack_pointer: Option<Word>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            imem_words: defaults::imem_words(),
            dmem_words: defaults::dmem_words(),
            data_image: Vec::new(),
            stack_pointer: None,
        }
    }
}

impl Config {
    /// Deserializes a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns the underlying serde error if the document is malformed or a
    /// field has the wrong type.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
