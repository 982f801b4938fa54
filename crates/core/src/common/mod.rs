//! Common types shared across the engine and the machine core.
//!
//! This module provides:
//! 1. **Word type:** The 32-bit machine word used throughout the core.
//! 2. **Errors:** Load-time and construction-time failure types.

pub mod error;

pub use error::{BuildError, LoadError, SimError};

/// The 32-bit machine word. All architectural state, memory contents, and
/// datapath values are words; arithmetic wraps modulo 2^32.
pub type Word = u32;

/// Number of architectural registers in the register file.
pub const NUM_REGISTERS: usize = 32;

/// Byte width of one instruction; the PC advances by this much per fetch.
pub const INSTRUCTION_BYTES: Word = 4;
