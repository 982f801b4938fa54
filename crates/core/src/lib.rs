//! Cycle-accurate simulation framework for synchronous digital hardware.
//!
//! This crate implements a deterministic synchronous-update kernel and a
//! hazard-aware pipelined processor built on top of it:
//! 1. **Engine:** Clocked register slots and combinational tasks with an
//!    evaluate-then-commit cycle discipline.
//! 2. **ISA:** Decoding for an RV32I integer subset (R/I/S/B/U/J formats,
//!    word-granular loads and stores).
//! 3. **Core:** A 5-stage in-order pipeline (fetch, decode, execute, memory,
//!    writeback) with scoreboard-based stalls and stall-on-branch control flow.
//! 4. **Simulation:** Intel-HEX program loader and machine configuration.

/// Common types and error definitions shared across the crate.
pub mod common;
/// Simulator configuration (defaults, JSON deserialization).
pub mod config;
/// Machine core (architectural state, pipeline stages, ALU).
pub mod core;
/// Synchronous-update engine (register slots, registry, components).
pub mod engine;
/// Instruction set (opcodes, micro-operation kinds, decoder).
pub mod isa;
/// Program-image loading.
pub mod sim;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Assembled 5-stage machine; construct with `Machine::assemble`.
pub use crate::core::Machine;
/// Synchronous-update engine; owns all registers and tasks.
pub use crate::engine::Engine;
