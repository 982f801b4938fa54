//! Unit tests for individual simulator components.


/// Machine-level evaluation-order independence.
pub mod engine;

/// Intel-HEX loading from disk through to a running machine.
pub mod loader;

/// Pipeline hazard, control-flow, and memory behavior.
pub mod pipeline;
