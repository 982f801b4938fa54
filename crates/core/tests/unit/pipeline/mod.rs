//! Pipeline behavior tests.

/// Control-flow resolution: branches, jumps, wrong-path containment.
pub mod control;

/// Scoreboard data hazards and the retire/release protocol.
pub mod hazards;
