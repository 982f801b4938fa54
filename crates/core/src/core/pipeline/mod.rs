//! The five-stage in-order pipeline.
//!
//! Stage-to-stage communication happens exclusively through clocked latch
//! registers declared by the machine; the stages themselves are stateless
//! combinational components. Hazard handling is deliberately simple:
//! 1. **Data hazards:** A scoreboard of locked destination registers stalls
//!    decode until every source operand is unlocked.
//! 2. **Control hazards:** Decode holds fetch for one cycle after issuing any
//!    control-flow instruction and discards the in-flight word if execute
//!    reports a taken redirect. Nothing downstream of decode is ever wrong
//!    path, so no squash logic exists past that point.

pub mod latches;
pub mod scoreboard;
pub mod stages;

pub use latches::{ExecResult, FetchedInstr, MicroOp, Retirement};
pub use scoreboard::Scoreboard;
