//! Functional units used by the pipeline stages.

pub mod alu;
