//! Whole-program pipeline tests.


/// Bubble sort over data memory, checked against the reference model.
pub mod sort;
