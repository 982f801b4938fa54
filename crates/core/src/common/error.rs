//! Error definitions for program loading and machine construction.
//!
//! This module defines the two failure domains of the simulator:
//! 1. **Load-time errors:** A malformed program image aborts before any
//!    machine is constructed; nothing here surfaces during simulation.
//! 2. **Build-time errors:** Violations of engine wiring invariants (two
//!    writers driving one register slot, oversized program images) are
//!    rejected when the machine is assembled, never at run time.

use thiserror::Error;

/// Errors raised while parsing an Intel-HEX program image.
///
/// All record-level variants carry the 1-based line number of the offending
/// record so a bad image can be fixed by hand.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The image file could not be read.
    #[error("failed to read program image '{path}': {source}")]
    Io {
        /// Path of the image that could not be opened.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A record contains a character that is not a hexadecimal digit.
    #[error("line {line}: invalid hex digit")]
    InvalidDigit {
        /// 1-based line number of the record.
        line: usize,
    },

    /// A record ends before all fields declared by its byte count are present.
    #[error("line {line}: truncated record")]
    Truncated {
        /// 1-based line number of the record.
        line: usize,
    },

    /// The record checksum does not sum to zero.
    #[error("line {line}: checksum mismatch")]
    Checksum {
        /// 1-based line number of the record.
        line: usize,
    },

    /// The record type is not one the loader understands.
    #[error("line {line}: unknown record type {kind:#04x}")]
    UnknownRecord {
        /// 1-based line number of the record.
        line: usize,
        /// The unrecognized record-type byte.
        kind: u8,
    },

    /// An extended segment/linear address record does not carry exactly
    /// two data bytes.
    #[error("line {line}: extended address record must carry two bytes")]
    BadExtendedAddress {
        /// 1-based line number of the record.
        line: usize,
    },

    /// A data record writes a byte whose word address lies beyond the
    /// configured memory capacity.
    #[error("line {line}: write address out of range ({address:#010x})")]
    OutOfRange {
        /// 1-based line number of the record.
        line: usize,
        /// The out-of-range byte address.
        address: u32,
    },

    /// The image ended without an end-of-file record (type 01).
    #[error("image missing end-of-file record (type 01)")]
    MissingTerminator,
}

/// Errors raised while assembling a machine from an engine and components.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Two components claimed write access to the same register slot.
    ///
    /// The engine enforces a single writer per slot at registration time so
    /// that the post-commit state of a cycle cannot depend on task order.
    #[error("slot {slot} is already driven by '{existing}'; '{component}' may not also write it")]
    WriterConflict {
        /// Index of the contested register slot.
        slot: usize,
        /// Name of the component that already owns the slot.
        existing: &'static str,
        /// Name of the component whose registration was rejected.
        component: &'static str,
    },

    /// The program image does not fit in instruction memory.
    #[error("program of {words} words exceeds instruction memory capacity of {capacity}")]
    ProgramTooLarge {
        /// Length of the program image in words.
        words: usize,
        /// Configured instruction-memory capacity in words.
        capacity: usize,
    },

    /// The configured initial data image does not fit in data memory.
    #[error("data image of {words} words exceeds data memory capacity of {capacity}")]
    DataImageTooLarge {
        /// Length of the initial data image in words.
        words: usize,
        /// Configured data-memory capacity in words.
        capacity: usize,
    },
}

/// Umbrella error for constructing a machine from an image on disk.
#[derive(Debug, Error)]
pub enum SimError {
    /// The program image failed to load.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// The machine failed to assemble.
    #[error(transparent)]
    Build(#[from] BuildError),
}
