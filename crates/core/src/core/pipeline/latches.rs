//! Latch payloads carried between pipeline stages.
//!
//! Each inter-stage latch is a clocked `Option` register: `None` is a bubble,
//! `Some` carries the payload below. Every stage writes its output latch every
//! cycle, bubbles included, so a latch never re-presents a stale payload.

use crate::common::Word;
use crate::isa::{AluOp, BranchKind, MemOp};

/// Fetch → decode: a raw instruction word and the address it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchedInstr {
    /// The raw 32-bit encoding.
    pub instr: Word,
    /// Address the word was fetched from.
    pub pc: Word,
}

/// Decode → execute: a decoded instruction with operand values attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MicroOp {
    /// Destination register, or `None` when nothing is written back.
    pub rd: Option<u8>,
    /// ALU operation.
    pub op: AluOp,
    /// Control-flow class.
    pub branch: BranchKind,
    /// Memory operation class.
    pub mem: MemOp,
    /// Sign-extended immediate, when the format carries one.
    pub imm: Option<Word>,
    /// Committed value of rs1 at decode time.
    pub rs1_val: Word,
    /// Committed value of rs2 at decode time.
    pub rs2_val: Word,
    /// Address of the instruction, for branch targets and link values.
    pub pc: Word,
}

/// Execute → memory: the ALU result plus everything memory needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecResult {
    /// The ALU output; doubles as the byte address for loads and stores.
    pub addr_or_result: Word,
    /// Value to store (rs2), meaningful only for stores.
    pub store_data: Word,
    /// Writeback value for everything except loads (ALU result, or the link
    /// address for jumps).
    pub wb_nonload: Word,
    /// Memory operation class.
    pub mem: MemOp,
    /// Destination register, or `None`.
    pub rd: Option<u8>,
}

/// Memory → writeback: the final value and where it goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Retirement {
    /// Value to write into the register file.
    pub wb_value: Word,
    /// Destination register, or `None`.
    pub rd: Option<u8>,
}
