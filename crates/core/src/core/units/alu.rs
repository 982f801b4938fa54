//! 32-bit arithmetic/logic unit.
//!
//! All arithmetic is unsigned and wraps modulo 2^32; signed behavior
//! (SRA, SLT, signed branch compares) is expressed through explicit `i32`
//! reinterpretation, never through a wider intermediate type.

use crate::common::Word;
use crate::isa::AluOp;

/// Evaluates one ALU operation.
///
/// The second operand is the immediate when the instruction carries one,
/// otherwise `rs2_val` — with two exceptions taken from the ISA: `Sub`
/// always uses `rs2_val` (there is no SUBI), and shift amounts are the low
/// five bits of the selected operand.
pub fn evaluate(op: AluOp, rs1_val: Word, rs2_val: Word, imm: Option<Word>, pc: Word) -> Word {
    let op2 = imm.unwrap_or(rs2_val);
    let shamt = op2 & 31;

    match op {
        AluOp::Add | AluOp::Addi => rs1_val.wrapping_add(op2),
        AluOp::Sub => rs1_val.wrapping_sub(rs2_val),
        AluOp::And => rs1_val & op2,
        AluOp::Or => rs1_val | op2,
        AluOp::Xor => rs1_val ^ op2,
        AluOp::Sll => rs1_val << shamt,
        AluOp::Srl => rs1_val >> shamt,
        AluOp::Sra => ((rs1_val as i32) >> shamt) as Word,
        AluOp::Slt => ((rs1_val as i32) < (op2 as i32)) as Word,
        AluOp::Sltu => (rs1_val < op2) as Word,
        AluOp::Lui => imm.unwrap_or(0),
        AluOp::Auipc => pc.wrapping_add(imm.unwrap_or(0)),
        AluOp::Nop => 0,
    }
}
