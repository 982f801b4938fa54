//! RV32I-subset instruction decoding.
//!
//! This module turns raw 32-bit encodings into a structured [`Decoded`]
//! record. It provides:
//! 1. **Micro-operation kinds:** [`AluOp`], [`BranchKind`], [`MemOp`].
//! 2. **Immediates:** Format-specific sign-extended immediate extraction for
//!    the I/S/B/U/J formats.
//! 3. **Defined no-ops:** Unknown major opcodes and unknown function codes
//!    decode to a no-op with no destination — never a fault.

pub mod opcodes;

use crate::common::Word;
use opcodes::{OP_AUIPC, OP_BRANCH, OP_IMM, OP_JAL, OP_JALR, OP_LOAD, OP_LUI, OP_REG, OP_STORE};
use opcodes::{branch3, funct3, funct7};

/// Arithmetic/logic operation selected for the execute stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AluOp {
    /// rs1 + operand 2 (also computes load/store addresses).
    Add,
    /// rs1 - rs2 (there is no SUBI; the second operand is always rs2).
    Sub,
    /// Bitwise and.
    And,
    /// Bitwise or.
    Or,
    /// Bitwise exclusive or.
    Xor,
    /// Logical shift left by operand 2 & 31.
    Sll,
    /// Logical shift right by operand 2 & 31.
    Srl,
    /// Arithmetic shift right by operand 2 & 31 (sign-extending).
    Sra,
    /// Signed set-less-than, producing 0 or 1.
    Slt,
    /// Unsigned set-less-than, producing 0 or 1.
    Sltu,
    /// rs1 + immediate.
    Addi,
    /// The U-format immediate, verbatim.
    Lui,
    /// pc + the U-format immediate.
    Auipc,
    /// No operation; the ALU result is zero.
    #[default]
    Nop,
}

/// Control-flow class of an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BranchKind {
    /// Not a control-flow instruction.
    #[default]
    None,
    /// Branch if rs1 == rs2 (bitwise).
    Beq,
    /// Branch if rs1 != rs2 (bitwise).
    Bne,
    /// Branch if rs1 < rs2, signed.
    Blt,
    /// Branch if rs1 >= rs2, signed.
    Bge,
    /// Branch if rs1 < rs2, unsigned.
    Bltu,
    /// Branch if rs1 >= rs2, unsigned.
    Bgeu,
    /// Unconditional jump to pc + immediate; links pc + 4.
    Jal,
    /// Unconditional jump to (rs1 + immediate) & !1; links pc + 4.
    Jalr,
}

impl BranchKind {
    /// Whether this instruction can redirect the program counter.
    ///
    /// Decode holds fetch for one cycle whenever this is true — the sole
    /// control-hazard mechanism; there is no speculation to undo.
    pub fn is_control_flow(self) -> bool {
        self != Self::None
    }
}

/// Data-memory operation class of an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemOp {
    /// No memory access.
    #[default]
    None,
    /// Word load from the computed address.
    Read,
    /// Word store to the computed address.
    Write,
}

/// A decoded instruction, before operand values are attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Decoded {
    /// Destination register, or `None` when the instruction writes nothing
    /// (stores, branches, rd == x0, and defined no-ops).
    pub rd: Option<u8>,
    /// ALU operation.
    pub op: AluOp,
    /// Control-flow class.
    pub branch: BranchKind,
    /// Memory operation class.
    pub mem: MemOp,
    /// Format-specific sign-extended immediate, when the format has one.
    pub imm: Option<Word>,
    /// First source register index.
    pub rs1: u8,
    /// Second source register index.
    pub rs2: u8,
}

/// Sign-extends the low `bits` bits of `value` to a full word.
fn sign_extend(value: Word, bits: u32) -> Word {
    let mask = 1_u32 << (bits - 1);
    (value ^ mask).wrapping_sub(mask)
}

/// I-format immediate: bits 31-20, sign-extended.
fn imm_i(instr: Word) -> Word {
    sign_extend(instr >> 20, 12)
}

/// S-format immediate: split across bits 31-25 and 11-7, sign-extended.
fn imm_s(instr: Word) -> Word {
    let value = ((instr >> 7) & 0x1f) | (((instr >> 25) & 0x7f) << 5);
    sign_extend(value, 12)
}

/// B-format immediate: a 13-bit even offset scattered over four fields.
fn imm_b(instr: Word) -> Word {
    let value = (((instr >> 8) & 0x0f) << 1)
        | (((instr >> 25) & 0x3f) << 5)
        | (((instr >> 7) & 0x01) << 11)
        | (((instr >> 31) & 0x01) << 12);
    sign_extend(value, 13)
}

/// U-format immediate: bits 31-12, already in position, no sign extension.
fn imm_u(instr: Word) -> Word {
    instr & 0xFFFF_F000
}

/// J-format immediate: a 21-bit even offset scattered over four fields.
fn imm_j(instr: Word) -> Word {
    let value = (((instr >> 21) & 0x3ff) << 1)
        | (((instr >> 20) & 0x001) << 11)
        | (((instr >> 12) & 0x0ff) << 12)
        | (((instr >> 31) & 0x001) << 20);
    sign_extend(value, 21)
}

/// Decodes a 32-bit instruction word.
///
/// Unknown encodings — unrecognized major opcodes, unknown funct3/funct7
/// combinations, or a shift with a malformed funct7 — yield a defined no-op
/// (no destination, no memory access, no control flow).
pub fn decode(instr: Word) -> Decoded {
    let opcode = instr & 0x7f;
    let rd = ((instr >> 7) & 0x1f) as u8;
    let f3 = (instr >> 12) & 0x7;
    let rs1 = ((instr >> 15) & 0x1f) as u8;
    let rs2 = ((instr >> 20) & 0x1f) as u8;
    let f7 = (instr >> 25) & 0x7f;

    let mut decoded = Decoded {
        rs1,
        rs2,
        ..Decoded::default()
    };
    // x0 is hardwired zero: a zero destination means "writes nothing".
    let dest = (rd != 0).then_some(rd);

    match opcode {
        OP_REG => {
            decoded.rd = dest;
            decoded.op = match (f7, f3) {
                (funct7::BASE, funct3::ADD_SUB) => AluOp::Add,
                (funct7::ALT, funct3::ADD_SUB) => AluOp::Sub,
                (funct7::BASE, funct3::AND) => AluOp::And,
                (funct7::BASE, funct3::OR) => AluOp::Or,
                (funct7::BASE, funct3::XOR) => AluOp::Xor,
                (funct7::BASE, funct3::SLL) => AluOp::Sll,
                (funct7::BASE, funct3::SRL_SRA) => AluOp::Srl,
                (funct7::ALT, funct3::SRL_SRA) => AluOp::Sra,
                (funct7::BASE, funct3::SLT) => AluOp::Slt,
                (funct7::BASE, funct3::SLTU) => AluOp::Sltu,
                _ => {
                    decoded.rd = None;
                    AluOp::Nop
                }
            };
        }

        OP_IMM => {
            decoded.rd = dest;
            decoded.imm = Some(imm_i(instr));
            decoded.op = match f3 {
                funct3::ADD_SUB => AluOp::Addi,
                funct3::SLT => AluOp::Slt,
                funct3::SLTU => AluOp::Sltu,
                funct3::XOR => AluOp::Xor,
                funct3::OR => AluOp::Or,
                funct3::AND => AluOp::And,
                // SLLI requires a zero funct7.
                funct3::SLL if f7 == funct7::BASE => AluOp::Sll,
                // SRLI/SRAI are split by instruction bit 30.
                funct3::SRL_SRA => {
                    if f7 & funct7::ALT_BIT == funct7::ALT_BIT {
                        AluOp::Sra
                    } else {
                        AluOp::Srl
                    }
                }
                _ => {
                    decoded.rd = None;
                    decoded.imm = None;
                    AluOp::Nop
                }
            };
        }

        OP_LOAD => {
            decoded.rd = dest;
            decoded.imm = Some(imm_i(instr));
            decoded.mem = MemOp::Read;
            // Address = rs1 + imm.
            decoded.op = AluOp::Add;
        }

        OP_STORE => {
            decoded.imm = Some(imm_s(instr));
            decoded.mem = MemOp::Write;
            decoded.op = AluOp::Add;
        }

        OP_BRANCH => {
            decoded.imm = Some(imm_b(instr));
            decoded.branch = match f3 {
                branch3::BEQ => BranchKind::Beq,
                branch3::BNE => BranchKind::Bne,
                branch3::BLT => BranchKind::Blt,
                branch3::BGE => BranchKind::Bge,
                branch3::BLTU => BranchKind::Bltu,
                branch3::BGEU => BranchKind::Bgeu,
                // Reserved branch encodings fall through as non-branches.
                _ => BranchKind::None,
            };
        }

        OP_LUI => {
            decoded.rd = dest;
            decoded.op = AluOp::Lui;
            decoded.imm = Some(imm_u(instr));
        }

        OP_AUIPC => {
            decoded.rd = dest;
            decoded.op = AluOp::Auipc;
            decoded.imm = Some(imm_u(instr));
        }

        OP_JAL => {
            decoded.rd = dest;
            decoded.branch = BranchKind::Jal;
            decoded.imm = Some(imm_j(instr));
        }

        OP_JALR => {
            decoded.rd = dest;
            decoded.branch = BranchKind::Jalr;
            // Target = rs1 + imm, resolved in execute.
            decoded.imm = Some(imm_i(instr));
        }

        _ => {}
    }

    decoded
}
