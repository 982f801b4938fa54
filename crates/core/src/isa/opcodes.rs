//! RV32I opcode and function-code constants.
//!
//! Defines the major opcodes (bits 6-0) and the funct3/funct7 values the
//! decoder distinguishes.

/// Load instructions (treated as LW; word-granular memory only).
pub const OP_LOAD: u32 = 0b0000011;

/// Immediate arithmetic instructions (ADDI, ANDI, SLLI, etc.).
pub const OP_IMM: u32 = 0b0010011;

/// Add Upper Immediate to PC (AUIPC).
pub const OP_AUIPC: u32 = 0b0010111;

/// Store instructions (treated as SW; word-granular memory only).
pub const OP_STORE: u32 = 0b0100011;

/// Register-Register arithmetic (ADD, SUB, SLL, etc.).
pub const OP_REG: u32 = 0b0110011;

/// Load Upper Immediate (LUI).
pub const OP_LUI: u32 = 0b0110111;

/// Conditional branch instructions (BEQ, BNE, etc.).
pub const OP_BRANCH: u32 = 0b1100011;

/// Jump and Link Register (JALR).
pub const OP_JALR: u32 = 0b1100111;

/// Jump and Link (JAL).
pub const OP_JAL: u32 = 0b1101111;

/// funct3 values for register/immediate arithmetic.
pub mod funct3 {
    /// ADD/SUB (register) or ADDI (immediate).
    pub const ADD_SUB: u32 = 0b000;
    /// Shift left logical.
    pub const SLL: u32 = 0b001;
    /// Set less than, signed.
    pub const SLT: u32 = 0b010;
    /// Set less than, unsigned.
    pub const SLTU: u32 = 0b011;
    /// Bitwise exclusive or.
    pub const XOR: u32 = 0b100;
    /// Shift right (logical or arithmetic, split by funct7 bit 5).
    pub const SRL_SRA: u32 = 0b101;
    /// Bitwise or.
    pub const OR: u32 = 0b110;
    /// Bitwise and.
    pub const AND: u32 = 0b111;
}

/// funct3 values for conditional branches.
pub mod branch3 {
    /// Branch if equal.
    pub const BEQ: u32 = 0b000;
    /// Branch if not equal.
    pub const BNE: u32 = 0b001;
    /// Branch if less than, signed.
    pub const BLT: u32 = 0b100;
    /// Branch if greater or equal, signed.
    pub const BGE: u32 = 0b101;
    /// Branch if less than, unsigned.
    pub const BLTU: u32 = 0b110;
    /// Branch if greater or equal, unsigned.
    pub const BGEU: u32 = 0b111;
}

/// funct7 values distinguishing ADD/SUB and SRL/SRA.
pub mod funct7 {
    /// Base variant (ADD, SRL).
    pub const BASE: u32 = 0b0000000;
    /// Alternate variant (SUB, SRA); bit 5 set.
    pub const ALT: u32 = 0b0100000;
    /// The single bit that selects the alternate shift (bit 30 of the word).
    pub const ALT_BIT: u32 = 0b0100000;
}
