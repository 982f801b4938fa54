//! Execute: ALU evaluation and branch resolution.

use tracing::trace;

use crate::common::{INSTRUCTION_BYTES, Word};
use crate::core::pipeline::latches::{ExecResult, MicroOp};
use crate::core::units::alu;
use crate::engine::{Component, RegId, Registry, SlotId};
use crate::isa::BranchKind;

/// Execute stage: runs the ALU and resolves control flow.
///
/// Branch targets are pc-relative; JALR targets come from rs1 with the low
/// bit cleared. A taken branch or jump publishes the target on the redirect
/// register for exactly one cycle. Jumps write the link address pc + 4;
/// conditional branches write nothing.
#[derive(Debug)]
pub struct Execute {
    input: RegId<Option<MicroOp>>,
    out: RegId<Option<ExecResult>>,
    redirect: RegId<Option<Word>>,
}

impl Execute {
    pub fn new(
        input: RegId<Option<MicroOp>>,
        out: RegId<Option<ExecResult>>,
        redirect: RegId<Option<Word>>,
    ) -> Self {
        Self {
            input,
            out,
            redirect,
        }
    }
}

impl Component for Execute {
    fn name(&self) -> &'static str {
        "execute"
    }

    fn written_slots(&self) -> Vec<SlotId> {
        vec![self.out.slot(), self.redirect.slot()]
    }

    fn evaluate(&self, registry: &mut Registry) {
        let mut out = None;
        let mut redirect = None;

        if let Some(op) = *registry.read(self.input) {
            let result = alu::evaluate(op.op, op.rs1_val, op.rs2_val, op.imm, op.pc);
            let imm = op.imm.unwrap_or(0);
            let target = op.pc.wrapping_add(imm);

            let taken = match op.branch {
                BranchKind::None => false,
                BranchKind::Beq => op.rs1_val == op.rs2_val,
                BranchKind::Bne => op.rs1_val != op.rs2_val,
                BranchKind::Blt => (op.rs1_val as i32) < (op.rs2_val as i32),
                BranchKind::Bge => (op.rs1_val as i32) >= (op.rs2_val as i32),
                BranchKind::Bltu => op.rs1_val < op.rs2_val,
                BranchKind::Bgeu => op.rs1_val >= op.rs2_val,
                BranchKind::Jal | BranchKind::Jalr => true,
            };
            if taken {
                let dest = if op.branch == BranchKind::Jalr {
                    op.rs1_val.wrapping_add(imm) & !1
                } else {
                    target
                };
                trace!(pc = op.pc, dest, "execute: taken");
                redirect = Some(dest);
            }

            let wb_nonload = match op.branch {
                BranchKind::Jal | BranchKind::Jalr => op.pc.wrapping_add(INSTRUCTION_BYTES),
                _ => result,
            };
            out = Some(ExecResult {
                addr_or_result: result,
                store_data: op.rs2_val,
                wb_nonload,
                mem: op.mem,
                rd: op.rd,
            });
        }

        registry.write_next(self.out, out);
        registry.write_next(self.redirect, redirect);
    }
}
