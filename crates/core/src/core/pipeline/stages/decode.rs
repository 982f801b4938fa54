//! Instruction decode, operand read, and hazard resolution.

use tracing::trace;

use crate::common::Word;
use crate::core::pipeline::latches::{FetchedInstr, MicroOp};
use crate::core::pipeline::scoreboard::Scoreboard;
use crate::engine::{Component, MemId, RegId, Registry, SlotId};
use crate::isa;

/// Decode stage: the pipeline's only issue point and only hazard authority.
///
/// Each cycle it works through, in order:
/// 1. **Scoreboard maintenance.** Applies the destination writeback retired
///    last cycle as a release. Decode is the sole writer of the scoreboard
///    register, so a release and a fresh lock of the same register in one
///    cycle leave it locked.
/// 2. **Redirect squash.** If execute reported a taken redirect, the word in
///    flight was fetched past that branch; it is discarded and the pending
///    flag cleared.
/// 3. **Branch shadow.** The cycle after issuing any control-flow
///    instruction, the in-flight word is buffered unissued until the
///    redirect verdict arrives.
/// 4. **Issue or stall.** The buffered word, or failing that the fetch
///    latch, is decoded. If a source or destination register is locked, it
///    is re-buffered and fetch is stalled; otherwise operands are read, the
///    destination is locked, and the micro-op issues. Issuing a control-flow instruction
///    stalls fetch and arms the branch shadow for the next cycle.
#[derive(Debug)]
pub struct Decode {
    input: RegId<Option<FetchedInstr>>,
    redirect: RegId<Option<Word>>,
    retired: RegId<Option<u8>>,
    regfile: MemId,
    out: RegId<Option<MicroOp>>,
    stall: RegId<bool>,
    held: RegId<Option<FetchedInstr>>,
    pending: RegId<bool>,
    scoreboard: RegId<Scoreboard>,
}

impl Decode {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        input: RegId<Option<FetchedInstr>>,
        redirect: RegId<Option<Word>>,
        retired: RegId<Option<u8>>,
        regfile: MemId,
        out: RegId<Option<MicroOp>>,
        stall: RegId<bool>,
        held: RegId<Option<FetchedInstr>>,
        pending: RegId<bool>,
        scoreboard: RegId<Scoreboard>,
    ) -> Self {
        Self {
            input,
            redirect,
            retired,
            regfile,
            out,
            stall,
            held,
            pending,
            scoreboard,
        }
    }
}

impl Component for Decode {
    fn name(&self) -> &'static str {
        "decode"
    }

    fn written_slots(&self) -> Vec<SlotId> {
        vec![
            self.out.slot(),
            self.stall.slot(),
            self.held.slot(),
            self.pending.slot(),
            self.scoreboard.slot(),
        ]
    }

    fn evaluate(&self, registry: &mut Registry) {
        let mut scoreboard = *registry.read(self.scoreboard);
        if let Some(retired) = *registry.read(self.retired) {
            scoreboard.release(retired);
        }

        let mut out = None;
        let mut stall = false;
        let mut held_next = None;
        let mut pending_next = false;

        // The buffered word, if any, is always older than the fetch latch.
        let candidate = (*registry.read(self.held)).or(*registry.read(self.input));

        if registry.read(self.redirect).is_some() {
            // The in-flight word was fetched past a taken branch.
            trace!("decode: discard wrong-path word");
        } else if *registry.read(self.pending) {
            // A control-flow instruction issued last cycle is resolving in
            // execute; defer the next word until the verdict arrives.
            held_next = candidate;
        } else if let Some(fetched) = candidate {
            let decoded = isa::decode(fetched.instr);
            // A locked destination also stalls: the release protocol only
            // works with at most one outstanding write per register.
            let blocked = scoreboard.is_locked(decoded.rs1)
                || scoreboard.is_locked(decoded.rs2)
                || decoded.rd.is_some_and(|rd| scoreboard.is_locked(rd));
            if blocked {
                trace!(pc = fetched.pc, "decode: hazard stall");
                held_next = Some(fetched);
                stall = true;
            } else {
                let rs1_val = registry
                    .word(self.regfile, usize::from(decoded.rs1))
                    .unwrap_or(0);
                let rs2_val = registry
                    .word(self.regfile, usize::from(decoded.rs2))
                    .unwrap_or(0);
                if let Some(rd) = decoded.rd {
                    scoreboard.lock(rd);
                }
                let control_flow = decoded.branch.is_control_flow();
                stall = control_flow;
                pending_next = control_flow;
                trace!(pc = fetched.pc, op = ?decoded.op, "decode: issue");
                out = Some(MicroOp {
                    rd: decoded.rd,
                    op: decoded.op,
                    branch: decoded.branch,
                    mem: decoded.mem,
                    imm: decoded.imm,
                    rs1_val,
                    rs2_val,
                    pc: fetched.pc,
                });
            }
        }

        registry.write_next(self.out, out);
        registry.write_next(self.stall, stall);
        registry.write_next(self.held, held_next);
        registry.write_next(self.pending, pending_next);
        registry.write_next(self.scoreboard, scoreboard);
    }
}
