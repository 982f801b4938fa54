//! Instruction fetch.

use tracing::trace;

use crate::common::{INSTRUCTION_BYTES, Word};
use crate::core::pipeline::latches::FetchedInstr;
use crate::engine::{Component, MemId, RegId, Registry, SlotId};

/// Fetch stage: reads one word from instruction memory per cycle.
///
/// Responds to two upstream signals from decode and execute:
/// 1. A taken redirect retargets the PC and bubbles the output latch; the
///    word fetched past the branch never reaches decode.
/// 2. A stall holds both the PC and the output latch, so the unconsumed
///    word stays available until decode can take it.
///
/// A PC past the end of instruction memory holds in place and emits
/// bubbles; running off the program is inert, not a fault.
#[derive(Debug)]
pub struct Fetch {
    pc: RegId<Word>,
    imem: MemId,
    stall: RegId<bool>,
    redirect: RegId<Option<Word>>,
    out: RegId<Option<FetchedInstr>>,
}

impl Fetch {
    pub fn new(
        pc: RegId<Word>,
        imem: MemId,
        stall: RegId<bool>,
        redirect: RegId<Option<Word>>,
        out: RegId<Option<FetchedInstr>>,
    ) -> Self {
        Self {
            pc,
            imem,
            stall,
            redirect,
            out,
        }
    }
}

impl Component for Fetch {
    fn name(&self) -> &'static str {
        "fetch"
    }

    fn written_slots(&self) -> Vec<SlotId> {
        vec![self.pc.slot(), self.out.slot()]
    }

    fn evaluate(&self, registry: &mut Registry) {
        let pc = *registry.read(self.pc);

        if let Some(dest) = *registry.read(self.redirect) {
            trace!(dest, "fetch: redirect");
            registry.write_next(self.pc, dest);
            registry.write_next(self.out, None);
        } else if *registry.read(self.stall) {
            // Decode has not consumed the latched word; hold everything.
            let held = *registry.read(self.out);
            registry.write_next(self.pc, pc);
            registry.write_next(self.out, held);
        } else if let Some(instr) = registry.word(self.imem, (pc / INSTRUCTION_BYTES) as usize) {
            trace!(pc, instr, "fetch");
            registry.write_next(self.pc, pc.wrapping_add(INSTRUCTION_BYTES));
            registry.write_next(self.out, Some(FetchedInstr { instr, pc }));
        } else {
            // Past the end of instruction memory: idle.
            registry.write_next(self.pc, pc);
            registry.write_next(self.out, None);
        }
    }
}
