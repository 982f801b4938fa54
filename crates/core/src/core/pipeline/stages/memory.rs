//! Memory access.

use tracing::trace;

use crate::core::pipeline::latches::{ExecResult, Retirement};
use crate::engine::{Component, MemId, RegId, Registry, SlotId};
use crate::isa::MemOp;

/// Memory stage: word-granular loads and stores against data memory.
///
/// Addresses are byte addresses; the low two bits are dropped. Out-of-range
/// loads leave the writeback value at the ALU result and out-of-range stores
/// are discarded at commit — neither faults.
#[derive(Debug)]
pub struct Memory {
    input: RegId<Option<ExecResult>>,
    dmem: MemId,
    out: RegId<Option<Retirement>>,
}

impl Memory {
    pub fn new(
        input: RegId<Option<ExecResult>>,
        dmem: MemId,
        out: RegId<Option<Retirement>>,
    ) -> Self {
        Self { input, dmem, out }
    }
}

impl Component for Memory {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn written_slots(&self) -> Vec<SlotId> {
        vec![self.out.slot(), self.dmem.slot()]
    }

    fn evaluate(&self, registry: &mut Registry) {
        let mut out = None;

        if let Some(result) = *registry.read(self.input) {
            let mut wb_value = result.wb_nonload;
            let index = (result.addr_or_result / 4) as usize;
            match result.mem {
                MemOp::Read => {
                    if let Some(word) = registry.word(self.dmem, index) {
                        wb_value = word;
                    }
                }
                MemOp::Write => {
                    trace!(address = result.addr_or_result, value = result.store_data, "store");
                    registry.write_word_next(self.dmem, index, result.store_data);
                }
                MemOp::None => {}
            }
            out = Some(Retirement {
                wb_value,
                rd: result.rd,
            });
        }

        registry.write_next(self.out, out);
    }
}
