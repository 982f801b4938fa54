//! Register writeback and retirement.

use tracing::trace;

use crate::core::pipeline::latches::Retirement;
use crate::engine::{Component, MemId, RegId, Registry, SlotId};

/// Writeback stage: commits results to the register file and reports the
/// retired destination so decode can release its scoreboard lock.
///
/// x0 is filtered at decode (a zero destination decodes to `rd == None`), so
/// everything arriving here with a destination is a real write.
#[derive(Debug)]
pub struct Writeback {
    input: RegId<Option<Retirement>>,
    regfile: MemId,
    retired: RegId<Option<u8>>,
}

impl Writeback {
    pub fn new(
        input: RegId<Option<Retirement>>,
        regfile: MemId,
        retired: RegId<Option<u8>>,
    ) -> Self {
        Self {
            input,
            regfile,
            retired,
        }
    }
}

impl Component for Writeback {
    fn name(&self) -> &'static str {
        "writeback"
    }

    fn written_slots(&self) -> Vec<SlotId> {
        vec![self.retired.slot(), self.regfile.slot()]
    }

    fn evaluate(&self, registry: &mut Registry) {
        let mut retired = None;

        if let Some(retirement) = *registry.read(self.input) {
            if let Some(rd) = retirement.rd {
                trace!(rd, value = retirement.wb_value, "writeback");
                registry.write_word_next(self.regfile, usize::from(rd), retirement.wb_value);
                retired = Some(rd);
            }
        }

        registry.write_next(self.retired, retired);
    }
}
