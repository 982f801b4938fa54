//! Register scoreboard for data-hazard detection.

/// Lock set over the 32 architectural registers.
///
/// Decode locks an instruction's destination when it issues and stalls any
/// later instruction that reads a locked register. Writeback reports the
/// retired destination, which decode releases the following cycle. x0 is
/// never locked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scoreboard {
    bits: u32,
}

impl Scoreboard {
    /// An empty lock set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `reg` has an in-flight write.
    pub fn is_locked(self, reg: u8) -> bool {
        (self.bits >> (reg & 31)) & 1 == 1
    }

    /// Locks `reg`. Locking x0 is a no-op.
    pub fn lock(&mut self, reg: u8) {
        if reg != 0 {
            self.bits |= 1 << (reg & 31);
        }
    }

    /// Releases `reg`. Releasing an unlocked register is a no-op.
    pub fn release(&mut self, reg: u8) {
        self.bits &= !(1 << (reg & 31));
    }

    /// The raw lock mask, bit `r` set when register `r` is locked.
    pub fn mask(self) -> u32 {
        self.bits
    }
}
