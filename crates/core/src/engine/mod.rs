//! Synchronous-update engine.
//!
//! This module implements the execution half of the kernel:
//! 1. **Components:** Combinational tasks evaluated once per cycle against
//!    the previous cycle's committed state.
//! 2. **Cycle discipline:** `step` evaluates every component, then commits
//!    every slot atomically, making "simultaneous" hardware update
//!    well-defined under single-threaded execution.
//! 3. **Wiring invariants:** A slot accepts at most one writing component,
//!    enforced at registration time, so post-commit state can never depend
//!    on the order components happen to run in.

pub mod register;

use std::collections::HashMap;
use std::fmt;

use tracing::trace;

use crate::common::{BuildError, Word};

pub use register::{MemId, RegId, Registry, SlotId};

/// A combinational unit evaluated once per cycle.
///
/// Implementations must read only committed values (`Registry::read` /
/// `Registry::word`) and buffer all of their outputs with `write_next` /
/// `write_word_next` — including explicit bubbles or defaults, since slots
/// otherwise re-present stale payloads at the next commit.
pub trait Component {
    /// Stable name, used in wiring diagnostics and trace events.
    fn name(&self) -> &'static str;

    /// Every slot this component writes. Claimed exclusively at
    /// registration time.
    fn written_slots(&self) -> Vec<SlotId>;

    /// Computes this cycle's outputs from the previous cycle's state.
    fn evaluate(&self, registry: &mut Registry);
}

/// The synchronous-update engine: owns all register slots and components,
/// and tracks the cycle counter.
pub struct Engine {
    registry: Registry,
    components: Vec<Box<dyn Component>>,
    owners: HashMap<usize, &'static str>,
    cycle: u64,
}

impl Engine {
    /// Creates an empty engine.
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            components: Vec::new(),
            owners: HashMap::new(),
            cycle: 0,
        }
    }

    /// Registers a scalar slot with the given power-on value.
    pub fn register<T: Clone + 'static>(&mut self, init: T) -> RegId<T> {
        self.registry.register(init)
    }

    /// Registers a word-array slot with the given power-on image.
    pub fn register_mem(&mut self, init: Vec<Word>) -> MemId {
        self.registry.register_mem(init)
    }

    /// Adds a component, claiming its declared output slots.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::WriterConflict`] if any declared slot is
    /// already driven by a previously added component.
    pub fn add_component(&mut self, component: Box<dyn Component>) -> Result<(), BuildError> {
        let name = component.name();
        for slot in component.written_slots() {
            if let Some(&existing) = self.owners.get(&slot.index()) {
                return Err(BuildError::WriterConflict {
                    slot: slot.index(),
                    existing,
                    component: name,
                });
            }
            let _ = self.owners.insert(slot.index(), name);
        }
        self.components.push(component);
        Ok(())
    }

    /// Advances one cycle: evaluates every component against committed
    /// state, then commits every slot, then bumps the cycle counter.
    pub fn step(&mut self) {
        for component in &self.components {
            component.evaluate(&mut self.registry);
        }
        self.registry.commit_all();
        self.cycle += 1;
        trace!(cycle = self.cycle, "committed");
    }

    /// Advances `n` cycles.
    pub fn run(&mut self, n: u64) {
        for _ in 0..n {
            self.step();
        }
    }

    /// Restores every slot to its power-on state and zeroes the counter.
    pub fn reset(&mut self) {
        self.registry.reset_all();
        self.cycle = 0;
        trace!("reset");
    }

    /// Cycles elapsed since power-on or the last reset.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Read access to committed state, for observation between steps.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("components", &self.components.len())
            .field("cycle", &self.cycle)
            .finish_non_exhaustive()
    }
}
