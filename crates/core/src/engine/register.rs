//! Clocked register slots and the slot registry.
//!
//! This module implements the storage half of the synchronous-update kernel:
//! 1. **Scalar slots:** `Reg<T>` holds current/pending/initial values and
//!    exposes the pending value only after a commit.
//! 2. **Array slots:** `MemArray` backs the register file and memories with a
//!    staged write queue applied in place at commit time, so one-cycle-delayed
//!    visibility does not cost a whole-array copy per cycle.
//! 3. **Handles:** Typed `RegId<T>` / `MemId` handles minted by the registry;
//!    components hold handles, never references to the cells themselves.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

use crate::common::Word;

/// Untyped identity of a register slot, used for writer-claim bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    /// Raw slot index within the registry.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Typed handle to a scalar register slot holding a `T`.
pub struct RegId<T> {
    index: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> RegId<T> {
    /// The untyped slot identity, for writer claims.
    pub fn slot(self) -> SlotId {
        SlotId(self.index)
    }
}

impl<T> Clone for RegId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RegId<T> {}

impl<T> fmt::Debug for RegId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RegId({})", self.index)
    }
}

/// Typed handle to a word-array slot.
#[derive(Debug, Clone, Copy)]
pub struct MemId {
    index: usize,
}

impl MemId {
    /// The untyped slot identity, for writer claims.
    pub fn slot(self) -> SlotId {
        SlotId(self.index)
    }
}

/// A slot that participates in the per-cycle commit/reset protocol.
trait Clocked: Any {
    fn commit(&mut self);
    fn reset(&mut self);
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// A clocked scalar cell.
///
/// Tasks observe `current` only; writes buffer into `pending`, which becomes
/// visible when the engine commits at the end of the cycle. The pending value
/// is retained across commits, so a slot whose writer skips a cycle would
/// re-present its stale payload — which is why every stage writes all of its
/// outputs every cycle.
struct Reg<T: Clone> {
    current: T,
    pending: T,
    init: T,
}

impl<T: Clone> Reg<T> {
    fn new(init: T) -> Self {
        Self {
            current: init.clone(),
            pending: init.clone(),
            init,
        }
    }
}

impl<T: Clone + 'static> Clocked for Reg<T> {
    fn commit(&mut self) {
        self.current = self.pending.clone();
    }

    fn reset(&mut self) {
        self.current = self.init.clone();
        self.pending = self.init.clone();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A clocked word array with in-place commit.
///
/// Reads observe the committed words; `stage` queues `(index, value)` pairs
/// that are applied in order at commit time. Staged writes addressing slots
/// beyond the array are discarded.
struct MemArray {
    words: Vec<Word>,
    staged: Vec<(usize, Word)>,
    init: Vec<Word>,
}

impl MemArray {
    fn new(init: Vec<Word>) -> Self {
        Self {
            words: init.clone(),
            staged: Vec::new(),
            init,
        }
    }
}

impl Clocked for MemArray {
    fn commit(&mut self) {
        for (index, value) in self.staged.drain(..) {
            if let Some(slot) = self.words.get_mut(index) {
                *slot = value;
            }
        }
    }

    fn reset(&mut self) {
        self.words.clone_from(&self.init);
        self.staged.clear();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Owner of every register slot in an engine.
///
/// Components interact with state exclusively through the registry: reads
/// return values committed at the end of the previous cycle, writes buffer
/// next-cycle values. Handles are only minted here, so a handle always
/// matches its slot's type.
#[derive(Default)]
pub struct Registry {
    slots: Vec<Box<dyn Clocked>>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a scalar slot with the given power-on value.
    pub fn register<T: Clone + 'static>(&mut self, init: T) -> RegId<T> {
        let index = self.slots.len();
        self.slots.push(Box::new(Reg::new(init)));
        RegId {
            index,
            _marker: PhantomData,
        }
    }

    /// Registers a word-array slot with the given power-on image.
    pub fn register_mem(&mut self, init: Vec<Word>) -> MemId {
        let index = self.slots.len();
        self.slots.push(Box::new(MemArray::new(init)));
        MemId { index }
    }

    /// Reads the committed value of a scalar slot.
    pub fn read<T: Clone + 'static>(&self, id: RegId<T>) -> &T {
        match self.slots[id.index].as_any().downcast_ref::<Reg<T>>() {
            Some(reg) => &reg.current,
            None => unreachable!("register handle does not match its slot"),
        }
    }

    /// Buffers the next-cycle value of a scalar slot.
    pub fn write_next<T: Clone + 'static>(&mut self, id: RegId<T>, value: T) {
        match self.slots[id.index].as_any_mut().downcast_mut::<Reg<T>>() {
            Some(reg) => reg.pending = value,
            None => unreachable!("register handle does not match its slot"),
        }
    }

    /// Reads a committed word of an array slot, or `None` past the end.
    pub fn word(&self, id: MemId, index: usize) -> Option<Word> {
        self.array(id).words.get(index).copied()
    }

    /// Capacity of an array slot in words.
    pub fn len(&self, id: MemId) -> usize {
        self.array(id).words.len()
    }

    /// Whether an array slot has zero capacity.
    pub fn is_empty(&self, id: MemId) -> bool {
        self.array(id).words.is_empty()
    }

    /// Stages a word write into an array slot for the next commit.
    pub fn write_word_next(&mut self, id: MemId, index: usize, value: Word) {
        self.array_mut(id).staged.push((index, value));
    }

    /// Commits every slot: pending scalars become current, staged array
    /// writes are applied in order.
    pub(crate) fn commit_all(&mut self) {
        for slot in &mut self.slots {
            slot.commit();
        }
    }

    /// Restores every slot to its power-on state.
    pub(crate) fn reset_all(&mut self) {
        for slot in &mut self.slots {
            slot.reset();
        }
    }

    fn array(&self, id: MemId) -> &MemArray {
        match self.slots[id.index].as_any().downcast_ref::<MemArray>() {
            Some(mem) => mem,
            None => unreachable!("memory handle does not match its slot"),
        }
    }

    fn array_mut(&mut self, id: MemId) -> &mut MemArray {
        match self.slots[id.index].as_any_mut().downcast_mut::<MemArray>() {
            Some(mem) => mem,
            None => unreachable!("memory handle does not match its slot"),
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("slots", &self.slots.len())
            .finish()
    }
}
