//! The processor core: a five-stage RV32I machine built on the engine.
//!
//! [`Machine`] is the sole public boundary of the core. It owns the engine,
//! wires the stages to their latch registers, and exposes committed
//! architectural state for observation between steps. Construction performs
//! all validation; a machine that assembles cannot fault at run time.

pub mod pipeline;
pub mod units;

use std::path::Path;

use tracing::debug;

use crate::common::{BuildError, NUM_REGISTERS, SimError, Word};
use crate::config::Config;
use crate::engine::{Engine, MemId, RegId};
use crate::sim::loader;

use pipeline::latches::{ExecResult, FetchedInstr, MicroOp, Retirement};
use pipeline::scoreboard::Scoreboard;
use pipeline::stages::{Decode, Execute, Fetch, Memory, Writeback};

/// Identity of one pipeline stage, for choosing component evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    /// Instruction fetch.
    Fetch,
    /// Decode, operand read, hazard resolution.
    Decode,
    /// ALU and branch resolution.
    Execute,
    /// Data-memory access.
    Memory,
    /// Register writeback.
    Writeback,
}

/// Front-to-back stage order used by [`Machine::assemble`].
///
/// Because stages only exchange data through clocked latches, any
/// permutation of this order produces an identical machine; the constant
/// exists so the default is stable and readable in traces.
pub const STAGE_ORDER: [StageKind; 5] = [
    StageKind::Fetch,
    StageKind::Decode,
    StageKind::Execute,
    StageKind::Memory,
    StageKind::Writeback,
];

/// A fully wired five-stage machine.
pub struct Machine {
    engine: Engine,
    pc: RegId<Word>,
    regfile: MemId,
    dmem: MemId,
    if_id: RegId<Option<FetchedInstr>>,
    id_ex: RegId<Option<MicroOp>>,
    ex_mem: RegId<Option<ExecResult>>,
    mem_wb: RegId<Option<Retirement>>,
    scoreboard: RegId<Scoreboard>,
}

impl Machine {
    /// Assembles a machine around a program image, using [`STAGE_ORDER`].
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::ProgramTooLarge`] or
    /// [`BuildError::DataImageTooLarge`] when an image exceeds its
    /// configured memory, and propagates any wiring conflict.
    pub fn assemble(program: Vec<Word>, config: &Config) -> Result<Self, BuildError> {
        Self::assemble_with_order(program, config, STAGE_ORDER)
    }

    /// Assembles a machine with an explicit stage evaluation order.
    ///
    /// Exists to demonstrate (and test) that post-commit state is
    /// independent of the order stages are evaluated in.
    ///
    /// # Errors
    ///
    /// Same as [`Machine::assemble`].
    pub fn assemble_with_order(
        mut program: Vec<Word>,
        config: &Config,
        order: [StageKind; 5],
    ) -> Result<Self, BuildError> {
        if program.len() > config.imem_words {
            return Err(BuildError::ProgramTooLarge {
                words: program.len(),
                capacity: config.imem_words,
            });
        }
        if config.data_image.len() > config.dmem_words {
            return Err(BuildError::DataImageTooLarge {
                words: config.data_image.len(),
                capacity: config.dmem_words,
            });
        }

        let mut engine = Engine::new();

        program.resize(config.imem_words, 0);
        let imem = engine.register_mem(program);

        let mut data = config.data_image.clone();
        data.resize(config.dmem_words, 0);
        let dmem = engine.register_mem(data);

        let mut registers = vec![0; NUM_REGISTERS];
        if let Some(sp) = config.stack_pointer {
            registers[2] = sp;
        }
        let regfile = engine.register_mem(registers);

        let pc: RegId<Word> = engine.register(0);
        let if_id = engine.register(None::<FetchedInstr>);
        let id_ex = engine.register(None::<MicroOp>);
        let ex_mem = engine.register(None::<ExecResult>);
        let mem_wb = engine.register(None::<Retirement>);
        let stall = engine.register(false);
        let redirect = engine.register(None::<Word>);
        let retired = engine.register(None::<u8>);
        let held = engine.register(None::<FetchedInstr>);
        let pending = engine.register(false);
        let scoreboard = engine.register(Scoreboard::new());

        for stage in order {
            match stage {
                StageKind::Fetch => {
                    engine.add_component(Box::new(Fetch::new(pc, imem, stall, redirect, if_id)))?;
                }
                StageKind::Decode => {
                    engine.add_component(Box::new(Decode::new(
                        if_id, redirect, retired, regfile, id_ex, stall, held, pending, scoreboard,
                    )))?;
                }
                StageKind::Execute => {
                    engine.add_component(Box::new(Execute::new(id_ex, ex_mem, redirect)))?;
                }
                StageKind::Memory => {
                    engine.add_component(Box::new(Memory::new(ex_mem, dmem, mem_wb)))?;
                }
                StageKind::Writeback => {
                    engine.add_component(Box::new(Writeback::new(mem_wb, regfile, retired)))?;
                }
            }
        }

        debug!(
            imem_words = config.imem_words,
            dmem_words = config.dmem_words,
            "machine assembled"
        );

        Ok(Self {
            engine,
            pc,
            regfile,
            dmem,
            if_id,
            id_ex,
            ex_mem,
            mem_wb,
            scoreboard,
        })
    }

    /// Loads an Intel-HEX program image and assembles a machine around it.
    ///
    /// # Errors
    ///
    /// Propagates loader failures and assembly failures.
    pub fn from_hex_file(path: impl AsRef<Path>, config: &Config) -> Result<Self, SimError> {
        let program = loader::load_hex_file(path.as_ref(), config.imem_words)?;
        Ok(Self::assemble(program, config)?)
    }

    /// Advances one cycle.
    pub fn step(&mut self) {
        self.engine.step();
    }

    /// Advances `n` cycles.
    pub fn run(&mut self, n: u64) {
        self.engine.run(n);
    }

    /// Restores power-on state, including the cycle counter.
    pub fn reset(&mut self) {
        self.engine.reset();
    }

    /// Cycles elapsed since power-on or the last reset.
    pub fn cycle(&self) -> u64 {
        self.engine.cycle()
    }

    /// The committed program counter.
    pub fn pc(&self) -> Word {
        *self.engine.registry().read(self.pc)
    }

    /// A committed architectural register, or 0 for an index past x31.
    pub fn reg(&self, index: usize) -> Word {
        self.engine.registry().word(self.regfile, index).unwrap_or(0)
    }

    /// All 32 committed architectural registers.
    pub fn registers(&self) -> [Word; NUM_REGISTERS] {
        std::array::from_fn(|index| self.reg(index))
    }

    /// A committed data-memory word, or `None` past the configured capacity.
    pub fn data_word(&self, index: usize) -> Option<Word> {
        self.engine.registry().word(self.dmem, index)
    }

    /// Whether `reg` currently has an in-flight write.
    pub fn reg_locked(&self, reg: u8) -> bool {
        self.engine.registry().read(self.scoreboard).is_locked(reg)
    }

    /// The committed fetch → decode latch.
    pub fn fetch_decode(&self) -> Option<FetchedInstr> {
        *self.engine.registry().read(self.if_id)
    }

    /// The committed decode → execute latch.
    pub fn decode_execute(&self) -> Option<MicroOp> {
        *self.engine.registry().read(self.id_ex)
    }

    /// The committed execute → memory latch.
    pub fn execute_memory(&self) -> Option<ExecResult> {
        *self.engine.registry().read(self.ex_mem)
    }

    /// The committed memory → writeback latch.
    pub fn memory_writeback(&self) -> Option<Retirement> {
        *self.engine.registry().read(self.mem_wb)
    }
}

impl std::fmt::Debug for Machine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Machine")
            .field("cycle", &self.cycle())
            .field("pc", &self.pc())
            .finish_non_exhaustive()
    }
}
