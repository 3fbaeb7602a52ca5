//! The 6502 engine: register file, clock loop, reset, and snapshots.
//!
//! `Cpu` never owns its bus. Every clocking entry point borrows a
//! `&mut dyn Bus` for the duration of the call, so loaders and hosts keep
//! full access to memory between steps.

mod addressing;
pub(crate) mod context;
mod registers;
mod reset;

pub use addressing::{EffectiveAddress, Operand};
pub use registers::{Register, Registers};

use crate::bus::Bus;
use crate::config::CoreConfig;
use crate::execute;
use crate::fault::Fault;
use crate::opcode::{AddressingMode, OpcodeTable};
use crate::status::StatusRegister;
use crate::trace::{NullSink, ResetKind, TraceSink};

use context::ExecContext;

/// What a single clock did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClockPhase {
    /// The countdown was zero, so a new instruction was fetched and executed.
    Fetch,
    /// An instruction already in flight consumed one of its cycles.
    Idle,
}

/// Full engine state for save/restore and replay fixtures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct CpuSnapshot {
    /// Register file.
    pub registers: Registers,
    /// Status register.
    pub status: StatusRegister,
    /// Cycles left on the instruction in flight.
    pub pending_cycles: u8,
    /// Clocks elapsed since construction.
    pub total_cycles: u64,
    /// Whether a reset sequence has completed.
    pub reset_done: bool,
}

/// MOS 6502 execution engine.
#[derive(Clone)]
pub struct Cpu {
    pub(crate) registers: Registers,
    pub(crate) status: StatusRegister,
    pub(crate) pending_cycles: u8,
    pub(crate) total_cycles: u64,
    pub(crate) reset_done: bool,
    pub(crate) config: CoreConfig,
    pub(crate) table: &'static OpcodeTable,
}

impl std::fmt::Debug for Cpu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cpu")
            .field("registers", &self.registers)
            .field("status", &self.status)
            .field("pending_cycles", &self.pending_cycles)
            .field("total_cycles", &self.total_cycles)
            .field("reset_done", &self.reset_done)
            .field("config", &self.config)
            .field("opcodes", &self.table.len())
            .finish()
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// Creates an engine with the default configuration and builtin opcodes.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CoreConfig::default())
    }

    /// Creates an engine with `config` and the builtin opcode table.
    #[must_use]
    pub fn with_config(config: CoreConfig) -> Self {
        Self::with_table(config, OpcodeTable::builtin())
    }

    /// Creates an engine decoding against a caller-supplied opcode table.
    #[must_use]
    pub const fn with_table(config: CoreConfig, table: &'static OpcodeTable) -> Self {
        Self {
            registers: Registers::with_sp(config.power_on_sp),
            status: StatusRegister::from_bits(crate::status::STATUS_POWER_ON),
            pending_cycles: 0,
            total_cycles: 0,
            reset_done: false,
            config,
            table,
        }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Opcode table used for decode.
    #[must_use]
    pub const fn table(&self) -> &'static OpcodeTable {
        self.table
    }

    /// Register file.
    #[must_use]
    pub const fn registers(&self) -> &Registers {
        &self.registers
    }

    /// Mutable register file.
    pub const fn registers_mut(&mut self) -> &mut Registers {
        &mut self.registers
    }

    /// Accumulator.
    #[must_use]
    pub const fn a(&self) -> u8 {
        self.registers.a()
    }

    /// Sets the accumulator.
    pub const fn set_a(&mut self, value: u8) {
        self.registers.set_a(value);
    }

    /// `X` index register.
    #[must_use]
    pub const fn x(&self) -> u8 {
        self.registers.x()
    }

    /// Sets `X`.
    pub const fn set_x(&mut self, value: u8) {
        self.registers.set_x(value);
    }

    /// `Y` index register.
    #[must_use]
    pub const fn y(&self) -> u8 {
        self.registers.y()
    }

    /// Sets `Y`.
    pub const fn set_y(&mut self, value: u8) {
        self.registers.set_y(value);
    }

    /// Stack pointer.
    #[must_use]
    pub const fn sp(&self) -> u8 {
        self.registers.sp()
    }

    /// Sets the stack pointer.
    pub const fn set_sp(&mut self, value: u8) {
        self.registers.set_sp(value);
    }

    /// Program counter.
    #[must_use]
    pub const fn pc(&self) -> u16 {
        self.registers.pc()
    }

    /// Sets the program counter.
    pub const fn set_pc(&mut self, value: u16) {
        self.registers.set_pc(value);
    }

    /// Status register.
    #[must_use]
    pub const fn status(&self) -> StatusRegister {
        self.status
    }

    /// Mutable status register.
    pub const fn status_mut(&mut self) -> &mut StatusRegister {
        &mut self.status
    }

    /// Replaces the status register.
    pub const fn set_status(&mut self, status: StatusRegister) {
        self.status = status;
    }

    /// Cycles left on the instruction in flight.
    #[must_use]
    pub const fn pending_cycles(&self) -> u8 {
        self.pending_cycles
    }

    /// Overrides the countdown for the instruction in flight. Zero makes the
    /// next clock fetch.
    pub const fn set_pending_cycles(&mut self, cycles: u8) {
        self.pending_cycles = cycles;
    }

    /// Clocks elapsed since construction, reset cycles included.
    #[must_use]
    pub const fn total_cycles(&self) -> u64 {
        self.total_cycles
    }

    /// Returns `true` once a reset sequence has completed.
    #[must_use]
    pub const fn is_reset(&self) -> bool {
        self.reset_done
    }

    /// Runs the deterministic reset sequence.
    pub fn reset(&mut self, bus: &mut dyn Bus) {
        self.reset_traced(ResetKind::Deterministic, bus, &mut NullSink);
    }

    /// Runs the hardware-accurate reset sequence.
    pub fn accurate_reset(&mut self, bus: &mut dyn Bus) {
        self.reset_traced(ResetKind::HardwareAccurate, bus, &mut NullSink);
    }

    /// Runs the reset sequence of the given kind.
    pub fn reset_with(&mut self, kind: ResetKind, bus: &mut dyn Bus) {
        self.reset_traced(kind, bus, &mut NullSink);
    }

    /// Runs the reset sequence, reporting every bus read to `sink`.
    pub fn reset_traced(&mut self, kind: ResetKind, bus: &mut dyn Bus, sink: &mut dyn TraceSink) {
        ExecContext::new(self, bus, sink).run_reset(kind);
    }

    /// Advances the engine by one clock.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::ResetRequired`] before the first reset, or a decode
    /// or dispatch fault when the fetched opcode cannot execute.
    pub fn step(&mut self, bus: &mut dyn Bus) -> Result<ClockPhase, Fault> {
        self.step_traced(bus, &mut NullSink)
    }

    /// Advances the engine by one clock, reporting activity to `sink`.
    ///
    /// Peripherals are ticked after the engine's own mutation for the clock.
    /// A faulting fetch consumes no clock and does not tick the bus.
    ///
    /// # Errors
    ///
    /// See [`Cpu::step`].
    pub fn step_traced(
        &mut self,
        bus: &mut dyn Bus,
        sink: &mut dyn TraceSink,
    ) -> Result<ClockPhase, Fault> {
        if !self.reset_done {
            return Err(Fault::ResetRequired);
        }

        let phase = if self.pending_cycles == 0 {
            let cycles = execute::run_instruction(&mut ExecContext::new(self, bus, sink))?;
            self.pending_cycles = cycles;
            ClockPhase::Fetch
        } else {
            ClockPhase::Idle
        };

        self.pending_cycles = self.pending_cycles.saturating_sub(1);
        self.total_cycles += 1;
        bus.tick();
        Ok(phase)
    }

    /// Clocks until one instruction has been fetched and fully retired.
    ///
    /// Completion is cycle retirement, never `PC` movement, so
    /// self-branches and `JMP *` terminate. Any instruction already in
    /// flight drains first. Returns the clocks consumed.
    ///
    /// # Errors
    ///
    /// See [`Cpu::step`].
    pub fn execute_instruction(&mut self, bus: &mut dyn Bus) -> Result<u32, Fault> {
        self.execute_instruction_traced(bus, &mut NullSink)
    }

    /// Traced form of [`Cpu::execute_instruction`].
    ///
    /// # Errors
    ///
    /// See [`Cpu::step`].
    pub fn execute_instruction_traced(
        &mut self,
        bus: &mut dyn Bus,
        sink: &mut dyn TraceSink,
    ) -> Result<u32, Fault> {
        let mut fetched = false;
        let mut clocks = 0_u32;
        loop {
            if self.step_traced(bus, sink)? == ClockPhase::Fetch {
                fetched = true;
            }
            clocks += 1;
            if fetched && self.pending_cycles == 0 {
                return Ok(clocks);
            }
        }
    }

    /// Resolves `mode` against the bytes at `PC`, advancing `PC` past them.
    pub fn resolve_operand(&mut self, mode: AddressingMode, bus: &mut dyn Bus) -> EffectiveAddress {
        ExecContext::new(self, bus, &mut NullSink).resolve(mode)
    }

    /// Pushes a byte onto the hardware stack.
    pub fn push_byte(&mut self, bus: &mut dyn Bus, value: u8) {
        ExecContext::new(self, bus, &mut NullSink).push_byte(value);
    }

    /// Pulls a byte from the hardware stack.
    pub fn pull_byte(&mut self, bus: &mut dyn Bus) -> u8 {
        ExecContext::new(self, bus, &mut NullSink).pull_byte()
    }

    /// Pushes a word, high byte first.
    pub fn push_word(&mut self, bus: &mut dyn Bus, value: u16) {
        ExecContext::new(self, bus, &mut NullSink).push_word(value);
    }

    /// Pulls a word, low byte first.
    pub fn pull_word(&mut self, bus: &mut dyn Bus) -> u16 {
        ExecContext::new(self, bus, &mut NullSink).pull_word()
    }

    /// Captures the full engine state.
    #[must_use]
    pub const fn snapshot(&self) -> CpuSnapshot {
        CpuSnapshot {
            registers: self.registers,
            status: self.status,
            pending_cycles: self.pending_cycles,
            total_cycles: self.total_cycles,
            reset_done: self.reset_done,
        }
    }

    /// Restores state captured by [`Cpu::snapshot`].
    pub const fn restore(&mut self, snapshot: &CpuSnapshot) {
        self.registers = snapshot.registers;
        self.status = snapshot.status;
        self.pending_cycles = snapshot.pending_cycles;
        self.total_cycles = snapshot.total_cycles;
        self.reset_done = snapshot.reset_done;
    }
}
