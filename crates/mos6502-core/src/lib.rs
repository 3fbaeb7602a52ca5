//! Cycle-counting MOS 6502 execution engine with an address-routed
//! peripheral bus.

/// Processor status register and named flags.
pub mod status;
pub use status::{StatusFlag, StatusRegister, STATUS_POWER_ON};

/// Flat 64 KiB memory and fixed memory map.
pub mod memory;
pub use memory::{
    decode_memory_region, new_address_space, Memory, MemoryRegion, RegionDescriptor,
    ADDRESS_SPACE_BYTES, CONSOLE_BASE, DISPLAY_BASE, FIXED_MEMORY_REGIONS, IRQ_VECTOR,
    NMI_VECTOR, RESET_VECTOR, SOUND_BASE, STACK_BASE,
};

/// Bus contract, peripheral contract, and the memory-plus-peripherals bus.
pub mod bus;
pub use bus::{Bus, Peripheral, SystemBus};

/// Opcode registry and lookup table.
pub mod opcode;
pub use opcode::{
    AddressingMode, Mnemonic, OpcodeEntry, OpcodeRecord, OpcodeTable, BUILTIN_OPCODES,
};

/// Cycle constants and conditional surcharge rules.
pub mod timing;
pub use timing::{
    branch_penalty, crosses_page, cycle_penalty, pays_page_cross_penalty, CyclePenalty,
    CYCLE_PENALTY_TABLE, MAX_BASE_CYCLES, MAX_SURCHARGE, RESET_CYCLES,
};

/// Fault taxonomy for execution and table construction.
pub mod fault;
pub use fault::{Fault, FaultClass, TableError};

/// Engine configuration.
pub mod config;
pub use config::{CoreConfig, DEFAULT_POWER_ON_SP};

/// Trace events, sinks, and the bus activity monitor.
pub mod trace;
pub use trace::{BusActivity, BusMonitor, BusOp, NullSink, ResetKind, TraceEvent, TraceSink};

/// The CPU engine.
pub mod cpu;
pub use cpu::{ClockPhase, Cpu, CpuSnapshot, EffectiveAddress, Operand, Register, Registers};

mod execute;

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
