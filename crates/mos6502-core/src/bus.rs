//! Address-routed bus contract consumed by the engine.
//!
//! The engine never owns its bus. Every read and write made by an instruction
//! goes through [`Bus`], and the bus is clocked once per simulated cycle via
//! [`Bus::tick`] after the CPU has applied that cycle's mutation.

use crate::memory::Memory;

/// Byte-wide bus contract consumed by `Cpu`.
///
/// Addresses are already 16-bit, so there is no out-of-range case.
pub trait Bus {
    /// Reads one byte.
    fn read(&mut self, addr: u16) -> u8;

    /// Writes one byte.
    fn write(&mut self, addr: u16, value: u8);

    /// Advances attached devices by one clock.
    fn tick(&mut self) {}
}

impl Bus for Memory {
    fn read(&mut self, addr: u16) -> u8 {
        self.read_byte(addr)
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.write_byte(addr, value);
    }
}

/// Memory-mapped device attached to a [`SystemBus`].
///
/// Devices claim addresses through [`Peripheral::handles_address`]; claims are
/// expected not to overlap.
pub trait Peripheral {
    /// Returns `true` when this device decodes `addr`.
    fn handles_address(&self, addr: u16) -> bool;

    /// Reads a device register.
    fn read(&mut self, addr: u16) -> u8;

    /// Writes a device register.
    fn write(&mut self, addr: u16, value: u8);

    /// Advances the device by one clock.
    fn tick(&mut self) {}

    /// Returns the device to its power-on state.
    fn reset(&mut self) {}
}

/// Memory plus an ordered list of peripherals.
///
/// Reads and writes go to the first registered peripheral whose predicate
/// matches, and fall back to memory otherwise.
#[derive(Default)]
pub struct SystemBus {
    memory: Memory,
    peripherals: Vec<Box<dyn Peripheral>>,
}

impl std::fmt::Debug for SystemBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemBus")
            .field("memory", &self.memory)
            .field("peripherals", &self.peripherals.len())
            .finish()
    }
}

impl SystemBus {
    /// Creates a bus over `memory` with no peripherals attached.
    #[must_use]
    pub fn new(memory: Memory) -> Self {
        Self {
            memory,
            peripherals: Vec::new(),
        }
    }

    /// Attaches a peripheral after all previously registered ones.
    pub fn add_peripheral(&mut self, peripheral: Box<dyn Peripheral>) {
        self.peripherals.push(peripheral);
    }

    /// Number of attached peripherals.
    #[must_use]
    pub fn peripheral_count(&self) -> usize {
        self.peripherals.len()
    }

    /// Returns the registration index of the peripheral that owns `addr`.
    #[must_use]
    pub fn owner_of(&self, addr: u16) -> Option<usize> {
        self.peripherals
            .iter()
            .position(|peripheral| peripheral.handles_address(addr))
    }

    /// Backing memory.
    #[must_use]
    pub const fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Mutable backing memory, bypassing peripheral routing.
    pub const fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    /// Resets every peripheral in registration order.
    pub fn reset_peripherals(&mut self) {
        for peripheral in &mut self.peripherals {
            peripheral.reset();
        }
    }

    fn claimant(&mut self, addr: u16) -> Option<&mut Box<dyn Peripheral>> {
        self.peripherals
            .iter_mut()
            .find(|peripheral| peripheral.handles_address(addr))
    }
}

impl Bus for SystemBus {
    fn read(&mut self, addr: u16) -> u8 {
        match self.claimant(addr) {
            Some(peripheral) => peripheral.read(addr),
            None => self.memory.read_byte(addr),
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        match self.claimant(addr) {
            Some(peripheral) => peripheral.write(addr, value),
            None => self.memory.write_byte(addr, value),
        }
    }

    fn tick(&mut self) {
        for peripheral in &mut self.peripherals {
            peripheral.tick();
        }
    }
}
