use crate::bus::Bus;
use crate::memory::STACK_BASE;
use crate::trace::{BusOp, TraceEvent, TraceSink};

use super::Cpu;

/// Borrowed view of the engine, its bus, and its trace sink for the
/// duration of one reset or one instruction.
///
/// Every bus access made while executing goes through here so the sink sees
/// it in program order.
pub(crate) struct ExecContext<'a> {
    pub(crate) cpu: &'a mut Cpu,
    bus: &'a mut dyn Bus,
    pub(crate) sink: &'a mut dyn TraceSink,
    cycle: u64,
}

impl<'a> ExecContext<'a> {
    pub(crate) fn new(
        cpu: &'a mut Cpu,
        bus: &'a mut dyn Bus,
        sink: &'a mut dyn TraceSink,
    ) -> Self {
        let cycle = cpu.total_cycles;
        Self {
            cpu,
            bus,
            sink,
            cycle,
        }
    }

    /// Restamps subsequent bus events.
    pub(crate) const fn set_cycle(&mut self, cycle: u64) {
        self.cycle = cycle;
    }

    pub(crate) fn read(&mut self, addr: u16) -> u8 {
        let value = self.bus.read(addr);
        self.sink.on_event(TraceEvent::BusAccess {
            cycle: self.cycle,
            addr,
            value,
            op: BusOp::Read,
        });
        value
    }

    pub(crate) fn write(&mut self, addr: u16, value: u8) {
        self.bus.write(addr, value);
        self.sink.on_event(TraceEvent::BusAccess {
            cycle: self.cycle,
            addr,
            value,
            op: BusOp::Write,
        });
    }

    /// Little-endian word read; the high byte comes from `addr + 1`.
    pub(crate) fn read_word(&mut self, addr: u16) -> u16 {
        let lo = self.read(addr);
        let hi = self.read(addr.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    /// Reads the byte at `PC` and advances `PC`.
    pub(crate) fn fetch_byte(&mut self) -> u8 {
        let addr = self.cpu.registers.take_pc();
        self.read(addr)
    }

    /// Reads a little-endian word at `PC` and advances `PC` by two.
    pub(crate) fn fetch_word(&mut self) -> u16 {
        let lo = self.fetch_byte();
        let hi = self.fetch_byte();
        u16::from_le_bytes([lo, hi])
    }

    /// Clocks attached devices once.
    pub(crate) fn tick_bus(&mut self) {
        self.bus.tick();
    }

    pub(crate) fn push_byte(&mut self, value: u8) {
        let sp = self.cpu.registers.sp();
        self.write(STACK_BASE | u16::from(sp), value);
        self.cpu.registers.set_sp(sp.wrapping_sub(1));
    }

    pub(crate) fn pull_byte(&mut self) -> u8 {
        let sp = self.cpu.registers.sp().wrapping_add(1);
        self.cpu.registers.set_sp(sp);
        self.read(STACK_BASE | u16::from(sp))
    }

    /// Pushes high byte then low byte.
    pub(crate) fn push_word(&mut self, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.push_byte(hi);
        self.push_byte(lo);
    }

    /// Pulls low byte then high byte.
    pub(crate) fn pull_word(&mut self) -> u16 {
        let lo = self.pull_byte();
        let hi = self.pull_byte();
        u16::from_le_bytes([lo, hi])
    }
}
