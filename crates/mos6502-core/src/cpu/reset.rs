use crate::memory::{RESET_VECTOR, STACK_BASE};
use crate::status::{StatusFlag, StatusRegister};
use crate::trace::{ResetKind, TraceEvent};

use super::context::ExecContext;

/// One bus cycle of the reset sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResetStep {
    /// Discarded read of `PC`.
    DummyPc,
    /// Discarded read of `PC + 1`.
    DummyPcNext,
    /// Decrement `SP`, then a discarded read of the stack slot.
    DummyStack,
    /// Reset vector low byte.
    VectorLow,
    /// Reset vector high byte.
    VectorHigh,
}

const RESET_SEQUENCE: [ResetStep; 7] = [
    ResetStep::DummyPc,
    ResetStep::DummyPcNext,
    ResetStep::DummyStack,
    ResetStep::DummyStack,
    ResetStep::DummyStack,
    ResetStep::VectorLow,
    ResetStep::VectorHigh,
];

const RESET_STATUS: u8 = StatusFlag::InterruptDisable.mask() | StatusFlag::Unused.mask();

impl ExecContext<'_> {
    /// Runs the seven-cycle reset sequence, ticking the bus once per cycle.
    pub(crate) fn run_reset(&mut self, kind: ResetKind) {
        self.sink.on_event(TraceEvent::ResetStarted { kind });

        let start_pc = self.cpu.registers.pc();
        let mut vector = [0_u8; 2];
        for step in RESET_SEQUENCE {
            self.set_cycle(self.cpu.total_cycles);
            match step {
                ResetStep::DummyPc => {
                    self.read(start_pc);
                }
                ResetStep::DummyPcNext => {
                    self.read(start_pc.wrapping_add(1));
                }
                ResetStep::DummyStack => {
                    let sp = self.cpu.registers.sp().wrapping_sub(1);
                    self.cpu.registers.set_sp(sp);
                    self.read(STACK_BASE | u16::from(sp));
                }
                ResetStep::VectorLow => vector[0] = self.read(RESET_VECTOR),
                ResetStep::VectorHigh => vector[1] = self.read(RESET_VECTOR + 1),
            }
            self.cpu.total_cycles += 1;
            self.tick_bus();
        }

        let pc = u16::from_le_bytes(vector);
        let registers = &mut self.cpu.registers;
        registers.set_pc(pc);
        match kind {
            ResetKind::Deterministic => {
                registers.set_a(0);
                registers.set_x(0);
                registers.set_y(0);
                self.cpu.status = StatusRegister::from_bits(RESET_STATUS);
            }
            ResetKind::HardwareAccurate => {
                let bits = self.cpu.status.bits() | RESET_STATUS;
                self.cpu.status = StatusRegister::from_bits(bits);
            }
        }
        self.cpu.pending_cycles = 0;
        self.cpu.reset_done = true;

        log::debug!(
            "reset ({kind:?}) complete: pc=${pc:04X} sp=${:02X} p=${:02X}",
            self.cpu.registers.sp(),
            self.cpu.status.bits()
        );
        self.sink.on_event(TraceEvent::ResetCompleted { pc });
    }
}

#[cfg(test)]
mod tests {
    use super::RESET_SEQUENCE;
    use crate::memory::Memory;
    use crate::timing::RESET_CYCLES;
    use crate::trace::{BusMonitor, BusOp, ResetKind};
    use crate::Cpu;

    #[test]
    fn sequence_length_matches_reset_cost() {
        assert_eq!(RESET_SEQUENCE.len(), usize::from(RESET_CYCLES));
    }

    #[test]
    fn sequence_reads_in_fixed_order_with_distinct_stamps() {
        let mut memory = Memory::new();
        memory.set_reset_vector(0x8000);
        let mut cpu = Cpu::new();
        cpu.set_pc(0x1234);
        cpu.set_sp(0x40);

        let mut monitor = BusMonitor::new();
        cpu.reset_traced(ResetKind::Deterministic, &mut memory, &mut monitor);

        let order: Vec<(u64, u16)> = monitor
            .activity()
            .iter()
            .map(|entry| (entry.cycle, entry.address))
            .collect();
        assert_eq!(
            order,
            vec![
                (0, 0x1234),
                (1, 0x1235),
                (2, 0x013F),
                (3, 0x013E),
                (4, 0x013D),
                (5, 0xFFFC),
                (6, 0xFFFD),
            ]
        );
        assert!(monitor.activity().iter().all(|e| e.operation == BusOp::Read));
        assert_eq!(cpu.sp(), 0x3D);
        assert_eq!(cpu.total_cycles(), 7);
    }
}
