//! Deterministic execution fingerprint used for cross-host comparison.
//!
//! Boots a fixed program, runs it to a self-jump, and hashes every bus
//! access plus the final engine state. Two hosts agree iff they print the
//! same hex digest.

use log as _;
use mos6502_core::{BusMonitor, BusOp, Cpu, Memory, ResetKind, TraceEvent, TraceSink};
use proptest as _;
use rstest as _;
#[cfg(feature = "serde")]
use serde as _;
use thiserror as _;

const ORIGIN: u16 = 0x0600;
const HALT: u16 = 0x0619;
const MAX_INSTRUCTIONS: usize = 10_000;

/// Sums $01..=$10 into a 16-bit counter at $10/$11, then pushes a small
/// table from page two onto the stack.
const PROGRAM: &[u8] = &[
    0xA2, 0x10, // LDX #$10
    0x18, // loop: CLC
    0x8A, // TXA
    0x65, 0x10, // ADC $10
    0x85, 0x10, // STA $10
    0x90, 0x02, // BCC +2
    0xE6, 0x11, // INC $11
    0xCA, // DEX
    0xD0, 0xF3, // BNE loop
    0xA0, 0x03, // LDY #$03
    0xB9, 0x00, 0x02, // copy: LDA $0200,Y
    0x48, // PHA
    0x88, // DEY
    0x10, 0xF9, // BPL copy
    0xEA, // NOP
    0x4C, 0x19, 0x06, // halt: JMP halt
];

/// Forwards bus accesses to a monitor and counts everything else.
struct Recorder {
    monitor: BusMonitor,
    retired: u64,
}

impl TraceSink for Recorder {
    fn on_event(&mut self, event: TraceEvent) {
        if let TraceEvent::InstructionRetired { .. } = event {
            self.retired += 1;
        }
        self.monitor.on_event(event);
    }
}

fn hash_bytes(hash: &mut u64, bytes: &[u8]) {
    for byte in bytes {
        *hash ^= u64::from(*byte);
        *hash = hash.wrapping_mul(0x1000_0000_01B3);
    }
}

fn fingerprint() -> String {
    let mut memory = Memory::from_image(ORIGIN, PROGRAM);
    memory.load(0x0200, &[0xDE, 0xAD, 0xBE, 0xEF]);
    memory.set_reset_vector(ORIGIN);

    let mut cpu = Cpu::new();
    let mut recorder = Recorder {
        monitor: BusMonitor::new(),
        retired: 0,
    };
    cpu.reset_traced(ResetKind::Deterministic, &mut memory, &mut recorder);

    let mut executed = 0;
    while cpu.pc() != HALT && executed < MAX_INSTRUCTIONS {
        cpu.execute_instruction_traced(&mut memory, &mut recorder)
            .expect("fingerprint program only uses documented opcodes");
        executed += 1;
    }

    let mut hash = 0xcbf2_9ce4_8422_2325_u64;
    for entry in recorder.monitor.activity() {
        let tag = match entry.operation {
            BusOp::Read => 0x52,
            BusOp::Write => 0x57,
        };
        hash_bytes(&mut hash, &[tag, entry.data]);
        hash_bytes(&mut hash, &entry.cycle.to_le_bytes());
        hash_bytes(&mut hash, &entry.address.to_le_bytes());
    }

    let snapshot = cpu.snapshot();
    let registers = snapshot.registers;
    hash_bytes(
        &mut hash,
        &[
            registers.a(),
            registers.x(),
            registers.y(),
            registers.sp(),
            snapshot.status.bits(),
        ],
    );
    hash_bytes(&mut hash, &registers.pc().to_le_bytes());
    hash_bytes(&mut hash, &snapshot.total_cycles.to_le_bytes());
    hash_bytes(&mut hash, &recorder.retired.to_le_bytes());
    hash_bytes(&mut hash, memory.as_slice());

    format!("{hash:016x}")
}

fn main() {
    println!("{}", fingerprint());
}
