//! Performance harness for mos6502-core benchmarking.
//!
//! Measures clock throughput of the stepping loop with and without a
//! peripheral bus and trace sink attached.
//!
//! ## Usage
//!
//! ```sh
//! cargo run --release -p mos6502-core --example performance_harness
//! ```
//!
//! ## Metrics
//!
//! - Instructions per second
//! - Cycles per second
//! - Real-time multiple against a 1.023 MHz NMOS part
//!
//! Each benchmark runs one independent engine per thread.

#![allow(clippy::pedantic)]

use log as _;
use mos6502_core::{Bus, BusMonitor, Cpu, Memory, Peripheral, SystemBus, CONSOLE_BASE};
use proptest as _;
use rstest as _;
#[cfg(feature = "serde")]
use serde as _;
use thiserror as _;

use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

const ORIGIN: u16 = 0x0600;
const REFERENCE_CLOCK_HZ: f64 = 1_023_000.0;
const NUM_THREADS: usize = 4;
const BATCH_INSTRUCTIONS: usize = 1_000;

/// `INX ; NOP ; JMP loop`.
const NOP_LOOP: &[u8] = &[0xE8, 0xEA, 0x4C, 0x00, 0x06];

/// Shifts, adds and compares against the accumulator with an inner branch.
const ALU_LOOP: &[u8] = &[
    0x18, // CLC
    0x69, 0x07, // ADC #$07
    0x0A, // ASL A
    0x49, 0x5A, // EOR #$5A
    0xC9, 0x80, // CMP #$80
    0xB0, 0x01, // BCS +1
    0xE8, // INX
    0x4C, 0x00, 0x06, // JMP loop
];

/// Indexed and indirect memory traffic plus a console write.
const MEMORY_LOOP: &[u8] = &[
    0xA0, 0x00, // LDY #$00
    0xB1, 0x40, // inner: LDA ($40),Y
    0x91, 0x42, // STA ($42),Y
    0x48, // PHA
    0x68, // PLA
    0xC8, // INY
    0xD0, 0xF7, // BNE inner
    0x8D, 0x00, 0xD0, // STA $D000
    0x4C, 0x00, 0x06, // JMP loop
];

#[derive(Debug, Clone, Copy)]
enum Harness {
    BareMemory,
    Bus,
    BusTraced,
}

#[derive(Debug, Clone, Copy)]
struct BenchmarkResult {
    name: &'static str,
    instructions_per_second: f64,
    cycles_per_second: f64,
    realtime_multiple: f64,
}

/// Write-only console register that swallows output.
struct ConsoleSink;

impl Peripheral for ConsoleSink {
    fn handles_address(&self, addr: u16) -> bool {
        (CONSOLE_BASE..CONSOLE_BASE + 4).contains(&addr)
    }

    fn read(&mut self, _addr: u16) -> u8 {
        0
    }

    fn write(&mut self, _addr: u16, _value: u8) {}
}

fn image(program: &[u8]) -> Memory {
    let mut memory = Memory::from_image(ORIGIN, program);
    memory.set_reset_vector(ORIGIN);
    memory.write_word(0x0040, 0x2000);
    memory.write_word(0x0042, 0x3000);
    memory
}

fn run_batch(cpu: &mut Cpu, bus: &mut dyn Bus, monitor: Option<&mut BusMonitor>) -> u64 {
    let mut cycles = 0_u64;
    match monitor {
        Some(monitor) => {
            for _ in 0..BATCH_INSTRUCTIONS {
                cycles += u64::from(
                    cpu.execute_instruction_traced(bus, monitor)
                        .expect("benchmark programs only use documented opcodes"),
                );
            }
            monitor.clear();
        }
        None => {
            for _ in 0..BATCH_INSTRUCTIONS {
                cycles += u64::from(
                    cpu.execute_instruction(bus)
                        .expect("benchmark programs only use documented opcodes"),
                );
            }
        }
    }
    cycles
}

fn benchmark(
    name: &'static str,
    program: &'static [u8],
    harness: Harness,
    duration: Duration,
) -> BenchmarkResult {
    let (tx, rx) = mpsc::channel();

    let handles: Vec<_> = (0..NUM_THREADS)
        .map(|_| {
            let tx = tx.clone();
            thread::spawn(move || {
                let mut cpu = Cpu::new();
                let mut memory = image(program);
                let mut bus = SystemBus::new(image(program));
                bus.add_peripheral(Box::new(ConsoleSink));
                let mut monitor = BusMonitor::new();

                let bus: &mut dyn Bus = match harness {
                    Harness::BareMemory => &mut memory,
                    Harness::Bus | Harness::BusTraced => &mut bus,
                };
                cpu.reset(bus);

                let mut total_instructions = 0u64;
                let mut total_cycles = 0u64;
                let start = Instant::now();

                while start.elapsed() < duration {
                    let monitor = match harness {
                        Harness::BusTraced => Some(&mut monitor),
                        Harness::BareMemory | Harness::Bus => None,
                    };
                    total_cycles += run_batch(&mut cpu, bus, monitor);
                    total_instructions += BATCH_INSTRUCTIONS as u64;
                }

                tx.send((total_instructions, total_cycles)).ok();
            })
        })
        .collect();

    for h in handles {
        h.join().ok();
    }

    drop(tx);

    let mut total_instructions = 0u64;
    let mut total_cycles = 0u64;
    for (inst, cyc) in rx {
        total_instructions += inst;
        total_cycles += cyc;
    }

    let elapsed_secs = duration.as_secs_f64();
    let cycles_per_second = total_cycles as f64 / elapsed_secs;

    BenchmarkResult {
        name,
        instructions_per_second: total_instructions as f64 / elapsed_secs,
        cycles_per_second,
        realtime_multiple: cycles_per_second / REFERENCE_CLOCK_HZ,
    }
}

fn print_result(result: &BenchmarkResult) {
    println!(
        "{:<18} {:>14.0} instr/s {:>14.0} cycles/s {:>8.1}x real time",
        result.name,
        result.instructions_per_second,
        result.cycles_per_second,
        result.realtime_multiple
    );
}

fn main() {
    let duration = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .map_or(Duration::from_secs(2), Duration::from_secs);

    println!("mos6502-core performance harness ({NUM_THREADS} threads, {duration:?} each)");

    let results = [
        benchmark("nop_loop", NOP_LOOP, Harness::BareMemory, duration),
        benchmark("alu_loop", ALU_LOOP, Harness::BareMemory, duration),
        benchmark("memory_loop", MEMORY_LOOP, Harness::Bus, duration),
        benchmark("memory_loop_trace", MEMORY_LOOP, Harness::BusTraced, duration),
    ];
    for result in &results {
        print_result(result);
    }
}
