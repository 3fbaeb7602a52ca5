#![no_main]

use libfuzzer_sys::fuzz_target;
use mos6502_core::{Cpu, Fault, Memory, SystemBus};

const ORIGIN: u16 = 0x0200;
const MAX_CLOCKS: usize = 4_096;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // First byte picks the reset variant; the rest is the program image.
    let accurate = data[0] & 1 != 0;
    let mut memory = Memory::from_image(ORIGIN, &data[1..]);
    memory.set_reset_vector(ORIGIN);
    memory.set_irq_vector(ORIGIN);
    let mut bus = SystemBus::new(memory);

    let mut cpu = Cpu::new();
    if accurate {
        cpu.accurate_reset(&mut bus);
    } else {
        cpu.reset(&mut bus);
    }

    for _ in 0..MAX_CLOCKS {
        match cpu.step(&mut bus) {
            Ok(_) => {}
            Err(Fault::ResetRequired) => unreachable!("engine was reset"),
            Err(_) => break,
        }
    }

    let snapshot = cpu.snapshot();
    cpu.restore(&snapshot);
    assert_eq!(cpu.snapshot(), snapshot);
});
