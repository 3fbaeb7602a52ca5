use crate::cpu::context::ExecContext;
use crate::cpu::Register;

use super::Instruction;

/// `INC`/`DEC` on memory; `delta` is `1` or `-1`.
pub(super) fn memory(ctx: &mut ExecContext<'_>, op: &Instruction, delta: i8) -> u8 {
    let value = ctx.load_operand(op.operand).wrapping_add_signed(delta);
    ctx.store_operand(op.operand, value);
    ctx.set_zn(value);
    op.cycles
}

/// `INX`/`INY`/`DEX`/`DEY`.
pub(super) fn register(
    ctx: &mut ExecContext<'_>,
    op: &Instruction,
    reg: Register,
    delta: i8,
) -> u8 {
    let value = ctx.cpu.registers.get(reg).wrapping_add_signed(delta);
    ctx.cpu.registers.set(reg, value);
    ctx.set_zn(value);
    op.cycles
}

#[cfg(test)]
mod tests {
    use crate::execute::test_support::{boot, run_one};
    use crate::status::StatusFlag;

    #[test]
    fn memory_increment_wraps_to_zero() {
        // INC $0200
        let (mut cpu, mut memory) = boot(&[0xEE, 0x00, 0x02]);
        memory.write_byte(0x0200, 0xFF);
        assert_eq!(run_one(&mut cpu, &mut memory), 6);
        assert_eq!(memory.read_byte(0x0200), 0x00);
        assert!(cpu.status().get(StatusFlag::Zero));
    }

    #[test]
    fn memory_decrement_goes_negative() {
        // DEC $10,X with X = 0
        let (mut cpu, mut memory) = boot(&[0xD6, 0x10]);
        assert_eq!(run_one(&mut cpu, &mut memory), 6);
        assert_eq!(memory.read_byte(0x0010), 0xFF);
        assert!(cpu.status().get(StatusFlag::Negative));
    }

    #[test]
    fn index_registers_wrap_both_ways() {
        // DEX ; DEY ; INX ; INY ; INY
        let (mut cpu, mut memory) = boot(&[0xCA, 0x88, 0xE8, 0xC8, 0xC8]);
        run_one(&mut cpu, &mut memory);
        run_one(&mut cpu, &mut memory);
        assert_eq!((cpu.x(), cpu.y()), (0xFF, 0xFF));
        assert!(cpu.status().get(StatusFlag::Negative));

        run_one(&mut cpu, &mut memory);
        assert_eq!(cpu.x(), 0x00);
        assert!(cpu.status().get(StatusFlag::Zero));

        run_one(&mut cpu, &mut memory);
        run_one(&mut cpu, &mut memory);
        assert_eq!(cpu.y(), 0x01);
        assert!(!cpu.status().get(StatusFlag::Zero));
    }
}
