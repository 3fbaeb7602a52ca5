//! Single-flag set/clear instructions.

use crate::cpu::context::ExecContext;
use crate::status::StatusFlag;

use super::Instruction;

/// `SEC`/`CLC`/`SEI`/`CLI`/`SED`/`CLD`/`CLV`.
pub(super) const fn write_flag(
    ctx: &mut ExecContext<'_>,
    op: &Instruction,
    flag: StatusFlag,
    value: bool,
) -> u8 {
    ctx.cpu.status.set(flag, value);
    op.cycles
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::execute::test_support::{boot, run_one};
    use crate::status::{StatusFlag, StatusRegister};

    #[rstest]
    #[case(0x38, StatusFlag::Carry, true)]
    #[case(0x18, StatusFlag::Carry, false)]
    #[case(0x78, StatusFlag::InterruptDisable, true)]
    #[case(0x58, StatusFlag::InterruptDisable, false)]
    #[case(0xF8, StatusFlag::Decimal, true)]
    #[case(0xD8, StatusFlag::Decimal, false)]
    #[case(0xB8, StatusFlag::Overflow, false)]
    fn touches_exactly_one_flag(#[case] opcode: u8, #[case] flag: StatusFlag, #[case] value: bool) {
        for start in [0x00_u8, 0xFF] {
            let (mut cpu, mut memory) = boot(&[opcode]);
            cpu.set_status(StatusRegister::from_bits(start));
            assert_eq!(run_one(&mut cpu, &mut memory), 2);
            assert_eq!(cpu.status().get(flag), value);
            assert_eq!(cpu.status().bits() & !flag.mask(), start & !flag.mask());
        }
    }

    #[test]
    fn nop_only_advances_pc() {
        let (mut cpu, mut memory) = boot(&[0xEA]);
        let before = cpu.snapshot();
        assert_eq!(run_one(&mut cpu, &mut memory), 2);
        assert_eq!(cpu.pc(), before.registers.pc() + 1);
        assert_eq!(cpu.status(), before.status);
        assert_eq!(cpu.a(), before.registers.a());
    }
}
