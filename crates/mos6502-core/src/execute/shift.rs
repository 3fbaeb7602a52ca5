use crate::cpu::context::ExecContext;
use crate::status::StatusFlag;

use super::Instruction;

/// Shift and rotate forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ShiftOp {
    Asl,
    Lsr,
    Rol,
    Ror,
}

impl ShiftOp {
    /// Returns `(result, carry_out)`.
    fn apply(self, value: u8, carry_in: bool) -> (u8, bool) {
        let carry_in = u8::from(carry_in);
        match self {
            Self::Asl => (value << 1, value & 0x80 != 0),
            Self::Lsr => (value >> 1, value & 0x01 != 0),
            Self::Rol => ((value << 1) | carry_in, value & 0x80 != 0),
            Self::Ror => ((value >> 1) | (carry_in << 7), value & 0x01 != 0),
        }
    }
}

/// Read-modify-write on the accumulator or memory, per the addressing mode.
pub(super) fn shift(ctx: &mut ExecContext<'_>, op: &Instruction, shift: ShiftOp) -> u8 {
    let value = ctx.load_operand(op.operand);
    let carry_in = ctx.cpu.status.get(StatusFlag::Carry);
    let (result, carry_out) = shift.apply(value, carry_in);
    ctx.store_operand(op.operand, result);
    ctx.cpu.status.set(StatusFlag::Carry, carry_out);
    ctx.set_zn(result);
    op.cycles
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::ShiftOp;
    use crate::execute::test_support::{boot, run_one};
    use crate::status::StatusFlag;

    #[rstest]
    #[case(ShiftOp::Asl, 0x81, false, 0x02, true)]
    #[case(ShiftOp::Lsr, 0x81, false, 0x40, true)]
    #[case(ShiftOp::Rol, 0x40, true, 0x81, false)]
    #[case(ShiftOp::Ror, 0x02, true, 0x81, false)]
    #[case(ShiftOp::Ror, 0x01, false, 0x00, true)]
    fn shift_results_and_carry_out(
        #[case] op: ShiftOp,
        #[case] value: u8,
        #[case] carry_in: bool,
        #[case] result: u8,
        #[case] carry_out: bool,
    ) {
        assert_eq!(op.apply(value, carry_in), (result, carry_out));
    }

    #[test]
    fn accumulator_mode_shifts_a_in_place() {
        // LDA #$C0 ; ASL A
        let (mut cpu, mut memory) = boot(&[0xA9, 0xC0, 0x0A]);
        run_one(&mut cpu, &mut memory);
        assert_eq!(run_one(&mut cpu, &mut memory), 2);
        assert_eq!(cpu.a(), 0x80);
        assert!(cpu.status().get(StatusFlag::Carry));
        assert!(cpu.status().get(StatusFlag::Negative));
    }

    #[test]
    fn lsr_always_clears_negative() {
        // LDA #$FF ; LSR A
        let (mut cpu, mut memory) = boot(&[0xA9, 0xFF, 0x4A]);
        run_one(&mut cpu, &mut memory);
        run_one(&mut cpu, &mut memory);
        assert_eq!(cpu.a(), 0x7F);
        assert!(!cpu.status().get(StatusFlag::Negative));
        assert!(cpu.status().get(StatusFlag::Carry));
    }

    #[test]
    fn memory_rotate_writes_back_and_leaves_accumulator() {
        // SEC ; ROL $40 ; ROR $0300,X
        let (mut cpu, mut memory) = boot(&[0x38, 0x26, 0x40, 0x7E, 0x00, 0x03]);
        memory.write_byte(0x0040, 0x80);
        memory.write_byte(0x0300, 0x01);
        run_one(&mut cpu, &mut memory);

        assert_eq!(run_one(&mut cpu, &mut memory), 5);
        assert_eq!(memory.read_byte(0x0040), 0x01);
        assert!(cpu.status().get(StatusFlag::Carry));

        assert_eq!(run_one(&mut cpu, &mut memory), 7);
        assert_eq!(memory.read_byte(0x0300), 0x80);
        assert!(cpu.status().get(StatusFlag::Carry));
        assert_eq!(cpu.a(), 0x00);
    }
}
