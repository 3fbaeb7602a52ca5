use crate::cpu::context::ExecContext;
use crate::cpu::Register;
use crate::status::StatusFlag;

use super::Instruction;

/// Flag outcome of an 8-bit add or subtract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AluResult {
    pub(crate) value: u8,
    pub(crate) carry: bool,
    pub(crate) overflow: bool,
}

/// `A + M + C`. Decimal mode is ignored.
pub(crate) fn add_with_carry(a: u8, m: u8, carry: bool) -> AluResult {
    let sum = u16::from(a) + u16::from(m) + u16::from(carry);
    let [value, _] = sum.to_le_bytes();
    AluResult {
        value,
        carry: sum > 0xFF,
        overflow: (a ^ value) & (m ^ value) & 0x80 != 0,
    }
}

/// `A - M - (1 - C)`; carry out means no borrow.
pub(crate) fn subtract_with_borrow(a: u8, m: u8, carry: bool) -> AluResult {
    let diff = i16::from(a) - i16::from(m) - i16::from(!carry);
    let value = a.wrapping_sub(m).wrapping_sub(u8::from(!carry));
    AluResult {
        value,
        carry: diff >= 0,
        overflow: (a ^ m) & (a ^ value) & 0x80 != 0,
    }
}

pub(super) fn adc(ctx: &mut ExecContext<'_>, op: &Instruction) -> u8 {
    let m = ctx.load_operand(op.operand);
    let carry = ctx.cpu.status.get(StatusFlag::Carry);
    let result = add_with_carry(ctx.cpu.registers.a(), m, carry);
    apply(ctx, result);
    op.cycles
}

pub(super) fn sbc(ctx: &mut ExecContext<'_>, op: &Instruction) -> u8 {
    let m = ctx.load_operand(op.operand);
    let carry = ctx.cpu.status.get(StatusFlag::Carry);
    let result = subtract_with_borrow(ctx.cpu.registers.a(), m, carry);
    apply(ctx, result);
    op.cycles
}

/// `CMP`/`CPX`/`CPY`: flags from `reg - M`, register unchanged.
pub(super) fn compare(ctx: &mut ExecContext<'_>, op: &Instruction, reg: Register) -> u8 {
    let m = ctx.load_operand(op.operand);
    let value = ctx.cpu.registers.get(reg);
    ctx.cpu.status.set(StatusFlag::Carry, value >= m);
    ctx.set_zn(value.wrapping_sub(m));
    op.cycles
}

fn apply(ctx: &mut ExecContext<'_>, result: AluResult) {
    ctx.cpu.registers.set_a(result.value);
    ctx.cpu.status.set(StatusFlag::Carry, result.carry);
    ctx.cpu.status.set(StatusFlag::Overflow, result.overflow);
    ctx.set_zn(result.value);
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;

    use super::{add_with_carry, subtract_with_borrow};
    use crate::execute::test_support::{boot, run_one};
    use crate::status::StatusFlag;

    #[test]
    fn adc_signed_overflow_into_negative() {
        // CLC ; LDA #$7F ; ADC #$01
        let (mut cpu, mut memory) = boot(&[0x18, 0xA9, 0x7F, 0x69, 0x01]);
        for _ in 0..3 {
            run_one(&mut cpu, &mut memory);
        }
        let status = cpu.status();
        assert_eq!(cpu.a(), 0x80);
        assert!(!status.get(StatusFlag::Carry));
        assert!(!status.get(StatusFlag::Zero));
        assert!(status.get(StatusFlag::Negative));
        assert!(status.get(StatusFlag::Overflow));
    }

    #[test]
    fn sbc_with_borrow_in_clears_it_out() {
        // CLC ; LDA #$20 ; SBC #$10
        let (mut cpu, mut memory) = boot(&[0x18, 0xA9, 0x20, 0xE9, 0x10]);
        for _ in 0..3 {
            run_one(&mut cpu, &mut memory);
        }
        assert_eq!(cpu.a(), 0x0F);
        assert!(cpu.status().get(StatusFlag::Carry));
    }

    #[rstest]
    #[case(0xFF, 0x01, false, 0x00, true, false)]
    #[case(0x80, 0x80, false, 0x00, true, true)]
    #[case(0x10, 0x20, true, 0x31, false, false)]
    fn add_cases(
        #[case] a: u8,
        #[case] m: u8,
        #[case] carry_in: bool,
        #[case] value: u8,
        #[case] carry: bool,
        #[case] overflow: bool,
    ) {
        let result = add_with_carry(a, m, carry_in);
        assert_eq!(result.value, value);
        assert_eq!(result.carry, carry);
        assert_eq!(result.overflow, overflow);
    }

    #[rstest]
    #[case(0x00, 0x01, true, 0xFF, false, false)]
    #[case(0x80, 0x01, true, 0x7F, true, true)]
    #[case(0x50, 0x50, true, 0x00, true, false)]
    fn subtract_cases(
        #[case] a: u8,
        #[case] m: u8,
        #[case] carry_in: bool,
        #[case] value: u8,
        #[case] carry: bool,
        #[case] overflow: bool,
    ) {
        let result = subtract_with_borrow(a, m, carry_in);
        assert_eq!(result.value, value);
        assert_eq!(result.carry, carry);
        assert_eq!(result.overflow, overflow);
    }

    #[test]
    fn cpx_and_cpy_compare_index_registers() {
        // LDX #$10 ; CPX #$10 ; LDY #$01 ; CPY #$02
        let (mut cpu, mut memory) = boot(&[0xA2, 0x10, 0xE0, 0x10, 0xA0, 0x01, 0xC0, 0x02]);
        run_one(&mut cpu, &mut memory);
        run_one(&mut cpu, &mut memory);
        assert!(cpu.status().get(StatusFlag::Zero));
        assert!(cpu.status().get(StatusFlag::Carry));

        run_one(&mut cpu, &mut memory);
        run_one(&mut cpu, &mut memory);
        assert!(!cpu.status().get(StatusFlag::Carry));
        assert!(cpu.status().get(StatusFlag::Negative));
        assert_eq!((cpu.x(), cpu.y()), (0x10, 0x01));
    }

    proptest! {
        #[test]
        fn add_matches_wide_arithmetic(a in any::<u8>(), m in any::<u8>(), carry in any::<bool>()) {
            let result = add_with_carry(a, m, carry);
            let wide = u16::from(a) + u16::from(m) + u16::from(carry);
            prop_assert_eq!(u16::from(result.value), wide & 0xFF);
            prop_assert_eq!(result.carry, wide > 0xFF);

            let signed = i16::from(a as i8) + i16::from(m as i8) + i16::from(carry);
            prop_assert_eq!(result.overflow, !(-128..=127).contains(&signed));
        }

        #[test]
        fn subtract_is_add_of_complement(a in any::<u8>(), m in any::<u8>(), carry in any::<bool>()) {
            prop_assert_eq!(subtract_with_borrow(a, m, carry), add_with_carry(a, !m, carry));
        }

        #[test]
        fn cmp_never_mutates_accumulator(a in any::<u8>(), m in any::<u8>()) {
            // LDA #a ; CMP #m
            let (mut cpu, mut memory) = boot(&[0xA9, a, 0xC9, m]);
            run_one(&mut cpu, &mut memory);
            run_one(&mut cpu, &mut memory);
            prop_assert_eq!(cpu.a(), a);
            prop_assert_eq!(cpu.status().get(StatusFlag::Carry), a >= m);
            prop_assert_eq!(cpu.status().get(StatusFlag::Zero), a == m);
        }
    }
}
