use crate::cpu::context::ExecContext;
use crate::cpu::Register;

use super::Instruction;

/// `TAX`/`TAY`/`TXA`/`TYA`.
pub(super) fn transfer(
    ctx: &mut ExecContext<'_>,
    op: &Instruction,
    from: Register,
    to: Register,
) -> u8 {
    let value = ctx.cpu.registers.get(from);
    ctx.cpu.registers.set(to, value);
    ctx.set_zn(value);
    op.cycles
}

pub(super) const fn tsx(ctx: &mut ExecContext<'_>, op: &Instruction) -> u8 {
    let value = ctx.cpu.registers.sp();
    ctx.cpu.registers.set_x(value);
    ctx.set_zn(value);
    op.cycles
}

/// Flags are untouched.
pub(super) const fn txs(ctx: &mut ExecContext<'_>, op: &Instruction) -> u8 {
    let value = ctx.cpu.registers.x();
    ctx.cpu.registers.set_sp(value);
    op.cycles
}

#[cfg(test)]
mod tests {
    use crate::execute::test_support::{boot, run_one};
    use crate::status::StatusFlag;

    #[test]
    fn register_transfers_copy_and_set_flags() {
        // LDA #$80 ; TAX ; TAY ; LDA #$00 ; TXA
        let (mut cpu, mut memory) = boot(&[0xA9, 0x80, 0xAA, 0xA8, 0xA9, 0x00, 0x8A]);
        run_one(&mut cpu, &mut memory);
        assert_eq!(run_one(&mut cpu, &mut memory), 2);
        assert_eq!(run_one(&mut cpu, &mut memory), 2);
        assert_eq!((cpu.x(), cpu.y()), (0x80, 0x80));
        assert!(cpu.status().get(StatusFlag::Negative));

        run_one(&mut cpu, &mut memory);
        assert!(cpu.status().get(StatusFlag::Zero));
        run_one(&mut cpu, &mut memory);
        assert_eq!(cpu.a(), 0x80);
        assert!(!cpu.status().get(StatusFlag::Zero));
    }

    #[test]
    fn tya_copies_y_into_a() {
        // LDY #$7F ; TYA
        let (mut cpu, mut memory) = boot(&[0xA0, 0x7F, 0x98]);
        run_one(&mut cpu, &mut memory);
        run_one(&mut cpu, &mut memory);
        assert_eq!(cpu.a(), 0x7F);
        assert!(!cpu.status().get(StatusFlag::Negative));
    }

    #[test]
    fn txs_sets_no_flags_and_tsx_does() {
        // LDX #$00 ; TXS ; LDX #$01 ; TSX
        let (mut cpu, mut memory) = boot(&[0xA2, 0x00, 0x9A, 0xA2, 0x01, 0xBA]);
        run_one(&mut cpu, &mut memory);
        let status = cpu.status();
        run_one(&mut cpu, &mut memory);
        assert_eq!(cpu.sp(), 0x00);
        assert_eq!(cpu.status(), status);

        run_one(&mut cpu, &mut memory);
        run_one(&mut cpu, &mut memory);
        assert_eq!(cpu.x(), 0x00);
        assert!(cpu.status().get(StatusFlag::Zero));
    }
}
