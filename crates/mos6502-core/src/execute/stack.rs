use crate::cpu::context::ExecContext;
use crate::status::StatusRegister;

use super::Instruction;

pub(super) fn pha(ctx: &mut ExecContext<'_>, op: &Instruction) -> u8 {
    let a = ctx.cpu.registers.a();
    ctx.push_byte(a);
    op.cycles
}

/// Pushes `P` with Break set; the live register keeps its Break bit.
pub(super) fn php(ctx: &mut ExecContext<'_>, op: &Instruction) -> u8 {
    let pushed = ctx.cpu.status.pushed();
    ctx.push_byte(pushed);
    op.cycles
}

pub(super) fn pla(ctx: &mut ExecContext<'_>, op: &Instruction) -> u8 {
    let value = ctx.pull_byte();
    ctx.cpu.registers.set_a(value);
    ctx.set_zn(value);
    op.cycles
}

/// Break is dropped and Unused forced on the way in.
pub(super) fn plp(ctx: &mut ExecContext<'_>, op: &Instruction) -> u8 {
    let bits = ctx.pull_byte();
    ctx.cpu.status = StatusRegister::pulled(bits);
    op.cycles
}
