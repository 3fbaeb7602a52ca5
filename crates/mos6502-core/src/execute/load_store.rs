use crate::cpu::context::ExecContext;
use crate::cpu::Register;

use super::Instruction;

/// `LDA`/`LDX`/`LDY`.
pub(super) fn load(ctx: &mut ExecContext<'_>, op: &Instruction, reg: Register) -> u8 {
    let value = ctx.load_operand(op.operand);
    ctx.cpu.registers.set(reg, value);
    ctx.set_zn(value);
    op.cycles
}

/// `STA`/`STX`/`STY`. No flags change.
pub(super) fn store(ctx: &mut ExecContext<'_>, op: &Instruction, reg: Register) -> u8 {
    let value = ctx.cpu.registers.get(reg);
    ctx.store_operand(op.operand, value);
    op.cycles
}
