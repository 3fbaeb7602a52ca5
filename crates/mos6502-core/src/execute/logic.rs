use crate::cpu::context::ExecContext;
use crate::status::StatusFlag;

use super::Instruction;

/// Bitwise accumulator operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum LogicOp {
    And,
    Or,
    Xor,
}

impl LogicOp {
    const fn apply(self, a: u8, m: u8) -> u8 {
        match self {
            Self::And => a & m,
            Self::Or => a | m,
            Self::Xor => a ^ m,
        }
    }
}

/// `AND`/`ORA`/`EOR`.
pub(super) fn combine(ctx: &mut ExecContext<'_>, op: &Instruction, logic: LogicOp) -> u8 {
    let m = ctx.load_operand(op.operand);
    let value = logic.apply(ctx.cpu.registers.a(), m);
    ctx.cpu.registers.set_a(value);
    ctx.set_zn(value);
    op.cycles
}

/// `BIT`: `Z` from `A & M`, `N`/`V` straight from bits 7/6 of `M`.
pub(super) fn bit(ctx: &mut ExecContext<'_>, op: &Instruction) -> u8 {
    let m = ctx.load_operand(op.operand);
    let a = ctx.cpu.registers.a();
    let status = &mut ctx.cpu.status;
    status.set(StatusFlag::Zero, a & m == 0);
    status.set(StatusFlag::Negative, m & 0x80 != 0);
    status.set(StatusFlag::Overflow, m & 0x40 != 0);
    op.cycles
}
