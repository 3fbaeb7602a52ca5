use crate::cpu::context::ExecContext;
use crate::cpu::Operand;
use crate::memory::IRQ_VECTOR;
use crate::status::{StatusFlag, StatusRegister};
use crate::timing::branch_penalty;

use super::Instruction;

/// Flag test guarding a conditional branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct BranchCondition {
    flag: StatusFlag,
    expected: bool,
}

impl BranchCondition {
    pub(super) const fn set(flag: StatusFlag) -> Self {
        Self {
            flag,
            expected: true,
        }
    }

    pub(super) const fn clear(flag: StatusFlag) -> Self {
        Self {
            flag,
            expected: false,
        }
    }

    const fn holds(self, status: StatusRegister) -> bool {
        status.get(self.flag) == self.expected
    }
}

/// Conditional relative branch.
///
/// Taken branches cost one extra cycle, two if the target is on a different
/// page from the instruction following the branch.
pub(super) fn branch(ctx: &mut ExecContext<'_>, op: &Instruction, condition: BranchCondition) -> u8 {
    let Operand::Relative(offset) = op.operand else {
        return op.cycles;
    };
    let next = ctx.cpu.registers.pc();
    let target = next.wrapping_add_signed(i16::from(i8::from_ne_bytes([offset])));
    let taken = condition.holds(ctx.cpu.status);
    if taken {
        ctx.cpu.registers.set_pc(target);
    }
    op.cycles.saturating_add(branch_penalty(taken, next, target))
}

pub(super) fn jmp(ctx: &mut ExecContext<'_>, op: &Instruction) -> u8 {
    if let Operand::Address(target) = op.operand {
        ctx.cpu.registers.set_pc(target);
    }
    op.cycles
}

/// Pushes the address of the operand's last byte, then jumps.
pub(super) fn jsr(ctx: &mut ExecContext<'_>, op: &Instruction) -> u8 {
    let return_addr = ctx.cpu.registers.pc().wrapping_sub(1);
    ctx.push_word(return_addr);
    jmp(ctx, op)
}

pub(super) fn rts(ctx: &mut ExecContext<'_>, op: &Instruction) -> u8 {
    let return_addr = ctx.pull_word().wrapping_add(1);
    ctx.cpu.registers.set_pc(return_addr);
    op.cycles
}

/// Software interrupt through the IRQ vector.
pub(super) fn brk(ctx: &mut ExecContext<'_>, op: &Instruction) -> u8 {
    // PC already points past the opcode; the padding byte is skipped too.
    let return_addr = ctx.cpu.registers.pc().wrapping_add(1);
    ctx.push_word(return_addr);
    let pushed = ctx.cpu.status.pushed();
    ctx.push_byte(pushed);
    ctx.cpu.status.set(StatusFlag::InterruptDisable, true);
    let handler = ctx.read_word(IRQ_VECTOR);
    ctx.cpu.registers.set_pc(handler);
    op.cycles
}

/// Pulls status (normalized like `PLP`), then `PC`.
pub(super) fn rti(ctx: &mut ExecContext<'_>, op: &Instruction) -> u8 {
    let bits = ctx.pull_byte();
    ctx.cpu.status = StatusRegister::pulled(bits);
    let pc = ctx.pull_word();
    ctx.cpu.registers.set_pc(pc);
    op.cycles
}
