//! Instruction fetch, decode, and dispatch to the family handlers.
//!
//! Each handler mutates engine state through an [`ExecContext`] and returns
//! the instruction's total cycle cost.

mod arithmetic;
mod flags;
mod flow;
mod inc_dec;
mod load_store;
mod logic;
mod shift;
mod stack;
mod transfer;

use crate::cpu::context::ExecContext;
use crate::cpu::{Operand, Register};
use crate::fault::Fault;
use crate::opcode::{Mnemonic, OpcodeTable};
use crate::status::StatusFlag;
use crate::timing::{cycle_penalty, pays_page_cross_penalty, CyclePenalty};
use crate::trace::TraceEvent;

use self::flow::BranchCondition;
use self::logic::LogicOp;
use self::shift::ShiftOp;

/// Fully resolved instruction handed to a family handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Instruction {
    pub(crate) mnemonic: Mnemonic,
    pub(crate) operand: Operand,
    /// Base cost plus any page-cross surcharge already earned.
    pub(crate) cycles: u8,
}

/// Fetches, decodes, and executes one instruction at `PC`.
pub(crate) fn run_instruction(ctx: &mut ExecContext<'_>) -> Result<u8, Fault> {
    let table: &'static OpcodeTable = ctx.cpu.table;
    let pc = ctx.cpu.registers.pc();
    let opcode = ctx.fetch_byte();
    ctx.sink.on_event(TraceEvent::InstructionStart { pc, opcode });

    let Some(entry) = table.lookup(opcode) else {
        log::warn!("unimplemented opcode ${opcode:02X} at ${pc:04X}");
        ctx.sink.on_event(TraceEvent::FaultRaised { pc, opcode });
        return Err(Fault::UnimplementedOpcode { opcode, pc });
    };
    let Some(mnemonic) = entry.mnemonic else {
        log::warn!(
            "no handler for {} (opcode ${opcode:02X} at ${pc:04X})",
            entry.name
        );
        ctx.sink.on_event(TraceEvent::FaultRaised { pc, opcode });
        return Err(Fault::InstructionNotImplemented {
            mnemonic: entry.name.to_string(),
            opcode,
            pc,
        });
    };
    log::trace!(
        "${pc:04X}: {opcode:02X} {mnemonic} {} a={:02X} x={:02X} y={:02X} sp={:02X} p={:02X}",
        entry.mode,
        ctx.cpu.registers.a(),
        ctx.cpu.registers.x(),
        ctx.cpu.registers.y(),
        ctx.cpu.registers.sp(),
        ctx.cpu.status.bits()
    );

    let resolved = ctx.resolve(entry.mode);
    let mut cycles = entry.cycles;
    if resolved.page_crossed
        && ctx.cpu.config.page_cross_penalty
        && pays_page_cross_penalty(mnemonic, entry.mode)
    {
        cycles = cycles.saturating_add(cycle_penalty(CyclePenalty::PageCross));
    }

    let instruction = Instruction {
        mnemonic,
        operand: resolved.operand,
        cycles,
    };
    let cycles = dispatch(ctx, &instruction);
    ctx.sink
        .on_event(TraceEvent::InstructionRetired { pc, cycles });
    Ok(cycles)
}

fn dispatch(ctx: &mut ExecContext<'_>, op: &Instruction) -> u8 {
    match op.mnemonic {
        Mnemonic::Lda => load_store::load(ctx, op, Register::A),
        Mnemonic::Ldx => load_store::load(ctx, op, Register::X),
        Mnemonic::Ldy => load_store::load(ctx, op, Register::Y),
        Mnemonic::Sta => load_store::store(ctx, op, Register::A),
        Mnemonic::Stx => load_store::store(ctx, op, Register::X),
        Mnemonic::Sty => load_store::store(ctx, op, Register::Y),

        Mnemonic::Tax => transfer::transfer(ctx, op, Register::A, Register::X),
        Mnemonic::Tay => transfer::transfer(ctx, op, Register::A, Register::Y),
        Mnemonic::Txa => transfer::transfer(ctx, op, Register::X, Register::A),
        Mnemonic::Tya => transfer::transfer(ctx, op, Register::Y, Register::A),
        Mnemonic::Tsx => transfer::tsx(ctx, op),
        Mnemonic::Txs => transfer::txs(ctx, op),

        Mnemonic::Adc => arithmetic::adc(ctx, op),
        Mnemonic::Sbc => arithmetic::sbc(ctx, op),
        Mnemonic::Cmp => arithmetic::compare(ctx, op, Register::A),
        Mnemonic::Cpx => arithmetic::compare(ctx, op, Register::X),
        Mnemonic::Cpy => arithmetic::compare(ctx, op, Register::Y),

        Mnemonic::And => logic::combine(ctx, op, LogicOp::And),
        Mnemonic::Ora => logic::combine(ctx, op, LogicOp::Or),
        Mnemonic::Eor => logic::combine(ctx, op, LogicOp::Xor),
        Mnemonic::Bit => logic::bit(ctx, op),

        Mnemonic::Asl => shift::shift(ctx, op, ShiftOp::Asl),
        Mnemonic::Lsr => shift::shift(ctx, op, ShiftOp::Lsr),
        Mnemonic::Rol => shift::shift(ctx, op, ShiftOp::Rol),
        Mnemonic::Ror => shift::shift(ctx, op, ShiftOp::Ror),

        Mnemonic::Inc => inc_dec::memory(ctx, op, 1),
        Mnemonic::Dec => inc_dec::memory(ctx, op, -1),
        Mnemonic::Inx => inc_dec::register(ctx, op, Register::X, 1),
        Mnemonic::Iny => inc_dec::register(ctx, op, Register::Y, 1),
        Mnemonic::Dex => inc_dec::register(ctx, op, Register::X, -1),
        Mnemonic::Dey => inc_dec::register(ctx, op, Register::Y, -1),

        Mnemonic::Bcc => flow::branch(ctx, op, BranchCondition::clear(StatusFlag::Carry)),
        Mnemonic::Bcs => flow::branch(ctx, op, BranchCondition::set(StatusFlag::Carry)),
        Mnemonic::Bne => flow::branch(ctx, op, BranchCondition::clear(StatusFlag::Zero)),
        Mnemonic::Beq => flow::branch(ctx, op, BranchCondition::set(StatusFlag::Zero)),
        Mnemonic::Bpl => flow::branch(ctx, op, BranchCondition::clear(StatusFlag::Negative)),
        Mnemonic::Bmi => flow::branch(ctx, op, BranchCondition::set(StatusFlag::Negative)),
        Mnemonic::Bvc => flow::branch(ctx, op, BranchCondition::clear(StatusFlag::Overflow)),
        Mnemonic::Bvs => flow::branch(ctx, op, BranchCondition::set(StatusFlag::Overflow)),
        Mnemonic::Jmp => flow::jmp(ctx, op),
        Mnemonic::Jsr => flow::jsr(ctx, op),
        Mnemonic::Rts => flow::rts(ctx, op),
        Mnemonic::Brk => flow::brk(ctx, op),
        Mnemonic::Rti => flow::rti(ctx, op),

        Mnemonic::Pha => stack::pha(ctx, op),
        Mnemonic::Php => stack::php(ctx, op),
        Mnemonic::Pla => stack::pla(ctx, op),
        Mnemonic::Plp => stack::plp(ctx, op),

        Mnemonic::Sec => flags::write_flag(ctx, op, StatusFlag::Carry, true),
        Mnemonic::Clc => flags::write_flag(ctx, op, StatusFlag::Carry, false),
        Mnemonic::Sei => flags::write_flag(ctx, op, StatusFlag::InterruptDisable, true),
        Mnemonic::Cli => flags::write_flag(ctx, op, StatusFlag::InterruptDisable, false),
        Mnemonic::Sed => flags::write_flag(ctx, op, StatusFlag::Decimal, true),
        Mnemonic::Cld => flags::write_flag(ctx, op, StatusFlag::Decimal, false),
        Mnemonic::Clv => flags::write_flag(ctx, op, StatusFlag::Overflow, false),
        Mnemonic::Nop => op.cycles,
    }
}

impl ExecContext<'_> {
    /// Reads the operand value. Implied operands read as zero without
    /// touching the bus.
    pub(crate) fn load_operand(&mut self, operand: Operand) -> u8 {
        match operand {
            Operand::Address(addr) => self.read(addr),
            Operand::Accumulator => self.cpu.registers.a(),
            Operand::Relative(offset) => offset,
            Operand::None => 0,
        }
    }

    /// Writes back to the operand location. Implied and relative operands
    /// have nowhere to go and are dropped.
    pub(crate) fn store_operand(&mut self, operand: Operand, value: u8) {
        match operand {
            Operand::Address(addr) => self.write(addr, value),
            Operand::Accumulator => self.cpu.registers.set_a(value),
            Operand::Relative(_) | Operand::None => {}
        }
    }

    /// Sets `Zero`/`Negative` from `value`.
    pub(crate) const fn set_zn(&mut self, value: u8) {
        self.cpu.status.set_zn(value);
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{boot, run_one, run_traced, ORIGIN};
    use crate::config::CoreConfig;
    use crate::fault::Fault;
    use crate::memory::Memory;
    use crate::opcode::{OpcodeRecord, OpcodeTable};
    use crate::timing::MAX_BASE_CYCLES;
    use crate::trace::{BusOp, TraceEvent};
    use crate::Cpu;

    #[test]
    fn indexed_read_pays_page_cross_surcharge() {
        // LDX #$FF ; LDA $12F0,X
        let (mut cpu, mut memory) = boot(&[0xA2, 0xFF, 0xBD, 0xF0, 0x12]);
        memory.write_byte(0x13EF, 0x5A);
        run_one(&mut cpu, &mut memory);
        assert_eq!(run_one(&mut cpu, &mut memory), 5);
        assert_eq!(cpu.a(), 0x5A);
    }

    #[test]
    fn page_cross_surcharge_can_be_disabled() {
        let mut memory = Memory::from_image(ORIGIN, &[0xA2, 0xFF, 0xBD, 0xF0, 0x12]);
        memory.set_reset_vector(ORIGIN);
        let mut cpu = Cpu::with_config(CoreConfig {
            page_cross_penalty: false,
            ..CoreConfig::default()
        });
        cpu.reset(&mut memory);
        run_one(&mut cpu, &mut memory);
        assert_eq!(run_one(&mut cpu, &mut memory), 4);
    }

    #[test]
    fn indexed_store_never_pays_surcharge() {
        // LDX #$FF ; STA $12F0,X
        let (mut cpu, mut memory) = boot(&[0xA2, 0xFF, 0x9D, 0xF0, 0x12]);
        run_one(&mut cpu, &mut memory);
        assert_eq!(run_one(&mut cpu, &mut memory), 5);
    }

    #[test]
    fn instruction_accesses_share_the_fetch_cycle() {
        // STA $0200
        let (mut cpu, mut memory) = boot(&[0x8D, 0x00, 0x02]);
        let fetch_cycle = cpu.total_cycles();
        let monitor = run_traced(&mut cpu, &mut memory);

        let traffic: Vec<(u16, BusOp)> = monitor
            .activity()
            .iter()
            .map(|entry| (entry.address, entry.operation))
            .collect();
        assert_eq!(
            traffic,
            vec![
                (ORIGIN, BusOp::Read),
                (ORIGIN + 1, BusOp::Read),
                (ORIGIN + 2, BusOp::Read),
                (0x0200, BusOp::Write),
            ]
        );
        assert!(monitor.activity().iter().all(|e| e.cycle == fetch_cycle));
    }

    #[test]
    fn unknown_mnemonic_is_reported_as_not_implemented() {
        let table = OpcodeTable::from_records(&[OpcodeRecord {
            opcode: 0xA7,
            mnemonic: "LAX".to_owned(),
            addressing_mode: "Zero Page".to_owned(),
            bytes: 2,
            cycles: 3,
        }])
        .expect("valid table");
        let table: &'static OpcodeTable = Box::leak(Box::new(table));

        let mut memory = Memory::from_image(ORIGIN, &[0xA7, 0x10]);
        memory.set_reset_vector(ORIGIN);
        let mut cpu = Cpu::with_table(CoreConfig::default(), table);
        cpu.reset(&mut memory);

        let mut events = Vec::new();
        let result = cpu.step_traced(&mut memory, &mut events);
        assert_eq!(
            result,
            Err(Fault::InstructionNotImplemented {
                mnemonic: "LAX".to_owned(),
                opcode: 0xA7,
                pc: ORIGIN,
            })
        );
        assert!(events.contains(&TraceEvent::FaultRaised {
            pc: ORIGIN,
            opcode: 0xA7
        }));
    }

    #[test]
    fn largest_accepted_base_cost_takes_both_branch_surcharges() {
        let table = OpcodeTable::from_records(&[OpcodeRecord {
            opcode: 0xD0,
            mnemonic: "BNE".to_owned(),
            addressing_mode: "Relative".to_owned(),
            bytes: 2,
            cycles: MAX_BASE_CYCLES,
        }])
        .expect("valid table");
        let table: &'static OpcodeTable = Box::leak(Box::new(table));

        // BNE +$7F from $06F0 lands on the next page.
        let mut memory = Memory::from_image(0x06F0, &[0xD0, 0x7F]);
        memory.set_reset_vector(0x06F0);
        let mut cpu = Cpu::with_table(CoreConfig::default(), table);
        cpu.reset(&mut memory);

        assert_eq!(cpu.execute_instruction(&mut memory), Ok(u32::from(u8::MAX)));
        assert_eq!(cpu.pc(), 0x0771);
    }

    #[test]
    fn retired_event_reports_total_cost() {
        // BNE +2 with Z clear: taken, same page.
        let (mut cpu, mut memory) = boot(&[0xD0, 0x02]);
        let mut events = Vec::new();
        cpu.execute_instruction_traced(&mut memory, &mut events)
            .expect("branch executes");
        assert_eq!(
            events.last(),
            Some(&TraceEvent::InstructionRetired {
                pc: ORIGIN,
                cycles: 3
            })
        );
    }
}
