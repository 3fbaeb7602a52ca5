use super::{AddressingMode as Mode, Mnemonic as Op};

/// Documented NMOS 6502 opcodes as `(opcode, mnemonic, mode, bytes, cycles)`.
///
/// `cycles` is the base cost; page-cross and branch surcharges are added by
/// the handlers.
pub const BUILTIN_OPCODES: &[(u8, Op, Mode, u8, u8)] = &[
    // ADC
    (0x69, Op::Adc, Mode::Immediate, 2, 2),
    (0x65, Op::Adc, Mode::ZeroPage, 2, 3),
    (0x75, Op::Adc, Mode::ZeroPageX, 2, 4),
    (0x6D, Op::Adc, Mode::Absolute, 3, 4),
    (0x7D, Op::Adc, Mode::AbsoluteX, 3, 4),
    (0x79, Op::Adc, Mode::AbsoluteY, 3, 4),
    (0x61, Op::Adc, Mode::IndexedIndirect, 2, 6),
    (0x71, Op::Adc, Mode::IndirectIndexed, 2, 5),
    // AND
    (0x29, Op::And, Mode::Immediate, 2, 2),
    (0x25, Op::And, Mode::ZeroPage, 2, 3),
    (0x35, Op::And, Mode::ZeroPageX, 2, 4),
    (0x2D, Op::And, Mode::Absolute, 3, 4),
    (0x3D, Op::And, Mode::AbsoluteX, 3, 4),
    (0x39, Op::And, Mode::AbsoluteY, 3, 4),
    (0x21, Op::And, Mode::IndexedIndirect, 2, 6),
    (0x31, Op::And, Mode::IndirectIndexed, 2, 5),
    // ASL
    (0x0A, Op::Asl, Mode::Accumulator, 1, 2),
    (0x06, Op::Asl, Mode::ZeroPage, 2, 5),
    (0x16, Op::Asl, Mode::ZeroPageX, 2, 6),
    (0x0E, Op::Asl, Mode::Absolute, 3, 6),
    (0x1E, Op::Asl, Mode::AbsoluteX, 3, 7),
    // Branches
    (0x10, Op::Bpl, Mode::Relative, 2, 2),
    (0x30, Op::Bmi, Mode::Relative, 2, 2),
    (0x50, Op::Bvc, Mode::Relative, 2, 2),
    (0x70, Op::Bvs, Mode::Relative, 2, 2),
    (0x90, Op::Bcc, Mode::Relative, 2, 2),
    (0xB0, Op::Bcs, Mode::Relative, 2, 2),
    (0xD0, Op::Bne, Mode::Relative, 2, 2),
    (0xF0, Op::Beq, Mode::Relative, 2, 2),
    // BIT
    (0x24, Op::Bit, Mode::ZeroPage, 2, 3),
    (0x2C, Op::Bit, Mode::Absolute, 3, 4),
    // BRK
    (0x00, Op::Brk, Mode::Implied, 1, 7),
    // Flag clears
    (0x18, Op::Clc, Mode::Implied, 1, 2),
    (0xD8, Op::Cld, Mode::Implied, 1, 2),
    (0x58, Op::Cli, Mode::Implied, 1, 2),
    (0xB8, Op::Clv, Mode::Implied, 1, 2),
    // CMP
    (0xC9, Op::Cmp, Mode::Immediate, 2, 2),
    (0xC5, Op::Cmp, Mode::ZeroPage, 2, 3),
    (0xD5, Op::Cmp, Mode::ZeroPageX, 2, 4),
    (0xCD, Op::Cmp, Mode::Absolute, 3, 4),
    (0xDD, Op::Cmp, Mode::AbsoluteX, 3, 4),
    (0xD9, Op::Cmp, Mode::AbsoluteY, 3, 4),
    (0xC1, Op::Cmp, Mode::IndexedIndirect, 2, 6),
    (0xD1, Op::Cmp, Mode::IndirectIndexed, 2, 5),
    // CPX / CPY
    (0xE0, Op::Cpx, Mode::Immediate, 2, 2),
    (0xE4, Op::Cpx, Mode::ZeroPage, 2, 3),
    (0xEC, Op::Cpx, Mode::Absolute, 3, 4),
    (0xC0, Op::Cpy, Mode::Immediate, 2, 2),
    (0xC4, Op::Cpy, Mode::ZeroPage, 2, 3),
    (0xCC, Op::Cpy, Mode::Absolute, 3, 4),
    // DEC / DEX / DEY
    (0xC6, Op::Dec, Mode::ZeroPage, 2, 5),
    (0xD6, Op::Dec, Mode::ZeroPageX, 2, 6),
    (0xCE, Op::Dec, Mode::Absolute, 3, 6),
    (0xDE, Op::Dec, Mode::AbsoluteX, 3, 7),
    (0xCA, Op::Dex, Mode::Implied, 1, 2),
    (0x88, Op::Dey, Mode::Implied, 1, 2),
    // EOR
    (0x49, Op::Eor, Mode::Immediate, 2, 2),
    (0x45, Op::Eor, Mode::ZeroPage, 2, 3),
    (0x55, Op::Eor, Mode::ZeroPageX, 2, 4),
    (0x4D, Op::Eor, Mode::Absolute, 3, 4),
    (0x5D, Op::Eor, Mode::AbsoluteX, 3, 4),
    (0x59, Op::Eor, Mode::AbsoluteY, 3, 4),
    (0x41, Op::Eor, Mode::IndexedIndirect, 2, 6),
    (0x51, Op::Eor, Mode::IndirectIndexed, 2, 5),
    // INC / INX / INY
    (0xE6, Op::Inc, Mode::ZeroPage, 2, 5),
    (0xF6, Op::Inc, Mode::ZeroPageX, 2, 6),
    (0xEE, Op::Inc, Mode::Absolute, 3, 6),
    (0xFE, Op::Inc, Mode::AbsoluteX, 3, 7),
    (0xE8, Op::Inx, Mode::Implied, 1, 2),
    (0xC8, Op::Iny, Mode::Implied, 1, 2),
    // JMP / JSR
    (0x4C, Op::Jmp, Mode::Absolute, 3, 3),
    (0x6C, Op::Jmp, Mode::Indirect, 3, 5),
    (0x20, Op::Jsr, Mode::Absolute, 3, 6),
    // LDA
    (0xA9, Op::Lda, Mode::Immediate, 2, 2),
    (0xA5, Op::Lda, Mode::ZeroPage, 2, 3),
    (0xB5, Op::Lda, Mode::ZeroPageX, 2, 4),
    (0xAD, Op::Lda, Mode::Absolute, 3, 4),
    (0xBD, Op::Lda, Mode::AbsoluteX, 3, 4),
    (0xB9, Op::Lda, Mode::AbsoluteY, 3, 4),
    (0xA1, Op::Lda, Mode::IndexedIndirect, 2, 6),
    (0xB1, Op::Lda, Mode::IndirectIndexed, 2, 5),
    // LDX
    (0xA2, Op::Ldx, Mode::Immediate, 2, 2),
    (0xA6, Op::Ldx, Mode::ZeroPage, 2, 3),
    (0xB6, Op::Ldx, Mode::ZeroPageY, 2, 4),
    (0xAE, Op::Ldx, Mode::Absolute, 3, 4),
    (0xBE, Op::Ldx, Mode::AbsoluteY, 3, 4),
    // LDY
    (0xA0, Op::Ldy, Mode::Immediate, 2, 2),
    (0xA4, Op::Ldy, Mode::ZeroPage, 2, 3),
    (0xB4, Op::Ldy, Mode::ZeroPageX, 2, 4),
    (0xAC, Op::Ldy, Mode::Absolute, 3, 4),
    (0xBC, Op::Ldy, Mode::AbsoluteX, 3, 4),
    // LSR
    (0x4A, Op::Lsr, Mode::Accumulator, 1, 2),
    (0x46, Op::Lsr, Mode::ZeroPage, 2, 5),
    (0x56, Op::Lsr, Mode::ZeroPageX, 2, 6),
    (0x4E, Op::Lsr, Mode::Absolute, 3, 6),
    (0x5E, Op::Lsr, Mode::AbsoluteX, 3, 7),
    // NOP
    (0xEA, Op::Nop, Mode::Implied, 1, 2),
    // ORA
    (0x09, Op::Ora, Mode::Immediate, 2, 2),
    (0x05, Op::Ora, Mode::ZeroPage, 2, 3),
    (0x15, Op::Ora, Mode::ZeroPageX, 2, 4),
    (0x0D, Op::Ora, Mode::Absolute, 3, 4),
    (0x1D, Op::Ora, Mode::AbsoluteX, 3, 4),
    (0x19, Op::Ora, Mode::AbsoluteY, 3, 4),
    (0x01, Op::Ora, Mode::IndexedIndirect, 2, 6),
    (0x11, Op::Ora, Mode::IndirectIndexed, 2, 5),
    // Stack
    (0x48, Op::Pha, Mode::Implied, 1, 3),
    (0x08, Op::Php, Mode::Implied, 1, 3),
    (0x68, Op::Pla, Mode::Implied, 1, 4),
    (0x28, Op::Plp, Mode::Implied, 1, 4),
    // ROL
    (0x2A, Op::Rol, Mode::Accumulator, 1, 2),
    (0x26, Op::Rol, Mode::ZeroPage, 2, 5),
    (0x36, Op::Rol, Mode::ZeroPageX, 2, 6),
    (0x2E, Op::Rol, Mode::Absolute, 3, 6),
    (0x3E, Op::Rol, Mode::AbsoluteX, 3, 7),
    // ROR
    (0x6A, Op::Ror, Mode::Accumulator, 1, 2),
    (0x66, Op::Ror, Mode::ZeroPage, 2, 5),
    (0x76, Op::Ror, Mode::ZeroPageX, 2, 6),
    (0x6E, Op::Ror, Mode::Absolute, 3, 6),
    (0x7E, Op::Ror, Mode::AbsoluteX, 3, 7),
    // Returns
    (0x40, Op::Rti, Mode::Implied, 1, 6),
    (0x60, Op::Rts, Mode::Implied, 1, 6),
    // SBC
    (0xE9, Op::Sbc, Mode::Immediate, 2, 2),
    (0xE5, Op::Sbc, Mode::ZeroPage, 2, 3),
    (0xF5, Op::Sbc, Mode::ZeroPageX, 2, 4),
    (0xED, Op::Sbc, Mode::Absolute, 3, 4),
    (0xFD, Op::Sbc, Mode::AbsoluteX, 3, 4),
    (0xF9, Op::Sbc, Mode::AbsoluteY, 3, 4),
    (0xE1, Op::Sbc, Mode::IndexedIndirect, 2, 6),
    (0xF1, Op::Sbc, Mode::IndirectIndexed, 2, 5),
    // Flag sets
    (0x38, Op::Sec, Mode::Implied, 1, 2),
    (0xF8, Op::Sed, Mode::Implied, 1, 2),
    (0x78, Op::Sei, Mode::Implied, 1, 2),
    // STA
    (0x85, Op::Sta, Mode::ZeroPage, 2, 3),
    (0x95, Op::Sta, Mode::ZeroPageX, 2, 4),
    (0x8D, Op::Sta, Mode::Absolute, 3, 4),
    (0x9D, Op::Sta, Mode::AbsoluteX, 3, 5),
    (0x99, Op::Sta, Mode::AbsoluteY, 3, 5),
    (0x81, Op::Sta, Mode::IndexedIndirect, 2, 6),
    (0x91, Op::Sta, Mode::IndirectIndexed, 2, 6),
    // STX / STY
    (0x86, Op::Stx, Mode::ZeroPage, 2, 3),
    (0x96, Op::Stx, Mode::ZeroPageY, 2, 4),
    (0x8E, Op::Stx, Mode::Absolute, 3, 4),
    (0x84, Op::Sty, Mode::ZeroPage, 2, 3),
    (0x94, Op::Sty, Mode::ZeroPageX, 2, 4),
    (0x8C, Op::Sty, Mode::Absolute, 3, 4),
    // Transfers
    (0xAA, Op::Tax, Mode::Implied, 1, 2),
    (0xA8, Op::Tay, Mode::Implied, 1, 2),
    (0xBA, Op::Tsx, Mode::Implied, 1, 2),
    (0x8A, Op::Txa, Mode::Implied, 1, 2),
    (0x9A, Op::Txs, Mode::Implied, 1, 2),
    (0x98, Op::Tya, Mode::Implied, 1, 2),
];

const _: () = assert_builtin_table_layout();

const fn assert_builtin_table_layout() {
    let mut index = 0;
    while index < BUILTIN_OPCODES.len() {
        let (opcode, _, mode, bytes, cycles) = BUILTIN_OPCODES[index];
        assert!(
            bytes == mode.instruction_len(),
            "declared length must match addressing mode"
        );
        assert!(cycles > 0, "base cycle cost cannot be zero");

        let mut other = index + 1;
        while other < BUILTIN_OPCODES.len() {
            assert!(
                BUILTIN_OPCODES[other].0 != opcode,
                "opcode bytes must be unique"
            );
            other += 1;
        }

        index += 1;
    }
}
