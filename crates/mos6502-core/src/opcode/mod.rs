//! Opcode registry: mnemonics, addressing modes, and the byte-keyed table
//! the engine decodes against.

use std::borrow::Cow;
use std::fmt;
use std::sync::OnceLock;

use crate::fault::TableError;
use crate::timing::MAX_BASE_CYCLES;

mod builtin;
pub use builtin::BUILTIN_OPCODES;

/// Instruction mnemonics implemented by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[allow(missing_docs)]
pub enum Mnemonic {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
}

impl Mnemonic {
    /// Every mnemonic in alphabetical order.
    pub const ALL: [Self; 56] = [
        Self::Adc,
        Self::And,
        Self::Asl,
        Self::Bcc,
        Self::Bcs,
        Self::Beq,
        Self::Bit,
        Self::Bmi,
        Self::Bne,
        Self::Bpl,
        Self::Brk,
        Self::Bvc,
        Self::Bvs,
        Self::Clc,
        Self::Cld,
        Self::Cli,
        Self::Clv,
        Self::Cmp,
        Self::Cpx,
        Self::Cpy,
        Self::Dec,
        Self::Dex,
        Self::Dey,
        Self::Eor,
        Self::Inc,
        Self::Inx,
        Self::Iny,
        Self::Jmp,
        Self::Jsr,
        Self::Lda,
        Self::Ldx,
        Self::Ldy,
        Self::Lsr,
        Self::Nop,
        Self::Ora,
        Self::Pha,
        Self::Php,
        Self::Pla,
        Self::Plp,
        Self::Rol,
        Self::Ror,
        Self::Rti,
        Self::Rts,
        Self::Sbc,
        Self::Sec,
        Self::Sed,
        Self::Sei,
        Self::Sta,
        Self::Stx,
        Self::Sty,
        Self::Tax,
        Self::Tay,
        Self::Tsx,
        Self::Txa,
        Self::Txs,
        Self::Tya,
    ];

    /// Upper-case assembler spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Adc => "ADC",
            Self::And => "AND",
            Self::Asl => "ASL",
            Self::Bcc => "BCC",
            Self::Bcs => "BCS",
            Self::Beq => "BEQ",
            Self::Bit => "BIT",
            Self::Bmi => "BMI",
            Self::Bne => "BNE",
            Self::Bpl => "BPL",
            Self::Brk => "BRK",
            Self::Bvc => "BVC",
            Self::Bvs => "BVS",
            Self::Clc => "CLC",
            Self::Cld => "CLD",
            Self::Cli => "CLI",
            Self::Clv => "CLV",
            Self::Cmp => "CMP",
            Self::Cpx => "CPX",
            Self::Cpy => "CPY",
            Self::Dec => "DEC",
            Self::Dex => "DEX",
            Self::Dey => "DEY",
            Self::Eor => "EOR",
            Self::Inc => "INC",
            Self::Inx => "INX",
            Self::Iny => "INY",
            Self::Jmp => "JMP",
            Self::Jsr => "JSR",
            Self::Lda => "LDA",
            Self::Ldx => "LDX",
            Self::Ldy => "LDY",
            Self::Lsr => "LSR",
            Self::Nop => "NOP",
            Self::Ora => "ORA",
            Self::Pha => "PHA",
            Self::Php => "PHP",
            Self::Pla => "PLA",
            Self::Plp => "PLP",
            Self::Rol => "ROL",
            Self::Ror => "ROR",
            Self::Rti => "RTI",
            Self::Rts => "RTS",
            Self::Sbc => "SBC",
            Self::Sec => "SEC",
            Self::Sed => "SED",
            Self::Sei => "SEI",
            Self::Sta => "STA",
            Self::Stx => "STX",
            Self::Sty => "STY",
            Self::Tax => "TAX",
            Self::Tay => "TAY",
            Self::Tsx => "TSX",
            Self::Txa => "TXA",
            Self::Txs => "TXS",
            Self::Tya => "TYA",
        }
    }

    /// Parses an assembler spelling, ignoring ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|mnemonic| mnemonic.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operand addressing modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum AddressingMode {
    /// `#$nn`: the operand byte itself.
    Immediate,
    /// `$nn`.
    ZeroPage,
    /// `$nn,X`, wrapping inside page zero.
    ZeroPageX,
    /// `$nn,Y`, wrapping inside page zero.
    ZeroPageY,
    /// `$nnnn`.
    Absolute,
    /// `$nnnn,X`.
    AbsoluteX,
    /// `$nnnn,Y`.
    AbsoluteY,
    /// `($nnnn)`, JMP only.
    Indirect,
    /// `($nn,X)`.
    IndexedIndirect,
    /// `($nn),Y`.
    IndirectIndexed,
    /// Signed branch displacement.
    Relative,
    /// No operand.
    Implied,
    /// Operates on `A`.
    Accumulator,
}

impl AddressingMode {
    /// Every addressing mode.
    pub const ALL: [Self; 13] = [
        Self::Immediate,
        Self::ZeroPage,
        Self::ZeroPageX,
        Self::ZeroPageY,
        Self::Absolute,
        Self::AbsoluteX,
        Self::AbsoluteY,
        Self::Indirect,
        Self::IndexedIndirect,
        Self::IndirectIndexed,
        Self::Relative,
        Self::Implied,
        Self::Accumulator,
    ];

    /// Operand bytes following the opcode.
    #[must_use]
    pub const fn operand_bytes(self) -> u8 {
        match self {
            Self::Implied | Self::Accumulator => 0,
            Self::Immediate
            | Self::ZeroPage
            | Self::ZeroPageX
            | Self::ZeroPageY
            | Self::IndexedIndirect
            | Self::IndirectIndexed
            | Self::Relative => 1,
            Self::Absolute | Self::AbsoluteX | Self::AbsoluteY | Self::Indirect => 2,
        }
    }

    /// Full instruction length including the opcode byte.
    #[must_use]
    pub const fn instruction_len(self) -> u8 {
        1 + self.operand_bytes()
    }

    /// Mode name as used in external opcode records.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Immediate => "Immediate",
            Self::ZeroPage => "Zero Page",
            Self::ZeroPageX => "X-Indexed Zero Page",
            Self::ZeroPageY => "Y-Indexed Zero Page",
            Self::Absolute => "Absolute",
            Self::AbsoluteX => "X-Indexed Absolute",
            Self::AbsoluteY => "Y-Indexed Absolute",
            Self::Indirect => "Absolute Indirect",
            Self::IndexedIndirect => "X-Indexed Zero Page Indirect",
            Self::IndirectIndexed => "Zero Page Indirect Y-Indexed",
            Self::Relative => "Relative",
            Self::Implied => "Implied",
            Self::Accumulator => "Accumulator",
        }
    }

    /// Parses a record mode name, trimming surrounding whitespace.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|mode| mode.name() == name)
    }
}

impl fmt::Display for AddressingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// External opcode record, as loaded from a static opcode source.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct OpcodeRecord {
    /// Opcode byte.
    pub opcode: u8,
    /// Mnemonic text.
    pub mnemonic: String,
    /// Textual addressing-mode name (see [`AddressingMode::name`]).
    #[cfg_attr(feature = "serde", serde(rename = "addressing mode"))]
    pub addressing_mode: String,
    /// Instruction length in bytes.
    pub bytes: u8,
    /// Base cycle cost.
    pub cycles: u8,
}

/// Decoded, immutable opcode table entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpcodeEntry {
    /// Opcode byte.
    pub opcode: u8,
    /// Mnemonic text as registered.
    pub name: Cow<'static, str>,
    /// Handler-family mnemonic, or `None` when no handler recognizes `name`.
    pub mnemonic: Option<Mnemonic>,
    /// Addressing mode.
    pub mode: AddressingMode,
    /// Instruction length in bytes.
    pub bytes: u8,
    /// Base cycle cost.
    pub cycles: u8,
}

/// Byte-keyed opcode lookup table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpcodeTable {
    slots: Box<[Option<OpcodeEntry>]>,
    len: usize,
}

static BUILTIN_TABLE: OnceLock<OpcodeTable> = OnceLock::new();

impl OpcodeTable {
    /// Process-wide table of all documented NMOS opcodes, built on first use.
    #[must_use]
    pub fn builtin() -> &'static Self {
        BUILTIN_TABLE.get_or_init(Self::from_builtin_rows)
    }

    fn empty() -> Self {
        Self {
            slots: vec![None; 256].into_boxed_slice(),
            len: 0,
        }
    }

    fn from_builtin_rows() -> Self {
        let mut table = Self::empty();
        for &(opcode, mnemonic, mode, bytes, cycles) in BUILTIN_OPCODES {
            table.slots[usize::from(opcode)] = Some(OpcodeEntry {
                opcode,
                name: Cow::Borrowed(mnemonic.as_str()),
                mnemonic: Some(mnemonic),
                mode,
                bytes,
                cycles,
            });
            table.len += 1;
        }
        table
    }

    /// Builds a table from external records.
    ///
    /// Unknown mnemonics are accepted; executing one raises
    /// `Fault::InstructionNotImplemented`.
    ///
    /// # Errors
    ///
    /// Returns a [`TableError`] for duplicate opcodes, unknown mode names,
    /// lengths that disagree with the mode, and zero or oversized cycle costs.
    pub fn from_records(records: &[OpcodeRecord]) -> Result<Self, TableError> {
        let mut table = Self::empty();
        for record in records {
            let slot = &mut table.slots[usize::from(record.opcode)];
            if slot.is_some() {
                return Err(TableError::DuplicateOpcode(record.opcode));
            }

            let mode = AddressingMode::from_name(&record.addressing_mode).ok_or_else(|| {
                TableError::UnknownAddressingMode {
                    opcode: record.opcode,
                    mode: record.addressing_mode.clone(),
                }
            })?;
            if record.bytes != mode.instruction_len() {
                return Err(TableError::LengthMismatch {
                    opcode: record.opcode,
                    bytes: record.bytes,
                    expected: mode.instruction_len(),
                });
            }
            if record.cycles == 0 {
                return Err(TableError::ZeroCycles(record.opcode));
            }
            if record.cycles > MAX_BASE_CYCLES {
                return Err(TableError::ExcessiveCycles {
                    opcode: record.opcode,
                    cycles: record.cycles,
                    max: MAX_BASE_CYCLES,
                });
            }

            *slot = Some(OpcodeEntry {
                opcode: record.opcode,
                name: Cow::Owned(record.mnemonic.trim().to_ascii_uppercase()),
                mnemonic: Mnemonic::from_name(record.mnemonic.trim()),
                mode,
                bytes: record.bytes,
                cycles: record.cycles,
            });
            table.len += 1;
        }
        Ok(table)
    }

    /// Entry registered for `opcode`, if any.
    #[must_use]
    pub fn lookup(&self, opcode: u8) -> Option<&OpcodeEntry> {
        self.slots[usize::from(opcode)].as_ref()
    }

    /// Entry for a mnemonic/mode pair, if any.
    #[must_use]
    pub fn find(&self, mnemonic: Mnemonic, mode: AddressingMode) -> Option<&OpcodeEntry> {
        self.iter()
            .find(|entry| entry.mnemonic == Some(mnemonic) && entry.mode == mode)
    }

    /// All entries for `mnemonic`, in opcode order.
    pub fn by_mnemonic(&self, mnemonic: Mnemonic) -> impl Iterator<Item = &OpcodeEntry> + '_ {
        self.iter()
            .filter(move |entry| entry.mnemonic == Some(mnemonic))
    }

    /// All entries in opcode order.
    pub fn iter(&self) -> impl Iterator<Item = &OpcodeEntry> + '_ {
        self.slots.iter().filter_map(Option::as_ref)
    }

    /// Number of registered opcodes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when no opcode is registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rstest::rstest;

    use super::{AddressingMode, Mnemonic, OpcodeRecord, OpcodeTable, BUILTIN_OPCODES};
    use crate::fault::TableError;

    fn record(opcode: u8, mnemonic: &str, mode: &str, bytes: u8, cycles: u8) -> OpcodeRecord {
        OpcodeRecord {
            opcode,
            mnemonic: mnemonic.to_owned(),
            addressing_mode: mode.to_owned(),
            bytes,
            cycles,
        }
    }

    #[test]
    fn builtin_table_covers_documented_opcodes() {
        let table = OpcodeTable::builtin();
        assert_eq!(table.len(), 151);
        assert_eq!(table.len(), BUILTIN_OPCODES.len());
        assert!(!table.is_empty());
        assert!(std::ptr::eq(table, OpcodeTable::builtin()));
    }

    #[test]
    fn every_mnemonic_has_at_least_one_opcode() {
        let table = OpcodeTable::builtin();
        let covered: HashSet<_> = table.iter().filter_map(|entry| entry.mnemonic).collect();
        assert_eq!(covered.len(), Mnemonic::ALL.len());
    }

    #[rstest]
    #[case(0xA9, Mnemonic::Lda, AddressingMode::Immediate, 2, 2)]
    #[case(0x6C, Mnemonic::Jmp, AddressingMode::Indirect, 3, 5)]
    #[case(0x91, Mnemonic::Sta, AddressingMode::IndirectIndexed, 2, 6)]
    #[case(0x0A, Mnemonic::Asl, AddressingMode::Accumulator, 1, 2)]
    #[case(0x00, Mnemonic::Brk, AddressingMode::Implied, 1, 7)]
    #[case(0xB6, Mnemonic::Ldx, AddressingMode::ZeroPageY, 2, 4)]
    fn lookup_returns_expected_entry(
        #[case] opcode: u8,
        #[case] mnemonic: Mnemonic,
        #[case] mode: AddressingMode,
        #[case] bytes: u8,
        #[case] cycles: u8,
    ) {
        let entry = OpcodeTable::builtin().lookup(opcode).expect("entry present");
        assert_eq!(entry.mnemonic, Some(mnemonic));
        assert_eq!(entry.name, mnemonic.as_str());
        assert_eq!(entry.mode, mode);
        assert_eq!(entry.bytes, bytes);
        assert_eq!(entry.cycles, cycles);
    }

    #[rstest]
    #[case(0x02)]
    #[case(0x1A)]
    #[case(0xFF)]
    fn undocumented_opcodes_are_absent(#[case] opcode: u8) {
        assert!(OpcodeTable::builtin().lookup(opcode).is_none());
    }

    #[test]
    fn find_and_by_mnemonic_search_the_table() {
        let table = OpcodeTable::builtin();
        let entry = table
            .find(Mnemonic::Ldy, AddressingMode::AbsoluteX)
            .expect("LDY abs,X");
        assert_eq!(entry.opcode, 0xBC);
        assert!(table.find(Mnemonic::Sta, AddressingMode::Immediate).is_none());

        let jmp: Vec<u8> = table.by_mnemonic(Mnemonic::Jmp).map(|e| e.opcode).collect();
        assert_eq!(jmp, vec![0x4C, 0x6C]);
        assert_eq!(table.by_mnemonic(Mnemonic::Lda).count(), 8);
    }

    #[test]
    fn mode_names_roundtrip_through_parser() {
        for mode in AddressingMode::ALL {
            assert_eq!(AddressingMode::from_name(mode.name()), Some(mode));
        }
        assert_eq!(AddressingMode::from_name("Indirect Sideways"), None);
    }

    #[test]
    fn mnemonic_parse_ignores_case() {
        assert_eq!(Mnemonic::from_name("lda"), Some(Mnemonic::Lda));
        assert_eq!(Mnemonic::from_name("TyA"), Some(Mnemonic::Tya));
        assert_eq!(Mnemonic::from_name("LAX"), None);
        assert_eq!(Mnemonic::Sbc.to_string(), "SBC");
    }

    #[test]
    fn records_build_a_table_and_keep_unknown_mnemonics() {
        let table = OpcodeTable::from_records(&[
            record(0xA9, "LDA", "Immediate", 2, 2),
            record(0xA7, "lax", "Zero Page", 2, 3),
        ])
        .expect("valid records");

        assert_eq!(table.len(), 2);
        assert_eq!(
            table.lookup(0xA9).and_then(|e| e.mnemonic),
            Some(Mnemonic::Lda)
        );
        let lax = table.lookup(0xA7).expect("LAX kept");
        assert_eq!(lax.mnemonic, None);
        assert_eq!(lax.name, "LAX");
    }

    #[test]
    fn records_reject_duplicate_opcodes() {
        let result = OpcodeTable::from_records(&[
            record(0xEA, "NOP", "Implied", 1, 2),
            record(0xEA, "NOP", "Implied", 1, 2),
        ]);
        assert_eq!(result, Err(TableError::DuplicateOpcode(0xEA)));
    }

    #[rstest]
    #[case(
        record(0xEA, "NOP", "Sideways", 1, 2),
        TableError::UnknownAddressingMode { opcode: 0xEA, mode: "Sideways".to_owned() }
    )]
    #[case(
        record(0xAD, "LDA", "Absolute", 2, 4),
        TableError::LengthMismatch { opcode: 0xAD, bytes: 2, expected: 3 }
    )]
    #[case(record(0xE8, "INX", "Implied", 1, 0), TableError::ZeroCycles(0xE8))]
    #[case(
        record(0xD0, "BNE", "Relative", 2, 255),
        TableError::ExcessiveCycles { opcode: 0xD0, cycles: 255, max: 253 }
    )]
    #[case(
        record(0xBD, "LDA", "X-Indexed Absolute", 3, 254),
        TableError::ExcessiveCycles { opcode: 0xBD, cycles: 254, max: 253 }
    )]
    fn records_reject_malformed_entries(#[case] bad: OpcodeRecord, #[case] expected: TableError) {
        assert_eq!(OpcodeTable::from_records(&[bad]), Err(expected));
    }
}
