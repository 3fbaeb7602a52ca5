use crate::opcode::AddressingMode;
use crate::timing::crosses_page;

use super::context::ExecContext;

/// Where an instruction's operand lives once its mode has been resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operand {
    /// Implied mode; there is nothing to dereference.
    None,
    /// The accumulator itself.
    Accumulator,
    /// A bus address (for Immediate, the operand byte's own address).
    Address(u16),
    /// Raw, not yet sign-extended branch displacement.
    Relative(u8),
}

/// Result of addressing-mode resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EffectiveAddress {
    /// Resolved operand location.
    pub operand: Operand,
    /// `true` when indexing moved the address onto another page.
    pub page_crossed: bool,
}

impl EffectiveAddress {
    const fn at(addr: u16) -> Self {
        Self {
            operand: Operand::Address(addr),
            page_crossed: false,
        }
    }

    fn indexed(base: u16, index: u8) -> Self {
        let addr = base.wrapping_add(u16::from(index));
        Self {
            operand: Operand::Address(addr),
            page_crossed: crosses_page(base, addr),
        }
    }

    /// Resolved bus address, if the operand has one.
    #[must_use]
    pub const fn address(&self) -> Option<u16> {
        match self.operand {
            Operand::Address(addr) => Some(addr),
            _ => None,
        }
    }
}

impl ExecContext<'_> {
    /// Consumes operand bytes at `PC` and computes the effective address.
    pub(crate) fn resolve(&mut self, mode: AddressingMode) -> EffectiveAddress {
        let x = self.cpu.registers.x();
        let y = self.cpu.registers.y();
        match mode {
            AddressingMode::Immediate => EffectiveAddress::at(self.cpu.registers.take_pc()),
            AddressingMode::ZeroPage => EffectiveAddress::at(u16::from(self.fetch_byte())),
            AddressingMode::ZeroPageX => {
                EffectiveAddress::at(u16::from(self.fetch_byte().wrapping_add(x)))
            }
            AddressingMode::ZeroPageY => {
                EffectiveAddress::at(u16::from(self.fetch_byte().wrapping_add(y)))
            }
            AddressingMode::Absolute => EffectiveAddress::at(self.fetch_word()),
            AddressingMode::AbsoluteX => {
                let base = self.fetch_word();
                EffectiveAddress::indexed(base, x)
            }
            AddressingMode::AbsoluteY => {
                let base = self.fetch_word();
                EffectiveAddress::indexed(base, y)
            }
            AddressingMode::Indirect => {
                let pointer = self.fetch_word();
                // NMOS bug: the high byte never carries into the next page.
                let hi_addr = (pointer & 0xFF00) | (pointer.wrapping_add(1) & 0x00FF);
                let lo = self.read(pointer);
                let hi = self.read(hi_addr);
                EffectiveAddress::at(u16::from_le_bytes([lo, hi]))
            }
            AddressingMode::IndexedIndirect => {
                let pointer = self.fetch_byte().wrapping_add(x);
                EffectiveAddress::at(self.read_zero_page_word(pointer))
            }
            AddressingMode::IndirectIndexed => {
                let pointer = self.fetch_byte();
                let base = self.read_zero_page_word(pointer);
                EffectiveAddress::indexed(base, y)
            }
            AddressingMode::Relative => EffectiveAddress {
                operand: Operand::Relative(self.fetch_byte()),
                page_crossed: false,
            },
            AddressingMode::Implied => EffectiveAddress {
                operand: Operand::None,
                page_crossed: false,
            },
            AddressingMode::Accumulator => EffectiveAddress {
                operand: Operand::Accumulator,
                page_crossed: false,
            },
        }
    }

    /// Word read whose high byte wraps inside page zero.
    fn read_zero_page_word(&mut self, pointer: u8) -> u16 {
        let lo = self.read(u16::from(pointer));
        let hi = self.read(u16::from(pointer.wrapping_add(1)));
        u16::from_le_bytes([lo, hi])
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{EffectiveAddress, Operand};
    use crate::memory::Memory;
    use crate::opcode::AddressingMode;
    use crate::Cpu;

    fn resolve_at(
        image: &[u8],
        x: u8,
        y: u8,
        mode: AddressingMode,
        memory_setup: impl FnOnce(&mut Memory),
    ) -> (EffectiveAddress, u16) {
        let mut memory = Memory::from_image(0x0400, image);
        memory_setup(&mut memory);
        let mut cpu = Cpu::new();
        cpu.set_pc(0x0400);
        cpu.set_x(x);
        cpu.set_y(y);
        let ea = cpu.resolve_operand(mode, &mut memory);
        (ea, cpu.pc())
    }

    #[rstest]
    #[case(AddressingMode::Immediate, &[0x44], Operand::Address(0x0400), 0x0401)]
    #[case(AddressingMode::ZeroPage, &[0x44], Operand::Address(0x0044), 0x0401)]
    #[case(AddressingMode::ZeroPageX, &[0xF0], Operand::Address(0x0000), 0x0401)]
    #[case(AddressingMode::ZeroPageY, &[0xF0], Operand::Address(0x0010), 0x0401)]
    #[case(AddressingMode::Absolute, &[0x34, 0x12], Operand::Address(0x1234), 0x0402)]
    #[case(AddressingMode::AbsoluteX, &[0x34, 0x12], Operand::Address(0x1244), 0x0402)]
    #[case(AddressingMode::AbsoluteY, &[0x34, 0x12], Operand::Address(0x1254), 0x0402)]
    #[case(AddressingMode::Relative, &[0xFE], Operand::Relative(0xFE), 0x0401)]
    #[case(AddressingMode::Implied, &[], Operand::None, 0x0400)]
    #[case(AddressingMode::Accumulator, &[], Operand::Accumulator, 0x0400)]
    fn direct_modes_consume_operand_bytes(
        #[case] mode: AddressingMode,
        #[case] image: &[u8],
        #[case] operand: Operand,
        #[case] pc_after: u16,
    ) {
        let (ea, pc) = resolve_at(image, 0x10, 0x20, mode, |_| {});
        assert_eq!(ea.operand, operand);
        assert_eq!(pc, pc_after);
    }

    #[test]
    fn absolute_indexed_reports_page_cross() {
        let (ea, _) = resolve_at(&[0xF0, 0x12], 0x20, 0, AddressingMode::AbsoluteX, |_| {});
        assert_eq!(ea.address(), Some(0x1310));
        assert!(ea.page_crossed);

        let (ea, _) = resolve_at(&[0x00, 0x12], 0x20, 0, AddressingMode::AbsoluteX, |_| {});
        assert!(!ea.page_crossed);
    }

    #[test]
    fn absolute_indexed_wraps_address_space() {
        let (ea, _) = resolve_at(&[0xFF, 0xFF], 0, 0x02, AddressingMode::AbsoluteY, |_| {});
        assert_eq!(ea.address(), Some(0x0001));
    }

    #[test]
    fn indexed_indirect_pointer_wraps_in_zero_page() {
        let (ea, pc) = resolve_at(&[0xFE], 0x01, 0, AddressingMode::IndexedIndirect, |m| {
            m.write_byte(0x00FF, 0x78);
            m.write_byte(0x0000, 0x56);
        });
        assert_eq!(ea.address(), Some(0x5678));
        assert_eq!(pc, 0x0401);
    }

    #[test]
    fn indirect_indexed_adds_y_after_pointer_read() {
        let (ea, _) = resolve_at(&[0x80], 0, 0x10, AddressingMode::IndirectIndexed, |m| {
            m.write_word(0x0080, 0x20F8);
        });
        assert_eq!(ea.address(), Some(0x2108));
        assert!(ea.page_crossed);
    }

    #[test]
    fn absolute_indirect_reproduces_page_boundary_bug() {
        let (ea, pc) = resolve_at(&[0xFF, 0x30], 0, 0, AddressingMode::Indirect, |m| {
            m.write_byte(0x30FF, 0x80);
            m.write_byte(0x3000, 0x40);
            m.write_byte(0x3100, 0x50);
        });
        assert_eq!(ea.address(), Some(0x4080));
        assert_eq!(pc, 0x0402);
    }

    #[test]
    fn absolute_indirect_reads_consecutive_bytes_off_boundary() {
        let (ea, _) = resolve_at(&[0x10, 0x30], 0, 0, AddressingMode::Indirect, |m| {
            m.write_word(0x3010, 0xC0DE);
        });
        assert_eq!(ea.address(), Some(0xC0DE));
    }
}
