//! Processor status register (`P`) and its named flag bits.

/// Named bits of the 6502 status register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StatusFlag {
    /// Carry / no-borrow (bit 0).
    Carry = 0,
    /// Zero result (bit 1).
    Zero = 1,
    /// Maskable interrupt disable (bit 2).
    InterruptDisable = 2,
    /// Decimal mode (bit 3). Declared only; arithmetic ignores it.
    Decimal = 3,
    /// Break marker, only meaningful in pushed copies (bit 4).
    Break = 4,
    /// Unused bit, logically always set (bit 5).
    Unused = 5,
    /// Signed overflow (bit 6).
    Overflow = 6,
    /// Negative result (bit 7).
    Negative = 7,
}

impl StatusFlag {
    /// All flags in bit order.
    pub const ALL: [Self; 8] = [
        Self::Carry,
        Self::Zero,
        Self::InterruptDisable,
        Self::Decimal,
        Self::Break,
        Self::Unused,
        Self::Overflow,
        Self::Negative,
    ];

    /// Returns the single-bit mask for this flag.
    #[must_use]
    pub const fn mask(self) -> u8 {
        1 << self as u8
    }
}

/// Value of the status register out of power-on (only `Unused` set).
pub const STATUS_POWER_ON: u8 = StatusFlag::Unused.mask();

/// Eight-bit flag container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct StatusRegister {
    bits: u8,
}

impl Default for StatusRegister {
    fn default() -> Self {
        Self {
            bits: STATUS_POWER_ON,
        }
    }
}

impl StatusRegister {
    /// Creates a status register holding exactly `bits`.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self { bits }
    }

    /// Returns `true` when `flag` is set.
    #[must_use]
    pub const fn get(&self, flag: StatusFlag) -> bool {
        self.bits & flag.mask() != 0
    }

    /// Sets or clears a single flag.
    pub const fn set(&mut self, flag: StatusFlag, enabled: bool) {
        if enabled {
            self.bits |= flag.mask();
        } else {
            self.bits &= !flag.mask();
        }
    }

    /// Returns the raw register byte.
    #[must_use]
    pub const fn bits(&self) -> u8 {
        self.bits
    }

    /// Installs a raw register byte verbatim.
    ///
    /// Bit 5 is not forced here; callers that need hardware-accurate images
    /// set [`StatusFlag::Unused`] themselves.
    pub const fn set_bits(&mut self, bits: u8) {
        self.bits = bits;
    }

    /// Updates `Zero` and `Negative` from a result byte.
    pub const fn set_zn(&mut self, value: u8) {
        self.set(StatusFlag::Zero, value == 0);
        self.set(StatusFlag::Negative, value & 0x80 != 0);
    }

    /// Copy of the register as pushed by `PHP`/`BRK` (Break forced set).
    #[must_use]
    pub const fn pushed(&self) -> u8 {
        self.bits | StatusFlag::Break.mask() | StatusFlag::Unused.mask()
    }

    /// Normalizes a pulled stack byte into a live status image.
    ///
    /// Break is cleared and Unused forced, as `PLP`/`RTI` do.
    #[must_use]
    pub const fn pulled(bits: u8) -> Self {
        Self::from_bits((bits & !StatusFlag::Break.mask()) | StatusFlag::Unused.mask())
    }
}

impl From<u8> for StatusRegister {
    fn from(bits: u8) -> Self {
        Self::from_bits(bits)
    }
}

impl From<StatusRegister> for u8 {
    fn from(status: StatusRegister) -> Self {
        status.bits()
    }
}
