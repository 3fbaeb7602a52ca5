/// Eight-bit data registers addressable by load/store/compare handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Register {
    A,
    X,
    Y,
}

/// Programmer-visible register file (everything except `P`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Registers {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    pc: u16,
}

impl Registers {
    /// Creates a register file with every register zeroed except `SP`.
    #[must_use]
    pub const fn with_sp(sp: u8) -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp,
            pc: 0,
        }
    }

    /// Reads a data register.
    #[must_use]
    pub const fn get(&self, reg: Register) -> u8 {
        match reg {
            Register::A => self.a,
            Register::X => self.x,
            Register::Y => self.y,
        }
    }

    /// Writes a data register.
    pub const fn set(&mut self, reg: Register, value: u8) {
        match reg {
            Register::A => self.a = value,
            Register::X => self.x = value,
            Register::Y => self.y = value,
        }
    }

    /// Reads the accumulator.
    #[must_use]
    pub const fn a(&self) -> u8 {
        self.a
    }

    /// Writes the accumulator.
    pub const fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    /// Reads the `X` index register.
    #[must_use]
    pub const fn x(&self) -> u8 {
        self.x
    }

    /// Writes the `X` index register.
    pub const fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    /// Reads the `Y` index register.
    #[must_use]
    pub const fn y(&self) -> u8 {
        self.y
    }

    /// Writes the `Y` index register.
    pub const fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    /// Reads the stack pointer (offset into page one).
    #[must_use]
    pub const fn sp(&self) -> u8 {
        self.sp
    }

    /// Writes the stack pointer.
    pub const fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    /// Reads the program counter.
    #[must_use]
    pub const fn pc(&self) -> u16 {
        self.pc
    }

    /// Writes the program counter.
    pub const fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    /// Returns `PC` and advances it by one, wrapping at `0xFFFF`.
    pub const fn take_pc(&mut self) -> u16 {
        let pc = self.pc;
        self.pc = pc.wrapping_add(1);
        pc
    }
}
