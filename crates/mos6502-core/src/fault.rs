use thiserror::Error;

/// Fault classes used by hosts when deciding how to recover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultClass {
    /// The fetched byte has no opcode table entry.
    Decode,
    /// The opcode decoded but no instruction handler accepted it.
    Dispatch,
    /// The engine was driven outside its lifecycle contract.
    Lifecycle,
}

/// Engine-level faults that abort the current `step`/`execute_instruction` call.
///
/// Faults never latch: the engine can be stepped again, reset, or have its
/// program counter moved by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum Fault {
    /// Fetched opcode byte has no entry in the opcode table.
    #[error("unimplemented opcode ${opcode:02X} at ${pc:04X}")]
    UnimplementedOpcode {
        /// Raw opcode byte.
        opcode: u8,
        /// Address the opcode byte was fetched from.
        pc: u16,
    },
    /// Opcode table names a mnemonic that no handler family implements.
    #[error("instruction {mnemonic} not implemented (opcode ${opcode:02X} at ${pc:04X})")]
    InstructionNotImplemented {
        /// Mnemonic text from the opcode table.
        mnemonic: String,
        /// Raw opcode byte.
        opcode: u8,
        /// Address the opcode byte was fetched from.
        pc: u16,
    },
    /// The engine was clocked before any reset sequence ran.
    #[error("cpu must be reset before it is clocked")]
    ResetRequired,
}

impl Fault {
    /// Returns the recovery class for this fault.
    #[must_use]
    pub const fn class(&self) -> FaultClass {
        match self {
            Self::UnimplementedOpcode { .. } => FaultClass::Decode,
            Self::InstructionNotImplemented { .. } => FaultClass::Dispatch,
            Self::ResetRequired => FaultClass::Lifecycle,
        }
    }

    /// Returns the program counter of the faulting fetch, when one applies.
    #[must_use]
    pub const fn pc(&self) -> Option<u16> {
        match self {
            Self::UnimplementedOpcode { pc, .. } | Self::InstructionNotImplemented { pc, .. } => {
                Some(*pc)
            }
            Self::ResetRequired => None,
        }
    }

    /// Returns the raw opcode byte involved in the fault, when one applies.
    #[must_use]
    pub const fn opcode(&self) -> Option<u8> {
        match self {
            Self::UnimplementedOpcode { opcode, .. }
            | Self::InstructionNotImplemented { opcode, .. } => Some(*opcode),
            Self::ResetRequired => None,
        }
    }
}

/// Rejections raised while building an opcode table from external records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum TableError {
    /// Two records claim the same opcode byte.
    #[error("opcode ${0:02X} is defined more than once")]
    DuplicateOpcode(u8),
    /// Record names an addressing mode the engine cannot resolve.
    #[error("opcode ${opcode:02X} uses unknown addressing mode {mode:?}")]
    UnknownAddressingMode {
        /// Opcode byte of the offending record.
        opcode: u8,
        /// Mode text as given in the record.
        mode: String,
    },
    /// Declared instruction length disagrees with the addressing mode.
    #[error("opcode ${opcode:02X} declares {bytes} bytes but its mode needs {expected}")]
    LengthMismatch {
        /// Opcode byte of the offending record.
        opcode: u8,
        /// Declared length in bytes.
        bytes: u8,
        /// Length implied by the addressing mode.
        expected: u8,
    },
    /// Record declares a zero cycle cost, which would never retire.
    #[error("opcode ${0:02X} declares a zero cycle cost")]
    ZeroCycles(u8),
    /// Record declares a base cost that leaves no room for surcharges.
    #[error("opcode ${opcode:02X} declares {cycles} cycles, at most {max} allowed")]
    ExcessiveCycles {
        /// Opcode byte of the offending record.
        opcode: u8,
        /// Declared base cost.
        cycles: u8,
        /// Largest accepted base cost.
        max: u8,
    },
}
