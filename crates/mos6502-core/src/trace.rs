//! Observer hooks for reset, instruction, and bus activity.
//!
//! Tracing is a pure observer: sinks receive events after the engine has
//! already decided what to do, and cannot influence execution.

/// Which reset variant a sequence ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum ResetKind {
    /// Registers zeroed and status forced to `I | U`.
    Deterministic,
    /// Registers and unrelated status bits left as they were.
    HardwareAccurate,
}

/// Direction of a bus access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum BusOp {
    /// Byte read.
    Read,
    /// Byte write.
    Write,
}

impl BusOp {
    /// Single-letter tag (`R`/`W`) used in bus logs.
    #[must_use]
    pub const fn tag(self) -> char {
        match self {
            Self::Read => 'R',
            Self::Write => 'W',
        }
    }
}

/// Events emitted in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraceEvent {
    /// A reset sequence began.
    ResetStarted {
        /// Variant being run.
        kind: ResetKind,
    },
    /// A reset sequence finished.
    ResetCompleted {
        /// Program counter loaded from the reset vector.
        pc: u16,
    },
    /// An opcode byte was fetched.
    InstructionStart {
        /// Address the opcode byte was fetched from.
        pc: u16,
        /// Raw opcode byte.
        opcode: u8,
    },
    /// An instruction finished executing.
    InstructionRetired {
        /// Address of the retired instruction's opcode byte.
        pc: u16,
        /// Total cycle cost including surcharges.
        cycles: u8,
    },
    /// The engine read or wrote the bus.
    BusAccess {
        /// Elapsed-cycle stamp of the access.
        cycle: u64,
        /// Target address.
        addr: u16,
        /// Byte read or written.
        value: u8,
        /// Access direction.
        op: BusOp,
    },
    /// Decode or dispatch failed for a fetched opcode.
    FaultRaised {
        /// Address the opcode byte was fetched from.
        pc: u16,
        /// Raw opcode byte.
        opcode: u8,
    },
}

/// Sink trait for trace hooks.
pub trait TraceSink {
    /// Records an event in execution order.
    fn on_event(&mut self, event: TraceEvent);
}

/// Sink that discards every event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullSink;

impl TraceSink for NullSink {
    fn on_event(&mut self, _event: TraceEvent) {}
}

impl TraceSink for Vec<TraceEvent> {
    fn on_event(&mut self, event: TraceEvent) {
        self.push(event);
    }
}

/// One recorded bus operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct BusActivity {
    /// Elapsed-cycle stamp.
    pub cycle: u64,
    /// Target address.
    pub address: u16,
    /// Byte read or written.
    pub data: u8,
    /// Access direction.
    pub operation: BusOp,
}

impl std::fmt::Display for BusActivity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:>6} {} ${:04X} ${:02X}",
            self.cycle,
            self.operation.tag(),
            self.address,
            self.data
        )
    }
}

/// Sink that keeps every bus access and ignores other events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusMonitor {
    activity: Vec<BusActivity>,
}

impl BusMonitor {
    /// Creates an empty monitor.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            activity: Vec::new(),
        }
    }

    /// Recorded accesses in program order.
    #[must_use]
    pub fn activity(&self) -> &[BusActivity] {
        &self.activity
    }

    /// Most recent access.
    #[must_use]
    pub fn last(&self) -> Option<&BusActivity> {
        self.activity.last()
    }

    /// Recorded reads in program order.
    pub fn reads(&self) -> impl Iterator<Item = &BusActivity> + '_ {
        self.activity
            .iter()
            .filter(|entry| entry.operation == BusOp::Read)
    }

    /// Recorded writes in program order.
    pub fn writes(&self) -> impl Iterator<Item = &BusActivity> + '_ {
        self.activity
            .iter()
            .filter(|entry| entry.operation == BusOp::Write)
    }

    /// Number of recorded accesses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.activity.len()
    }

    /// Returns `true` when nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.activity.is_empty()
    }

    /// Drops all recorded accesses.
    pub fn clear(&mut self) {
        self.activity.clear();
    }
}

impl TraceSink for BusMonitor {
    fn on_event(&mut self, event: TraceEvent) {
        if let TraceEvent::BusAccess {
            cycle,
            addr,
            value,
            op,
        } = event
        {
            self.activity.push(BusActivity {
                cycle,
                address: addr,
                data: value,
                operation: op,
            });
        }
    }
}
