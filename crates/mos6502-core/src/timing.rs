//! Cycle constants and conditional penalty rules layered on top of the base
//! cost declared by each opcode entry.

use crate::opcode::{AddressingMode, Mnemonic};

/// Number of simulated clocks consumed by either reset variant.
pub const RESET_CYCLES: u8 = 7;

/// Conditional cycle surcharges applied by instruction handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CyclePenalty {
    /// Indexed read whose effective address left the base page.
    PageCross,
    /// Conditional branch whose condition held.
    BranchTaken,
    /// Taken branch whose target lies on a different page.
    BranchPageCross,
}

/// Single source-of-truth surcharge table.
pub const CYCLE_PENALTY_TABLE: &[(CyclePenalty, u8)] = &[
    (CyclePenalty::PageCross, 1),
    (CyclePenalty::BranchTaken, 1),
    (CyclePenalty::BranchPageCross, 1),
];

/// Largest surcharge one instruction can earn: a taken branch to another page.
pub const MAX_SURCHARGE: u8 = 2;

/// Largest base cost an opcode entry may declare so that base plus
/// surcharge still fits the cycle counter.
pub const MAX_BASE_CYCLES: u8 = u8::MAX - MAX_SURCHARGE;

/// Looks up the surcharge for a penalty kind.
#[must_use]
pub fn cycle_penalty(kind: CyclePenalty) -> u8 {
    CYCLE_PENALTY_TABLE
        .iter()
        .find_map(|(entry_kind, cycles)| (*entry_kind == kind).then_some(*cycles))
        .unwrap_or(0)
}

/// Returns `true` when `a` and `b` lie on different 256-byte pages.
#[must_use]
pub const fn crosses_page(a: u16, b: u16) -> bool {
    a & 0xFF00 != b & 0xFF00
}

/// Returns `true` when `mnemonic` in `mode` pays the indexed page-cross
/// surcharge.
///
/// Only pure reads qualify. Stores and read-modify-write forms already bill
/// the extra cycle in their base cost.
#[must_use]
pub const fn pays_page_cross_penalty(mnemonic: Mnemonic, mode: AddressingMode) -> bool {
    let indexed_read_mode = matches!(
        mode,
        AddressingMode::AbsoluteX | AddressingMode::AbsoluteY | AddressingMode::IndirectIndexed
    );
    indexed_read_mode
        && matches!(
            mnemonic,
            Mnemonic::Lda
                | Mnemonic::Ldx
                | Mnemonic::Ldy
                | Mnemonic::Adc
                | Mnemonic::Sbc
                | Mnemonic::Cmp
                | Mnemonic::And
                | Mnemonic::Ora
                | Mnemonic::Eor
        )
}

/// Surcharge for a conditional branch.
#[must_use]
pub fn branch_penalty(taken: bool, from: u16, target: u16) -> u8 {
    if !taken {
        return 0;
    }
    let mut cycles = cycle_penalty(CyclePenalty::BranchTaken);
    if crosses_page(from, target) {
        cycles = cycles.saturating_add(cycle_penalty(CyclePenalty::BranchPageCross));
    }
    cycles
}
