//! Flat 64 KiB memory and the fixed 6502 memory map.

/// Fixed memory-region map and address decoder.
pub mod map;

pub use map::{
    decode_memory_region, MemoryRegion, RegionDescriptor, CONSOLE_BASE, DISPLAY_BASE,
    FIXED_MEMORY_REGIONS, IRQ_VECTOR, NMI_VECTOR, RESET_VECTOR, SOUND_BASE, STACK_BASE,
};

/// Size in bytes of the flat address space (64 KiB).
pub const ADDRESS_SPACE_BYTES: usize = u16::MAX as usize + 1;

/// Allocates a zeroed 64 KiB backing store.
#[must_use]
pub fn new_address_space() -> Box<[u8]> {
    vec![0; ADDRESS_SPACE_BYTES].into_boxed_slice()
}

/// Flat byte-addressable store covering the whole 16-bit address space.
///
/// Unwritten cells read as zero. Word accessors are little-endian and wrap
/// from `0xFFFF` to `0x0000`.
#[derive(Clone, PartialEq, Eq)]
pub struct Memory {
    cells: Box<[u8]>,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let used = self.cells.iter().filter(|byte| **byte != 0).count();
        f.debug_struct("Memory")
            .field("len", &self.cells.len())
            .field("non_zero", &used)
            .finish()
    }
}

impl Memory {
    /// Creates a zero-filled memory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: new_address_space(),
        }
    }

    /// Creates memory holding `image` at `base`.
    #[must_use]
    pub fn from_image(base: u16, image: &[u8]) -> Self {
        let mut memory = Self::new();
        memory.load(base, image);
        memory
    }

    /// Reads one byte.
    #[must_use]
    pub fn read_byte(&self, addr: u16) -> u8 {
        self.cells[usize::from(addr)]
    }

    /// Writes one byte.
    pub fn write_byte(&mut self, addr: u16, value: u8) {
        self.cells[usize::from(addr)] = value;
    }

    /// Reads a little-endian word from `addr` and `addr + 1` (wrapping).
    #[must_use]
    pub fn read_word(&self, addr: u16) -> u16 {
        u16::from_le_bytes([self.read_byte(addr), self.read_byte(addr.wrapping_add(1))])
    }

    /// Writes a little-endian word to `addr` and `addr + 1` (wrapping).
    pub fn write_word(&mut self, addr: u16, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.write_byte(addr, lo);
        self.write_byte(addr.wrapping_add(1), hi);
    }

    /// Copies a program image starting at `base`, wrapping past `0xFFFF`.
    pub fn load(&mut self, base: u16, image: &[u8]) {
        let mut addr = base;
        for byte in image {
            self.write_byte(addr, *byte);
            addr = addr.wrapping_add(1);
        }
    }

    /// Points the reset vector at `entry`.
    pub fn set_reset_vector(&mut self, entry: u16) {
        self.write_word(RESET_VECTOR, entry);
    }

    /// Points the IRQ/BRK vector at `handler`.
    pub fn set_irq_vector(&mut self, handler: u16) {
        self.write_word(IRQ_VECTOR, handler);
    }

    /// Returns the raw backing store.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }
}
