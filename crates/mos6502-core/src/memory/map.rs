//! Fixed 6502 memory map and region decoding helpers.

/// Inclusive start address of the zero page.
pub const ZERO_PAGE_START: u16 = 0x0000;
/// Inclusive end address of the zero page.
pub const ZERO_PAGE_END: u16 = 0x00FF;
/// Inclusive start address of the hardware stack page.
pub const STACK_START: u16 = 0x0100;
/// Inclusive end address of the hardware stack page.
pub const STACK_END: u16 = 0x01FF;
/// Inclusive start address of general RAM/ROM.
pub const RAM_START: u16 = 0x0200;
/// Inclusive end address of general RAM/ROM.
pub const RAM_END: u16 = 0xBFFF;
/// Inclusive start address of the peripheral window.
pub const IO_START: u16 = 0xC000;
/// Inclusive end address of the peripheral window.
pub const IO_END: u16 = 0xDFFF;
/// Inclusive start address of high ROM.
pub const HIGH_ROM_START: u16 = 0xE000;
/// Inclusive end address of high ROM.
pub const HIGH_ROM_END: u16 = 0xFFF9;
/// Inclusive start address of the hardware vector table.
pub const VECTORS_START: u16 = 0xFFFA;
/// Inclusive end address of the hardware vector table.
pub const VECTORS_END: u16 = 0xFFFF;

/// Base of the stack page; `SP` is an offset from here.
pub const STACK_BASE: u16 = STACK_START;
/// NMI vector (not serviced by this core).
pub const NMI_VECTOR: u16 = 0xFFFA;
/// Reset vector.
pub const RESET_VECTOR: u16 = 0xFFFC;
/// IRQ/BRK vector.
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Conventional base of the character display window.
pub const DISPLAY_BASE: u16 = 0xC000;
/// Conventional base of the tone generator registers.
pub const SOUND_BASE: u16 = 0xC400;
/// Conventional base of the console stream registers.
pub const CONSOLE_BASE: u16 = 0xD000;

/// Canonical fixed-region descriptor for the memory map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionDescriptor {
    /// Region classification.
    pub region: MemoryRegion,
    /// Inclusive start address.
    pub start: u16,
    /// Inclusive end address.
    pub end: u16,
}

/// Region classification for 16-bit addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemoryRegion {
    /// Zero page (`0x0000..=0x00FF`).
    ZeroPage,
    /// Stack page (`0x0100..=0x01FF`).
    Stack,
    /// Loader-populated RAM/ROM (`0x0200..=0xBFFF`).
    Ram,
    /// Peripheral window (`0xC000..=0xDFFF`).
    Io,
    /// High ROM below the vectors (`0xE000..=0xFFF9`).
    HighRom,
    /// NMI/reset/IRQ vectors (`0xFFFA..=0xFFFF`).
    Vectors,
}

impl MemoryRegion {
    /// Returns the inclusive bounds for this region.
    #[must_use]
    pub const fn bounds(self) -> (u16, u16) {
        match self {
            Self::ZeroPage => (ZERO_PAGE_START, ZERO_PAGE_END),
            Self::Stack => (STACK_START, STACK_END),
            Self::Ram => (RAM_START, RAM_END),
            Self::Io => (IO_START, IO_END),
            Self::HighRom => (HIGH_ROM_START, HIGH_ROM_END),
            Self::Vectors => (VECTORS_START, VECTORS_END),
        }
    }

    /// Returns `true` when `addr` belongs to this region.
    #[must_use]
    pub const fn contains(self, addr: u16) -> bool {
        let (start, end) = self.bounds();
        addr >= start && addr <= end
    }

    /// Returns the canonical descriptor for this region.
    #[must_use]
    pub const fn descriptor(self) -> RegionDescriptor {
        let (start, end) = self.bounds();
        RegionDescriptor {
            region: self,
            start,
            end,
        }
    }
}

/// Fixed region layout in ascending address order.
pub const FIXED_MEMORY_REGIONS: [RegionDescriptor; 6] = [
    MemoryRegion::ZeroPage.descriptor(),
    MemoryRegion::Stack.descriptor(),
    MemoryRegion::Ram.descriptor(),
    MemoryRegion::Io.descriptor(),
    MemoryRegion::HighRom.descriptor(),
    MemoryRegion::Vectors.descriptor(),
];

const _: () = assert_fixed_region_layout();

const fn assert_fixed_region_layout() {
    let mut index = 0;
    while index < FIXED_MEMORY_REGIONS.len() {
        let descriptor = FIXED_MEMORY_REGIONS[index];
        assert!(
            descriptor.start <= descriptor.end,
            "region start cannot be greater than end"
        );

        if index > 0 {
            let previous = FIXED_MEMORY_REGIONS[index - 1];
            assert!(
                previous.end.wrapping_add(1) == descriptor.start,
                "fixed regions must be contiguous"
            );
        }

        index += 1;
    }

    assert!(
        FIXED_MEMORY_REGIONS[0].start == 0x0000
            && FIXED_MEMORY_REGIONS[FIXED_MEMORY_REGIONS.len() - 1].end == u16::MAX,
        "fixed regions must cover full address space"
    );
    assert!(
        MemoryRegion::Vectors.contains(NMI_VECTOR)
            && MemoryRegion::Vectors.contains(RESET_VECTOR + 1)
            && MemoryRegion::Vectors.contains(IRQ_VECTOR + 1),
        "vectors must sit inside the vector region"
    );
}

/// Decodes a 16-bit address into its fixed memory region.
#[must_use]
pub const fn decode_memory_region(addr: u16) -> MemoryRegion {
    match addr {
        ZERO_PAGE_START..=ZERO_PAGE_END => MemoryRegion::ZeroPage,
        STACK_START..=STACK_END => MemoryRegion::Stack,
        RAM_START..=RAM_END => MemoryRegion::Ram,
        IO_START..=IO_END => MemoryRegion::Io,
        HIGH_ROM_START..=HIGH_ROM_END => MemoryRegion::HighRom,
        VECTORS_START..=VECTORS_END => MemoryRegion::Vectors,
    }
}
