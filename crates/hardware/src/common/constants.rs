//! Bus-wide constants.

/// Size of the peripheral's address window in bytes (4 KiB).
pub const WINDOW_SIZE: u32 = 0x1000;

/// Mask selecting the offset inside the window.
pub const WINDOW_OFFSET_MASK: u32 = WINDOW_SIZE - 1;

/// Mask selecting the window (upper 20 address bits).
pub const WINDOW_BASE_MASK: u32 = !WINDOW_OFFSET_MASK;

/// Mask selecting the word-aligned part of an offset.
pub const WORD_OFFSET_MASK: u32 = WINDOW_OFFSET_MASK & !0b11;

/// Number of byte lanes on the 32-bit data bus.
pub const BYTE_LANES: usize = 4;

/// Mask covering every byte lane.
pub const ALL_LANES: u8 = 0b1111;
