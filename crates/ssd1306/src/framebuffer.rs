//! In-memory framebuffer mirroring SSD1306 GDDRAM.

use core::convert::TryFrom;

use crate::protocol::{BUFFER_SIZE, HEIGHT, PAGES, WIDTH};

/// 1bpp page-major framebuffer.
///
/// Byte `page * WIDTH + x` holds column `x` of rows `page*8 ..= page*8 + 7`;
/// bit 0 is the top row of the page and bit 7 the bottom row.
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    bytes: [u8; BUFFER_SIZE],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let lit = self.bytes.iter().filter(|b| **b != 0).count();
        f.debug_struct("FrameBuffer")
            .field("non_zero_bytes", &lit)
            .finish()
    }
}

impl FrameBuffer {
    /// Creates a dark framebuffer.
    pub const fn new() -> Self {
        Self {
            bytes: [0u8; BUFFER_SIZE],
        }
    }

    /// Returns the underlying framebuffer bytes.
    pub fn bytes(&self) -> &[u8; BUFFER_SIZE] {
        &self.bytes
    }

    /// Returns mutable framebuffer bytes.
    pub fn bytes_mut(&mut self) -> &mut [u8; BUFFER_SIZE] {
        &mut self.bytes
    }

    /// Clears every pixel to dark (`on = false`) or lit (`on = true`).
    pub fn clear(&mut self, on: bool) {
        self.bytes.fill(if on { 0xFF } else { 0x00 });
    }

    /// Sets a pixel state.
    ///
    /// Returns `true` when pixel is in bounds, `false` otherwise.
    pub fn set_pixel(&mut self, x: usize, y: usize, on: bool) -> bool {
        if x >= WIDTH || y >= HEIGHT {
            return false;
        }

        let byte_index = (y / 8) * WIDTH + x;
        let bit_mask = 1u8 << (y % 8);

        if on {
            self.bytes[byte_index] |= bit_mask;
        } else {
            self.bytes[byte_index] &= !bit_mask;
        }

        true
    }

    /// Reads a pixel state.
    pub fn pixel(&self, x: usize, y: usize) -> Option<bool> {
        if x >= WIDTH || y >= HEIGHT {
            return None;
        }

        let byte_index = (y / 8) * WIDTH + x;
        let bit_mask = 1u8 << (y % 8);
        Some((self.bytes[byte_index] & bit_mask) != 0)
    }

    /// Returns the column bytes of page 0..8.
    pub fn page(&self, page: usize) -> Option<&[u8; WIDTH]> {
        if page >= PAGES {
            return None;
        }

        let start = page * WIDTH;
        <&[u8; WIDTH]>::try_from(&self.bytes[start..start + WIDTH]).ok()
    }

    /// Mutable column bytes of page 0..8.
    pub fn page_mut(&mut self, page: usize) -> Option<&mut [u8; WIDTH]> {
        if page >= PAGES {
            return None;
        }

        let start = page * WIDTH;
        <&mut [u8; WIDTH]>::try_from(&mut self.bytes[start..start + WIDTH]).ok()
    }
}
