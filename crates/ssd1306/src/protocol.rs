//! Wire-level protocol helpers for the SSD1306 over I²C.

/// Panel width in pixels.
pub const WIDTH: usize = 128;
/// Panel height in pixels.
pub const HEIGHT: usize = 64;
/// Number of 8-pixel-tall pages.
pub const PAGES: usize = HEIGHT / 8;
/// Total framebuffer size in bytes.
pub const BUFFER_SIZE: usize = WIDTH * PAGES;

/// Default 7-bit bus address (SA0 low).
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Control byte preceding a command payload.
pub const CONTROL_COMMAND: u8 = 0x00;
/// Control byte preceding a GDDRAM data stream.
pub const CONTROL_DATA: u8 = 0x40;

pub const CMD_DISPLAY_OFF: u8 = 0xAE;
pub const CMD_DISPLAY_ON: u8 = 0xAF;
pub const CMD_SET_CLOCK_DIV: u8 = 0xD5;
pub const CMD_SET_MULTIPLEX: u8 = 0xA8;
pub const CMD_SET_DISPLAY_OFFSET: u8 = 0xD3;
pub const CMD_SET_START_LINE: u8 = 0x40;
pub const CMD_CHARGE_PUMP: u8 = 0x8D;
pub const CMD_MEMORY_MODE: u8 = 0x20;
pub const CMD_SEGMENT_REMAP: u8 = 0xA1;
pub const CMD_COM_SCAN_DEC: u8 = 0xC8;
pub const CMD_SET_CONTRAST: u8 = 0x81;
pub const CMD_SET_PRECHARGE: u8 = 0xD9;
pub const CMD_SET_VCOM_DESELECT: u8 = 0xDB;
pub const CMD_DISPLAY_FROM_RAM: u8 = 0xA4;
pub const CMD_NORMAL_DISPLAY: u8 = 0xA6;
pub const CMD_COLUMN_ADDRESS: u8 = 0x21;

/// Contrast used by the stock init sequence.
pub const DEFAULT_CONTRAST: u8 = 0x7F;

/// Number of bytes in the init sequence.
pub const INIT_SEQUENCE_LEN: usize = 23;

/// Controller setup, one byte per bus transaction, in datasheet order.
///
/// Horizontal addressing, charge pump on, and segment/COM remap so that
/// column 0 / page 0 is the top-left corner of the mounted panel.
pub const fn init_sequence(contrast: u8) -> [u8; INIT_SEQUENCE_LEN] {
    [
        CMD_DISPLAY_OFF,
        CMD_SET_CLOCK_DIV,
        0x80,
        CMD_SET_MULTIPLEX,
        (HEIGHT - 1) as u8,
        CMD_SET_DISPLAY_OFFSET,
        0x00,
        CMD_SET_START_LINE,
        CMD_CHARGE_PUMP,
        0x14,
        CMD_MEMORY_MODE,
        0x00,
        CMD_SEGMENT_REMAP,
        CMD_COM_SCAN_DEC,
        CMD_SET_CONTRAST,
        contrast,
        CMD_SET_PRECHARGE,
        0xF1,
        CMD_SET_VCOM_DESELECT,
        0x20,
        CMD_DISPLAY_FROM_RAM,
        CMD_NORMAL_DISPLAY,
        CMD_DISPLAY_ON,
    ]
}

/// Builds the column window command covering `start..=end`.
///
/// Returns `None` when the range is inverted or leaves the panel.
#[inline]
pub fn column_window(start: u8, end: u8) -> Option<[u8; 3]> {
    if start > end || end as usize >= WIDTH {
        return None;
    }

    Some([CMD_COLUMN_ADDRESS, start, end])
}

/// Column window spanning the full panel width.
pub const FULL_COLUMN_WINDOW: [u8; 3] = [CMD_COLUMN_ADDRESS, 0x00, (WIDTH - 1) as u8];
