//! Text rasterisation into the page-major framebuffer.
//!
//! One text line maps to one display page: 8 lines of up to 21 glyphs.
//! Lines wrap when the next glyph would pass the right edge; text beyond
//! the last page is dropped and reported as [`RenderOutcome::Truncated`].

use embedded_hal::i2c::I2c;
use log::debug;
use ssd1306::{
    FrameBuffer, Ssd1306,
    protocol::{PAGES, WIDTH},
};

use crate::glyph::{GLYPH_ADVANCE, GLYPH_WIDTH, glyph};

/// Glyphs that fit on one line.
pub const LINE_CHARS: usize = (WIDTH - GLYPH_WIDTH) / GLYPH_ADVANCE + 1;
/// Text lines available on the panel.
pub const LINES: usize = PAGES;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RenderOutcome {
    /// Every line of the input fit on the panel.
    Complete,
    /// Rendering stopped at the bottom edge with input left over.
    Truncated,
}

/// Framebuffer owner that can push its frame to the panel.
///
/// The renderer borrows the frame only for the duration of one call.
pub trait TextDisplay {
    type Error;

    fn frame_mut(&mut self) -> &mut FrameBuffer;
    fn flush(&mut self) -> Result<(), Self::Error>;
}

impl<I2C> TextDisplay for Ssd1306<I2C>
where
    I2C: I2c,
{
    type Error = ssd1306::Error<I2C::Error>;

    fn frame_mut(&mut self) -> &mut FrameBuffer {
        Ssd1306::frame_mut(self)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ssd1306::flush(self)
    }
}

/// Clears `frame` and draws `text` from the top-left corner.
pub fn rasterize(frame: &mut FrameBuffer, text: &str) -> RenderOutcome {
    frame.clear(false);
    let bytes = frame.bytes_mut();

    let mut line = 0usize;
    let mut x = 0usize;

    for (idx, c) in text.char_indices() {
        if c == '\n' || x > WIDTH - GLYPH_ADVANCE {
            line += 1;
            x = 0;
            if line >= LINES {
                let rest = if c == '\n' {
                    &text[idx + c.len_utf8()..]
                } else {
                    &text[idx..]
                };
                if rest.is_empty() {
                    return RenderOutcome::Complete;
                }
                debug!("text: truncated {} bytes past line {}", rest.len(), LINES);
                return RenderOutcome::Truncated;
            }
            if c == '\n' {
                continue;
            }
        }

        let Some(pattern) = glyph(c) else {
            continue;
        };

        let start = line * WIDTH + x;
        bytes[start..start + GLYPH_WIDTH].copy_from_slice(pattern);
        x += GLYPH_ADVANCE;
    }

    RenderOutcome::Complete
}

/// Rasterises `text` into the display's frame and flushes the full frame.
///
/// Blocks for the duration of the bus transfer. On a bus fault the frame
/// still holds the new text; the next render resends it.
pub fn render<D>(display: &mut D, text: &str) -> Result<RenderOutcome, D::Error>
where
    D: TextDisplay,
{
    let outcome = rasterize(display.frame_mut(), text);
    display.flush()?;
    Ok(outcome)
}
