//! Host-side fakes shared by unit tests.

use ssd1306::FrameBuffer;

use crate::text::TextDisplay;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BusFault;

/// Framebuffer owner that records every flushed frame.
#[derive(Default)]
pub struct MemoryDisplay {
    frame: FrameBuffer,
    flushed: Vec<FrameBuffer>,
    fail: bool,
    fail_next: usize,
}

impl MemoryDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_flushes(&mut self, fail: bool) {
        self.fail = fail;
    }

    /// Fails the next `count` flushes, then recovers.
    pub fn fail_next_flushes(&mut self, count: usize) {
        self.fail_next = count;
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn flush_count(&self) -> usize {
        self.flushed.len()
    }

    pub fn last_flushed(&self) -> Option<&FrameBuffer> {
        self.flushed.last()
    }

    /// True when the last flushed frame is exactly `text` rasterised.
    pub fn shows(&self, text: &str) -> bool {
        let mut expected = FrameBuffer::new();
        crate::text::rasterize(&mut expected, text);
        self.last_flushed() == Some(&expected)
    }
}

impl TextDisplay for MemoryDisplay {
    type Error = BusFault;

    fn frame_mut(&mut self) -> &mut FrameBuffer {
        &mut self.frame
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        if self.fail {
            return Err(BusFault);
        }
        if self.fail_next > 0 {
            self.fail_next -= 1;
            return Err(BusFault);
        }
        self.flushed.push(self.frame.clone());
        Ok(())
    }
}
