#![cfg_attr(not(test), no_std)]

//! SSD1306 (128x64 monochrome OLED, I²C) driver primitives.

mod framebuffer;
mod interface;
pub mod protocol;

pub use framebuffer::FrameBuffer;
pub use interface::I2cInterface;

use embedded_hal::i2c::I2c;

/// Driver configuration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Config {
    /// 7-bit controller address.
    pub address: u8,
    /// Expected bus clock in Hz (documented for board glue).
    pub i2c_hz: u32,
    /// Contrast byte written during init.
    pub contrast: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub const fn new() -> Self {
        Self {
            address: protocol::DEFAULT_ADDRESS,
            i2c_hz: 400_000,
            contrast: protocol::DEFAULT_CONTRAST,
        }
    }

    pub const fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }
}

/// Driver errors.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Error<I2cErr> {
    /// Bus transaction failed.
    Bus(I2cErr),
    /// Input parameters are outside supported bounds.
    InvalidInput,
}

pub type DriverResult<I2cErr> = Result<(), Error<I2cErr>>;

/// SSD1306 driver owning the bus transport and the framebuffer.
#[derive(Debug)]
pub struct Ssd1306<I2C> {
    interface: I2cInterface<I2C>,
    config: Config,
    frame: FrameBuffer,
}

impl<I2C> Ssd1306<I2C>
where
    I2C: I2c,
{
    /// Creates a new driver instance. Nothing is sent until [`Self::initialize`].
    pub fn new(i2c: I2C, config: Config) -> Self {
        Self {
            interface: I2cInterface::new(i2c, config.address),
            config,
            frame: FrameBuffer::new(),
        }
    }

    /// Releases the owned bus.
    pub fn release(self) -> I2C {
        self.interface.release()
    }

    /// Runs the controller setup sequence, then clears and flushes the frame.
    pub fn initialize(&mut self) -> DriverResult<I2C::Error> {
        let sequence = protocol::init_sequence(self.config.contrast);
        self.interface
            .send_commands(&sequence)
            .map_err(Error::Bus)?;

        self.frame.clear(false);
        self.flush()
    }

    /// Restricts subsequent data writes to columns `start..=end`.
    pub fn set_column_window(&mut self, start: u8, end: u8) -> DriverResult<I2C::Error> {
        let window = protocol::column_window(start, end).ok_or(Error::InvalidInput)?;
        self.interface.send_commands(&window).map_err(Error::Bus)
    }

    /// Sends the whole framebuffer.
    pub fn flush(&mut self) -> DriverResult<I2C::Error> {
        self.interface
            .send_commands(&protocol::FULL_COLUMN_WINDOW)
            .map_err(Error::Bus)?;
        self.interface
            .send_data(self.frame.bytes())
            .map_err(Error::Bus)
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn frame_mut(&mut self) -> &mut FrameBuffer {
        &mut self.frame
    }
}
