//! Addressed command/data transport over an I²C bus.

use embedded_hal::i2c::{I2c, Operation};

use crate::protocol::{CONTROL_COMMAND, CONTROL_DATA};

/// Sends command and data byte sequences to one controller address.
///
/// Every call is a single start/write/stop transaction. Bus faults
/// (NACK, arbitration loss, timeout) are returned as-is; nothing is retried.
#[derive(Debug)]
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C>
where
    I2C: I2c,
{
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Releases the owned bus.
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Writes `[0x00, command]` in one transaction.
    pub fn send_command(&mut self, command: u8) -> Result<(), I2C::Error> {
        self.i2c.write(self.address, &[CONTROL_COMMAND, command])
    }

    /// Sends each byte as its own command transaction, stopping at the first fault.
    pub fn send_commands(&mut self, commands: &[u8]) -> Result<(), I2C::Error> {
        for &command in commands {
            self.send_command(command)?;
        }
        Ok(())
    }

    /// Writes `[0x40, data...]` in one transaction.
    pub fn send_data(&mut self, data: &[u8]) -> Result<(), I2C::Error> {
        // Adjacent writes are merged on the wire without a repeated start.
        let prefix = [CONTROL_DATA];
        let mut ops = [Operation::Write(&prefix), Operation::Write(data)];
        self.i2c.transaction(self.address, &mut ops)
    }
}
