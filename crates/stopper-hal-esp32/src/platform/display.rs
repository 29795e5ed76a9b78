use esp_hal::{
    Blocking,
    gpio::interconnect::PeripheralOutput,
    i2c::master::{BusTimeout, Config as I2cConfig, ConfigError, I2c},
    peripherals::I2C0,
    time::Rate,
};
use ssd1306::{Config, Ssd1306};

pub type BoardDisplay<'d> = Ssd1306<I2c<'d, Blocking>>;

/// Opens I2C0 on the given pins at the panel's bus rate.
///
/// The controller still needs [`Ssd1306::initialize`] before use.
pub fn open_display<'d>(
    i2c: I2C0<'d>,
    sda: impl PeripheralOutput<'d>,
    scl: impl PeripheralOutput<'d>,
    config: Config,
) -> Result<BoardDisplay<'d>, ConfigError> {
    let bus_config = I2cConfig::default()
        .with_frequency(Rate::from_hz(config.i2c_hz))
        .with_timeout(BusTimeout::Maximum);

    let bus = I2c::new(i2c, bus_config)?.with_sda(sda).with_scl(scl);
    Ok(Ssd1306::new(bus, config))
}
