use embedded_hal::digital::InputPin;

use stopper_core::input::{ButtonLevels, RawButtons};

#[derive(Debug)]
pub enum ButtonError<UpErr, DownErr, SelectErr> {
    Up(UpErr),
    Down(DownErr),
    Select(SelectErr),
}

/// UP, DOWN and SELECT on active-low GPIO inputs (pressed pulls the pin to ground).
#[derive(Debug)]
pub struct GpioButtons<UP, DOWN, SEL> {
    up: UP,
    down: DOWN,
    select: SEL,
}

impl<UP, DOWN, SEL> GpioButtons<UP, DOWN, SEL>
where
    UP: InputPin,
    DOWN: InputPin,
    SEL: InputPin,
{
    pub fn new(up: UP, down: DOWN, select: SEL) -> Self {
        Self { up, down, select }
    }
}

impl<UP, DOWN, SEL> ButtonLevels for GpioButtons<UP, DOWN, SEL>
where
    UP: InputPin,
    DOWN: InputPin,
    SEL: InputPin,
{
    type Error = ButtonError<UP::Error, DOWN::Error, SEL::Error>;

    fn read(&mut self) -> Result<RawButtons, Self::Error> {
        let up = self.up.is_low().map_err(ButtonError::Up)?;
        let down = self.down.is_low().map_err(ButtonError::Down)?;
        let select = self.select.is_low().map_err(ButtonError::Select)?;

        Ok(RawButtons { up, down, select })
    }
}
