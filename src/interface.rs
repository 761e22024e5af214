//! Interface for the physical connection between display and the controlling device

use embedded_hal::{
    delay::DelayNs,
    digital::OutputPin,
    i2c::{I2c, Operation},
};

use crate::command::CommandByte;

/// Control byte announcing a single command byte
const CONTROL_COMMAND: u8 = 0x80;
/// Control byte announcing a stream of display RAM data
const CONTROL_DATA: u8 = 0x40;

/// The two transfers the driver needs from the bus: a single command byte and a run of
/// display RAM bytes.
///
/// Implemented for I2C by [`I2cInterface`]. Every failure of the underlying bus is
/// returned to the caller, nothing is retried.
pub trait DisplayInterface {
    /// Error of the underlying bus
    type Error;

    /// Sends one byte to the command register
    fn write_command(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Sends `data` to the display RAM register in one transfer
    fn write_data(&mut self, data: &[u8]) -> Result<(), Self::Error>;
}

/// Crate internal helpers on top of [`DisplayInterface`]
pub(crate) trait InterfaceExt: DisplayInterface {
    /// Basic function for sending [Commands](crate::command::Command) and their parameters.
    ///
    /// Parameters are sent as command bytes too, that is what the controller expects.
    fn cmd_with_params<T: CommandByte>(
        &mut self,
        command: T,
        params: &[u8],
    ) -> Result<(), Self::Error> {
        self.write_command(command.address())?;
        for &param in params {
            self.write_command(param)?;
        }
        Ok(())
    }

    fn cmd<T: CommandByte>(&mut self, command: T) -> Result<(), Self::Error> {
        self.write_command(command.address())
    }
}

impl<DI: DisplayInterface + ?Sized> InterfaceExt for DI {}

impl<T: DisplayInterface + ?Sized> DisplayInterface for &mut T {
    type Error = T::Error;

    fn write_command(&mut self, byte: u8) -> Result<(), Self::Error> {
        (**self).write_command(byte)
    }

    fn write_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write_data(data)
    }
}

/// The Connection Interface of SSD1306 panels wired to I2C
pub struct I2cInterface<I2C> {
    /// I2C
    i2c: I2C,
    /// 7-bit address of the panel
    address: u8,
}

impl<I2C> I2cInterface<I2C>
where
    I2C: I2c,
{
    /// Creates a new `I2cInterface` struct
    pub fn new(i2c: I2C, address: u8) -> Self {
        I2cInterface { i2c, address }
    }

    /// 7-bit address the panel is talked to on
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Gives the bus back
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> DisplayInterface for I2cInterface<I2C>
where
    I2C: I2c,
{
    type Error = I2C::Error;

    fn write_command(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.i2c.write(self.address, &[CONTROL_COMMAND, byte])
    }

    fn write_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        // adjacent writes go out as one transfer without a repeated start
        self.i2c.transaction(
            self.address,
            &mut [Operation::Write(&[CONTROL_DATA]), Operation::Write(data)],
        )
    }
}

/// Resets the device.
///
/// Only needed for panels with a wired reset line: it is held low for 200ms and then
/// released. Call this before [`Ssd1306::new`](crate::display::Ssd1306::new).
pub fn reset<RST, DELAY>(rst: &mut RST, delay: &mut DELAY) -> Result<(), RST::Error>
where
    RST: OutputPin,
    DELAY: DelayNs,
{
    rst.set_low()?;
    delay.delay_ms(200);
    rst.set_high()
}

#[cfg(test)]
pub(crate) mod mock {
    extern crate std;
    use std::vec::Vec;

    use super::DisplayInterface;

    /// One recorded bus transfer
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub(crate) enum Op {
        Command(u8),
        Data(Vec<u8>),
    }

    /// Error of [`RecordingInterface`] once its budget of transfers ran out
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(crate) struct BusFault;

    /// Remembers every transfer; fails every transfer after `fail_after` successful ones
    #[derive(Debug, Default)]
    pub(crate) struct RecordingInterface {
        pub ops: Vec<Op>,
        pub fail_after: Option<usize>,
        pub attempts: usize,
    }

    impl RecordingInterface {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing_after(successful: usize) -> Self {
            RecordingInterface {
                fail_after: Some(successful),
                ..Self::default()
            }
        }

        pub fn commands(&self) -> Vec<u8> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Command(byte) => Some(*byte),
                    Op::Data(_) => None,
                })
                .collect()
        }

        pub fn data(&self) -> Vec<Vec<u8>> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Data(data) => Some(data.clone()),
                    Op::Command(_) => None,
                })
                .collect()
        }

        pub fn clear(&mut self) {
            self.ops.clear();
        }

        fn check(&mut self) -> Result<(), BusFault> {
            self.attempts += 1;
            match self.fail_after {
                Some(limit) if self.attempts > limit => Err(BusFault),
                _ => Ok(()),
            }
        }
    }

    impl DisplayInterface for RecordingInterface {
        type Error = BusFault;

        fn write_command(&mut self, byte: u8) -> Result<(), Self::Error> {
            self.check()?;
            self.ops.push(Op::Command(byte));
            Ok(())
        }

        fn write_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
            self.check()?;
            self.ops.push(Op::Data(data.to_vec()));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::vec;

    use super::*;
    use crate::command::Command;
    use crate::interface::InterfaceExt;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction as PinTransaction};
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};

    #[test]
    fn command_uses_command_control_byte() {
        let expectations = [Transaction::write(0x3C, vec![0x80, 0xAF])];
        let mut interface = I2cInterface::new(I2cMock::new(&expectations), 0x3C);

        interface.write_command(0xAF).unwrap();

        interface.release().done();
    }

    #[test]
    fn data_is_one_transaction_with_data_control_byte() {
        let expectations = [
            Transaction::transaction_start(0x3D),
            Transaction::write(0x3D, vec![0x40]),
            Transaction::write(0x3D, vec![0x01, 0x02, 0xFF]),
            Transaction::transaction_end(0x3D),
        ];
        let mut interface = I2cInterface::new(I2cMock::new(&expectations), 0x3D);

        interface.write_data(&[0x01, 0x02, 0xFF]).unwrap();

        interface.release().done();
    }

    #[test]
    fn parameters_follow_as_command_bytes() {
        let expectations = [
            Transaction::write(0x3C, vec![0x80, 0x21]),
            Transaction::write(0x3C, vec![0x80, 0x00]),
            Transaction::write(0x3C, vec![0x80, 0x7F]),
        ];
        let mut interface = I2cInterface::new(I2cMock::new(&expectations), 0x3C);

        interface
            .cmd_with_params(Command::ColumnAddress, &[0x00, 0x7F])
            .unwrap();

        interface.release().done();
    }

    #[test]
    fn bus_errors_are_returned() {
        let expectations = [Transaction::write(0x3C, vec![0x80, 0xAE])
            .with_error(embedded_hal::i2c::ErrorKind::Other)];
        let mut interface = I2cInterface::new(I2cMock::new(&expectations), 0x3C);

        assert_eq!(
            interface.write_command(0xAE),
            Err(embedded_hal::i2c::ErrorKind::Other)
        );

        interface.release().done();
    }

    #[test]
    fn reset_pulses_low_then_high() {
        let expectations = [
            PinTransaction::set(State::Low),
            PinTransaction::set(State::High),
        ];
        let mut rst = PinMock::new(&expectations);

        reset(&mut rst, &mut NoopDelay::new()).unwrap();

        rst.done();
    }
}
