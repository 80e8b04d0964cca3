#![deny(missing_docs)]

/*! # onewire-uart
 *
 * Drives a 1-Wire bus through an ordinary UART whose TX and RX lines are tied
 * to the data line (the DS9097 / usbtemp.com wiring). Every 1-Wire time slot
 * is one UART character: the reset pulse is `0xF0` at 9600 baud, bit slots
 * are `0xFF`/`0x00` at 115200 baud, and the echoed character tells what the
 * slaves did to the line.
 */

pub use embedded_onewire::{OneWire, OneWireError, OneWireResult};
mod error;
mod onewire;
mod serial;
mod traits;

pub use error::UartError;
pub use onewire::ResetStatus;
pub use serial::open_serial;
pub use traits::Uart;

/// Baud rate used for the reset/presence cycle.
pub const RESET_BAUD: u32 = 9600;
/// Baud rate used for bit time slots.
pub const DATA_BAUD: u32 = 115200;

/// A 1-Wire bus master sitting on a UART.
///
/// Takes ownership of anything implementing [`Uart`].
pub struct UartOneWire<U> {
    pub(crate) uart: U,
    pub(crate) baud: u32,
}

impl<U: Uart> UartOneWire<U> {
    /// Creates a new bus master on the given UART.
    ///
    /// The UART is switched to the bit slot baud rate.
    pub fn new(mut uart: U) -> Result<Self, U::Error> {
        uart.set_baud_rate(DATA_BAUD)?;
        Ok(UartOneWire {
            uart,
            baud: DATA_BAUD,
        })
    }

    /// Gives the UART back.
    pub fn release(self) -> U {
        self.uart
    }

    pub(crate) fn switch_baud(&mut self, baud: u32) -> Result<(), U::Error> {
        if self.baud != baud {
            self.uart.set_baud_rate(baud)?;
            self.baud = baud;
        }
        Ok(())
    }
}
