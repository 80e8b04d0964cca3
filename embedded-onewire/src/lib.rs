#![no_std]
#![deny(missing_docs)]
//! # embedded-onewire
//! A no-std trait interface for single-drop 1-Wire buses.
//!
//! [OneWire] describes what a bus master must provide to talk to a 1-Wire
//! slave: a reset/presence cycle plus byte and bit time slots. Bus masters
//! (UART adapters, I2C bridges, bit-banged GPIO) implement it; device drivers
//! are written against it.
//!
//! [OneWireCrc] implements the Dallas/Maxim CRC-8 used to protect ROM codes
//! and scratchpad contents.

mod error;
mod traits;
mod utils;
pub use error::OneWireError;
pub use traits::{OneWire, OneWireStatus};
pub use utils::OneWireCrc;

/// Result of 1-Wire operations.
pub type OneWireResult<T, E> = Result<T, OneWireError<E>>;

/// Read the 64-bit ROM code of the only device on the bus.
///
/// Only valid on a single-drop bus: with several slaves the answers collide
/// and the CRC check fails.
pub const ONEWIRE_READ_ROM_CMD: u8 = 0x33;

/// Command to skip ROM addressing and talk to every device on the bus.
pub const ONEWIRE_SKIP_ROM_CMD: u8 = 0xcc;

/// Length of a 1-Wire ROM code in bytes: family, 48-bit serial, CRC.
pub const ONEWIRE_ROM_SIZE: usize = 8;
