use crate::{ONEWIRE_SKIP_ROM_CMD, OneWireError, OneWireResult};

/// Status reported by a bus master after a reset cycle.
pub trait OneWireStatus {
    /// A slave answered the reset pulse.
    fn presence(&self) -> bool;
    /// The data line stayed low through the reset cycle.
    fn shortcircuit(&self) -> bool;
}

/// Trait for 1-Wire communication.
///
/// All time slots are issued at standard speed.
pub trait OneWire {
    /// The status type returned by the reset operation.
    type Status: OneWireStatus;
    /// Error raised by the underlying hardware.
    type BusError;

    /// Issues a reset pulse and samples the presence pulse.
    ///
    /// # Errors
    /// Returns [`OneWireError::NoDevicePresent`] or [`OneWireError::ShortCircuit`]
    /// when the line does not behave, or the hardware error.
    fn reset(&mut self) -> OneWireResult<Self::Status, Self::BusError>;

    /// Writes a byte to the bus, least significant bit first.
    fn write_byte(&mut self, byte: u8) -> OneWireResult<(), Self::BusError>;

    /// Reads a byte from the bus, least significant bit first.
    fn read_byte(&mut self) -> OneWireResult<u8, Self::BusError>;

    /// Writes a single bit time slot.
    fn write_bit(&mut self, bit: bool) -> OneWireResult<(), Self::BusError>;

    /// Reads a single bit time slot.
    fn read_bit(&mut self) -> OneWireResult<bool, Self::BusError>;

    /// Writes a sequence of bytes.
    fn write_bytes(&mut self, bytes: &[u8]) -> OneWireResult<(), Self::BusError> {
        for &b in bytes {
            self.write_byte(b)?;
        }
        Ok(())
    }

    /// Fills `buf` with bytes read from the bus.
    fn read_bytes(&mut self, buf: &mut [u8]) -> OneWireResult<(), Self::BusError> {
        for b in buf.iter_mut() {
            *b = self.read_byte()?;
        }
        Ok(())
    }

    /// Resets the bus and addresses every device with Skip ROM.
    ///
    /// On a single-drop bus this selects the only slave.
    fn address_any(&mut self) -> OneWireResult<(), Self::BusError> {
        let status = self.reset()?;
        if status.shortcircuit() {
            return Err(OneWireError::ShortCircuit);
        }
        if !status.presence() {
            return Err(OneWireError::NoDevicePresent);
        }
        self.write_byte(ONEWIRE_SKIP_ROM_CMD)
    }
}
