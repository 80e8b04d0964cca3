use crate::{DATA_BAUD, RESET_BAUD, Uart, UartOneWire};
use embedded_onewire::{OneWire, OneWireError, OneWireResult, OneWireStatus};

pub(crate) const ONEWIRE_RESET_PULSE: u8 = 0xf0;
pub(crate) const ONEWIRE_SLOT_ONE: u8 = 0xff;
pub(crate) const ONEWIRE_SLOT_ZERO: u8 = 0x00;

/// What the line looked like after a reset pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetStatus {
    echo: u8,
}

impl ResetStatus {
    /// The raw character echoed back during the reset pulse.
    pub fn echo(&self) -> u8 {
        self.echo
    }
}

impl OneWireStatus for ResetStatus {
    fn presence(&self) -> bool {
        self.echo != ONEWIRE_RESET_PULSE && self.echo != 0x00
    }

    fn shortcircuit(&self) -> bool {
        self.echo == 0x00
    }
}

impl<U: Uart> OneWire for UartOneWire<U> {
    type Status = ResetStatus;

    type BusError = U::Error;

    fn reset(&mut self) -> OneWireResult<Self::Status, Self::BusError> {
        self.switch_baud(RESET_BAUD)?;
        let mut buf = [ONEWIRE_RESET_PULSE];
        self.uart.exchange(&mut buf)?;
        self.switch_baud(DATA_BAUD)?;
        let status = ResetStatus { echo: buf[0] };
        log::trace!("1-Wire reset echo {:#04x}", status.echo);
        if status.shortcircuit() {
            Err(OneWireError::ShortCircuit)
        } else if !status.presence() {
            Err(OneWireError::NoDevicePresent)
        } else {
            Ok(status)
        }
    }

    fn write_byte(&mut self, byte: u8) -> OneWireResult<(), Self::BusError> {
        let mut slots = byte_to_slots(byte);
        self.uart.exchange(&mut slots)?;
        Ok(())
    }

    fn read_byte(&mut self) -> OneWireResult<u8, Self::BusError> {
        let mut slots = [ONEWIRE_SLOT_ONE; 8];
        self.uart.exchange(&mut slots)?;
        Ok(slots_to_byte(&slots))
    }

    fn write_bit(&mut self, bit: bool) -> OneWireResult<(), Self::BusError> {
        let mut slot = [if bit { ONEWIRE_SLOT_ONE } else { ONEWIRE_SLOT_ZERO }];
        self.uart.exchange(&mut slot)?;
        Ok(())
    }

    fn read_bit(&mut self) -> OneWireResult<bool, Self::BusError> {
        let mut slot = [ONEWIRE_SLOT_ONE];
        self.uart.exchange(&mut slot)?;
        Ok(slot[0] == ONEWIRE_SLOT_ONE)
    }
}

fn byte_to_slots(byte: u8) -> [u8; 8] {
    let mut slots = [ONEWIRE_SLOT_ZERO; 8];
    for (i, slot) in slots.iter_mut().enumerate() {
        if byte & (1 << i) != 0 {
            *slot = ONEWIRE_SLOT_ONE;
        }
    }
    slots
}

fn slots_to_byte(slots: &[u8; 8]) -> u8 {
    slots
        .iter()
        .enumerate()
        .filter(|&(_, &s)| s == ONEWIRE_SLOT_ONE)
        .fold(0, |acc, (i, _)| acc | (1 << i))
}
