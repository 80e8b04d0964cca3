#![no_std]
//! DS18B20 programmable resolution 1-Wire thermometer.
//!
//! The driver assumes a single-drop bus: every function command is preceded
//! by Skip ROM.

use embedded_onewire::{
    ONEWIRE_READ_ROM_CMD, ONEWIRE_ROM_SIZE, OneWire, OneWireCrc, OneWireError, OneWireResult,
    OneWireStatus,
};
use fixed::types::I12F4;

/// Size of the ROM code in bytes.
pub const ROM_SIZE: usize = ONEWIRE_ROM_SIZE;

/// Factory ROM code: family code, 48-bit serial number, CRC.
pub type Rom = [u8; ROM_SIZE];

/// Temperature in degrees Celsius, 1/16 degree steps.
pub type Temperature = I12F4;

const DS18B20_START_CONV: u8 = 0x44;
const DS18B20_READ_SCRATCH: u8 = 0xbe;
const DS18B20_WRITE_SCRATCH: u8 = 0x4e;
const DS18B20_COPY_SCRATCH: u8 = 0x48;

const SCRATCHPAD_SIZE: usize = 9;

#[derive(Debug, Default)]
pub struct Ds18b20 {
    resolution: ReadoutResolution,
}

impl Ds18b20 {
    #[inline]
    pub const fn family() -> u8 {
        0x28
    }

    pub fn new() -> Self {
        Self::default()
    }

    /// Resolution last seen in the scratchpad, or the power-on default.
    pub fn resolution(&self) -> ReadoutResolution {
        self.resolution
    }

    /// Reads the ROM code of the only device on the bus.
    pub fn read_rom<O: OneWire>(&self, bus: &mut O) -> OneWireResult<Rom, O::BusError> {
        let status = bus.reset()?;
        if !status.presence() {
            return Err(OneWireError::NoDevicePresent);
        }
        bus.write_byte(ONEWIRE_READ_ROM_CMD)?;
        let mut rom = [0; ROM_SIZE];
        bus.read_bytes(&mut rom)?;
        if !OneWireCrc::validate(&rom) {
            return Err(OneWireError::InvalidCrc);
        }
        Ok(rom)
    }

    /// Starts a temperature conversion.
    ///
    /// The caller has to wait out the conversion (750 ms at 12 bits) before
    /// reading the result.
    pub fn trigger_temperature_conversion<O: OneWire>(
        &self,
        bus: &mut O,
    ) -> OneWireResult<(), O::BusError> {
        bus.address_any()?;
        bus.write_byte(DS18B20_START_CONV)
    }

    /// Reads and validates the scratchpad.
    pub fn read_scratchpad<O: OneWire>(
        &mut self,
        bus: &mut O,
    ) -> OneWireResult<Scratchpad, O::BusError> {
        bus.address_any()?;
        bus.write_byte(DS18B20_READ_SCRATCH)?;
        let mut buf = [0; SCRATCHPAD_SIZE];
        bus.read_bytes(&mut buf)?;
        if !OneWireCrc::validate(&buf) {
            return Err(OneWireError::InvalidCrc);
        }
        let scratchpad = Scratchpad(buf);
        if let Ok(resolution) = ReadoutResolution::try_from(scratchpad.configuration()) {
            self.resolution = resolution;
        }
        Ok(scratchpad)
    }

    /// Reads the result of the last conversion.
    pub fn read_temperature<O: OneWire>(
        &mut self,
        bus: &mut O,
    ) -> OneWireResult<Temperature, O::BusError> {
        Ok(self.read_scratchpad(bus)?.temperature())
    }

    /// Programs the conversion resolution and copies it to EEPROM.
    ///
    /// The alarm registers share the scratchpad with the configuration
    /// register, so they are read back first and written unchanged.
    pub fn set_resolution<O: OneWire>(
        &mut self,
        bus: &mut O,
        resolution: ReadoutResolution,
    ) -> OneWireResult<(), O::BusError> {
        let current = self.read_scratchpad(bus)?;
        bus.address_any()?;
        bus.write_bytes(&[
            DS18B20_WRITE_SCRATCH,
            current.alarm_high(),
            current.alarm_low(),
            resolution as u8,
        ])?;
        bus.address_any()?;
        bus.write_byte(DS18B20_COPY_SCRATCH)?;
        self.resolution = resolution;
        Ok(())
    }
}

/// The nine scratchpad bytes, CRC included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scratchpad([u8; SCRATCHPAD_SIZE]);

impl Scratchpad {
    pub fn temperature(&self) -> Temperature {
        let raw = i16::from_le_bytes([self.0[0], self.0[1]]);
        // bits below the configured resolution are undefined
        let mask = match ReadoutResolution::try_from(self.configuration()) {
            Ok(ReadoutResolution::Resolution9bit) => !0b111,
            Ok(ReadoutResolution::Resolution10bit) => !0b11,
            Ok(ReadoutResolution::Resolution11bit) => !0b1,
            _ => !0,
        };
        I12F4::from_bits(raw & mask)
    }

    pub fn alarm_high(&self) -> u8 {
        self.0[2]
    }

    pub fn alarm_low(&self) -> u8 {
        self.0[3]
    }

    pub fn configuration(&self) -> u8 {
        self.0[4]
    }
}

#[repr(u8)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum ReadoutResolution {
    Resolution9bit = 0x1f,
    Resolution10bit = 0x3f,
    Resolution11bit = 0x5f,
    #[default]
    Resolution12bit = 0x7f,
}

impl ReadoutResolution {
    /// Resolution for a bit count in `9..=12`.
    pub fn from_bits(bits: u8) -> Option<Self> {
        use ReadoutResolution::*;
        match bits {
            9 => Some(Resolution9bit),
            10 => Some(Resolution10bit),
            11 => Some(Resolution11bit),
            12 => Some(Resolution12bit),
            _ => None,
        }
    }

    pub fn bits(&self) -> u8 {
        ((*self as u8) >> 5) + 9
    }
}

impl TryFrom<u8> for ReadoutResolution {
    type Error = &'static str;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        use ReadoutResolution::*;
        match value & 0x7f {
            0x1f => Ok(Resolution9bit),
            0x3f => Ok(Resolution10bit),
            0x5f => Ok(Resolution11bit),
            0x7f => Ok(Resolution12bit),
            _ => Err("Invalid readout resolution"),
        }
    }
}
