//! The probe driver contract and the scoped handle built on it.

use core::fmt;

use ds18b20::{ROM_SIZE, ReadoutResolution};
use thiserror::Error;

use crate::error::UsageError;

/// Factory ROM code of the probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RomId([u8; ROM_SIZE]);

impl RomId {
    pub const fn new(bytes: [u8; ROM_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn bytes(&self) -> &[u8; ROM_SIZE] {
        &self.0
    }
}

impl From<[u8; ROM_SIZE]> for RomId {
    fn from(bytes: [u8; ROM_SIZE]) -> Self {
        Self(bytes)
    }
}

impl fmt::LowerHex for RomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|b| write!(f, "{b:02x}"))
    }
}

impl fmt::UpperHex for RomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|b| write!(f, "{b:02X}"))
    }
}

/// Conversion resolution in bits, always within `9..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Precision(ReadoutResolution);

impl Precision {
    pub fn bits(&self) -> u8 {
        self.0.bits()
    }

    pub fn resolution(&self) -> ReadoutResolution {
        self.0
    }
}

impl TryFrom<i64> for Precision {
    type Error = UsageError;

    fn try_from(bits: i64) -> Result<Self, Self::Error> {
        u8::try_from(bits)
            .ok()
            .and_then(ReadoutResolution::from_bits)
            .map(Precision)
            .ok_or(UsageError::PrecisionOutOfRange(bits))
    }
}

/// The driver call that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStep {
    Open,
    Measure,
    Acquire,
    ReadRom,
    SetPrecision,
}

impl fmt::Display for ProbeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProbeStep::Open => "open",
            ProbeStep::Measure => "measure",
            ProbeStep::Acquire => "acquire",
            ProbeStep::ReadRom => "read ROM",
            ProbeStep::SetPrecision => "set precision",
        };
        f.write_str(name)
    }
}

/// A failed driver call, carrying the driver's own last error text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct DriverError {
    pub step: ProbeStep,
    pub message: String,
}

/// Handle-based access to one probe.
///
/// Every call except [`ProbeDriver::open`] works on a handle the driver
/// handed out earlier. After a failure, [`ProbeDriver::last_error_message`]
/// describes what went wrong.
pub trait ProbeDriver {
    type Handle;
    type Error: fmt::Debug;

    fn open(&mut self, port: &str) -> Result<Self::Handle, Self::Error>;

    fn close(&mut self, handle: Self::Handle);

    /// Starts a temperature conversion.
    fn measure(&mut self, handle: &mut Self::Handle) -> Result<(), Self::Error>;

    /// Reads the converted temperature in degrees Celsius.
    fn acquire(&mut self, handle: &mut Self::Handle) -> Result<f32, Self::Error>;

    fn read_rom(&mut self, handle: &mut Self::Handle) -> Result<RomId, Self::Error>;

    /// Programs and persists the conversion resolution.
    fn set_precision(
        &mut self,
        handle: &mut Self::Handle,
        precision: Precision,
    ) -> Result<(), Self::Error>;

    fn last_error_message(&self) -> String;
}

/// An open probe handle that is closed when the session is dropped.
pub struct ProbeSession<'d, D: ProbeDriver> {
    driver: &'d mut D,
    handle: Option<D::Handle>,
}

impl<'d, D: ProbeDriver> ProbeSession<'d, D> {
    pub fn open(driver: &'d mut D, port: &str) -> Result<Self, DriverError> {
        match driver.open(port) {
            Ok(handle) => {
                log::debug!("Probe on {port} opened");
                Ok(Self {
                    driver,
                    handle: Some(handle),
                })
            }
            Err(e) => Err(failure(driver, ProbeStep::Open, e)),
        }
    }

    pub fn measure(&mut self) -> Result<(), DriverError> {
        self.call(ProbeStep::Measure, |d, h| d.measure(h))
    }

    pub fn acquire(&mut self) -> Result<f32, DriverError> {
        self.call(ProbeStep::Acquire, |d, h| d.acquire(h))
    }

    pub fn read_rom(&mut self) -> Result<RomId, DriverError> {
        self.call(ProbeStep::ReadRom, |d, h| d.read_rom(h))
    }

    pub fn set_precision(&mut self, precision: Precision) -> Result<(), DriverError> {
        self.call(ProbeStep::SetPrecision, |d, h| d.set_precision(h, precision))
    }

    fn call<T>(
        &mut self,
        step: ProbeStep,
        f: impl FnOnce(&mut D, &mut D::Handle) -> Result<T, D::Error>,
    ) -> Result<T, DriverError> {
        let Some(handle) = self.handle.as_mut() else {
            return Err(DriverError {
                step,
                message: "Probe handle already closed".into(),
            });
        };
        f(self.driver, handle).map_err(|e| failure(self.driver, step, e))
    }
}

impl<D: ProbeDriver> Drop for ProbeSession<'_, D> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.driver.close(handle);
            log::debug!("Probe closed");
        }
    }
}

fn failure<D: ProbeDriver>(driver: &D, step: ProbeStep, error: D::Error) -> DriverError {
    log::warn!("Probe {step} failed: {error:?}");
    DriverError {
        step,
        message: driver.last_error_message(),
    }
}
