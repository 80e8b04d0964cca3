//! [`ProbeDriver`] for a DS18B20 on a usbtemp.com style USB-UART adapter.

use ds18b20::Ds18b20;
use onewire_uart::{OneWire, OneWireError, UartError, UartOneWire, open_serial};
use serialport::SerialPort;
use thiserror::Error;

use crate::driver::{Precision, ProbeDriver, RomId};

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error(transparent)]
    Uart(#[from] UartError),
    #[error(transparent)]
    Bus(#[from] OneWireError<UartError>),
}

pub struct ProbeHandle {
    bus: UartOneWire<Box<dyn SerialPort>>,
    sensor: Ds18b20,
}

/// Talks to the probe over a serial port, remembering the last failure.
#[derive(Debug, Default)]
pub struct SerialProbe {
    last_error: String,
}

impl SerialProbe {
    pub fn new() -> Self {
        Self::default()
    }

    fn record<T>(&mut self, result: Result<T, ProbeError>) -> Result<T, ProbeError> {
        if let Err(e) = &result {
            self.last_error = e.to_string();
        }
        result
    }
}

fn open_probe(port: &str) -> Result<ProbeHandle, ProbeError> {
    let mut bus = UartOneWire::new(open_serial(port)?)?;
    // fail early when nothing answers on the line
    bus.reset()?;
    Ok(ProbeHandle {
        bus,
        sensor: Ds18b20::new(),
    })
}

impl ProbeDriver for SerialProbe {
    type Handle = ProbeHandle;
    type Error = ProbeError;

    fn open(&mut self, port: &str) -> Result<ProbeHandle, ProbeError> {
        let result = open_probe(port);
        self.record(result)
    }

    fn close(&mut self, handle: ProbeHandle) {
        drop(handle.bus.release());
    }

    fn measure(&mut self, handle: &mut ProbeHandle) -> Result<(), ProbeError> {
        let result = handle
            .sensor
            .trigger_temperature_conversion(&mut handle.bus)
            .map_err(ProbeError::from);
        self.record(result)
    }

    fn acquire(&mut self, handle: &mut ProbeHandle) -> Result<f32, ProbeError> {
        let result = handle
            .sensor
            .read_temperature(&mut handle.bus)
            .map(|t| t.to_num::<f32>())
            .map_err(ProbeError::from);
        self.record(result)
    }

    fn read_rom(&mut self, handle: &mut ProbeHandle) -> Result<RomId, ProbeError> {
        let result = handle
            .sensor
            .read_rom(&mut handle.bus)
            .map(RomId::from)
            .map_err(ProbeError::from);
        self.record(result)
    }

    fn set_precision(
        &mut self,
        handle: &mut ProbeHandle,
        precision: Precision,
    ) -> Result<(), ProbeError> {
        let result = handle
            .sensor
            .set_resolution(&mut handle.bus, precision.resolution())
            .map_err(ProbeError::from);
        if result.is_ok() {
            log::debug!("Precision set to {} bits", precision.bits());
        }
        self.record(result)
    }

    fn last_error_message(&self) -> String {
        self.last_error.clone()
    }
}
