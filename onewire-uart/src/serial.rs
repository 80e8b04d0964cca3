use crate::{DATA_BAUD, Uart, UartError};
use serialport::{ClearBuffer, DataBits, FlowControl, Parity, SerialPort, StopBits};
use std::io::{ErrorKind, Read, Write};
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_millis(500);

/// Opens `path` as an 8N1 port with no flow control, ready for bit slots.
pub fn open_serial(path: &str) -> Result<Box<dyn SerialPort>, UartError> {
    let port = serialport::new(path, DATA_BAUD)
        .timeout(TIMEOUT)
        .data_bits(DataBits::Eight)
        .flow_control(FlowControl::None)
        .parity(Parity::None)
        .stop_bits(StopBits::One)
        .open()?;
    log::debug!("Opened {path} at {DATA_BAUD} baud");
    Ok(port)
}

impl Uart for Box<dyn SerialPort> {
    type Error = UartError;

    fn set_baud_rate(&mut self, baud: u32) -> Result<(), Self::Error> {
        SerialPort::set_baud_rate(&mut **self, baud)?;
        Ok(())
    }

    fn exchange(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.clear(ClearBuffer::Input)?;
        self.write_all(buf)?;
        self.flush()?;
        let mut got = 0;
        while got < buf.len() {
            match self.read(&mut buf[got..]) {
                Ok(0) => break,
                Ok(n) => got += n,
                Err(e) if e.kind() == ErrorKind::TimedOut => break,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        if got < buf.len() {
            return Err(UartError::ShortEcho {
                expected: buf.len(),
                got,
            });
        }
        Ok(())
    }
}
