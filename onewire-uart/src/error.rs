use thiserror::Error;

#[derive(Debug, Error)]
/// UART adapter errors.
pub enum UartError {
    /// The serial port could not be opened or configured.
    #[error("Error, cannot open serial port: {0}")]
    Serial(#[from] serialport::Error),
    /// Reading or writing the serial port failed.
    #[error("Serial port I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Fewer characters came back than were sent.
    #[error("Serial port timeout: {got} of {expected} bytes echoed")]
    ShortEcho {
        /// Bytes sent.
        expected: usize,
        /// Bytes received.
        got: usize,
    },
}
