use thiserror::Error;

/// One wire communication error type.
#[derive(Debug, Error)]
pub enum OneWireError<E> {
    /// Encapsulates the error type from the underlying hardware.
    #[error("{0}")]
    Other(E),
    /// No presence pulse was seen after a reset.
    #[error("No device present!")]
    NoDevicePresent,
    /// The data line is held low.
    #[error("Short circuit detected on the 1-Wire bus!")]
    ShortCircuit,
    /// A byte sequence did not carry a valid CRC-8.
    #[error("CRC mismatch!")]
    InvalidCrc,
}

impl<E> From<E> for OneWireError<E> {
    fn from(other: E) -> Self {
        Self::Other(other)
    }
}
