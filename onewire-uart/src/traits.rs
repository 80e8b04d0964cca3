/// A UART whose TX line is looped back to RX through the 1-Wire data line.
pub trait Uart {
    /// Error raised by the port.
    type Error;

    /// Changes the line speed.
    fn set_baud_rate(&mut self, baud: u32) -> Result<(), Self::Error>;

    /// Sends `buf` and overwrites it with the characters echoed back.
    ///
    /// Any stale input must be discarded before sending.
    fn exchange(&mut self, buf: &mut [u8]) -> Result<(), Self::Error>;
}

impl<T: Uart + ?Sized> Uart for &mut T {
    type Error = T::Error;

    fn set_baud_rate(&mut self, baud: u32) -> Result<(), Self::Error> {
        (**self).set_baud_rate(baud)
    }

    fn exchange(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        (**self).exchange(buf)
    }
}
