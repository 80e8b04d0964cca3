//! Host services: default port, the one-second wait, the wall clock.

use chrono::{DateTime, Utc};
use embedded_hal::delay::DelayNs;

use crate::format::strftime_supported;
use crate::options::TimestampStyle;

#[cfg(not(windows))]
pub const DEFAULT_SERIAL_PORT: &str = "/dev/ttyUSB0";
#[cfg(windows)]
pub const DEFAULT_SERIAL_PORT: &str = "COM1";

pub trait Platform {
    fn default_serial_port(&self) -> &str;

    /// Blocks for one second.
    fn wait_one_second(&mut self);

    fn now(&self) -> DateTime<Utc>;

    /// Whether timestamps in `style` can be produced on this host.
    fn supports_timestamp(&self, style: TimestampStyle) -> bool {
        strftime_supported(style.pattern())
    }
}

#[cfg(target_os = "linux")]
pub type HostDelay = linux_embedded_hal::Delay;

#[cfg(not(target_os = "linux"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct HostDelay;

#[cfg(not(target_os = "linux"))]
impl DelayNs for HostDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(ns.into()));
    }
}

/// The real host, with the wait delegated to a [`DelayNs`] timer.
pub struct HostPlatform<D> {
    delay: D,
}

impl<D: DelayNs> HostPlatform<D> {
    pub fn new(delay: D) -> Self {
        Self { delay }
    }
}

impl HostPlatform<HostDelay> {
    pub fn host() -> Self {
        Self::new(HostDelay {})
    }
}

impl<D: DelayNs> Platform for HostPlatform<D> {
    fn default_serial_port(&self) -> &str {
        DEFAULT_SERIAL_PORT
    }

    fn wait_one_second(&mut self) {
        self.delay.delay_ms(1000);
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
