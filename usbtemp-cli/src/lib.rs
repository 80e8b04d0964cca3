//! # usbtemp
//!
//! Controller for a DS18B20 probe hanging off a USB-serial 1-Wire adapter.
//!
//! Command-line flags become [`ParsedOptions`], collapse into one
//! [`ResolvedAction`], and the [`CommandExecutor`] runs that action against a
//! [`ProbeDriver`]: open, trigger a conversion, wait a second, read the
//! result, render it, close.

pub mod action;
pub mod cli;
pub mod driver;
pub mod error;
pub mod executor;
pub mod format;
pub mod options;
pub mod platform;
pub mod probe;
pub mod sequencer;

pub use action::{ResolvedAction, resolve};
pub use driver::{DriverError, Precision, ProbeDriver, ProbeSession, ProbeStep, RomId};
pub use error::{SequenceError, UsageError};
pub use executor::{CommandExecutor, ExitStatus};
pub use options::{HexCase, OutputStyle, ParsedOptions, TemperatureUnit, TimestampStyle, Verbosity};
pub use platform::{HostPlatform, Platform};
pub use probe::SerialProbe;
