use std::io::{self, Write};

use crate::action::{ResolvedAction, resolve};
use crate::driver::{Precision, ProbeDriver, ProbeSession};
use crate::error::{SequenceError, UsageError};
use crate::format::{HELP_LINES, banner};
use crate::options::{OutputStyle, ParsedOptions, Verbosity};
use crate::platform::Platform;
use crate::sequencer::{AcquisitionSequencer, DeviceCommand};

/// Process exit status of one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    /// A driver call failed or the precision was out of range.
    Failure,
    /// The command line could not be parsed.
    InvalidArguments,
    /// The options conflict or ask for something this host cannot do.
    Usage,
}

impl ExitStatus {
    pub fn code(self) -> i32 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
            ExitStatus::InvalidArguments => -1,
            ExitStatus::Usage => -2,
        }
    }
}

/// Runs one invocation: resolve, open, sequence, close.
pub struct CommandExecutor<D, P> {
    driver: D,
    platform: P,
}

impl<D: ProbeDriver, P: Platform> CommandExecutor<D, P> {
    pub fn new(driver: D, platform: P) -> Self {
        Self { driver, platform }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn execute<O: Write, E: Write>(
        &mut self,
        options: &ParsedOptions,
        out: &mut O,
        err: &mut E,
    ) -> ExitStatus {
        match self.run(options, out, err) {
            Ok(status) => status,
            Err(e) => {
                log::error!("Cannot write output: {e}");
                ExitStatus::Failure
            }
        }
    }

    fn run<O: Write, E: Write>(
        &mut self,
        options: &ParsedOptions,
        out: &mut O,
        err: &mut E,
    ) -> io::Result<ExitStatus> {
        let action = resolve(options);
        let verbosity = options.effective_verbosity(&action);
        log::debug!("Resolved {action:?}");

        if options.output == OutputStyle::Json && action != ResolvedAction::AcquireTemperature {
            return report(err, UsageError::JsonRequiresTemperature);
        }
        if verbosity == Verbosity::Verbose {
            writeln!(out, "{}", banner())?;
        }
        let command = match self.plan(options, action) {
            Ok(Some(command)) => command,
            Ok(None) => {
                for line in HELP_LINES {
                    writeln!(out, "{line}")?;
                }
                out.flush()?;
                return Ok(ExitStatus::Success);
            }
            Err(e) => return report(err, e),
        };

        let port = options
            .serial_port
            .as_deref()
            .unwrap_or(self.platform.default_serial_port())
            .to_owned();
        if verbosity == Verbosity::Verbose {
            writeln!(out, "Using serial port: {port}")?;
        }
        out.flush()?;

        let mut session = match ProbeSession::open(&mut self.driver, &port) {
            Ok(session) => session,
            Err(e) => {
                log::debug!("Giving up after failed {}", e.step);
                writeln!(err, "{e}")?;
                return Ok(ExitStatus::Failure);
            }
        };
        let mut sequencer = AcquisitionSequencer::new(&mut self.platform, options, verbosity);
        let status = match sequencer.run(&mut session, command, out) {
            Ok(()) => ExitStatus::Success,
            Err(SequenceError::Driver(e)) => {
                log::debug!("Giving up after failed {}", e.step);
                writeln!(err, "{e}")?;
                ExitStatus::Failure
            }
            Err(SequenceError::Output(e)) => return Err(e),
        };
        drop(session);
        out.flush()?;
        Ok(status)
    }

    /// Checks everything that can be checked without the probe.
    ///
    /// `None` means the action is Help.
    fn plan(
        &self,
        options: &ParsedOptions,
        action: ResolvedAction,
    ) -> Result<Option<DeviceCommand>, UsageError> {
        let command = match action {
            ResolvedAction::Help => return Ok(None),
            ResolvedAction::AcquireTemperature => DeviceCommand::AcquireTemperature,
            ResolvedAction::ReadRom(case) => DeviceCommand::ReadRom(case),
            ResolvedAction::SetPrecision(bits) => {
                DeviceCommand::SetPrecision(Precision::try_from(bits)?)
            }
        };
        if !self.platform.supports_timestamp(options.timestamp) {
            return Err(UsageError::UnsupportedTimestamp);
        }
        Ok(Some(command))
    }
}

fn report<E: Write>(err: &mut E, error: UsageError) -> io::Result<ExitStatus> {
    log::debug!("Usage error: {error:?}");
    writeln!(err, "{error}")?;
    Ok(error.exit_status())
}
