//! The per-action protocol run against an open probe.
//!
//! Temperature acquisition is two-phase: trigger a conversion, sleep one
//! second unconditionally, then read the result. Every other action is a
//! single driver call. A failed call ends the run; nothing is retried.

use std::io::Write;

use crate::driver::{Precision, ProbeDriver, ProbeSession};
use crate::error::SequenceError;
use crate::format::{render_rom, render_temperature, render_timestamp};
use crate::options::{HexCase, ParsedOptions, Verbosity};
use crate::platform::Platform;

/// An action that needs the probe, with its parameters already validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceCommand {
    AcquireTemperature,
    ReadRom(HexCase),
    SetPrecision(Precision),
}

pub struct AcquisitionSequencer<'a, P> {
    platform: &'a mut P,
    options: &'a ParsedOptions,
    verbosity: Verbosity,
}

impl<'a, P: Platform> AcquisitionSequencer<'a, P> {
    pub fn new(platform: &'a mut P, options: &'a ParsedOptions, verbosity: Verbosity) -> Self {
        Self {
            platform,
            options,
            verbosity,
        }
    }

    pub fn run<D: ProbeDriver, W: Write>(
        &mut self,
        session: &mut ProbeSession<'_, D>,
        command: DeviceCommand,
        out: &mut W,
    ) -> Result<(), SequenceError> {
        log::debug!("Running {command:?}");
        match command {
            DeviceCommand::AcquireTemperature => self.acquire_temperature(session, out),
            DeviceCommand::ReadRom(case) => {
                let rom = session.read_rom()?;
                writeln!(out, "{}", render_rom(&rom, case))?;
                Ok(())
            }
            DeviceCommand::SetPrecision(precision) => {
                session.set_precision(precision)?;
                Ok(())
            }
        }
    }

    fn acquire_temperature<D: ProbeDriver, W: Write>(
        &mut self,
        session: &mut ProbeSession<'_, D>,
        out: &mut W,
    ) -> Result<(), SequenceError> {
        session.measure()?;
        if self.verbosity == Verbosity::Verbose {
            writeln!(out, "Waiting for response ...")?;
            out.flush()?;
        }
        log::trace!("Waiting for conversion");
        self.platform.wait_one_second();
        let celsius = session.acquire()?;
        let now = self.platform.now();
        log::debug!("Read {celsius} C at {now}");
        let timestamp = render_timestamp(self.options.timestamp, now);
        writeln!(
            out,
            "{}",
            render_temperature(self.options.output, &timestamp, self.options.unit, celsius)
        )?;
        Ok(())
    }
}
