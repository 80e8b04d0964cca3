use std::io;

use thiserror::Error;

use crate::driver::DriverError;
use crate::executor::ExitStatus;

/// Problems found from the options alone, before the probe is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("JSON output only supported when displaying temperature.")]
    JsonRequiresTemperature,
    #[error("Option -I not supported!")]
    UnsupportedTimestamp,
    #[error("Probe precision out of range!")]
    PrecisionOutOfRange(i64),
}

impl UsageError {
    pub fn exit_status(&self) -> ExitStatus {
        match self {
            UsageError::PrecisionOutOfRange(_) => ExitStatus::Failure,
            UsageError::JsonRequiresTemperature | UsageError::UnsupportedTimestamp => {
                ExitStatus::Usage
            }
        }
    }
}

/// Why an action stopped once the probe was open.
#[derive(Debug, Error)]
pub enum SequenceError {
    #[error(transparent)]
    Driver(#[from] DriverError),
    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),
}
