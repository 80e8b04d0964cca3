//! Interpreted command-line options.

use crate::action::ResolvedAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    /// Letter shown after "Sensor" and in the JSON field name.
    pub fn letter(&self) -> char {
        match self {
            TemperatureUnit::Celsius => 'C',
            TemperatureUnit::Fahrenheit => 'F',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampStyle {
    /// Local wall clock, `Mon DD HH:MM:SS`.
    #[default]
    Local,
    /// `YYYY-MM-DDTHH:MM:SSZ` in UTC.
    UtcBasic,
    /// `YYYY-MM-DDTHH:MM:SS` in UTC followed by the timezone name.
    UtcExtended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputStyle {
    #[default]
    Plain,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    #[default]
    Verbose,
    Quiet,
}

/// Digit case used when printing the ROM code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HexCase {
    Lower,
    Upper,
}

/// Everything the command line asked for, before any conflict is resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedOptions {
    pub unit: TemperatureUnit,
    pub timestamp: TimestampStyle,
    pub output: OutputStyle,
    pub verbosity: Verbosity,
    pub hex_case: Option<HexCase>,
    /// Raw `-p` value; range checking happens later.
    pub precision: Option<i64>,
    pub help: bool,
    pub serial_port: Option<String>,
}

impl ParsedOptions {
    /// Verbosity after the action is known.
    ///
    /// JSON output silences the chatter so stdout holds only the object, and
    /// Help always talks.
    pub fn effective_verbosity(&self, action: &ResolvedAction) -> Verbosity {
        if *action == ResolvedAction::Help {
            Verbosity::Verbose
        } else if self.output == OutputStyle::Json {
            Verbosity::Quiet
        } else {
            self.verbosity
        }
    }
}
