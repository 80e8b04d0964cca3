//! Text rendering of timestamps, temperatures and ROM codes.
//!
//! Nothing here touches the probe or writes anywhere; callers print the
//! returned lines.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, Utc};

use crate::driver::RomId;
use crate::options::{HexCase, OutputStyle, TemperatureUnit, TimestampStyle};

impl TimestampStyle {
    /// strftime pattern for this style.
    pub fn pattern(&self) -> &'static str {
        match self {
            TimestampStyle::Local => "%b %d %H:%M:%S",
            TimestampStyle::UtcBasic => "%Y-%m-%dT%H:%M:%SZ",
            TimestampStyle::UtcExtended => "%FT%T%Z",
        }
    }
}

/// Whether the time formatter understands every specifier in `pattern`.
pub fn strftime_supported(pattern: &str) -> bool {
    StrftimeItems::new(pattern).all(|item| !matches!(item, Item::Error))
}

pub fn render_timestamp(style: TimestampStyle, instant: DateTime<Utc>) -> String {
    match style {
        TimestampStyle::Local => instant
            .with_timezone(&Local)
            .format(style.pattern())
            .to_string(),
        TimestampStyle::UtcBasic | TimestampStyle::UtcExtended => {
            instant.format(style.pattern()).to_string()
        }
    }
}

pub fn to_fahrenheit(celsius: f32) -> f32 {
    9.0 * celsius / 5.0 + 32.0
}

/// One temperature line; `celsius` is converted here when `unit` asks for it.
pub fn render_temperature(
    output: OutputStyle,
    timestamp: &str,
    unit: TemperatureUnit,
    celsius: f32,
) -> String {
    let value = match unit {
        TemperatureUnit::Celsius => celsius,
        TemperatureUnit::Fahrenheit => to_fahrenheit(celsius),
    };
    let letter = unit.letter();
    match output {
        OutputStyle::Plain => format!("{timestamp} Sensor {letter}: {value:.2}"),
        OutputStyle::Json => format!(
            "{{ \"time\": \"{timestamp}\", \"temp_{}\": {value:.2} }}",
            letter.to_ascii_lowercase()
        ),
    }
}

pub fn render_rom(rom: &RomId, case: HexCase) -> String {
    match case {
        HexCase::Lower => format!("ROM: {rom:x}"),
        HexCase::Upper => format!("ROM: {rom:X}"),
    }
}

pub fn banner() -> String {
    format!(
        "USB Thermometer CLI v{} for DS18B20 probes.",
        env!("CARGO_PKG_VERSION")
    )
}

pub const HELP_LINES: [&str; 7] = [
    "\t-f\tDisplay temperature using the Fahrenheit scale",
    "\t-i\tFormat date as UTC ISO 8601, or -I with the timezone name",
    "\t-j\tFormat date and temperature as JSON",
    "\t-p\tSet probe precision {9,10,11,12}",
    "\t-q\tQuiet mode",
    "\t-r\tGet probe serial number (ROM) in hexadecimal, or -R in uppercase hexadecimal",
    "\t-s\tSet serial port",
];
