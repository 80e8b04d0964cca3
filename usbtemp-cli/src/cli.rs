use clap::Parser;

use crate::options::{
    HexCase, OutputStyle, ParsedOptions, TemperatureUnit, TimestampStyle, Verbosity,
};

/// Read a DS18B20 probe on a USB-serial 1-Wire adapter
#[derive(Debug, Parser)]
#[command(
    version,
    about,
    long_about = None,
    disable_help_flag = true,
    args_override_self = true
)]
pub struct Args {
    /// Display temperature using the Fahrenheit scale
    #[arg(short = 'f')]
    pub fahrenheit: bool,

    /// Format date as UTC ISO 8601
    #[arg(short = 'i', overrides_with = "iso_extended")]
    pub iso_basic: bool,

    /// Format date as UTC ISO 8601 with the timezone name
    #[arg(short = 'I', overrides_with = "iso_basic")]
    pub iso_extended: bool,

    /// Format date and temperature as JSON
    #[arg(short = 'j')]
    pub json: bool,

    /// Show the option summary
    #[arg(short = 'h')]
    pub show_help: bool,

    /// Set probe precision {9,10,11,12}
    #[arg(short = 'p', value_name = "BITS", allow_negative_numbers = true)]
    pub precision: Option<i64>,

    /// Quiet mode
    #[arg(short = 'q')]
    pub quiet: bool,

    /// Get probe serial number (ROM) in hexadecimal
    #[arg(short = 'r', overrides_with = "rom_upper")]
    pub rom_lower: bool,

    /// Get probe serial number (ROM) in uppercase hexadecimal
    #[arg(short = 'R', overrides_with = "rom_lower")]
    pub rom_upper: bool,

    /// Set serial port
    #[arg(short = 's', value_name = "PORT")]
    pub serial: Option<String>,

    /// Serial port, takes precedence over -s
    #[arg(value_name = "PORT")]
    pub port: Option<String>,
}

impl From<Args> for ParsedOptions {
    fn from(args: Args) -> Self {
        let timestamp = if args.iso_extended {
            TimestampStyle::UtcExtended
        } else if args.iso_basic {
            TimestampStyle::UtcBasic
        } else {
            TimestampStyle::Local
        };
        let hex_case = if args.rom_upper {
            Some(HexCase::Upper)
        } else if args.rom_lower {
            Some(HexCase::Lower)
        } else {
            None
        };
        ParsedOptions {
            unit: if args.fahrenheit {
                TemperatureUnit::Fahrenheit
            } else {
                TemperatureUnit::Celsius
            },
            timestamp,
            output: if args.json {
                OutputStyle::Json
            } else {
                OutputStyle::Plain
            },
            verbosity: if args.quiet {
                Verbosity::Quiet
            } else {
                Verbosity::Verbose
            },
            hex_case,
            precision: args.precision,
            help: args.show_help,
            serial_port: args.port.or(args.serial),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ResolvedAction, resolve};

    fn parse(argv: &[&str]) -> ParsedOptions {
        let argv = std::iter::once("usbtemp").chain(argv.iter().copied());
        Args::try_parse_from(argv).unwrap().into()
    }

    #[test]
    fn defaults() {
        assert_eq!(parse(&[]), ParsedOptions::default());
    }

    #[test]
    fn flag_order_does_not_matter() {
        let flags = ["-f", "-r", "-p", "11"];
        let forward = resolve(&parse(&flags));
        let backward = resolve(&parse(&["-p", "11", "-r", "-f"]));
        let middle = resolve(&parse(&["-r", "-f", "-p", "11"]));
        assert_eq!(forward, ResolvedAction::AcquireTemperature);
        assert_eq!(forward, backward);
        assert_eq!(forward, middle);

        let rom_first = resolve(&parse(&["-R", "-p", "9"]));
        let rom_last = resolve(&parse(&["-p", "9", "-R"]));
        assert_eq!(rom_first, ResolvedAction::ReadRom(HexCase::Upper));
        assert_eq!(rom_first, rom_last);
    }

    #[test]
    fn last_hex_case_wins() {
        assert_eq!(parse(&["-r", "-R"]).hex_case, Some(HexCase::Upper));
        assert_eq!(parse(&["-R", "-r"]).hex_case, Some(HexCase::Lower));
    }

    #[test]
    fn last_timestamp_style_wins() {
        assert_eq!(parse(&["-i", "-I"]).timestamp, TimestampStyle::UtcExtended);
        assert_eq!(parse(&["-I", "-i"]).timestamp, TimestampStyle::UtcBasic);
    }

    #[test]
    fn positional_port_overrides_dash_s() {
        assert_eq!(
            parse(&["-s", "/dev/ttyUSB1", "/dev/ttyUSB2"]).serial_port.as_deref(),
            Some("/dev/ttyUSB2")
        );
        assert_eq!(
            parse(&["-s", "/dev/ttyUSB1"]).serial_port.as_deref(),
            Some("/dev/ttyUSB1")
        );
    }

    #[test]
    fn combined_short_flags() {
        let opts = parse(&["-fjq"]);
        assert_eq!(opts.unit, TemperatureUnit::Fahrenheit);
        assert_eq!(opts.output, OutputStyle::Json);
        assert_eq!(opts.verbosity, Verbosity::Quiet);
    }

    #[test]
    fn negative_precision_is_accepted_for_later_validation() {
        assert_eq!(parse(&["-p", "-3"]).precision, Some(-3));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(Args::try_parse_from(["usbtemp", "-x"]).is_err());
        assert!(Args::try_parse_from(["usbtemp", "-p", "twelve"]).is_err());
    }

    #[test]
    fn repeated_flags_keep_the_last_value() {
        assert_eq!(
            parse(&["-s", "/dev/a", "-s", "/dev/b"]).serial_port.as_deref(),
            Some("/dev/b")
        );
        assert_eq!(parse(&["-p", "9", "-p", "10"]).precision, Some(10));
        assert_eq!(parse(&["-f", "-f"]).unit, TemperatureUnit::Fahrenheit);
        assert_eq!(parse(&["-q", "-q"]).verbosity, Verbosity::Quiet);
        assert_eq!(parse(&["-i", "-i"]).timestamp, TimestampStyle::UtcBasic);
        assert_eq!(parse(&["-r", "-r"]).hex_case, Some(HexCase::Lower));
    }

    #[test]
    fn dash_h_is_the_help_action() {
        assert!(parse(&["-h"]).help);
    }
}
