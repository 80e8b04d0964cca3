use chrono::{DateTime, TimeZone, Utc};
use usbtemp::{
    CommandExecutor, ExitStatus, HexCase, OutputStyle, ParsedOptions, Platform, Precision,
    ProbeDriver, RomId, TemperatureUnit, TimestampStyle, Verbosity,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Call {
    Open,
    Measure,
    Acquire,
    ReadRom,
    SetPrecision(u8),
    Close,
}

#[derive(Default)]
struct MockDriver {
    calls: Vec<Call>,
    ports: Vec<String>,
    fail_at: Option<Call>,
    celsius: f32,
    rom: [u8; 8],
    last_error: String,
}

impl MockDriver {
    fn reading(celsius: f32) -> Self {
        Self {
            celsius,
            ..Default::default()
        }
    }

    fn failing_at(call: Call) -> Self {
        Self {
            fail_at: Some(call),
            ..Default::default()
        }
    }

    fn step(&mut self, call: Call) -> Result<(), String> {
        self.calls.push(call);
        let fails = match (self.fail_at, call) {
            (Some(Call::SetPrecision(_)), Call::SetPrecision(_)) => true,
            (Some(fail), call) => fail == call,
            (None, _) => false,
        };
        if fails {
            self.last_error = format!("mock {call:?} failed");
            Err(self.last_error.clone())
        } else {
            Ok(())
        }
    }

    fn count(&self, call: Call) -> usize {
        self.calls.iter().filter(|&&c| c == call).count()
    }
}

struct MockHandle;

impl ProbeDriver for MockDriver {
    type Handle = MockHandle;
    type Error = String;

    fn open(&mut self, port: &str) -> Result<MockHandle, String> {
        self.ports.push(port.to_owned());
        self.step(Call::Open).map(|_| MockHandle)
    }

    fn close(&mut self, _handle: MockHandle) {
        self.calls.push(Call::Close);
    }

    fn measure(&mut self, _handle: &mut MockHandle) -> Result<(), String> {
        self.step(Call::Measure)
    }

    fn acquire(&mut self, _handle: &mut MockHandle) -> Result<f32, String> {
        self.step(Call::Acquire).map(|_| self.celsius)
    }

    fn read_rom(&mut self, _handle: &mut MockHandle) -> Result<RomId, String> {
        self.step(Call::ReadRom).map(|_| RomId::new(self.rom))
    }

    fn set_precision(
        &mut self,
        _handle: &mut MockHandle,
        precision: Precision,
    ) -> Result<(), String> {
        self.step(Call::SetPrecision(precision.bits()))
    }

    fn last_error_message(&self) -> String {
        self.last_error.clone()
    }
}

struct MockPlatform {
    waits: usize,
    extended_supported: bool,
}

impl Default for MockPlatform {
    fn default() -> Self {
        Self {
            waits: 0,
            extended_supported: true,
        }
    }
}

impl Platform for MockPlatform {
    fn default_serial_port(&self) -> &str {
        "/dev/mock0"
    }

    fn wait_one_second(&mut self) {
        self.waits += 1;
    }

    fn now(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn supports_timestamp(&self, style: TimestampStyle) -> bool {
        style != TimestampStyle::UtcExtended || self.extended_supported
    }
}

struct Run {
    status: ExitStatus,
    out: String,
    err: String,
    driver_calls: Vec<Call>,
    ports: Vec<String>,
    waits: usize,
    closes: usize,
}

fn run_with(driver: MockDriver, platform: MockPlatform, options: ParsedOptions) -> Run {
    let mut executor = CommandExecutor::new(driver, platform);
    let mut out = Vec::new();
    let mut err = Vec::new();
    let status = executor.execute(&options, &mut out, &mut err);
    Run {
        status,
        out: String::from_utf8(out).unwrap(),
        err: String::from_utf8(err).unwrap(),
        driver_calls: executor.driver().calls.clone(),
        ports: executor.driver().ports.clone(),
        waits: executor.platform().waits,
        closes: executor.driver().count(Call::Close),
    }
}

fn run(driver: MockDriver, options: ParsedOptions) -> Run {
    run_with(driver, MockPlatform::default(), options)
}

fn quiet() -> ParsedOptions {
    ParsedOptions {
        verbosity: Verbosity::Quiet,
        ..Default::default()
    }
}

#[test]
fn json_acquisition_output_is_exact() {
    let options = ParsedOptions {
        output: OutputStyle::Json,
        timestamp: TimestampStyle::UtcBasic,
        ..Default::default()
    };
    let run = run(MockDriver::reading(21.5), options);
    assert_eq!(run.status, ExitStatus::Success);
    assert_eq!(
        run.out,
        "{ \"time\": \"2024-01-01T00:00:00Z\", \"temp_c\": 21.50 }\n"
    );
    assert_eq!(
        run.driver_calls,
        vec![Call::Open, Call::Measure, Call::Acquire, Call::Close]
    );
    assert_eq!(run.waits, 1);
}

#[test]
fn verbose_fahrenheit_acquisition() {
    let options = ParsedOptions {
        unit: TemperatureUnit::Fahrenheit,
        timestamp: TimestampStyle::UtcBasic,
        ..Default::default()
    };
    let run = run(MockDriver::reading(100.0), options);
    assert_eq!(run.status, ExitStatus::Success);
    let lines: Vec<&str> = run.out.lines().collect();
    assert!(lines[0].starts_with("USB Thermometer CLI v"));
    assert_eq!(lines[1], "Using serial port: /dev/mock0");
    assert_eq!(lines[2], "Waiting for response ...");
    assert_eq!(lines[3], "2024-01-01T00:00:00Z Sensor F: 212.00");
    assert_eq!(lines.len(), 4);
    assert!(run.err.is_empty());
}

#[test]
fn quiet_prints_only_the_reading() {
    let options = ParsedOptions {
        timestamp: TimestampStyle::UtcExtended,
        ..quiet()
    };
    let run = run(MockDriver::reading(0.0), options);
    assert_eq!(run.out, "2024-01-01T00:00:00UTC Sensor C: 0.00\n");
}

#[test]
fn rom_in_both_cases() {
    for (case, expected) in [
        (HexCase::Lower, "ROM: 280aff0000000042\n"),
        (HexCase::Upper, "ROM: 280AFF0000000042\n"),
    ] {
        let mut driver = MockDriver::default();
        driver.rom = [0x28, 0x0a, 0xff, 0, 0, 0, 0, 0x42];
        let options = ParsedOptions {
            hex_case: Some(case),
            ..quiet()
        };
        let run = run(driver, options);
        assert_eq!(run.status, ExitStatus::Success);
        assert_eq!(run.out, expected);
        assert_eq!(run.driver_calls, vec![Call::Open, Call::ReadRom, Call::Close]);
        assert_eq!(run.waits, 0);
    }
}

#[test]
fn valid_precisions_reach_the_driver_unchanged() {
    for bits in 9..=12u8 {
        let options = ParsedOptions {
            precision: Some(bits.into()),
            ..quiet()
        };
        let run = run(MockDriver::default(), options);
        assert_eq!(run.status, ExitStatus::Success);
        assert_eq!(
            run.driver_calls,
            vec![Call::Open, Call::SetPrecision(bits), Call::Close]
        );
    }
}

#[test]
fn out_of_range_precision_never_touches_the_driver() {
    for bits in [8, 13] {
        let options = ParsedOptions {
            precision: Some(bits),
            ..quiet()
        };
        let run = run(MockDriver::default(), options);
        assert_eq!(run.status, ExitStatus::Failure);
        assert_eq!(run.status.code(), 1);
        assert!(run.driver_calls.is_empty());
        assert_eq!(run.err, "Probe precision out of range!\n");
    }
}

#[test]
fn json_with_other_actions_is_a_usage_error() {
    let rom = ParsedOptions {
        output: OutputStyle::Json,
        hex_case: Some(HexCase::Lower),
        ..Default::default()
    };
    let precision = ParsedOptions {
        output: OutputStyle::Json,
        precision: Some(10),
        ..Default::default()
    };
    let help = ParsedOptions {
        output: OutputStyle::Json,
        help: true,
        ..Default::default()
    };
    for options in [rom, precision, help] {
        let run = run(MockDriver::default(), options);
        assert_eq!(run.status, ExitStatus::Usage);
        assert!(run.status.code() < 0);
        assert!(run.driver_calls.is_empty());
        assert!(run.out.is_empty());
        assert_eq!(
            run.err,
            "JSON output only supported when displaying temperature.\n"
        );
    }
}

#[test]
fn fahrenheit_with_json_and_rom_flags_still_acquires() {
    let options = ParsedOptions {
        unit: TemperatureUnit::Fahrenheit,
        output: OutputStyle::Json,
        hex_case: Some(HexCase::Upper),
        timestamp: TimestampStyle::UtcBasic,
        ..Default::default()
    };
    let run = run(MockDriver::reading(0.0), options);
    assert_eq!(run.status, ExitStatus::Success);
    assert_eq!(
        run.out,
        "{ \"time\": \"2024-01-01T00:00:00Z\", \"temp_f\": 32.00 }\n"
    );
}

#[test]
fn help_is_verbose_and_offline() {
    let options = ParsedOptions {
        help: true,
        precision: Some(42),
        ..quiet()
    };
    let run = run(MockDriver::default(), options);
    assert_eq!(run.status, ExitStatus::Success);
    assert!(run.out.starts_with("USB Thermometer CLI v"));
    assert!(run.out.contains("\t-p\tSet probe precision {9,10,11,12}\n"));
    assert!(run.driver_calls.is_empty());
}

#[test]
fn unsupported_extended_timestamp_is_reported_before_io() {
    let platform = MockPlatform {
        extended_supported: false,
        ..Default::default()
    };
    let options = ParsedOptions {
        timestamp: TimestampStyle::UtcExtended,
        ..quiet()
    };
    let run = run_with(MockDriver::default(), platform, options);
    assert_eq!(run.status, ExitStatus::Usage);
    assert_eq!(run.status.code(), -2);
    assert_eq!(run.err, "Option -I not supported!\n");
    assert!(run.driver_calls.is_empty());
}

#[test]
fn explicit_port_wins_over_default() {
    let options = ParsedOptions {
        serial_port: Some("/dev/ttyACM3".into()),
        ..quiet()
    };
    let run = run(MockDriver::reading(20.0), options);
    assert_eq!(run.ports, vec!["/dev/ttyACM3".to_owned()]);
}

#[test]
fn handle_is_released_exactly_once_on_every_path() {
    let rom = ParsedOptions {
        hex_case: Some(HexCase::Lower),
        ..quiet()
    };
    let precision = ParsedOptions {
        precision: Some(11),
        ..quiet()
    };
    let cases = [
        (quiet(), Call::Measure),
        (quiet(), Call::Acquire),
        (rom, Call::ReadRom),
        (precision, Call::SetPrecision(11)),
    ];
    for (options, failing) in cases {
        let run = run(MockDriver::failing_at(failing), options.clone());
        assert_eq!(run.status, ExitStatus::Failure, "{failing:?}");
        assert_eq!(run.closes, 1, "{failing:?}");
        assert_eq!(run.driver_calls.first(), Some(&Call::Open));
        assert_eq!(run.driver_calls.last(), Some(&Call::Close));
        assert_eq!(run.err, format!("mock {failing:?} failed\n"));
        assert!(run.out.is_empty());

        let ok = run_with(MockDriver::reading(1.0), MockPlatform::default(), options);
        assert_eq!(ok.status, ExitStatus::Success);
        assert_eq!(ok.closes, 1);
        assert_eq!(ok.driver_calls.last(), Some(&Call::Close));
    }
}

#[test]
fn failed_measure_skips_the_wait() {
    let run = run(MockDriver::failing_at(Call::Measure), ParsedOptions::default());
    assert_eq!(run.waits, 0);
    assert_eq!(run.driver_calls, vec![Call::Open, Call::Measure, Call::Close]);
    assert!(!run.out.contains("Waiting for response"));
}

#[test]
fn failed_open_never_closes() {
    for options in [
        quiet(),
        ParsedOptions {
            hex_case: Some(HexCase::Upper),
            ..quiet()
        },
        ParsedOptions {
            precision: Some(9),
            ..quiet()
        },
    ] {
        let run = run(MockDriver::failing_at(Call::Open), options);
        assert_eq!(run.status, ExitStatus::Failure);
        assert_eq!(run.driver_calls, vec![Call::Open]);
        assert_eq!(run.closes, 0);
        assert_eq!(run.err, "mock Open failed\n");
    }
}
