use std::io;
use std::process;

use clap::Parser;
use clap::error::ErrorKind;
use usbtemp::cli::Args;
use usbtemp::{CommandExecutor, ExitStatus, HostPlatform, ParsedOptions, SerialProbe};

fn main() {
    // Initialize the logger
    env_logger::init();
    // Parse command line arguments
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if e.kind() == ErrorKind::DisplayVersion => e.exit(),
        Err(e) => {
            e.print().ok();
            process::exit(ExitStatus::InvalidArguments.code());
        }
    };
    let options = ParsedOptions::from(args);
    log::debug!("Options: {options:?}");

    let mut executor = CommandExecutor::new(SerialProbe::new(), HostPlatform::host());
    let status = executor.execute(&options, &mut io::stdout().lock(), &mut io::stderr().lock());
    process::exit(status.code());
}
