//! Collapses the option set into a single action.
//!
//! Resolution starts from [`ResolvedAction::AcquireTemperature`] and applies
//! each rule of [`OVERRIDE_RULES`] in turn; a rule either keeps the action it
//! is handed or replaces it. Conflicting flags never raise an error.

use crate::options::{HexCase, ParsedOptions, TemperatureUnit};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedAction {
    Help,
    AcquireTemperature,
    ReadRom(HexCase),
    /// Requested precision in bits, not yet range checked.
    SetPrecision(i64),
}

type OverrideRule = fn(&ParsedOptions, ResolvedAction) -> ResolvedAction;

/// Later rules win.
const OVERRIDE_RULES: [OverrideRule; 4] =
    [precision_rule, hex_case_rule, fahrenheit_rule, help_rule];

fn precision_rule(options: &ParsedOptions, action: ResolvedAction) -> ResolvedAction {
    options
        .precision
        .map_or(action, ResolvedAction::SetPrecision)
}

// Wins over -p when both are given.
fn hex_case_rule(options: &ParsedOptions, action: ResolvedAction) -> ResolvedAction {
    options.hex_case.map_or(action, ResolvedAction::ReadRom)
}

fn fahrenheit_rule(options: &ParsedOptions, action: ResolvedAction) -> ResolvedAction {
    match options.unit {
        TemperatureUnit::Fahrenheit => ResolvedAction::AcquireTemperature,
        TemperatureUnit::Celsius => action,
    }
}

fn help_rule(options: &ParsedOptions, action: ResolvedAction) -> ResolvedAction {
    if options.help {
        ResolvedAction::Help
    } else {
        action
    }
}

/// Picks the one action this invocation performs.
pub fn resolve(options: &ParsedOptions) -> ResolvedAction {
    OVERRIDE_RULES
        .iter()
        .fold(ResolvedAction::AcquireTemperature, |action, rule| {
            rule(options, action)
        })
}
