//! Signal spellings accepted for `signum` and `stop_signal`.

use std::str::FromStr;

use nix::sys::signal::Signal;
use serde_json::Value;

/// Interprets a signal given as a number, a numeric string, or a name with or
/// without the `SIG` prefix in any case.
#[must_use]
pub fn parse_signal(value: &Value) -> Option<Signal> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .and_then(|raw| i32::try_from(raw).ok())
            .and_then(|raw| Signal::try_from(raw).ok()),
        Value::String(text) => parse_signal_name(text.trim()),
        _ => None,
    }
}

fn parse_signal_name(text: &str) -> Option<Signal> {
    if let Ok(raw) = text.parse::<i32>() {
        return Signal::try_from(raw).ok();
    }
    let upper = text.to_ascii_uppercase();
    let name = if upper.starts_with("SIG") {
        upper
    } else {
        format!("SIG{upper}")
    };
    Signal::from_str(&name).ok()
}
