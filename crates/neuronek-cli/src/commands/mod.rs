pub mod monitor;
pub mod render;
pub mod substances;

use std::path::Path;
use std::time::Duration;

use neuronek_core::{MAX_WINDOW, RenderConfig, SubstanceId, SubstanceTable};

/// Print `Error: ...` and exit with status 1.
fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

/// Load the substance table from `path`, or the built-in table.
pub fn load_substances(path: Option<&str>) -> SubstanceTable {
    match path {
        None => SubstanceTable::builtin(),
        Some(p) => SubstanceTable::load(Path::new(p)).unwrap_or_else(|e| fail(e)),
    }
}

/// Load the render config from `path` (or defaults) and apply a window override.
pub fn load_config(path: Option<&str>, window_hours: Option<f64>) -> RenderConfig {
    let mut config = match path {
        None => RenderConfig::default(),
        Some(p) => RenderConfig::load(Path::new(p)).unwrap_or_else(|e| fail(e)),
    };
    if let Some(hours) = window_hours {
        config.window = parse_window_hours(hours).unwrap_or_else(|e| fail(e));
    }
    config
}

pub fn parse_window_hours(hours: f64) -> Result<Duration, String> {
    if !hours.is_finite() || hours <= 0.0 {
        return Err(format!("window must be a positive number of hours, got {hours}"));
    }
    Duration::try_from_secs_f64(hours * 3600.0)
        .ok()
        .filter(|w| *w <= MAX_WINDOW)
        .ok_or_else(|| format!("window must be at most {} hours", MAX_WINDOW.as_secs() / 3600))
}

/// Parse a typed dose amount. Anything that is not a positive number is `None`.
pub fn parse_amount(s: &str) -> Option<f64> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|a| a.is_finite() && *a > 0.0)
}

/// Parse an age such as `90s`, `45m`, `1.5h` or `2d`. Bare numbers are seconds.
pub fn parse_age(s: &str) -> Result<Duration, String> {
    let s = s.trim();

    let (numeric, multiplier) = if let Some(rest) = s.strip_suffix('s') {
        (rest, 1.0)
    } else if let Some(rest) = s.strip_suffix('m') {
        (rest, 60.0)
    } else if let Some(rest) = s.strip_suffix('h') {
        (rest, 3600.0)
    } else if let Some(rest) = s.strip_suffix('d') {
        (rest, 86_400.0)
    } else {
        (s, 1.0)
    };

    let value: f64 = numeric
        .trim()
        .parse()
        .map_err(|_| format!("invalid age: {s}"))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("invalid age: {s}"));
    }
    Duration::try_from_secs_f64(value * multiplier).map_err(|_| format!("invalid age: {s}"))
}

/// Parse `SUBSTANCE:AMOUNT[:AGO]`, where SUBSTANCE is a symbol or a name.
/// A missing age means "just now".
pub fn parse_dose_spec(
    s: &str,
    table: &SubstanceTable,
) -> Result<(SubstanceId, f64, Duration), String> {
    let mut parts = s.split(':');
    let who = parts.next().unwrap_or("").trim();
    let amount = parts.next().ok_or_else(|| format!("dose '{s}' has no amount"))?;
    let age = parts.next();
    if parts.next().is_some() {
        return Err(format!("dose '{s}' has too many fields"));
    }

    let mut symbol = who.chars();
    let id = match (symbol.next(), symbol.next()) {
        (Some(c), None) => table.find_by_symbol(c),
        _ => table.find_by_name(who),
    }
    .ok_or_else(|| format!("unknown substance '{who}'"))?;

    let amount = parse_amount(amount).ok_or_else(|| format!("invalid amount in dose '{s}'"))?;
    let age = age.map(parse_age).transpose()?.unwrap_or(Duration::ZERO);
    Ok((id, amount, age))
}
