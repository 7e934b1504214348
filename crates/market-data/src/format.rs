//! Human-readable market cap formatting.
//!
//! Matches the venue's display convention exactly: the largest unit whose
//! threshold the value reaches, rounded half away from zero to an integer.

const UNITS: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];

/// Format a USD market cap, e.g. `472_000_000_000.0` -> `"$472B"`.
pub fn format_market_cap(value: f64) -> String {
    for (threshold, suffix) in UNITS {
        if value >= threshold {
            return format!("${}{}", (value / threshold).round(), suffix);
        }
    }
    format!("${}", value.round())
}
