//! Frame duration normalization.
//!
//! Durations in sheet files are strings in one of two spellings: decimal
//! seconds (`"0.05"`) or an integer-or-float frame count suffixed with `f`
//! at a fixed 60 ticks per second (`"30f"` is half a second). Normalization
//! maps both onto plain f64 seconds.

/// Fixed tick rate for `f`-suffixed durations.
pub const TICKS_PER_SECOND: f64 = 60.0;

/// Normalize a duration string to seconds.
///
/// Leading/trailing whitespace is ignored and the `f` suffix is matched
/// case-insensitively. Unparseable input yields `f64::NAN`; callers must
/// treat any non-finite result as a fatal input error for that frame, never
/// as zero.
pub fn parse_duration(duration: &str) -> f64 {
    let duration = duration.trim();

    if let Some(ticks) = duration
        .strip_suffix('f')
        .or_else(|| duration.strip_suffix('F'))
    {
        return ticks.trim().parse::<f64>().unwrap_or(f64::NAN) / TICKS_PER_SECOND;
    }

    duration.parse::<f64>().unwrap_or(f64::NAN)
}

/// Re-serialize a resolved duration as a plain decimal-seconds string.
///
/// Uses shortest round-trip formatting, so `format_duration(parse_duration(s))`
/// preserves the exact value for any already-decimal `s`.
pub fn format_duration(seconds: f64) -> String {
    format!("{}", seconds)
}
