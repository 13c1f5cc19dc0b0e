//! Timestamp normalization for SubRip timing lines
//!
//! Converts the textual `H`, `MM`, `SS` and fraction groups of a timing line
//! into seconds. The fraction is read as milliseconds scaled by its digit
//! width, so `1,5`, `1,50` and `1,500` all mean one and a half seconds.

use super::errors::{DualSubError, Result};

/// Convert textual timestamp components to seconds
///
/// A one-digit fraction is tenths, two digits are hundredths, three or more
/// digits are taken as milliseconds verbatim.
///
/// # Errors
///
/// Returns [`DualSubError::InvalidTimestamp`] when a group is not a plain
/// run of ASCII digits or does not fit in a `u64`.
///
/// # Examples
///
/// ```rust
/// use dualsub_core::to_seconds;
///
/// assert_eq!(to_seconds("0", "0", "1", "50")?, 1.5);
/// assert_eq!(to_seconds("0", "0", "0", "005")?, 0.005);
/// # Ok::<(), dualsub_core::DualSubError>(())
/// ```
pub fn to_seconds(hours: &str, minutes: &str, seconds: &str, fraction: &str) -> Result<f64> {
    let hours = parse_group(hours)?;
    let minutes = parse_group(minutes)?;
    let seconds = parse_group(seconds)?;

    let mut millis = parse_group(fraction)?;
    match fraction.len() {
        1 => millis *= 100,
        2 => millis *= 10,
        _ => {}
    }

    #[allow(clippy::cast_precision_loss)]
    let whole = (hours * 3600 + minutes * 60 + seconds) as f64;
    #[allow(clippy::cast_precision_loss)]
    let frac = millis as f64 / 1000.0;
    Ok(whole + frac)
}

fn parse_group(group: &str) -> Result<u64> {
    if group.is_empty() || !group.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DualSubError::invalid_timestamp(group));
    }
    let value: u64 = group
        .parse()
        .map_err(|_| DualSubError::invalid_timestamp(group))?;
    // Keep hours * 3600 well inside u64.
    if value > u64::from(u32::MAX) {
        return Err(DualSubError::invalid_timestamp(group));
    }
    Ok(value)
}

/// Format seconds as a SubRip timestamp (`HH:MM:SS,mmm`)
///
/// Negative and non-finite inputs clamp to zero.
#[must_use]
pub fn format_timestamp(seconds: f64) -> String {
    let seconds = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total_ms = (seconds * 1000.0).round() as u64;
    let ms = total_ms % 1000;
    let total_secs = total_ms / 1000;
    let secs = total_secs % 60;
    let total_mins = total_secs / 60;
    let mins = total_mins % 60;
    let hours = total_mins / 60;

    format!("{hours:02}:{mins:02}:{secs:02},{ms:03}")
}
