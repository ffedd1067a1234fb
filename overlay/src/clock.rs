//! Playback clock readout.

/// Format a playback position as zero-padded `MM:SS`.
///
/// Fractional seconds are truncated. Negative or non-finite input shows `00:00`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_clock(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 { seconds.floor() as u64 } else { 0 };
    format!("{:02}:{:02}", total / 60, total % 60)
}
