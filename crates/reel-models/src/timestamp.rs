//! Timestamp formatting for segment ranges and logs.

/// Format seconds into HH:MM:SS or HH:MM:SS.mmm string.
///
/// Negative and non-finite inputs render as `00:00:00`.
///
/// # Examples
/// ```
/// use reel_models::timestamp::format_seconds;
/// assert_eq!(format_seconds(90.0), "00:01:30");
/// assert_eq!(format_seconds(30.5), "00:00:30.500");
/// ```
pub fn format_seconds(total_secs: f64) -> String {
    let total_secs = if total_secs.is_finite() { total_secs.max(0.0) } else { 0.0 };
    let hours = (total_secs / 3600.0).floor() as u32;
    let mins = ((total_secs % 3600.0) / 60.0).floor() as u32;
    let secs = total_secs % 60.0;

    // Include milliseconds if present
    if (secs - secs.floor()).abs() > 0.0001 {
        format!("{:02}:{:02}:{:06.3}", hours, mins, secs)
    } else {
        format!("{:02}:{:02}:{:02}", hours, mins, secs.floor() as u32)
    }
}
