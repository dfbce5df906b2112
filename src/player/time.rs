/// Format seconds as `m:ss`.
///
/// Minutes are not capped at 59. Values that are not a usable time (NaN,
/// infinite, negative) render as `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }

    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
