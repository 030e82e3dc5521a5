//! ログユーティリティ（stdのみ）

use std::time::{SystemTime, UNIX_EPOCH};

/// UTCのRFC3339（ミリ秒付き）。例: 2025-01-15T10:30:00.123Z
pub fn utc_rfc3339_millis() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let (year, month, day, hour, minute, second) = unix_seconds_to_utc_components(now.as_secs());
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
        year,
        month,
        day,
        hour,
        minute,
        second,
        now.subsec_millis()
    )
}

/// UTCの `YYYY-MM-DDTHH:MM:SS`（タイムゾーン接尾辞なし、秒精度）
pub fn utc_iso8601_seconds() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    iso8601_from_unix_seconds(secs)
}

pub fn iso8601_from_unix_seconds(secs: u64) -> String {
    let (year, month, day, hour, minute, second) = unix_seconds_to_utc_components(secs);
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
        year, month, day, hour, minute, second
    )
}

/// 標準エラー用の1行。例: `[2025-01-15T10:30:00.123Z] [WARN] message`
pub fn console_line(level: &str, message: &str) -> String {
    format_line(&utc_rfc3339_millis(), level, message)
}

fn format_line(timestamp: &str, level: &str, message: &str) -> String {
    format!("[{}] [{}] {}", timestamp, level, message)
}

fn unix_seconds_to_utc_components(secs: u64) -> (i32, u32, u32, u32, u32, u32) {
    let days = (secs / 86_400) as i64;
    let rem = secs % 86_400;
    let hour = (rem / 3_600) as u32;
    let minute = ((rem % 3_600) / 60) as u32;
    let second = (rem % 60) as u32;
    let (year, month, day) = civil_from_days(days);
    (year, month, day, hour, minute, second)
}

fn civil_from_days(days: i64) -> (i32, u32, u32) {
    // Howard Hinnant のアルゴリズム
    let z = days + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + if m <= 2 { 1 } else { 0 };
    (year as i32, m as u32, d as u32)
}
