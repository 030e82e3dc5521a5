//! 時刻ポート

pub trait Clock {
    /// 現在のUTC時刻（`YYYY-MM-DDTHH:MM:SS`、タイムゾーン接尾辞なし）
    fn now_utc_iso8601(&self) -> String;
}
