//! 固定識別子
//!
//! 設定ファイルは持たず、OS上の名前付きリソースはすべてここの定数から解決する。

/// アプリケーション名（イベントログソース名）
pub const APP_NAME: &str = "TransitionFixer";

/// イベントログソースのレジストリ親パス（HKLM配下）
pub const EVENT_LOG_APPLICATION_KEY: &str =
    r"SYSTEM\CurrentControlSet\Services\EventLog\Application";

/// タスクスケジューラ上の表示名
pub const TASK_NAME: &str = "Transition Fixer";

/// タスクを登録するフォルダ（ルート）
pub const TASK_ROOT_FOLDER: &str = "\\";

pub const TASK_AUTHOR: &str = "Limotto Productions";

pub const TASK_DESCRIPTION: &str = "Fixes an issue where the Windows desktop does not play a fade \
transition effect when changing wallpapers by enabling Active Desktop.";

pub const TASK_VERSION: &str = "1.0";

/// ログオン後の遅延（Explorerの初期化待ち）
pub const LOGON_DELAY: &str = "PT30S";

/// タスクから再起動するときの実行モード
pub const RUN_MODE_TOKEN: &str = "run";

/// イベントログソース名からレジストリキーのパスを導出
pub fn event_log_key_path(source_name: &str) -> String {
    format!("{}\\{}", EVENT_LOG_APPLICATION_KEY, source_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_path_is_derived_from_source_name() {
        assert_eq!(
            event_log_key_path(APP_NAME),
            r"SYSTEM\CurrentControlSet\Services\EventLog\Application\TransitionFixer"
        );
    }

    #[test]
    fn logon_delay_is_thirty_seconds() {
        assert_eq!(LOGON_DELAY, "PT30S");
        assert_eq!(RUN_MODE_TOKEN, "run");
    }
}
