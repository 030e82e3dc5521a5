//! イベントログソース登録と重大度

use std::path::PathBuf;

use super::identity::event_log_key_path;

/// EVENTLOG_ERROR_TYPE
pub const EVENTLOG_ERROR_TYPE: u16 = 0x0001;
/// EVENTLOG_WARNING_TYPE
pub const EVENTLOG_WARNING_TYPE: u16 = 0x0002;
/// EVENTLOG_INFORMATION_TYPE
pub const EVENTLOG_INFORMATION_TYPE: u16 = 0x0004;

/// メッセージカタログのID（すべて `%1` をそのまま表示する）
pub const MSG_INFO: u32 = 0x4000_0000;
pub const MSG_WARNING: u32 = 0x8000_0001;
pub const MSG_ERROR: u32 = 0xC000_0002;
pub const MSG_SUCCESS: u32 = 0x0000_0003;

/// レジストリ値名
pub const EVENT_MESSAGE_FILE_VALUE: &str = "EventMessageFile";
pub const TYPES_SUPPORTED_VALUE: &str = "TypesSupported";

/// サポートする重大度のビットマスク（Info | Warning | Error）
pub const SUPPORTED_EVENT_TYPES: u32 =
    (EVENTLOG_ERROR_TYPE | EVENTLOG_WARNING_TYPE | EVENTLOG_INFORMATION_TYPE) as u32;

/// ログの重大度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogSeverity {
    Info,
    Warning,
    Error,
}

impl LogSeverity {
    /// ReportEventW に渡すイベント種別
    pub fn event_type(self) -> u16 {
        match self {
            Self::Info => EVENTLOG_INFORMATION_TYPE,
            Self::Warning => EVENTLOG_WARNING_TYPE,
            Self::Error => EVENTLOG_ERROR_TYPE,
        }
    }

    /// 重大度ごとの固定メッセージID
    pub fn event_id(self) -> u32 {
        match self {
            Self::Info => MSG_INFO,
            Self::Warning => MSG_WARNING,
            Self::Error => MSG_ERROR,
        }
    }

    /// コンソール出力用ラベル
    pub fn label(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARN",
            Self::Error => "ERROR",
        }
    }
}

/// イベントログソースの登録内容
///
/// キーの存在そのものがインストール状態。再インストールは全値を上書きする。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSourceRegistration {
    /// ソース名（レジストリキー名）
    pub source_name: String,
    /// メッセージ解決に使う実行ファイルの絶対パス
    pub message_file: PathBuf,
    /// サポートする重大度のマスク
    pub types_supported: u32,
}

impl EventSourceRegistration {
    pub fn new(source_name: impl Into<String>, message_file: impl Into<PathBuf>) -> Self {
        Self {
            source_name: source_name.into(),
            message_file: message_file.into(),
            types_supported: SUPPORTED_EVENT_TYPES,
        }
    }

    /// HKLM 配下のキーパス
    pub fn key_path(&self) -> String {
        event_log_key_path(&self.source_name)
    }
}

/// イベントログソース登録の各ステップ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSourceStep {
    ResolveExecutablePath,
    CreateKey,
    SetMessageFile,
    SetTypesSupported,
    DeleteKey,
}

impl EventSourceStep {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ResolveExecutablePath => "resolve executable path",
            Self::CreateKey => "create event log registry key",
            Self::SetMessageFile => "set EventMessageFile",
            Self::SetTypesSupported => "set TypesSupported",
            Self::DeleteKey => "delete event log registry key",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_mask_covers_three_severities() {
        assert_eq!(SUPPORTED_EVENT_TYPES, 0x7);
    }

    #[test]
    fn severities_map_to_distinct_type_and_id() {
        let all = [LogSeverity::Info, LogSeverity::Warning, LogSeverity::Error];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.event_type(), b.event_type());
                assert_ne!(a.event_id(), b.event_id());
            }
        }
        assert_eq!(LogSeverity::Error.event_id(), 0xC000_0002);
    }

    #[test]
    fn registration_uses_full_mask_and_derived_key() {
        let reg = EventSourceRegistration::new("TransitionFixer", r"C:\Tools\transition-fixer.exe");
        assert_eq!(reg.types_supported, SUPPORTED_EVENT_TYPES);
        assert!(reg.key_path().ends_with(r"\Application\TransitionFixer"));
    }
}
