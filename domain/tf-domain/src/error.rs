//! ドメインエラー型
//!
//! 標準ライブラリのみ使用（外部エラーハンドリングクレートなし）。
//! OSのステータスコードは失敗地点でテキスト化して格納し、原因チェーンは持たない。

use std::fmt;

/// ドメイン層のエラー型
/// 各バリアントは特定の失敗シナリオを表現
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// 対象リソース（ウィンドウ、レジストリキー、タスク）が見つからない
    NotFound(String),

    /// アクセス拒否（管理者権限不足）
    AccessDenied(String),

    /// OSサービスへの接続失敗
    ConnectionFailed(String),

    /// 応答待ちのタイムアウト、または配送失敗
    Timeout(String),

    /// 複数ステップ処理のうち1ステップが失敗
    StepFailed { step: String, detail: String },

    /// このプラットフォームでは未対応
    Unsupported(String),

    /// 不明なエラー
    Unknown(String),
}

impl DomainError {
    /// ステップ失敗エラーを作成
    pub fn step_failed(step: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::StepFailed {
            step: step.into(),
            detail: detail.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// 失敗したステップ名（ステップ失敗の場合のみ）
    pub fn failed_step(&self) -> Option<&str> {
        match self {
            Self::StepFailed { step, .. } => Some(step.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Resource not found: {}", msg),
            Self::AccessDenied(msg) => write!(f, "Access denied: {}", msg),
            Self::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            Self::Timeout(msg) => write!(f, "Timeout: {}", msg),
            Self::StepFailed { step, detail } => {
                write!(f, "Step '{}' failed: {}", step, detail)
            }
            Self::Unsupported(msg) => write!(f, "Not supported on this platform: {}", msg),
            Self::Unknown(msg) => write!(f, "Unknown error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
