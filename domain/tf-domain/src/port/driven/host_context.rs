//! 実行中プロセスとセッションの情報

use std::path::PathBuf;

use crate::error::DomainError;

pub trait HostContext {
    /// 自身の実行ファイルの絶対パス（argv[0] ではない）
    fn executable_path(&self) -> Result<PathBuf, DomainError>;

    /// 現在の対話ユーザー（`DOMAIN\user` 形式）
    fn current_user_id(&self) -> Result<String, DomainError>;
}
