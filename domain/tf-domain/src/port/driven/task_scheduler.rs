//! タスクスケジューラ用アダプタポート（登録/削除APIをラップ）

use crate::error::DomainError;
use crate::model::{RemoveOutcome, TaskRegistration};

pub trait TaskScheduler {
    /// ルートフォルダへ create-or-update で登録（冪等）
    fn register(&self, registration: &TaskRegistration) -> Result<(), DomainError>;

    /// 表示名でタスクを削除（存在しなければ NotFound を返す）
    fn delete(&self, task_name: &str) -> Result<RemoveOutcome, DomainError>;
}
