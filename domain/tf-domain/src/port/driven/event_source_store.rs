//! イベントログソース登録ストア（システム全体のレジストリ）

use crate::error::DomainError;
use crate::model::EventSourceRegistration;

pub trait EventSourceStore {
    /// キーが存在するか（読み取りのみ、失敗は false）
    fn exists(&self, source_name: &str) -> bool;

    /// キーを作成し全値を書き込む（既存なら上書き）
    fn upsert(&self, registration: &EventSourceRegistration) -> Result<(), DomainError>;

    /// キーを削除
    fn delete(&self, source_name: &str) -> Result<(), DomainError>;
}
