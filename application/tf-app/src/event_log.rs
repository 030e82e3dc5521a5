//! イベントログソースのインストール／確認／アンインストール。

use tf_domain::DomainError;
use tf_domain::model::{APP_NAME, EventSourceRegistration, EventSourceStep, RemoveOutcome};
use tf_domain::port::driven::{EventSourceStore, HostContext};

pub struct EventLogDeps<'a> {
    pub store: &'a dyn EventSourceStore,
    pub host: &'a dyn HostContext,
}

/// 固定アプリ名のイベントログソースを管理する
pub struct EventLogRegistrar<'a> {
    deps: EventLogDeps<'a>,
}

impl<'a> EventLogRegistrar<'a> {
    pub fn new(deps: EventLogDeps<'a>) -> Self {
        Self { deps }
    }

    /// ソースを登録（再実行は全値の上書き）
    ///
    /// 実行ファイルパスの解決、キー作成、値書き込みのいずれかで失敗したら
    /// そのステップ名付きで中断する。部分的に作られたキーは再実行で上書きされる。
    pub fn install(&self) -> Result<(), DomainError> {
        let exe_path = self.deps.host.executable_path().map_err(|err| {
            DomainError::step_failed(EventSourceStep::ResolveExecutablePath.as_str(), err.to_string())
        })?;
        let registration = EventSourceRegistration::new(APP_NAME, exe_path);
        self.deps.store.upsert(&registration)
    }

    /// キーの存在のみで判定（内容は見ない）
    pub fn is_installed(&self) -> bool {
        self.deps.store.exists(APP_NAME)
    }

    /// ソースを削除
    ///
    /// 未登録なら何もせず `NotFound` を返す（呼び出し側では成功扱い）。
    /// OSの "not found" をユーザー向けの失敗として伝播させないため、削除前に必ず存在確認する。
    pub fn uninstall(&self) -> Result<RemoveOutcome, DomainError> {
        if !self.is_installed() {
            return Ok(RemoveOutcome::NotFound);
        }
        self.deps.store.delete(APP_NAME)?;
        Ok(RemoveOutcome::Removed)
    }
}
