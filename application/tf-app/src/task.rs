//! スケジュールタスクのインストール／アンインストール。
//!
//! 定義はログオントリガー1つ＋実行アクション1つで毎回新規に組み立て、
//! create-or-update で登録する。何度インストールしても登録は1件のまま。

use tf_domain::DomainError;
use tf_domain::model::{
    ExecAction, LOGON_DELAY, LogonTrigger, RUN_MODE_TOKEN, RegistrationInfo, RemoveOutcome,
    TASK_AUTHOR, TASK_DESCRIPTION, TASK_NAME, TASK_VERSION, TaskDefinition, TaskRegistration,
    TaskSettings, TaskStep,
};
use tf_domain::port::driven::{Clock, HostContext, TaskScheduler};

pub struct TaskDeps<'a> {
    pub scheduler: &'a dyn TaskScheduler,
    pub host: &'a dyn HostContext,
    pub clock: &'a dyn Clock,
}

pub struct TaskRegistrar<'a> {
    deps: TaskDeps<'a>,
}

impl<'a> TaskRegistrar<'a> {
    pub fn new(deps: TaskDeps<'a>) -> Self {
        Self { deps }
    }

    /// 登録要求を組み立てる
    ///
    /// ユーザーと実行ファイルパスの解決失敗は、それを使うステップ
    /// （ログオントリガー／実行アクション）の失敗として報告する。
    pub fn build_registration(&self) -> Result<TaskRegistration, DomainError> {
        let user_id = self
            .deps
            .host
            .current_user_id()
            .map_err(|err| DomainError::step_failed(TaskStep::LogonTrigger.as_str(), err.to_string()))?;
        if user_id.trim().is_empty() {
            return Err(DomainError::step_failed(
                TaskStep::LogonTrigger.as_str(),
                "current user could not be resolved",
            ));
        }

        let exe_path = self
            .deps
            .host
            .executable_path()
            .map_err(|err| DomainError::step_failed(TaskStep::ExecAction.as_str(), err.to_string()))?;
        let action = ExecAction::for_executable(exe_path.clone(), RUN_MODE_TOKEN).ok_or_else(|| {
            DomainError::step_failed(
                TaskStep::ExecAction.as_str(),
                format!("executable path has no parent folder: {}", exe_path.display()),
            )
        })?;

        let definition = TaskDefinition {
            registration: RegistrationInfo {
                author: TASK_AUTHOR.to_string(),
                description: TASK_DESCRIPTION.to_string(),
                version: TASK_VERSION.to_string(),
                date: self.deps.clock.now_utc_iso8601(),
            },
            settings: TaskSettings {
                start_when_available: true,
            },
            trigger: LogonTrigger {
                user_id: user_id.clone(),
                delay: LOGON_DELAY.to_string(),
            },
            action,
        };

        Ok(TaskRegistration {
            name: TASK_NAME.to_string(),
            definition,
            run_as: user_id,
        })
    }

    /// タスクを登録（冪等な upsert）
    pub fn install(&self) -> Result<(), DomainError> {
        let registration = self.build_registration()?;
        self.deps.scheduler.register(&registration)
    }

    /// タスクを削除
    ///
    /// 存在しない場合は `NotFound` をそのまま返し、成功扱いにするかは呼び出し側が決める。
    pub fn uninstall(&self) -> Result<RemoveOutcome, DomainError> {
        self.deps.scheduler.delete(TASK_NAME)
    }
}
