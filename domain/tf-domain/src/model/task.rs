//! スケジュールタスク定義
//!
//! アダプタはこの定義をそのままタスクサービスの定義オブジェクトへ写す。
//! 登録は常に create-or-update（同名タスクは1つだけ）。

use std::path::{Path, PathBuf};

/// 登録メタデータ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationInfo {
    pub author: String,
    pub description: String,
    pub version: String,
    /// UTC、`YYYY-MM-DDTHH:MM:SS`（タイムゾーン接尾辞なし）
    pub date: String,
}

/// タスク設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskSettings {
    /// 予定時刻を逃しても実行する
    pub start_when_available: bool,
}

/// ログオントリガー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogonTrigger {
    /// `DOMAIN\user` 形式
    pub user_id: String,
    /// ISO 8601 期間（例: PT30S）
    pub delay: String,
}

/// 実行アクション
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecAction {
    pub path: PathBuf,
    pub working_directory: PathBuf,
    pub arguments: String,
}

impl ExecAction {
    /// 実行ファイルパスから作業ディレクトリを導出して作成
    pub fn for_executable(path: impl Into<PathBuf>, arguments: impl Into<String>) -> Option<Self> {
        let path = path.into();
        let working_directory = working_directory_of(&path)?;
        Some(Self {
            path,
            working_directory,
            arguments: arguments.into(),
        })
    }
}

/// 実行ファイルの親フォルダ
pub fn working_directory_of(exe_path: &Path) -> Option<PathBuf> {
    exe_path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
}

/// タスク定義（トリガー1つ、アクション1つ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDefinition {
    pub registration: RegistrationInfo,
    pub settings: TaskSettings,
    pub trigger: LogonTrigger,
    pub action: ExecAction,
}

/// 登録要求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRegistration {
    /// ルートフォルダ内の表示名
    pub name: String,
    pub definition: TaskDefinition,
    /// 実行ユーザー（パスワードは保存しない）
    pub run_as: String,
}

/// 冪等な削除の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// 削除した
    Removed,
    /// もともと存在しなかった
    NotFound,
}

/// タスク登録/削除の各ステップ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStep {
    InitializeCom,
    InitializeSecurity,
    ConnectService,
    GetRootFolder,
    NewTask,
    RegistrationInfo,
    Settings,
    LogonTrigger,
    ExecAction,
    Register,
    Delete,
}

impl TaskStep {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InitializeCom => "initialize COM",
            Self::InitializeSecurity => "initialize COM security",
            Self::ConnectService => "connect to task service",
            Self::GetRootFolder => "get root task folder",
            Self::NewTask => "create task definition",
            Self::RegistrationInfo => "set registration info",
            Self::Settings => "set task settings",
            Self::LogonTrigger => "add logon trigger",
            Self::ExecAction => "add exec action",
            Self::Register => "register task definition",
            Self::Delete => "delete task",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn working_directory_is_parent_folder() {
        let action =
            ExecAction::for_executable("/opt/tools/transition-fixer", "run").unwrap();
        assert_eq!(action.working_directory, PathBuf::from("/opt/tools"));
        assert_eq!(action.arguments, "run");
    }

    #[test]
    fn bare_file_name_has_no_working_directory() {
        assert!(working_directory_of(Path::new("transition-fixer.exe")).is_none());
        assert!(ExecAction::for_executable("transition-fixer.exe", "run").is_none());
    }

    #[test]
    fn step_names_are_unique() {
        let steps = [
            TaskStep::InitializeCom,
            TaskStep::InitializeSecurity,
            TaskStep::ConnectService,
            TaskStep::GetRootFolder,
            TaskStep::NewTask,
            TaskStep::RegistrationInfo,
            TaskStep::Settings,
            TaskStep::LogonTrigger,
            TaskStep::ExecAction,
            TaskStep::Register,
            TaskStep::Delete,
        ];
        let mut names: Vec<&str> = steps.iter().map(|s| s.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), steps.len());
    }
}
