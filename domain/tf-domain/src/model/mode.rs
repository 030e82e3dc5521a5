//! 実行モード

use std::fmt;

/// CLIから指定される実行モード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// フェード修正を適用（既定）
    #[default]
    Run,
    InstallEventLog,
    UninstallEventLog,
    InstallTask,
    UninstallTask,
}

impl Mode {
    pub const ALL: [Mode; 5] = [
        Mode::Run,
        Mode::InstallEventLog,
        Mode::UninstallEventLog,
        Mode::InstallTask,
        Mode::UninstallTask,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Run => "run",
            Self::InstallEventLog => "install-event-log",
            Self::UninstallEventLog => "uninstall-event-log",
            Self::InstallTask => "install-task",
            Self::UninstallTask => "uninstall-task",
        }
    }

    /// モード文字列を解釈（`install` / `uninstall` は旧シェルの別名）
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "run" => Some(Self::Run),
            "install-event-log" | "install" => Some(Self::InstallEventLog),
            "uninstall-event-log" | "uninstall" => Some(Self::UninstallEventLog),
            "install-task" => Some(Self::InstallTask),
            "uninstall-task" => Some(Self::UninstallTask),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
