//! フェード修正の適用。
//!
//! 壁紙ホスト（Progman）を探し、Active Desktop を有効化するメッセージを送る。
//! 状態を持たない単発の操作で、何度実行しても害はない。

use tf_domain::DomainError;
use tf_domain::model::ACTIVE_DESKTOP_SIGNAL;
use tf_domain::port::driven::DesktopWindows;

pub struct FadeFixDeps<'a> {
    pub desktop: &'a dyn DesktopWindows,
}

pub struct FadeFixApplicator<'a> {
    deps: FadeFixDeps<'a>,
}

impl<'a> FadeFixApplicator<'a> {
    pub fn new(deps: FadeFixDeps<'a>) -> Self {
        Self { deps }
    }

    /// 配送できたかどうかのみを確認し、戻り値の中身は解釈しない
    pub fn apply(&self) -> Result<(), DomainError> {
        let signal = ACTIVE_DESKTOP_SIGNAL;
        let window = self.deps.desktop.find_window(signal.class_name)?;
        self.deps
            .desktop
            .send_message(window, signal.message, signal.timeout_ms)
    }
}
