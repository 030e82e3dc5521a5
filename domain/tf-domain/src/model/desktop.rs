//! デスクトップ（Progman）へのフェード修正シグナル

/// WM_USER
const WM_USER: u32 = 0x0400;

/// 壁紙を描画するデスクトップホストのウィンドウクラス
pub const PROGMAN_CLASS: &str = "Progman";

/// Active Desktop を有効化する非公開メッセージ（0x052C）
pub const WM_ENABLE_ACTIVE_DESKTOP: u32 = WM_USER + 0x12C;

/// 応答待ちの上限（ミリ秒）
pub const SIGNAL_TIMEOUT_MS: u32 = 500;

/// 見つかったウィンドウのハンドル（プロセス内でのみ有効、保持しない）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub isize);

/// 送信するシグナル
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesktopSignal {
    pub class_name: &'static str,
    pub message: u32,
    pub timeout_ms: u32,
}

/// フェード修正で使うシグナル
pub const ACTIVE_DESKTOP_SIGNAL: DesktopSignal = DesktopSignal {
    class_name: PROGMAN_CLASS,
    message: WM_ENABLE_ACTIVE_DESKTOP,
    timeout_ms: SIGNAL_TIMEOUT_MS,
};
