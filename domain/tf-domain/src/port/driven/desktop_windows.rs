//! デスクトップウィンドウへのメッセージ送信ポート

use crate::error::DomainError;
use crate::model::WindowHandle;

pub trait DesktopWindows {
    /// クラス名が一致するウィンドウを1つ探す（見つからなければ NotFound）
    fn find_window(&self, class_name: &str) -> Result<WindowHandle, DomainError>;

    /// タイムアウト付きでメッセージを送信（タイムアウトと送信失敗は区別しない）
    fn send_message(
        &self,
        window: WindowHandle,
        message: u32,
        timeout_ms: u32,
    ) -> Result<(), DomainError>;
}
