//! デスクトップウィンドウアダプター（FindWindowW / SendMessageTimeoutW）

use tf_domain::DomainError;
use tf_domain::model::WindowHandle;
use tf_domain::port::driven::DesktopWindows;

#[derive(Debug, Default, Clone)]
pub struct DesktopAdapter;

impl DesktopAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(windows)]
impl DesktopWindows for DesktopAdapter {
    fn find_window(&self, class_name: &str) -> Result<WindowHandle, DomainError> {
        use windows::Win32::Foundation::HWND;
        use windows::Win32::UI::WindowsAndMessaging::FindWindowW;
        use windows::core::PCWSTR;

        let class = to_wide(class_name);
        match unsafe { FindWindowW(PCWSTR(class.as_ptr()), PCWSTR::null()) } {
            Ok(hwnd) if hwnd != HWND::default() => Ok(WindowHandle(hwnd.0 as isize)),
            Ok(_) => Err(DomainError::NotFound(format!("Failed to locate {}", class_name))),
            Err(e) => Err(DomainError::NotFound(format!(
                "Failed to locate {}: {}",
                class_name,
                tf_win_error::describe_error(&e)
            ))),
        }
    }

    fn send_message(
        &self,
        window: WindowHandle,
        message: u32,
        timeout_ms: u32,
    ) -> Result<(), DomainError> {
        use windows::Win32::Foundation::{HWND, LPARAM, WPARAM};
        use windows::Win32::UI::WindowsAndMessaging::{SMTO_NORMAL, SendMessageTimeoutW};

        let mut output: usize = 0;
        let result = unsafe {
            SendMessageTimeoutW(
                HWND(window.0 as *mut core::ffi::c_void),
                message,
                WPARAM(0),
                LPARAM(0),
                SMTO_NORMAL,
                timeout_ms,
                Some(&mut output as *mut usize),
            )
        };
        // 戻り値0はタイムアウトまたは送信失敗（区別しない）
        if result.0 == 0 {
            return Err(DomainError::Timeout(format!(
                "Failed to send message 0x{:X} within {}ms: {}",
                message,
                timeout_ms,
                tf_win_error::describe_last()
            )));
        }
        Ok(())
    }
}

#[cfg(not(windows))]
impl DesktopWindows for DesktopAdapter {
    fn find_window(&self, class_name: &str) -> Result<WindowHandle, DomainError> {
        Err(DomainError::NotFound(format!(
            "Failed to locate {}: no desktop shell on this platform",
            class_name
        )))
    }

    fn send_message(
        &self,
        _window: WindowHandle,
        message: u32,
        _timeout_ms: u32,
    ) -> Result<(), DomainError> {
        Err(DomainError::Unsupported(format!("window message 0x{:X}", message)))
    }
}

#[cfg(windows)]
fn to_wide(s: &str) -> Vec<u16> {
    let mut wide: Vec<u16> = s.encode_utf16().collect();
    wide.push(0);
    wide
}
