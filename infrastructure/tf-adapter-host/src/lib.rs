//! 実行環境アダプター（自身の実行ファイル、対話ユーザー、UTC時刻）

use std::path::PathBuf;

use tf_domain::DomainError;
use tf_domain::port::driven::{Clock, HostContext};

#[derive(Debug, Default, Clone)]
pub struct HostAdapter;

impl HostAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl HostContext for HostAdapter {
    /// argv[0] ではなくOSが認識している実行ファイルの絶対パス
    fn executable_path(&self) -> Result<PathBuf, DomainError> {
        std::env::current_exe()
            .map_err(|e| DomainError::Unknown(format!("Failed to get executable path: {}", e)))
    }

    fn current_user_id(&self) -> Result<String, DomainError> {
        #[cfg(windows)]
        {
            sam_compatible_user_name()
        }

        #[cfg(not(windows))]
        {
            std::env::var("USER")
                .ok()
                .filter(|name| !name.trim().is_empty())
                .ok_or_else(|| DomainError::NotFound("current user".into()))
        }
    }
}

/// `DOMAIN\user` 形式のユーザー名
#[cfg(windows)]
fn sam_compatible_user_name() -> Result<String, DomainError> {
    use windows::Win32::Security::Authentication::Identity::{GetUserNameExW, NameSamCompatible};
    use windows::core::PWSTR;

    // DNLEN + 1 + UNLEN + 1
    const BUFFER_LEN: usize = 16 + 1 + 256 + 1;

    let mut buffer = [0u16; BUFFER_LEN];
    let mut size = BUFFER_LEN as u32;
    let ok: bool = unsafe {
        GetUserNameExW(NameSamCompatible, Some(PWSTR(buffer.as_mut_ptr())), &mut size).into()
    };
    if !ok {
        return Err(DomainError::Unknown(format!(
            "Failed to get current user name: {}",
            tf_win_error::describe_last()
        )));
    }
    Ok(String::from_utf16_lossy(&buffer[..size as usize]))
}

impl Clock for HostAdapter {
    fn now_utc_iso8601(&self) -> String {
        #[cfg(windows)]
        {
            use windows::Win32::System::SystemInformation::GetSystemTime;
            let st = unsafe { GetSystemTime() };
            format!(
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
                st.wYear, st.wMonth, st.wDay, st.wHour, st.wMinute, st.wSecond
            )
        }

        #[cfg(not(windows))]
        {
            tf_log_utils::utc_iso8601_seconds()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn executable_path_is_absolute() {
        let path = HostAdapter::new().executable_path().unwrap();
        assert!(path.is_absolute());
        assert!(path.parent().is_some());
    }

    #[test]
    fn clock_has_no_timezone_suffix() {
        let now = HostAdapter::new().now_utc_iso8601();
        assert_eq!(now.len(), 19);
        assert_eq!(&now[10..11], "T");
        assert!(!now.ends_with('Z'));
    }
}
