//! イベントログソース登録のレジストリアダプター
//!
//! `HKLM\SYSTEM\CurrentControlSet\Services\EventLog\Application\<ソース名>` を
//! 作成・確認・削除する。書き込みには管理者権限が必要。

use tf_domain::DomainError;
use tf_domain::model::EventSourceRegistration;
use tf_domain::port::driven::EventSourceStore;

/// イベントログソースのレジストリストア
#[derive(Debug, Default, Clone)]
pub struct EventSourceRegistryAdapter;

impl EventSourceRegistryAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(windows)]
mod windows_impl {
    use super::*;
    use tf_domain::model::{
        EVENT_MESSAGE_FILE_VALUE, EventSourceStep, TYPES_SUPPORTED_VALUE, event_log_key_path,
    };
    use windows::Win32::Foundation::{ERROR_ACCESS_DENIED, ERROR_FILE_NOT_FOUND, ERROR_SUCCESS, WIN32_ERROR};
    use windows::Win32::System::Registry::{
        HKEY, HKEY_LOCAL_MACHINE, KEY_READ, KEY_SET_VALUE, REG_DWORD, REG_OPTION_NON_VOLATILE,
        REG_SAM_FLAGS, REG_SZ, REG_VALUE_TYPE, RegCloseKey, RegCreateKeyExW,
        RegDeleteKeyW, RegOpenKeyExW, RegSetValueExW,
    };
    use windows::core::PCWSTR;

    /// 登録キーは値の書き込みのみで開く
    pub(super) const REGISTRATION_KEY_ACCESS: REG_SAM_FLAGS = KEY_SET_VALUE;

    /// スコープ終了時にキーを閉じる
    struct RegKeyGuard(HKEY);

    impl Drop for RegKeyGuard {
        fn drop(&mut self) {
            let _ = unsafe { RegCloseKey(self.0) };
        }
    }

    impl EventSourceStore for EventSourceRegistryAdapter {
        fn exists(&self, source_name: &str) -> bool {
            let path = to_wide(&event_log_key_path(source_name)); // API呼び出し中にVecを生存させる
            let mut key = HKEY::default();
            let status = unsafe {
                RegOpenKeyExW(
                    HKEY_LOCAL_MACHINE,
                    PCWSTR(path.as_ptr()),
                    Some(0),
                    KEY_READ,
                    &mut key,
                )
            };
            if status != ERROR_SUCCESS {
                return false;
            }
            let _guard = RegKeyGuard(key);
            true
        }

        fn upsert(&self, registration: &EventSourceRegistration) -> Result<(), DomainError> {
            let path = to_wide(&registration.key_path());
            let mut key = HKEY::default();
            let status = unsafe {
                RegCreateKeyExW(
                    HKEY_LOCAL_MACHINE,
                    PCWSTR(path.as_ptr()),
                    Some(0),
                    None,
                    REG_OPTION_NON_VOLATILE,
                    REGISTRATION_KEY_ACCESS,
                    None,
                    &mut key,
                    None,
                )
            };
            if status != ERROR_SUCCESS {
                return Err(step_error(EventSourceStep::CreateKey, status));
            }
            let guard = RegKeyGuard(key);

            let message_file = registration.message_file.to_string_lossy();
            set_value(
                &guard,
                EVENT_MESSAGE_FILE_VALUE,
                REG_SZ,
                &utf16z_bytes(&message_file),
            )
            .map_err(|status| step_error(EventSourceStep::SetMessageFile, status))?;

            set_value(
                &guard,
                TYPES_SUPPORTED_VALUE,
                REG_DWORD,
                &registration.types_supported.to_le_bytes(),
            )
            .map_err(|status| step_error(EventSourceStep::SetTypesSupported, status))?;

            Ok(())
        }

        fn delete(&self, source_name: &str) -> Result<(), DomainError> {
            let path = to_wide(&event_log_key_path(source_name));
            let status = unsafe { RegDeleteKeyW(HKEY_LOCAL_MACHINE, PCWSTR(path.as_ptr())) };
            if status == ERROR_SUCCESS {
                return Ok(());
            }
            let detail = format!(
                "{}: {}",
                EventSourceStep::DeleteKey.as_str(),
                tf_win_error::describe_with_code(status.0)
            );
            if status == ERROR_ACCESS_DENIED {
                Err(DomainError::AccessDenied(detail))
            } else if status == ERROR_FILE_NOT_FOUND {
                Err(DomainError::NotFound(detail))
            } else {
                Err(DomainError::step_failed(
                    EventSourceStep::DeleteKey.as_str(),
                    tf_win_error::describe_with_code(status.0),
                ))
            }
        }
    }

    fn set_value(
        key: &RegKeyGuard,
        name: &str,
        value_type: REG_VALUE_TYPE,
        data: &[u8],
    ) -> Result<(), WIN32_ERROR> {
        let name = to_wide(name);
        let status =
            unsafe { RegSetValueExW(key.0, PCWSTR(name.as_ptr()), Some(0), value_type, Some(data)) };
        if status != ERROR_SUCCESS {
            return Err(status);
        }
        Ok(())
    }

    fn step_error(step: EventSourceStep, status: WIN32_ERROR) -> DomainError {
        let detail = tf_win_error::describe_with_code(status.0);
        if status == ERROR_ACCESS_DENIED {
            return DomainError::AccessDenied(format!("{}: {}", step.as_str(), detail));
        }
        DomainError::step_failed(step.as_str(), detail)
    }

    fn to_wide(s: &str) -> Vec<u16> {
        let mut wide: Vec<u16> = s.encode_utf16().collect();
        wide.push(0);
        wide
    }
}

#[cfg(not(windows))]
impl EventSourceStore for EventSourceRegistryAdapter {
    fn exists(&self, _source_name: &str) -> bool {
        false
    }

    fn upsert(&self, registration: &EventSourceRegistration) -> Result<(), DomainError> {
        Err(DomainError::Unsupported(format!(
            "event log source registration ({})",
            registration.source_name
        )))
    }

    fn delete(&self, source_name: &str) -> Result<(), DomainError> {
        Err(DomainError::Unsupported(format!(
            "event log source removal ({})",
            source_name
        )))
    }
}

/// REG_SZ 用のバイト列（UTF-16LE、終端NULを含む）
pub fn utf16z_bytes(value: &str) -> Vec<u8> {
    value
        .encode_utf16()
        .chain(std::iter::once(0))
        .flat_map(u16::to_le_bytes)
        .collect()
}
