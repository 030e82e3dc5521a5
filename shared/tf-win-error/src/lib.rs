//! Windowsのステータスコードを人が読めるメッセージに変換する（エラーレポーター）。
//!
//! システムのメッセージテーブルから現在のユーザー言語で引く。
//! 見つからないコードや非Windows環境では空文字列を返す。

/// ステータスコードのシステムメッセージ（末尾の改行は除去済み）
#[cfg(windows)]
pub fn describe(code: u32) -> String {
    use windows::Win32::Foundation::{HLOCAL, LocalFree};
    use windows::Win32::System::Diagnostics::Debug::{
        FORMAT_MESSAGE_ALLOCATE_BUFFER, FORMAT_MESSAGE_FROM_SYSTEM, FORMAT_MESSAGE_IGNORE_INSERTS,
        FormatMessageW,
    };
    use windows::core::PWSTR;

    // LANG_USER_DEFAULT
    const USER_DEFAULT_LANGUAGE: u32 = 0x0400;

    let mut buffer = PWSTR::null();
    unsafe {
        let len = FormatMessageW(
            FORMAT_MESSAGE_FROM_SYSTEM
                | FORMAT_MESSAGE_ALLOCATE_BUFFER
                | FORMAT_MESSAGE_IGNORE_INSERTS,
            None,
            code,
            USER_DEFAULT_LANGUAGE,
            PWSTR(&mut buffer as *mut PWSTR as *mut u16),
            0,
            None,
        );
        if len == 0 || buffer.is_null() {
            return String::new();
        }
        let slice = std::slice::from_raw_parts(buffer.0, len as usize);
        let text = String::from_utf16_lossy(slice);
        let _ = LocalFree(Some(HLOCAL(buffer.0 as *mut core::ffi::c_void)));
        trim_message(&text)
    }
}

#[cfg(not(windows))]
pub fn describe(_code: u32) -> String {
    String::new()
}

/// 直前のOS呼び出しのエラーコード
#[cfg(windows)]
pub fn last_error_code() -> u32 {
    unsafe { windows::Win32::Foundation::GetLastError().0 }
}

#[cfg(not(windows))]
pub fn last_error_code() -> u32 {
    0
}

/// 直前のOS呼び出しのエラーメッセージ
pub fn describe_last() -> String {
    describe_with_code(last_error_code())
}

/// `"<メッセージ> (0xXXXXXXXX)"` 形式。メッセージが引けなければコードのみ。
pub fn describe_with_code(code: u32) -> String {
    with_code(&describe(code), code)
}

/// `windows` クレートのエラー（HRESULT）を同じ形式で表す
#[cfg(windows)]
pub fn describe_error(err: &windows::core::Error) -> String {
    let code = err.code().0 as u32;
    let text = describe(code);
    if text.is_empty() {
        with_code(&trim_message(&err.message()), code)
    } else {
        with_code(&text, code)
    }
}

fn with_code(text: &str, code: u32) -> String {
    if text.is_empty() {
        format!("0x{:08x}", code)
    } else {
        format!("{} (0x{:08x})", text, code)
    }
}

#[cfg(any(windows, test))]
fn trim_message(text: &str) -> String {
    text.trim_end_matches(|c: char| c.is_whitespace() || c == '\0')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_line_breaks() {
        assert_eq!(trim_message("Access is denied.\r\n"), "Access is denied.");
        assert_eq!(trim_message("text\0"), "text");
    }

    #[test]
    fn code_is_zero_padded_hex() {
        assert_eq!(with_code("Access is denied.", 5), "Access is denied. (0x00000005)");
        assert_eq!(with_code("", 0x8007_0002), "0x80070002");
    }

    #[cfg(windows)]
    #[test]
    fn known_code_has_text() {
        assert!(!describe(5).is_empty());
        assert!(!describe(5).ends_with('\n'));
    }

    #[cfg(windows)]
    #[test]
    fn unknown_code_is_empty() {
        assert_eq!(describe(0x1234_5678), "");
    }

    #[cfg(not(windows))]
    #[test]
    fn describe_is_empty_off_windows() {
        assert_eq!(describe(5), "");
        assert_eq!(describe_with_code(5), "0x00000005");
    }
}
