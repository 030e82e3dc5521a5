//! プロセスレベルのユーティリティ

/// 接続中のデバッガで停止する（デバッガがなければOSの既定処理に従う）
#[cfg(windows)]
pub fn break_into_debugger() {
    unsafe { windows::Win32::System::Diagnostics::Debug::DebugBreak() }
}

#[cfg(not(windows))]
pub fn break_into_debugger() {
    eprintln!("[WARN] --break is only supported on Windows; continuing");
}
