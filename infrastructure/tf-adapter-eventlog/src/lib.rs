//! tf-adapter-eventlog: OSのイベントログへの書き込みと、標準エラーへのフォールバック出力。
//!
//! ソースは書き込みのたびに開いて閉じる（ハンドルを保持しない）。

use std::io::Write;

use tf_domain::DomainError;
use tf_domain::model::LogSeverity;
use tf_domain::port::driven::{EventWriter, FallbackSink};

/// Windowsイベントログ（Application）へ書き込むアダプター
#[derive(Debug, Default, Clone)]
pub struct EventLogWriter;

impl EventLogWriter {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(windows)]
impl EventWriter for EventLogWriter {
    fn report(
        &self,
        source_name: &str,
        severity: LogSeverity,
        message: &str,
    ) -> Result<(), DomainError> {
        use windows::Win32::Foundation::HANDLE;
        use windows::Win32::System::EventLog::{
            DeregisterEventSource, REPORT_EVENT_TYPE, RegisterEventSourceW, ReportEventW,
        };
        use windows::core::PCWSTR;

        struct EventSourceGuard(HANDLE);
        impl Drop for EventSourceGuard {
            fn drop(&mut self) {
                unsafe {
                    let _ = DeregisterEventSource(self.0);
                }
            }
        }

        let source = to_wide(source_name);
        let text = to_wide(message);

        unsafe {
            let handle = RegisterEventSourceW(PCWSTR::null(), PCWSTR(source.as_ptr())).map_err(|e| {
                DomainError::ConnectionFailed(format!(
                    "Failed to open event log: {}",
                    tf_win_error::describe_error(&e)
                ))
            })?;
            let _guard = EventSourceGuard(handle);

            let strings = [PCWSTR(text.as_ptr())];
            ReportEventW(
                handle,
                REPORT_EVENT_TYPE(severity.event_type()),
                0,
                severity.event_id(),
                None,
                0,
                Some(&strings),
                None,
            )
            .map_err(|e| {
                DomainError::Unknown(format!(
                    "Failed to write to event log: {}",
                    tf_win_error::describe_error(&e)
                ))
            })?;
        }
        Ok(())
    }
}

#[cfg(not(windows))]
impl EventWriter for EventLogWriter {
    fn report(
        &self,
        source_name: &str,
        _severity: LogSeverity,
        _message: &str,
    ) -> Result<(), DomainError> {
        Err(DomainError::Unsupported(format!("event log source {}", source_name)))
    }
}

#[cfg(windows)]
fn to_wide(s: &str) -> Vec<u16> {
    let mut wide: Vec<u16> = s.encode_utf16().collect();
    wide.push(0);
    wide
}

/// 標準エラーへ1行ずつ書くフォールバック出力
#[derive(Debug, Default, Clone)]
pub struct StderrSink;

impl StderrSink {
    pub fn new() -> Self {
        Self
    }
}

impl FallbackSink for StderrSink {
    fn write_line(&self, severity: LogSeverity, message: &str) {
        let line = tf_log_utils::console_line(severity.label(), message);
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr, "{}", line);
    }
}
