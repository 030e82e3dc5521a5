//! テスト用のポート実装（インメモリ）
//!
//! `testing` フィーチャーで上位クレートのテストからも使える。

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::PathBuf;

use tf_domain::DomainError;
use tf_domain::model::{
    EventSourceRegistration, LogSeverity, RemoveOutcome, TaskRegistration, TaskStep, WindowHandle,
};
use tf_domain::port::driven::{
    Clock, DesktopWindows, EventSourceStore, EventWriter, FallbackSink, HostContext, TaskScheduler,
};

#[derive(Default)]
pub struct FakeEventSourceStore {
    keys: RefCell<HashMap<String, EventSourceRegistration>>,
    upsert_error: Option<DomainError>,
    delete_error: Option<DomainError>,
    upserts: Cell<u32>,
    deletes: Cell<u32>,
}

impl FakeEventSourceStore {
    pub fn failing_upsert(err: DomainError) -> Self {
        Self {
            upsert_error: Some(err),
            ..Self::default()
        }
    }

    pub fn failing_delete(err: DomainError) -> Self {
        Self {
            delete_error: Some(err),
            ..Self::default()
        }
    }

    pub fn seed(&self, source_name: &str) {
        self.keys.borrow_mut().insert(
            source_name.to_string(),
            EventSourceRegistration::new(source_name, r"C:\seeded.exe"),
        );
    }

    pub fn get(&self, source_name: &str) -> Option<EventSourceRegistration> {
        self.keys.borrow().get(source_name).cloned()
    }

    pub fn len(&self) -> usize {
        self.keys.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.borrow().is_empty()
    }

    pub fn upsert_calls(&self) -> u32 {
        self.upserts.get()
    }

    pub fn delete_calls(&self) -> u32 {
        self.deletes.get()
    }
}

impl EventSourceStore for FakeEventSourceStore {
    fn exists(&self, source_name: &str) -> bool {
        self.keys.borrow().contains_key(source_name)
    }

    fn upsert(&self, registration: &EventSourceRegistration) -> Result<(), DomainError> {
        self.upserts.set(self.upserts.get() + 1);
        if let Some(err) = &self.upsert_error {
            return Err(err.clone());
        }
        self.keys
            .borrow_mut()
            .insert(registration.source_name.clone(), registration.clone());
        Ok(())
    }

    fn delete(&self, source_name: &str) -> Result<(), DomainError> {
        self.deletes.set(self.deletes.get() + 1);
        if let Some(err) = &self.delete_error {
            return Err(err.clone());
        }
        match self.keys.borrow_mut().remove(source_name) {
            Some(_) => Ok(()),
            None => Err(DomainError::NotFound(source_name.to_string())),
        }
    }
}

#[derive(Default)]
pub struct RecordingEventWriter {
    records: RefCell<Vec<(String, LogSeverity, String)>>,
    fail: bool,
}

impl RecordingEventWriter {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn records(&self) -> Vec<(String, LogSeverity, String)> {
        self.records.borrow().clone()
    }
}

impl EventWriter for RecordingEventWriter {
    fn report(
        &self,
        source_name: &str,
        severity: LogSeverity,
        message: &str,
    ) -> Result<(), DomainError> {
        if self.fail {
            return Err(DomainError::ConnectionFailed("event log unavailable".into()));
        }
        self.records
            .borrow_mut()
            .push((source_name.to_string(), severity, message.to_string()));
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingSink {
    lines: RefCell<Vec<(LogSeverity, String)>>,
}

impl RecordingSink {
    pub fn lines(&self) -> Vec<(LogSeverity, String)> {
        self.lines.borrow().clone()
    }
}

impl FallbackSink for RecordingSink {
    fn write_line(&self, severity: LogSeverity, message: &str) {
        self.lines.borrow_mut().push((severity, message.to_string()));
    }
}

#[derive(Default)]
pub struct FakeTaskScheduler {
    tasks: RefCell<HashMap<String, TaskRegistration>>,
    unreachable: bool,
    registers: Cell<u32>,
}

impl FakeTaskScheduler {
    /// タスクサービスに接続できない状態
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    pub fn task(&self, name: &str) -> Option<TaskRegistration> {
        self.tasks.borrow().get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.tasks.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.borrow().is_empty()
    }

    pub fn register_calls(&self) -> u32 {
        self.registers.get()
    }

    fn connect(&self) -> Result<(), DomainError> {
        if self.unreachable {
            return Err(DomainError::step_failed(
                TaskStep::ConnectService.as_str(),
                "The RPC server is unavailable.",
            ));
        }
        Ok(())
    }
}

impl TaskScheduler for FakeTaskScheduler {
    fn register(&self, registration: &TaskRegistration) -> Result<(), DomainError> {
        self.registers.set(self.registers.get() + 1);
        self.connect()?;
        self.tasks
            .borrow_mut()
            .insert(registration.name.clone(), registration.clone());
        Ok(())
    }

    fn delete(&self, task_name: &str) -> Result<RemoveOutcome, DomainError> {
        self.connect()?;
        match self.tasks.borrow_mut().remove(task_name) {
            Some(_) => Ok(RemoveOutcome::Removed),
            None => Ok(RemoveOutcome::NotFound),
        }
    }
}

pub struct FakeDesktop {
    windows: HashMap<String, WindowHandle>,
    acknowledges: bool,
    sent: RefCell<Vec<(WindowHandle, u32, u32)>>,
}

impl FakeDesktop {
    pub fn empty() -> Self {
        Self {
            windows: HashMap::new(),
            acknowledges: true,
            sent: RefCell::new(Vec::new()),
        }
    }

    pub fn with_window(class_name: &str, acknowledges: bool) -> Self {
        let mut windows = HashMap::new();
        windows.insert(class_name.to_string(), WindowHandle(0x1_0010));
        Self {
            windows,
            acknowledges,
            sent: RefCell::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<(WindowHandle, u32, u32)> {
        self.sent.borrow().clone()
    }
}

impl DesktopWindows for FakeDesktop {
    fn find_window(&self, class_name: &str) -> Result<WindowHandle, DomainError> {
        self.windows
            .get(class_name)
            .copied()
            .ok_or_else(|| DomainError::NotFound(format!("Failed to locate {class_name}")))
    }

    fn send_message(
        &self,
        window: WindowHandle,
        message: u32,
        timeout_ms: u32,
    ) -> Result<(), DomainError> {
        if !self.acknowledges {
            return Err(DomainError::Timeout(format!(
                "Failed to send message 0x{message:X} within {timeout_ms}ms"
            )));
        }
        self.sent.borrow_mut().push((window, message, timeout_ms));
        Ok(())
    }
}

/// 偽の実行ファイルパス（ホストOSのパス区切りで親フォルダが取れる形）
#[cfg(windows)]
pub const FAKE_EXE: &str = r"C:\Tools\TransitionFixer\transition-fixer.exe";
#[cfg(windows)]
pub const FAKE_EXE_DIR: &str = r"C:\Tools\TransitionFixer";
#[cfg(not(windows))]
pub const FAKE_EXE: &str = "/opt/TransitionFixer/transition-fixer";
#[cfg(not(windows))]
pub const FAKE_EXE_DIR: &str = "/opt/TransitionFixer";

pub struct FakeHost {
    exe: Option<PathBuf>,
    user: Option<String>,
}

impl FakeHost {
    pub fn windows_user() -> Self {
        Self {
            exe: Some(PathBuf::from(FAKE_EXE)),
            user: Some(r"CONTOSO\alice".to_string()),
        }
    }

    pub fn without_executable() -> Self {
        Self {
            exe: None,
            ..Self::windows_user()
        }
    }

    pub fn without_user() -> Self {
        Self {
            user: None,
            ..Self::windows_user()
        }
    }
}

impl HostContext for FakeHost {
    fn executable_path(&self) -> Result<PathBuf, DomainError> {
        self.exe
            .clone()
            .ok_or_else(|| DomainError::Unknown("Failed to get executable path".into()))
    }

    fn current_user_id(&self) -> Result<String, DomainError> {
        self.user
            .clone()
            .ok_or_else(|| DomainError::NotFound("current user".into()))
    }
}

pub struct FixedClock(pub &'static str);

impl Default for FixedClock {
    fn default() -> Self {
        Self("2025-01-15T10:30:00")
    }
}

impl Clock for FixedClock {
    fn now_utc_iso8601(&self) -> String {
        self.0.to_string()
    }
}
