//! CLI 用ランタイム配線。
//!
//! モードごとに1つの操作を実行し、結果をロギングファサード経由で報告して
//! プロセス終了コードを返す。

use tf_adapter_desktop::DesktopAdapter;
use tf_adapter_eventlog::{EventLogWriter, StderrSink};
use tf_adapter_host::HostAdapter;
use tf_adapter_registry::EventSourceRegistryAdapter;
use tf_adapter_task::TaskSchedulerAdapter;
use tf_app::{
    EventLogDeps, EventLogRegistrar, EventLogger, FadeFixApplicator, FadeFixDeps, LoggerDeps,
    TaskDeps, TaskRegistrar,
};
use tf_domain::DomainError;
use tf_domain::model::{Mode, RemoveOutcome, exit_codes};

pub const MSG_EVENT_LOG_INSTALLED: &str = "Successfully installed Event Log source";
pub const MSG_TASK_INSTALLED: &str = "Successfully installed task into Windows Task Scheduler";
pub const MSG_FADE_FIX_APPLIED: &str = "Successfully enabled Active Desktop";
pub const MSG_EVENT_LOG_REMOVED: &str = "Successfully removed Event Log source";
pub const MSG_TASK_REMOVED: &str = "Successfully removed task from Windows Task Scheduler";
pub const NOTE_EVENT_LOG_ABSENT: &str = "Note: Event log source not found, skipping...";
pub const NOTE_TASK_ABSENT: &str = "Scheduled task not found, skipping...";

/// CLI実行ファイル用の依存関係
pub struct CliRuntime {
    registry: EventSourceRegistryAdapter,
    writer: EventLogWriter,
    sink: StderrSink,
    scheduler: TaskSchedulerAdapter,
    desktop: DesktopAdapter,
    host: HostAdapter,
}

impl Default for CliRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl CliRuntime {
    pub fn new() -> Self {
        Self {
            registry: EventSourceRegistryAdapter::new(),
            writer: EventLogWriter::new(),
            sink: StderrSink::new(),
            scheduler: TaskSchedulerAdapter::new(),
            desktop: DesktopAdapter::new(),
            host: HostAdapter::new(),
        }
    }

    /// ロギングファサード
    pub fn logger(&self) -> EventLogger<'_> {
        EventLogger::new(LoggerDeps {
            store: &self.registry,
            writer: &self.writer,
            fallback: &self.sink,
        })
    }

    pub fn event_log(&self) -> EventLogRegistrar<'_> {
        EventLogRegistrar::new(EventLogDeps {
            store: &self.registry,
            host: &self.host,
        })
    }

    pub fn task(&self) -> TaskRegistrar<'_> {
        TaskRegistrar::new(TaskDeps {
            scheduler: &self.scheduler,
            host: &self.host,
            clock: &self.host,
        })
    }

    pub fn fade_fix(&self) -> FadeFixApplicator<'_> {
        FadeFixApplicator::new(FadeFixDeps {
            desktop: &self.desktop,
        })
    }

    /// 全サービスを組み立てる
    pub fn operations(&self) -> Operations<'_> {
        Operations {
            event_log: self.event_log(),
            task: self.task(),
            fade_fix: self.fade_fix(),
            logger: self.logger(),
        }
    }

    /// モードを実行して終了コードを返す
    pub fn execute(&self, mode: Mode) -> u8 {
        self.operations().execute(mode)
    }
}

/// 1回の実行で使うサービス一式
pub struct Operations<'a> {
    pub event_log: EventLogRegistrar<'a>,
    pub task: TaskRegistrar<'a>,
    pub fade_fix: FadeFixApplicator<'a>,
    pub logger: EventLogger<'a>,
}

impl Operations<'_> {
    /// モードの操作を1つ実行し、結果をロギングファサードで報告する
    pub fn execute(&self, mode: Mode) -> u8 {
        let outcome = match mode {
            Mode::Run => self
                .fade_fix
                .apply()
                .map(|()| Report::Done(MSG_FADE_FIX_APPLIED))
                .map_err(|err| ("Failed to enable Active Desktop", err)),
            Mode::InstallEventLog => self
                .event_log
                .install()
                .map(|()| Report::Done(MSG_EVENT_LOG_INSTALLED))
                .map_err(|err| ("Failed to install event log source", err)),
            Mode::UninstallEventLog => self
                .event_log
                .uninstall()
                .map(|outcome| match outcome {
                    RemoveOutcome::Removed => Report::Done(MSG_EVENT_LOG_REMOVED),
                    RemoveOutcome::NotFound => Report::Skipped(NOTE_EVENT_LOG_ABSENT),
                })
                .map_err(|err| ("Failed to uninstall event log source", err)),
            Mode::InstallTask => self
                .task
                .install()
                .map(|()| Report::Done(MSG_TASK_INSTALLED))
                .map_err(|err| ("Failed to install scheduled task", err)),
            Mode::UninstallTask => self
                .task
                .uninstall()
                .map(|outcome| match outcome {
                    RemoveOutcome::Removed => Report::Done(MSG_TASK_REMOVED),
                    RemoveOutcome::NotFound => Report::Skipped(NOTE_TASK_ABSENT),
                })
                .map_err(|err| ("Failed to uninstall scheduled task", err)),
        };
        report(&self.logger, outcome)
    }
}

/// 成功時の報告内容
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Report {
    Done(&'static str),
    /// 対象が存在しなかった（成功扱い）
    Skipped(&'static str),
}

fn report(logger: &EventLogger<'_>, outcome: Result<Report, (&str, DomainError)>) -> u8 {
    match outcome {
        Ok(Report::Done(message)) => {
            logger.info(message);
            exit_codes::SUCCESS
        }
        Ok(Report::Skipped(note)) => {
            logger.warning(note);
            exit_codes::SUCCESS
        }
        Err((context, err)) => {
            logger.error(&failure_message(context, &err));
            exit_codes::FAILURE
        }
    }
}

/// `<文脈>: <エラー>` 形式の失敗メッセージ
pub fn failure_message(context: &str, err: &DomainError) -> String {
    format!("{}: {}", context, err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_message_keeps_step_name() {
        let err = DomainError::step_failed("connect to task service", "The RPC server is unavailable.");
        assert_eq!(
            failure_message("Failed to install scheduled task", &err),
            "Failed to install scheduled task: Step 'connect to task service' failed: The RPC server is unavailable."
        );
    }

    mod with_fakes {
        use super::*;
        use tf_app::testing::{
            FakeDesktop, FakeEventSourceStore, FakeHost, FakeTaskScheduler, FixedClock,
            RecordingEventWriter, RecordingSink,
        };
        use tf_domain::model::{APP_NAME, LogSeverity, PROGMAN_CLASS};

        struct Fixture {
            store: FakeEventSourceStore,
            writer: RecordingEventWriter,
            sink: RecordingSink,
            scheduler: FakeTaskScheduler,
            desktop: FakeDesktop,
            host: FakeHost,
            clock: FixedClock,
        }

        impl Fixture {
            fn new(store: FakeEventSourceStore) -> Self {
                Self {
                    store,
                    writer: RecordingEventWriter::default(),
                    sink: RecordingSink::default(),
                    scheduler: FakeTaskScheduler::default(),
                    desktop: FakeDesktop::with_window(PROGMAN_CLASS, true),
                    host: FakeHost::windows_user(),
                    clock: FixedClock::default(),
                }
            }

            fn operations(&self) -> Operations<'_> {
                Operations {
                    event_log: EventLogRegistrar::new(EventLogDeps {
                        store: &self.store,
                        host: &self.host,
                    }),
                    task: TaskRegistrar::new(TaskDeps {
                        scheduler: &self.scheduler,
                        host: &self.host,
                        clock: &self.clock,
                    }),
                    fade_fix: FadeFixApplicator::new(FadeFixDeps {
                        desktop: &self.desktop,
                    }),
                    logger: EventLogger::new(LoggerDeps {
                        store: &self.store,
                        writer: &self.writer,
                        fallback: &self.sink,
                    }),
                }
            }
        }

        #[test]
        fn failed_event_log_uninstall_is_written_to_the_event_log() {
            let fixture = Fixture::new(FakeEventSourceStore::failing_delete(
                DomainError::AccessDenied("delete event log registry key".into()),
            ));
            let ops = fixture.operations();
            assert_eq!(ops.execute(Mode::InstallEventLog), exit_codes::SUCCESS);

            assert_eq!(ops.execute(Mode::UninstallEventLog), exit_codes::FAILURE);

            let expected = "Failed to uninstall event log source: Access denied: delete event log registry key";
            let records = fixture.writer.records();
            assert_eq!(
                records.last(),
                Some(&(APP_NAME.to_string(), LogSeverity::Error, expected.to_string()))
            );
            assert_eq!(
                fixture.sink.lines().last(),
                Some(&(LogSeverity::Error, expected.to_string()))
            );
        }

        #[test]
        fn successful_run_is_reported_as_info() {
            let fixture = Fixture::new(FakeEventSourceStore::default());
            fixture.store.seed(APP_NAME);
            assert_eq!(fixture.operations().execute(Mode::Run), exit_codes::SUCCESS);
            assert_eq!(
                fixture.writer.records(),
                vec![(
                    APP_NAME.to_string(),
                    LogSeverity::Info,
                    MSG_FADE_FIX_APPLIED.to_string()
                )]
            );
        }

        #[test]
        fn absent_task_is_a_warning_note_and_success() {
            let fixture = Fixture::new(FakeEventSourceStore::default());
            assert_eq!(
                fixture.operations().execute(Mode::UninstallTask),
                exit_codes::SUCCESS
            );
            assert_eq!(
                fixture.sink.lines(),
                vec![(LogSeverity::Warning, NOTE_TASK_ABSENT.to_string())]
            );
            assert!(fixture.writer.records().is_empty());
        }
    }

    #[cfg(not(windows))]
    mod non_windows {
        use super::*;

        #[test]
        fn run_fails_without_desktop_shell() {
            assert_eq!(CliRuntime::new().execute(Mode::Run), exit_codes::FAILURE);
        }

        #[test]
        fn install_modes_fail_as_unsupported() {
            let runtime = CliRuntime::new();
            assert_eq!(runtime.execute(Mode::InstallEventLog), exit_codes::FAILURE);
            assert_eq!(runtime.execute(Mode::UninstallTask), exit_codes::FAILURE);
        }

        #[test]
        fn uninstall_event_log_without_source_is_success() {
            assert_eq!(
                CliRuntime::new().execute(Mode::UninstallEventLog),
                exit_codes::SUCCESS
            );
        }

        #[test]
        fn logger_only_uses_fallback_without_source() {
            let runtime = CliRuntime::new();
            assert!(!runtime.event_log().is_installed());
            runtime.logger().info("fallback only");
        }
    }
}
