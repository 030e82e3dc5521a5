//! tf-app: アプリケーション層のファサード。
//! ドメインポートを組み合わせて、イベントログソース／スケジュールタスクの
//! インストール・確認・アンインストールと、フェード修正の適用を実装する。
//!
//! 各サービスは結果（成功／失敗＋説明）を返すだけで、終了コードへの変換や
//! ユーザー向けの報告はコンポジション層が行う。

pub mod event_log;
pub mod fade_fix;
pub mod logger;
pub mod task;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use event_log::{EventLogDeps, EventLogRegistrar};
pub use fade_fix::{FadeFixApplicator, FadeFixDeps};
pub use logger::{EventLogger, LoggerDeps};
pub use task::{TaskDeps, TaskRegistrar};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        FakeDesktop, FakeEventSourceStore, FakeHost, FakeTaskScheduler, FixedClock,
        RecordingEventWriter, RecordingSink,
    };
    use tf_domain::model::{LogSeverity, PROGMAN_CLASS, RemoveOutcome, TASK_NAME};

    #[test]
    fn fresh_machine_install_run_uninstall_scenario() {
        let store = FakeEventSourceStore::default();
        let writer = RecordingEventWriter::default();
        let sink = RecordingSink::default();
        let host = FakeHost::windows_user();
        let desktop = FakeDesktop::with_window(PROGMAN_CLASS, true);

        let registrar = EventLogRegistrar::new(EventLogDeps {
            store: &store,
            host: &host,
        });
        let logger = EventLogger::new(LoggerDeps {
            store: &store,
            writer: &writer,
            fallback: &sink,
        });
        let fixer = FadeFixApplicator::new(FadeFixDeps { desktop: &desktop });

        assert!(!registrar.is_installed());
        registrar.install().expect("install should succeed");
        assert!(registrar.is_installed());

        fixer.apply().expect("mock window acknowledges the signal");
        logger.info("Successfully enabled Active Desktop");
        assert_eq!(
            writer.records(),
            vec![(
                "TransitionFixer".to_string(),
                LogSeverity::Info,
                "Successfully enabled Active Desktop".to_string()
            )]
        );

        assert_eq!(registrar.uninstall().unwrap(), RemoveOutcome::Removed);
        assert!(!registrar.is_installed());

        // アンインストール後はイベントログに書かず、標準エラーのみ
        logger.info("after");
        assert_eq!(writer.records().len(), 1);
        assert_eq!(sink.lines().len(), 2);
    }

    #[test]
    fn uninstall_task_when_absent_is_distinct_from_connection_failure() {
        let host = FakeHost::windows_user();
        let clock = FixedClock::default();

        let empty = FakeTaskScheduler::default();
        let registrar = TaskRegistrar::new(TaskDeps {
            scheduler: &empty,
            host: &host,
            clock: &clock,
        });
        assert_eq!(registrar.uninstall().unwrap(), RemoveOutcome::NotFound);

        let offline = FakeTaskScheduler::unreachable();
        let registrar = TaskRegistrar::new(TaskDeps {
            scheduler: &offline,
            host: &host,
            clock: &clock,
        });
        let err = registrar.uninstall().unwrap_err();
        assert!(!err.is_not_found());
        assert_eq!(err.failed_step(), Some("connect to task service"));
        assert!(offline.task(TASK_NAME).is_none());
    }
}
