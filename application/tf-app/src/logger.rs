//! ロギングファサード
//!
//! イベントログソースが登録済みならOSのイベントログへ書き、
//! 結果にかかわらず標準エラーへも同じ内容を出す（二重書き込み）。
//! ここでの失敗は呼び出し側へ伝播しない。

use tf_domain::model::{APP_NAME, LogSeverity};
use tf_domain::port::driven::{EventSourceStore, EventWriter, FallbackSink};

pub struct LoggerDeps<'a> {
    pub store: &'a dyn EventSourceStore,
    pub writer: &'a dyn EventWriter,
    pub fallback: &'a dyn FallbackSink,
}

pub struct EventLogger<'a> {
    deps: LoggerDeps<'a>,
}

impl<'a> EventLogger<'a> {
    pub fn new(deps: LoggerDeps<'a>) -> Self {
        Self { deps }
    }

    pub fn info(&self, message: &str) {
        self.log(LogSeverity::Info, message);
    }

    pub fn warning(&self, message: &str) {
        self.log(LogSeverity::Warning, message);
    }

    pub fn error(&self, message: &str) {
        self.log(LogSeverity::Error, message);
    }

    pub fn log(&self, severity: LogSeverity, message: &str) {
        if self.deps.store.exists(APP_NAME) {
            if let Err(err) = self.deps.writer.report(APP_NAME, severity, message) {
                self.deps.fallback.write_line(LogSeverity::Warning, &err.to_string());
            }
        }
        self.deps.fallback.write_line(severity, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeEventSourceStore, RecordingEventWriter, RecordingSink};

    fn installed_store() -> FakeEventSourceStore {
        let store = FakeEventSourceStore::default();
        store.seed(APP_NAME);
        store
    }

    #[test]
    fn writes_only_to_fallback_when_source_missing() {
        let store = FakeEventSourceStore::default();
        let writer = RecordingEventWriter::default();
        let sink = RecordingSink::default();
        let logger = EventLogger::new(LoggerDeps {
            store: &store,
            writer: &writer,
            fallback: &sink,
        });

        logger.error("Failed to locate Progman");
        assert!(writer.records().is_empty());
        assert_eq!(
            sink.lines(),
            vec![(LogSeverity::Error, "Failed to locate Progman".to_string())]
        );
    }

    #[test]
    fn mirrors_to_fallback_when_source_installed() {
        let store = installed_store();
        let writer = RecordingEventWriter::default();
        let sink = RecordingSink::default();
        let logger = EventLogger::new(LoggerDeps {
            store: &store,
            writer: &writer,
            fallback: &sink,
        });

        logger.info("hello");
        logger.warning("careful");
        logger.error("broken");

        let severities: Vec<LogSeverity> = writer.records().into_iter().map(|r| r.1).collect();
        assert_eq!(
            severities,
            vec![LogSeverity::Info, LogSeverity::Warning, LogSeverity::Error]
        );
        assert_eq!(sink.lines().len(), 3);
        assert!(writer.records().iter().all(|r| r.0 == APP_NAME));
    }

    #[test]
    fn writer_failure_falls_through_to_fallback() {
        let store = installed_store();
        let writer = RecordingEventWriter::failing();
        let sink = RecordingSink::default();
        let logger = EventLogger::new(LoggerDeps {
            store: &store,
            writer: &writer,
            fallback: &sink,
        });

        logger.info("still visible");
        let lines = sink.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].0, LogSeverity::Warning);
        assert_eq!(lines[1], (LogSeverity::Info, "still visible".to_string()));
    }
}
