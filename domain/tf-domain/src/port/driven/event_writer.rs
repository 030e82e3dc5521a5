//! イベントログ書き込みポートとフォールバック出力

use crate::error::DomainError;
use crate::model::LogSeverity;

/// OSのイベントログへ1件書き込む
pub trait EventWriter {
    fn report(
        &self,
        source_name: &str,
        severity: LogSeverity,
        message: &str,
    ) -> Result<(), DomainError>;
}

/// イベントログが使えない場合にも必ず書かれる出力先（標準エラー）
pub trait FallbackSink {
    fn write_line(&self, severity: LogSeverity, message: &str);
}
