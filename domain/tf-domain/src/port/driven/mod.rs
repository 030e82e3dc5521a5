//! 駆動ポート（出力インターフェース）。
//!
//! ドメインが外部に求める機能を定義する。
//! インフラ層のアダプタが実装する。
//! 各操作は固定名から毎回解決し、ハンドルを呼び出しをまたいで保持しない。

mod clock;
mod desktop_windows;
mod event_source_store;
mod event_writer;
mod host_context;
mod task_scheduler;

pub use clock::*;
pub use desktop_windows::*;
pub use event_source_store::*;
pub use event_writer::*;
pub use host_context::*;
pub use task_scheduler::*;
