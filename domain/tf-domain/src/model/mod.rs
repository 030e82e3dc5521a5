//! ドメインモデル
//!
//! 標準ライブラリのみ使用（外部依存なし）
//! 固定識別子、OS統合ポイントの値オブジェクトを定義

mod desktop;        // デスクトップ（Progman）へのシグナル
mod event_log;      // イベントログソース登録と重大度
pub mod exit_codes; // プロセス終了コード
mod identity;       // アプリ名・タスク名などの固定識別子
mod mode;           // 実行モード
mod task;           // スケジュールタスク定義

pub use desktop::*;
pub use event_log::*;
pub use identity::*;
pub use mode::*;
pub use task::*;
