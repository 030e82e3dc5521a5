//! TransitionFixer ドメイン層
//!
//! イベントログソースとスケジュールタスクという2つのOS統合ポイント、
//! およびフェード修正シグナルのモデルとポートを定義する。
//! 外部依存ゼロでRust標準ライブラリのみ使用。ヘキサゴナルアーキテクチャの最内層。

pub mod error; // ドメインエラー定義
pub mod model; // 値オブジェクト、固定識別子
pub mod port;  // ポート（driven）

pub use error::DomainError; // エラー型を再エクスポート
