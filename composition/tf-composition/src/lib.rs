//! tf-composition: 実行ファイル向けのランタイムを組み立てるコンポジションルート。
//! ドメイン／アプリケーション／各種アダプタをここで配線し、apps/* はこのクレートだけに依存する。

pub mod cli;
pub mod system;

// apps/* が内側レイヤーの型に触れる必要がある場合は、ここから辿れるようにする。
pub use tf_app as app;
pub use tf_domain as domain;

pub use cli::CliRuntime;
pub use tf_domain::model::{Mode, exit_codes};
