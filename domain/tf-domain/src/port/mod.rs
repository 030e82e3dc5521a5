//! ポート定義
//!
//! driven: ドメインが外部（OSストア、ウィンドウ、時刻）に求める機能

pub mod driven;
