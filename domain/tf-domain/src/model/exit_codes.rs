//! プロセス終了コード定義

/// 正常終了
pub const SUCCESS: u8 = 0;
/// 操作失敗
pub const FAILURE: u8 = 1;
/// コマンドライン引数エラー
pub const CMDLINE_ERROR: u8 = 2;
/// 想定外のエラー（panic）
pub const UNEXPECTED_ERROR: u8 = 3;
