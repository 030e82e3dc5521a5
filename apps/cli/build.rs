//! transition-fixer 用ビルドスクリプト。
//!
//! Windows のバージョン情報とイベントログ用メッセージテーブルを埋め込む。

fn main() {
    println!("cargo:rerun-if-changed=resources.rc");
    println!("cargo:rerun-if-changed=MSG00409.bin");
    #[cfg(windows)]
    {
        let _ = embed_resource::compile("resources.rc", embed_resource::NONE);
    }
}
