//! エラー型定義
//!
//! パイプライン本体は失敗しない。失敗しうるのは辞書の読み込みのみ。

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Dictionary error: {0}")]
    Dictionary(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
