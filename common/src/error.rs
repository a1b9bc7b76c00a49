//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unreadable image: {0}")]
    UnreadableImage(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
