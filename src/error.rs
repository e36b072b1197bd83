// src/error.rs
//! ゲームエンジンのエラー型だよ。

use thiserror::Error;

use crate::components::PileRef;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// 山の数などの設定がおかしい。エンジンを作る前に弾く！
    #[error("Invalid number of {field}: {value}")]
    InvalidConfiguration { field: &'static str, value: String },

    /// ルール上ありえない移動。状態には一切触らずに返す。
    #[error("Illegal move from {from} to {to}")]
    IllegalMove { from: PileRef, to: PileRef },

    /// デッキ供給元が重複なしの 52 枚を返さなかった。
    #[error("Deck must hold 52 distinct cards, got {len}")]
    InvalidDeck { len: usize },

    /// フロントエンドから来た JSON が読めなかった。
    #[error("Malformed message: {0}")]
    Protocol(String),
}

pub type Result<T> = std::result::Result<T, GameError>;

impl From<serde_json::Error> for GameError {
    fn from(e: serde_json::Error) -> Self {
        GameError::Protocol(e.to_string())
    }
}
