// src/components/mod.rs

// ゲームで使うデータ部品をまとめるモジュールだよ！
pub mod card;
pub mod pile;

pub use card::{Card, CardColor, Rank, Suit, ALL_RANKS, ALL_SUITS};
pub use pile::{PileKind, PileRef};
