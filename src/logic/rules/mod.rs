// src/logic/rules/mod.rs
//! フリーセルのルール関連モジュールをまとめるよ！

pub mod cascade;
pub mod common;
pub mod foundation;
pub mod move_validation;
pub mod open;
pub mod supermove;
pub mod win_condition;


// 各モジュールから公開したい関数をここで再エクスポート！
pub use cascade::*;
pub use common::*;
pub use foundation::*;
pub use move_validation::*;
pub use open::*;
pub use supermove::*;
pub use win_condition::*;
