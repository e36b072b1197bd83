// src/config/mod.rs
//! ゲーム設定まわりのモジュールだよ！

pub mod game;

pub use game::*;
