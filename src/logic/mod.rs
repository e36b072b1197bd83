// src/logic/mod.rs
//! ゲームのロジック (デッキ、ルール、自動移動) をまとめるモジュールだよ！

pub mod auto_move;
pub mod deck;
pub mod rules;
