// src/app/mod.rs
//! JS から呼ばれる FreecellApp と、その中身を役割ごとに分割して置くモジュールだよ！

pub mod game_app;
pub mod state_getter;

pub use game_app::FreecellApp;
