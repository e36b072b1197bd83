// src/lib.rs

// WASM と JavaScript を繋ぐための基本！
use wasm_bindgen::prelude::*;

// 自分で作ったモジュールたち！ これでコードを整理してるんだ。
pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod logic;
pub mod protocol;

// よく使う型はここから直接 use できるようにしておく
pub use app::FreecellApp;
pub use components::{Card, CardColor, PileKind, PileRef, Rank, Suit};
pub use config::GameConfig;
pub use error::GameError;
pub use game::FreecellGame;
pub use protocol::GameSnapshot;

// main 関数の代わりに、Wasm がロードされた時に最初に実行される関数だよ。
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    logging::init_logger(log::LevelFilter::Info);
    log::info!("freecell_wasm loaded");
}
