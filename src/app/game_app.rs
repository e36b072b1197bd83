// src/app/game_app.rs

use log::{info, warn};
use wasm_bindgen::prelude::*;

use crate::app::state_getter;
use crate::config::GameConfig;
use crate::error::{GameError, Result};
use crate::game::FreecellGame;
use crate::logic::rules::{check_win_condition, has_legal_move};
use crate::protocol::{parse_pile_ref, PileRef};

impl From<GameError> for JsValue {
    fn from(e: GameError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

// --- JS 側から見えるゲーム本体 ---
// 山の参照は `{"type":"cascade","index":0,"cardIndex":5}` みたいな JSON 文字列で受け取るよ。
#[wasm_bindgen]
pub struct FreecellApp {
    game: FreecellGame,
}

#[wasm_bindgen]
impl FreecellApp {
    #[wasm_bindgen(constructor)]
    pub fn new(num_open: u32, num_cascade: u32) -> std::result::Result<FreecellApp, JsValue> {
        Ok(Self::create(num_open as usize, num_cascade as usize)?)
    }

    /// `{"numOpen":4,"numCascade":8,"seed":123}` 形式の設定から新しいゲームを作る。
    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config(config_json: &str) -> std::result::Result<FreecellApp, JsValue> {
        Ok(Self::create_from_json(config_json)?)
    }

    #[wasm_bindgen(js_name = getNumOpen)]
    pub fn get_num_open(&self) -> u32 {
        self.game.get_num_open() as u32
    }

    #[wasm_bindgen(js_name = getNumCascade)]
    pub fn get_num_cascade(&self) -> u32 {
        self.game.get_num_cascade() as u32
    }

    /// 盤面まるごとの JSON。
    #[wasm_bindgen(js_name = getStateJson)]
    pub fn get_state_json(&self) -> std::result::Result<String, JsValue> {
        Ok(state_getter::get_state_json(&self.game)?)
    }

    #[wasm_bindgen(js_name = isBuild)]
    pub fn is_build(&self, pile_index: u32, card_index: u32) -> bool {
        self.game.is_build(pile_index as usize, card_index as usize)
    }

    /// 見つからなければ JS 側には `undefined` が返る。
    #[wasm_bindgen(js_name = getValidFoundationIndex)]
    pub fn get_valid_foundation_index(&self, src_json: &str) -> Option<u32> {
        let src = parse_pile_ref(src_json).ok()?;
        self.game.get_valid_foundation_index(&src).map(|i| i as u32)
    }

    #[wasm_bindgen(js_name = getFirstAvailableOpenIndex)]
    pub fn get_first_available_open_index(&self) -> Option<u32> {
        self.game.get_first_available_open_index().map(|i| i as u32)
    }

    /// 読めない JSON も「無効な移動」として false を返すだけ。
    #[wasm_bindgen(js_name = isValidMove)]
    pub fn is_valid_move(&self, src_json: &str, dst_json: &str) -> bool {
        match Self::parse_move(src_json, dst_json) {
            Ok((src, dst)) => self.game.is_valid_move(&src, &dst),
            Err(e) => {
                warn!("FreecellApp: isValidMove got unreadable input: {}", e);
                false
            }
        }
    }

    #[wasm_bindgen(js_name = executeMove)]
    pub fn execute_move(&mut self, src_json: &str, dst_json: &str) -> std::result::Result<(), JsValue> {
        Ok(self.try_execute_move(src_json, dst_json)?)
    }

    #[wasm_bindgen(js_name = attemptAutoMove)]
    pub fn attempt_auto_move(&mut self, src_json: &str) -> bool {
        match parse_pile_ref(src_json) {
            Ok(src) => self.game.attempt_auto_move(&src),
            Err(e) => {
                warn!("FreecellApp: attemptAutoMove got unreadable input: {}", e);
                false
            }
        }
    }

    #[wasm_bindgen(js_name = isWon)]
    pub fn is_won(&self) -> bool {
        check_win_condition(&self.game.get_foundation())
    }

    #[wasm_bindgen(js_name = hasLegalMove)]
    pub fn has_legal_move(&self) -> bool {
        has_legal_move(&self.game)
    }
}

// --- JsValue を使わない中身 (ネイティブでもテストできるように分けてある) ---
impl FreecellApp {
    fn create(num_open: usize, num_cascade: usize) -> Result<FreecellApp> {
        Self::create_with_config(&GameConfig::new(num_open, num_cascade))
    }

    fn create_from_json(config_json: &str) -> Result<FreecellApp> {
        Self::create_with_config(&GameConfig::from_json(config_json)?)
    }

    fn create_with_config(config: &GameConfig) -> Result<FreecellApp> {
        info!("FreecellApp: starting a new game with {:?}", config);
        let game = FreecellGame::new(config)?;
        Ok(FreecellApp { game })
    }

    fn parse_move(src_json: &str, dst_json: &str) -> Result<(PileRef, PileRef)> {
        Ok((parse_pile_ref(src_json)?, parse_pile_ref(dst_json)?))
    }

    fn try_execute_move(&mut self, src_json: &str, dst_json: &str) -> Result<()> {
        let (src, dst) = Self::parse_move(src_json, dst_json)?;
        self.game.execute_move(&src, &dst)
    }
}
