//! Gets the current game state from the engine and converts it to JSON.

use log::{debug, error};

use crate::error::Result;
use crate::game::FreecellGame;
use crate::protocol::snapshot_to_json;

/// 盤面を JSON 文字列にして返すよ。
pub fn get_state_json(game: &FreecellGame) -> Result<String> {
    let snapshot = game.snapshot();
    match snapshot_to_json(&snapshot) {
        Ok(json) => {
            debug!("Serialized game state ({} bytes)", json.len());
            Ok(json)
        }
        Err(e) => {
            error!("Failed to serialize game state: {}", e);
            Err(e)
        }
    }
}
