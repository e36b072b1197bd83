// src/protocol.rs

// このファイルは、エンジンとフロントエンド (JS) の間でやり取りする
// データの形式（プロトコル）を定義するよ！💌
// `serde` で Rust の構造体 <-> JSON 文字列 を行き来する。
use serde::{Deserialize, Serialize};

use crate::components::card::Card;
pub use crate::components::pile::PileRef;
use crate::error::Result;

/// 盤面まるごとのコピー。画面の描き直しに使う想定だよ。
///
/// フリーセルも「0 枚か 1 枚の配列」として送るので、JS 側は全部の山を同じように扱える。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub foundation: Vec<Vec<Card>>,
    pub open: Vec<Vec<Card>>,
    pub cascade: Vec<Vec<Card>>,
}

impl GameSnapshot {
    pub fn new(foundation: &[Vec<Card>], open: &[Option<Card>], cascade: &[Vec<Card>]) -> Self {
        Self {
            foundation: foundation.to_vec(),
            open: open.iter().map(|slot| slot.iter().copied().collect()).collect(),
            cascade: cascade.to_vec(),
        }
    }
}

/// JSON 文字列から山の参照を読む。
pub fn parse_pile_ref(json: &str) -> Result<PileRef> {
    Ok(serde_json::from_str(json)?)
}

pub fn snapshot_to_json(snapshot: &GameSnapshot) -> Result<String> {
    Ok(serde_json::to_string(snapshot)?)
}
