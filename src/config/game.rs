// src/config/game.rs
//! ゲームの設定値と、その検証ロジックを定義するよ！
//! 山の数の上限・下限みたいな定数もここにまとめておく。

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{GameError, Result};

/// 組札 (Foundation) の数。スートの数と同じ 4 つで固定だよ。
pub const FOUNDATION_PILE_COUNT: usize = 4;
/// デッキの枚数。
pub const DECK_SIZE: usize = 52;
/// フリーセル・場札の数の下限と上限。
pub const MIN_PILES: usize = 1;
pub const MAX_PILES: usize = 52;

/// 普通のフリーセルの並べ方 (フリーセル 4 つ、場札 8 列)。
pub const DEFAULT_OPEN_PILES: usize = 4;
pub const DEFAULT_CASCADE_PILES: usize = 8;

/// 新しいゲームを作るための設定だよ。
///
/// `seed` を指定すると同じ配り方を再現できる (デバッグやテストに便利！)。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    pub num_open: usize,
    pub num_cascade: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            num_open: DEFAULT_OPEN_PILES,
            num_cascade: DEFAULT_CASCADE_PILES,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn new(num_open: usize, num_cascade: usize) -> Self {
        Self { num_open, num_cascade, seed: None }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// 山の数が [1, 52] に入っているかチェックする。
    pub fn validate(&self) -> Result<()> {
        check_pile_count("open piles", self.num_open)?;
        check_pile_count("cascade piles", self.num_cascade)?;
        Ok(())
    }

    /// フロントエンドから来た JSON を設定に変換するよ。
    ///
    /// JS 側の入力フォームからだと `"8"` みたいな文字列で来ることもあるので、
    /// 整数として読めるものは受け付ける。数字じゃないもの・負の数・小数は
    /// `InvalidConfiguration` にする。
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: Value = serde_json::from_str(json)?;
        let num_open = parse_pile_count("open piles", raw.get("numOpen"), DEFAULT_OPEN_PILES)?;
        let num_cascade = parse_pile_count("cascade piles", raw.get("numCascade"), DEFAULT_CASCADE_PILES)?;
        let seed = match raw.get("seed") {
            None | Some(Value::Null) => None,
            Some(v) => Some(v.as_u64().ok_or_else(|| GameError::InvalidConfiguration {
                field: "seed",
                value: v.to_string(),
            })?),
        };

        let config = GameConfig { num_open, num_cascade, seed };
        config.validate()?;
        Ok(config)
    }
}

fn check_pile_count(field: &'static str, count: usize) -> Result<()> {
    if (MIN_PILES..=MAX_PILES).contains(&count) {
        Ok(())
    } else {
        Err(GameError::InvalidConfiguration { field, value: count.to_string() })
    }
}

fn parse_pile_count(field: &'static str, value: Option<&Value>, default: usize) -> Result<usize> {
    let invalid = |v: &Value| GameError::InvalidConfiguration { field, value: v.to_string() };
    match value {
        None => Ok(default),
        Some(v @ Value::Number(n)) => n
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| invalid(v)),
        Some(v @ Value::String(s)) => s.trim().parse::<usize>().map_err(|_| invalid(v)),
        Some(v) => Err(invalid(v)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_classic_freecell() {
        let config = GameConfig::default();
        assert_eq!(config.num_open, 4);
        assert_eq!(config.num_cascade, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn pile_counts_outside_range_are_rejected() {
        assert!(GameConfig::new(0, 8).validate().is_err());
        assert!(GameConfig::new(4, 0).validate().is_err());
        assert!(GameConfig::new(53, 8).validate().is_err());
        assert!(GameConfig::new(4, 53).validate().is_err());
        assert!(GameConfig::new(1, 1).validate().is_ok());
        assert!(GameConfig::new(52, 52).validate().is_ok());
    }

    #[test]
    fn from_json_accepts_numbers_and_numeric_strings() {
        let config = GameConfig::from_json(r#"{"numOpen": 2, "numCascade": "10", "seed": 7}"#).unwrap();
        assert_eq!(config, GameConfig::new(2, 10).with_seed(7));
    }

    #[test]
    fn from_json_fills_missing_counts_with_defaults() {
        let config = GameConfig::from_json("{}").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn from_json_rejects_non_numeric_values() {
        let err = GameConfig::from_json(r#"{"numOpen": "four"}"#).unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidConfiguration { field: "open piles", value: "\"four\"".to_string() }
        );
        assert!(GameConfig::from_json(r#"{"numCascade": -3}"#).is_err());
        assert!(GameConfig::from_json(r#"{"numCascade": 2.5}"#).is_err());
        assert!(GameConfig::from_json(r#"{"numOpen": true}"#).is_err());
    }

    #[test]
    fn from_json_validates_range() {
        let err = GameConfig::from_json(r#"{"numOpen": 4, "numCascade": 60}"#).unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidConfiguration { field: "cascade piles", value: "60".to_string() }
        );
    }

    #[test]
    fn malformed_json_is_a_protocol_error() {
        assert!(matches!(GameConfig::from_json("{numOpen"), Err(GameError::Protocol(_))));
    }
}
