// src/logic/deck.rs

use itertools::iproduct;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{thread_rng, SeedableRng};

use crate::components::card::{Card, ALL_RANKS, ALL_SUITS};
use crate::config::DECK_SIZE;

/// 標準的な52枚のカードデッキを生成する関数だよ！🃏
///
/// スートとランクの全組み合わせを 1 枚ずつ作る。まだシャッフルはしてないよ。
pub fn create_standard_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for (&suit, &rank) in iproduct!(ALL_SUITS.iter(), ALL_RANKS.iter()) {
        deck.push(Card { suit, rank });
    }
    deck
}

/// カードデッキをシャッフルする関数だよ。
///
/// `SliceRandom::shuffle` は Fisher-Yates なので、どの並びも同じ確率で出る！
pub fn shuffle_deck(deck: &mut Vec<Card>) {
    let mut rng = thread_rng();
    deck.shuffle(&mut rng);
}

/// シャッフル済みのデッキを供給するもの。
///
/// エンジンはゲーム開始時に一回だけこれを呼んで、場札に配る。
pub trait DeckSource {
    fn shuffled_deck(&mut self) -> Vec<Card>;
}

/// 毎回 `thread_rng` で新しく混ぜるデッキ。普段のプレイ用。
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngDeck;

impl DeckSource for ThreadRngDeck {
    fn shuffled_deck(&mut self) -> Vec<Card> {
        let mut deck = create_standard_deck();
        shuffle_deck(&mut deck);
        deck
    }
}

/// シード値から決まった並びを作るデッキ。同じシードなら同じ配り方になるよ。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeededDeck {
    pub seed: u64,
}

impl SeededDeck {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl DeckSource for SeededDeck {
    fn shuffled_deck(&mut self) -> Vec<Card> {
        let mut deck = create_standard_deck();
        let mut rng = StdRng::seed_from_u64(self.seed);
        deck.shuffle(&mut rng);
        deck
    }
}
