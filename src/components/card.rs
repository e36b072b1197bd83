// src/components/card.rs

// serde を使う宣言！カード情報を JSON にしてフロントエンドへ送るときに使うよ。
use serde::{Deserialize, Serialize};
use std::fmt;

/// カードのスート（マーク）を表す列挙型だよ！❤️♦️♣️♠️
///
/// - Debug: デバッグ表示用 (`println!("{:?}", suit);`)
/// - Clone, Copy: 簡単にコピーできるように
/// - PartialEq, Eq, Hash: 比較したり HashSet に入れたりできるように
/// - Serialize, Deserialize: JSON に変換できるように
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Heart,   // ❤️
    Diamond, // ♦️
    Club,    // ♣️
    Spade,   // ♠️
}

impl Suit {
    /// 表示用の記号。
    pub fn symbol(self) -> char {
        match self {
            Suit::Heart => '♥',
            Suit::Diamond => '♦',
            Suit::Club => '♣',
            Suit::Spade => '♠',
        }
    }
}

/// カードのランク（数字）を表す列挙型だよ！ A, 2, 3, ..., K
///
/// `Ace = 1` から始まるので、`rank as u8` がそのままカードの数字になる！
/// PartialOrd, Ord も付けて、ランクの大小比較 (`<`, `>`) もできるようにしてあるよ👍
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Ace = 1,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,  // 11
    Queen, // 12
    King,  // 13
}

impl Rank {
    /// ランクの数値 (1..=13) を返すよ。
    pub fn value(self) -> u8 {
        self as u8
    }

    /// 数値 (1..=13) からランクを作る。範囲外なら `None`。
    pub fn from_value(value: u8) -> Option<Rank> {
        ALL_RANKS.get(usize::from(value).checked_sub(1)?).copied()
    }

    fn label(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

/// 全スートの一覧。デッキを作るときにループで使う！
pub const ALL_SUITS: [Suit; 4] = [Suit::Heart, Suit::Diamond, Suit::Club, Suit::Spade];

/// 全ランクの一覧 (A -> K の順)。
pub const ALL_RANKS: [Rank; 13] = [
    Rank::Ace,
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
];

/// カードの色（赤か黒か）だよ。場札 (Cascade) に重ねるときの色違いチェックで使う！❤️🖤
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CardColor {
    Red,
    Black,
}

impl CardColor {
    /// スートからカードの色を取得する関数。
    pub fn from_suit(suit: Suit) -> Self {
        match suit {
            Suit::Heart | Suit::Diamond => CardColor::Red,
            Suit::Club | Suit::Spade => CardColor::Black,
        }
    }
}

/// カードそのものを表す値だよ！🃏
///
/// フリーセルでは全部のカードが最初から表向きなので、表裏の状態は持たないよ。
/// 一度作ったら変わらない値なので `Copy` にしてある。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { suit, rank }
    }

    pub fn color(&self) -> CardColor {
        CardColor::from_suit(self.suit)
    }

    pub fn is_black(&self) -> bool {
        self.color() == CardColor::Black
    }

    /// ランクの数値 (1..=13)。
    pub fn value(&self) -> u8 {
        self.rank.value()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}
