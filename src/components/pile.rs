// src/components/pile.rs

// serde を使うためにインポート！フロントエンドとのやり取りは JSON なので、これが重要！✨
use serde::{Deserialize, Serialize};
use std::fmt;

/// 山の種類だけを表す Enum だよ。`PileRef` からインデックスを取り除いたもの。
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PileKind {
    Cascade,
    Open,
    Foundation,
}

/// 移動元・移動先の山を指す軽量な参照だよ。
///
/// JSON では `{"type":"cascade","index":0,"cardIndex":5}` の形になる。
/// `card_index` は場札 (Cascade) にしかないので、バリアントごとにフィールドを分けてある。
/// これで「フリーセルなのに cardIndex が入ってる」みたいな変な値は作れない！
/// 移動先の場札は `{"type":"cascade","index":7}` のように `cardIndex` を省略できる。
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PileRef {
    /// 場札。`card_index` は複数枚移動の開始位置 (0 が一番下)。移動元では必須。
    Cascade {
        index: usize,
        #[serde(rename = "cardIndex", default, skip_serializing_if = "Option::is_none")]
        card_index: Option<usize>,
    },
    /// フリーセル (open pile)。カードは 0 枚か 1 枚。
    Open { index: usize },
    /// 組札。
    Foundation { index: usize },
}

impl PileRef {
    pub fn cascade(index: usize, card_index: usize) -> Self {
        PileRef::Cascade { index, card_index: Some(card_index) }
    }

    /// 場札の列そのもの (移動先用。`cardIndex` なし)。
    pub fn cascade_pile(index: usize) -> Self {
        PileRef::Cascade { index, card_index: None }
    }

    pub fn open(index: usize) -> Self {
        PileRef::Open { index }
    }

    pub fn foundation(index: usize) -> Self {
        PileRef::Foundation { index }
    }

    pub fn kind(&self) -> PileKind {
        match self {
            PileRef::Cascade { .. } => PileKind::Cascade,
            PileRef::Open { .. } => PileKind::Open,
            PileRef::Foundation { .. } => PileKind::Foundation,
        }
    }

    pub fn index(&self) -> usize {
        match *self {
            PileRef::Cascade { index, .. } | PileRef::Open { index } | PileRef::Foundation { index } => index,
        }
    }

    /// 同じ山を指しているか (場札の `card_index` は無視する)。
    pub fn same_pile(&self, other: &PileRef) -> bool {
        self.kind() == other.kind() && self.index() == other.index()
    }
}

impl fmt::Display for PileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PileRef::Cascade { index, card_index: Some(card_index) } => write!(f, "cascade[{}]@{}", index, card_index),
            PileRef::Cascade { index, card_index: None } => write!(f, "cascade[{}]", index),
            PileRef::Open { index } => write!(f, "open[{}]", index),
            PileRef::Foundation { index } => write!(f, "foundation[{}]", index),
        }
    }
}
