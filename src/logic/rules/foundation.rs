//! 組札 (Foundation) へのカード移動ルールを定義するよ。
//!
//! どの組札がどのスートを受け持つかは決まってない。最初に置いた A のスートで決まる！

use log::trace;

use super::common::top_card;
use crate::components::card::{Card, Rank};

/// 指定されたカードが、特定の組札の一番上に置けるかチェックする。
pub fn can_add_to_foundation(card: &Card, foundation: &[Vec<Card>], dest_index: usize) -> bool {
    let Some(pile) = foundation.get(dest_index) else {
        trace!("[Foundation Rule] foundation[{}] does not exist", dest_index);
        return false;
    };
    let result = match top_card(pile) {
        // 空の組札には A だけ
        None => card.rank == Rank::Ace,
        Some(top) => top.suit == card.suit && card.value() == top.value() + 1,
    };
    trace!("[Foundation Rule] {} to foundation[{}]: {}", card, dest_index, result);
    result
}

/// カードを受け入れてくれる最初の組札のインデックスを探す。
pub fn find_foundation_index(card: &Card, foundation: &[Vec<Card>]) -> Option<usize> {
    (0..foundation.len()).find(|&i| can_add_to_foundation(card, foundation, i))
}
