//! 複数枚まとめて動かす「スーパームーブ」のルールだよ！🚚
//!
//! 本当は 1 枚ずつしか動かせないけど、空いてるフリーセルと空の場札を
//! 経由すれば何枚まで運べるか計算できる。それを一気に動かすのがスーパームーブ。

use itertools::Itertools;

use super::common::is_stackable;
use crate::components::card::Card;

/// 場札 `pile` の `card_index` から末尾までが、まとめて動かせる「ビルド」か判定する。
///
/// 隣り合うカードが全部「色違い＆ランク 1 ずつ下がる」ならビルド。
/// 末尾のカード 1 枚だけなら常に true。範囲外なら false。
pub fn is_build(pile: &[Card], card_index: usize) -> bool {
    if card_index >= pile.len() {
        return false;
    }
    pile[card_index..]
        .iter()
        .tuple_windows()
        .all(|(under, over)| is_stackable(under, over))
}

/// 場札 `dest_index` に向けて一度に動かせる最大枚数。
///
/// `(空きフリーセル数 + 1) * 2^(空き場札数)` で、移動先が空の場札なら
/// それ自体は中継地点に使えないので空き場札数から除く。
pub fn max_movable_cards(open: &[Option<Card>], cascade: &[Vec<Card>], dest_index: usize) -> usize {
    let empty_open = open.iter().filter(|slot| slot.is_none()).count() as u64;
    let empty_cascade = cascade
        .iter()
        .enumerate()
        .filter(|(i, pile)| pile.is_empty() && *i != dest_index)
        .count() as u32;

    let doubling = 1u64.checked_shl(empty_cascade).unwrap_or(u64::MAX);
    let capacity = (empty_open + 1).saturating_mul(doubling);
    usize::try_from(capacity).unwrap_or(usize::MAX)
}
