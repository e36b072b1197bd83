//! ルール判定で共通して使うヘルパー関数を置くよ。

use crate::components::card::Card;

/// `over` を `under` の上に重ねられるか (色違い＆ランクがちょうど 1 小さい)。
pub fn is_stackable(under: &Card, over: &Card) -> bool {
    under.is_black() != over.is_black() && under.value() == over.value() + 1
}

/// 山の一番上 (末尾) のカード。空なら `None`。
pub(crate) fn top_card(pile: &[Card]) -> Option<&Card> {
    pile.last()
}
