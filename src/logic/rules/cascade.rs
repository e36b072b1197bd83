//! 場札 (Cascade) へのカード移動ルールを定義するよ。

use log::trace;

use super::common::{is_stackable, top_card};
use crate::components::card::Card;

/// 指定されたカードが、特定の場札の一番上に置けるかチェックする。
///
/// - 範囲外のインデックスはダメ
/// - 空の場札にはどのカードでも置ける (クロンダイクと違って King 限定じゃない！)
/// - それ以外は色違いで、ランクがちょうど 1 小さいこと
pub fn can_add_to_cascade(card: &Card, cascade: &[Vec<Card>], dest_index: usize) -> bool {
    let Some(pile) = cascade.get(dest_index) else {
        trace!("[Cascade Rule] cascade[{}] does not exist", dest_index);
        return false;
    };
    match top_card(pile) {
        None => true,
        Some(top) => {
            let ok = is_stackable(top, card);
            trace!("[Cascade Rule] {} onto {}: {}", card, top, ok);
            ok
        }
    }
}
