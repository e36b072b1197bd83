//! フリーセル (open pile) へのカード移動ルールを定義するよ。

use crate::components::card::Card;

/// フリーセル `dest_index` にカードを置けるか。存在して、かつ空いていること！
pub fn can_add_to_open(open: &[Option<Card>], dest_index: usize) -> bool {
    matches!(open.get(dest_index), Some(None))
}

/// 最初に空いているフリーセルのインデックス。
pub fn first_empty_open(open: &[Option<Card>]) -> Option<usize> {
    open.iter().position(Option::is_none)
}
