// src/logic/auto_move.rs
//! カードの自動移動に関するロジックをまとめるモジュールだよ！🪄✨
//! ダブルクリックされたカードを、組札かフリーセルのどこに飛ばすか決めるんだ。

use log::debug;

use crate::components::pile::PileRef;
use crate::game::FreecellGame;

/// 自動移動の行き先を探す関数だよ。
///
/// 1. まずはカードを受け入れてくれる組札 (Foundation)
/// 2. なければ最初に空いているフリーセル
///
/// 複数枚移動は考えない。移動元が「1 枚だけ動かせるカード」じゃなければ `None`。
pub fn find_auto_move_destination(game: &FreecellGame, src: &PileRef) -> Option<PileRef> {
    let card = game.movable_single_card(src)?;

    if let Some(index) = game.get_valid_foundation_index(src) {
        debug!("[AutoMove] {} -> foundation[{}]", card, index);
        return Some(PileRef::foundation(index));
    }

    match game.get_first_available_open_index() {
        Some(index) => {
            debug!("[AutoMove] {} -> open[{}]", card, index);
            Some(PileRef::open(index))
        }
        None => {
            debug!("[AutoMove] no destination for {}", card);
            None
        }
    }
}
