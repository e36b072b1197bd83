//! ゲームの勝利・詰み判定ロジックを定義するよ。
//!
//! エンジン自身はこれを状態として持たない。画面側が好きなタイミングで聞く用！

use super::is_valid_move;
use crate::components::card::Card;
use crate::components::pile::PileRef;
use crate::config::DECK_SIZE;
use crate::game::FreecellGame;

/// ゲームのクリア条件（全てのカードが組札にあるか）を判定する。
pub fn check_win_condition(foundation: &[Vec<Card>]) -> bool {
    foundation.iter().map(Vec::len).sum::<usize>() == DECK_SIZE
}

/// 今の盤面で合法手がひとつでもあるか。false なら詰み。
pub fn has_legal_move(game: &FreecellGame) -> bool {
    let mut sources = Vec::new();
    for (index, pile) in game.cascade_piles().iter().enumerate() {
        sources.extend((0..pile.len()).map(|card_index| PileRef::cascade(index, card_index)));
    }
    sources.extend((0..game.get_num_open()).map(PileRef::open));

    let mut destinations: Vec<PileRef> = (0..game.get_num_cascade()).map(PileRef::cascade_pile).collect();
    destinations.extend((0..game.get_num_open()).map(PileRef::open));
    destinations.extend((0..game.foundation_piles().len()).map(PileRef::foundation));

    sources
        .iter()
        .any(|src| destinations.iter().any(|dst| is_valid_move(game, src, dst)))
}
