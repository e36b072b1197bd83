// src/logic/rules/move_validation.rs
//! カード移動の全体的な妥当性チェックを行う。
//!
//! どんな変な参照が来ても panic せずに false を返すだけ。
//! なのでフロントエンドは何も考えずに問い合わせてOK！

use log::debug;

use super::{can_add_to_cascade, can_add_to_foundation, can_add_to_open, is_build, max_movable_cards};
use crate::components::card::Card;
use crate::components::pile::PileRef;
use crate::game::FreecellGame;

/// 移動元の先頭カードと、そこから動かす枚数を範囲チェック込みで取り出す。
///
/// 組札からは絶対に取り出せないので `None`。`cardIndex` のない場札も移動元にはなれない。
fn source_run(game: &FreecellGame, src: &PileRef) -> Option<(Card, usize)> {
    match *src {
        PileRef::Cascade { index, card_index } => {
            let pile = game.cascade_piles().get(index)?;
            let card_index = card_index?;
            let card = *pile.get(card_index)?;
            Some((card, pile.len() - card_index))
        }
        PileRef::Open { index } => game.open_slots().get(index)?.map(|card| (card, 1)),
        PileRef::Foundation { .. } => None,
    }
}

/// `src` から `dst` への移動がルール上 OK か判定する。状態は一切変えない。
pub fn is_valid_move(game: &FreecellGame, src: &PileRef, dst: &PileRef) -> bool {
    // 同じ山への移動・組札からの移動は即アウト
    if src.same_pile(dst) || matches!(src, PileRef::Foundation { .. }) {
        return false;
    }

    // 範囲外の参照や空のフリーセルはここで弾かれる
    let Some((card, run_len)) = source_run(game, src) else {
        return false;
    };
    // 場札の末尾じゃない = 複数枚移動
    let multi = run_len > 1;

    let result = match (*src, *dst) {
        (
            PileRef::Cascade { index: src_index, card_index: Some(card_index) },
            PileRef::Cascade { index: dst_index, .. },
        ) => {
            if multi {
                // 容量だけだと途中で崩れた列まで運べてしまうので、ビルドになっていることも求める
                is_build(&game.cascade_piles()[src_index], card_index)
                    && can_add_to_cascade(&card, game.cascade_piles(), dst_index)
                    && run_len <= max_movable_cards(game.open_slots(), game.cascade_piles(), dst_index)
            } else {
                can_add_to_cascade(&card, game.cascade_piles(), dst_index)
            }
        }
        (PileRef::Cascade { .. }, PileRef::Open { index }) => !multi && can_add_to_open(game.open_slots(), index),
        (PileRef::Cascade { .. }, PileRef::Foundation { index }) => {
            !multi && can_add_to_foundation(&card, game.foundation_piles(), index)
        }
        (PileRef::Open { .. }, PileRef::Cascade { index, .. }) => {
            can_add_to_cascade(&card, game.cascade_piles(), index)
        }
        (PileRef::Open { .. }, PileRef::Foundation { index }) => {
            can_add_to_foundation(&card, game.foundation_piles(), index)
        }
        // フリーセル同士の移動などは許可しない
        _ => false,
    };

    debug!("[Move Validation] {} ({}) -> {}: {}", src, card, dst, result);
    result
}
