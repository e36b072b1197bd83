// src/game.rs
//! フリーセルのゲームエンジン本体だよ！🃏
//!
//! 組札・フリーセル・場札の全部の山をこの構造体だけが持っていて、
//! 外から読むときは必ずコピーを返す。書き換えは移動系のメソッド経由だけ！

use itertools::Itertools;
use log::{debug, info, warn};

use crate::components::card::Card;
use crate::components::pile::PileRef;
use crate::config::{GameConfig, DECK_SIZE, FOUNDATION_PILE_COUNT};
use crate::error::{GameError, Result};
use crate::logic::auto_move::find_auto_move_destination;
use crate::logic::deck::{DeckSource, SeededDeck, ThreadRngDeck};
use crate::logic::rules::{self, find_foundation_index, first_empty_open};
use crate::protocol::GameSnapshot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreecellGame {
    foundation: Vec<Vec<Card>>,
    /// フリーセルは 0 枚か 1 枚なので `Option` で持つ。
    open: Vec<Option<Card>>,
    cascade: Vec<Vec<Card>>,
}

impl FreecellGame {
    /// フリーセル `num_open` 個、場札 `num_cascade` 列で新しいゲームを作る。
    pub fn create(num_open: usize, num_cascade: usize) -> Result<Self> {
        Self::new(&GameConfig::new(num_open, num_cascade))
    }

    /// 設定からゲームを作る。`seed` があれば配り方を固定するよ。
    pub fn new(config: &GameConfig) -> Result<Self> {
        match config.seed {
            Some(seed) => Self::with_deck_source(config, &mut SeededDeck::new(seed)),
            None => Self::with_deck_source(config, &mut ThreadRngDeck),
        }
    }

    /// 好きなデッキ供給元を使ってゲームを作る。
    ///
    /// カードは `i % num_cascade` 列目に順番に配る (各列の中ではデッキの順番のまま)。
    /// デッキは重複なしの 52 枚じゃないとダメ。
    pub fn with_deck_source<D: DeckSource>(config: &GameConfig, source: &mut D) -> Result<Self> {
        config.validate()?;

        let deck = source.shuffled_deck();
        if deck.len() != DECK_SIZE || !deck.iter().all_unique() {
            warn!("Deck source returned {} cards or duplicates", deck.len());
            return Err(GameError::InvalidDeck { len: deck.len() });
        }

        let mut game = FreecellGame {
            foundation: vec![Vec::new(); FOUNDATION_PILE_COUNT],
            open: vec![None; config.num_open],
            cascade: vec![Vec::new(); config.num_cascade],
        };

        for (i, card) in deck.into_iter().enumerate() {
            game.cascade[i % config.num_cascade].push(card);
        }

        info!(
            "New game dealt: {} open piles, {} cascade piles, {} cards",
            config.num_open,
            config.num_cascade,
            game.total_card_count()
        );
        Ok(game)
    }

    // --- 読み取り系 (全部コピーを返す) ---

    pub fn get_foundation(&self) -> Vec<Vec<Card>> {
        self.foundation.clone()
    }

    pub fn get_open(&self) -> Vec<Option<Card>> {
        self.open.clone()
    }

    pub fn get_cascade(&self) -> Vec<Vec<Card>> {
        self.cascade.clone()
    }

    pub fn get_num_open(&self) -> usize {
        self.open.len()
    }

    pub fn get_num_cascade(&self) -> usize {
        self.cascade.len()
    }

    /// 全部の山のコピーをまとめて返す。
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::new(&self.foundation, &self.open, &self.cascade)
    }

    /// 盤面にあるカードの総数。いつでも 52 のはず！
    pub fn total_card_count(&self) -> usize {
        let foundation: usize = self.foundation.iter().map(Vec::len).sum();
        let cascade: usize = self.cascade.iter().map(Vec::len).sum();
        foundation + cascade + self.open.iter().flatten().count()
    }

    /// 参照が指しているカード。組札なら一番上のカード。
    pub fn card_at(&self, pile: &PileRef) -> Option<Card> {
        match *pile {
            PileRef::Cascade { index, card_index } => self.cascade.get(index)?.get(card_index?).copied(),
            PileRef::Open { index } => *self.open.get(index)?,
            PileRef::Foundation { index } => self.foundation.get(index)?.last().copied(),
        }
    }

    /// 場札 `pile_index` の `card_index` から末尾までがビルドになっているか。
    pub fn is_build(&self, pile_index: usize, card_index: usize) -> bool {
        self.cascade
            .get(pile_index)
            .map_or(false, |pile| rules::is_build(pile, card_index))
    }

    /// `src` のカードを受け入れてくれる最初の組札のインデックス。
    pub fn get_valid_foundation_index(&self, src: &PileRef) -> Option<usize> {
        let card = match src {
            PileRef::Foundation { .. } => return None,
            _ => self.card_at(src)?,
        };
        find_foundation_index(&card, &self.foundation)
    }

    /// 最初に空いているフリーセルのインデックス。
    pub fn get_first_available_open_index(&self) -> Option<usize> {
        first_empty_open(&self.open)
    }

    /// `src` から `dst` への移動がルール上 OK か。状態は変えないよ。
    pub fn is_valid_move(&self, src: &PileRef, dst: &PileRef) -> bool {
        rules::is_valid_move(self, src, dst)
    }

    // --- 書き換え系 ---

    /// 移動を実行する。
    ///
    /// 実行前に必ず `is_valid_move` でチェックし直して、ダメなら状態に触らず
    /// `GameError::IllegalMove` を返す。
    pub fn execute_move(&mut self, src: &PileRef, dst: &PileRef) -> Result<()> {
        if !self.is_valid_move(src, dst) {
            warn!("Rejected illegal move {} -> {}", src, dst);
            return Err(GameError::IllegalMove { from: *src, to: *dst });
        }

        if let (
            PileRef::Cascade { index: src_index, card_index: Some(card_index) },
            PileRef::Cascade { index: dst_index, .. },
        ) = (*src, *dst)
        {
            // スーパームーブ: card_index から末尾までをまとめて移す (順番はそのまま)
            let run = self.cascade[src_index].split_off(card_index);
            debug!("Moving {} card(s) from cascade[{}] to cascade[{}]", run.len(), src_index, dst_index);
            self.cascade[dst_index].extend(run);
            return Ok(());
        }

        let card = self.take_single_card(src, dst)?;
        self.place_card(card, dst);
        debug!("Moved {} from {} to {}", card, src, dst);
        Ok(())
    }

    /// 組札かフリーセルにカードを自動で飛ばす。動かせたら true。
    ///
    /// 行き先がない場合や、`src` が 1 枚だけ動かせるカードを指していない場合は
    /// 何もせずに false を返す。
    pub fn attempt_auto_move(&mut self, src: &PileRef) -> bool {
        let Some(dst) = find_auto_move_destination(self, src) else {
            return false;
        };
        match self.take_single_card(src, &dst) {
            Ok(card) => {
                self.place_card(card, &dst);
                debug!("Auto-moved {} from {} to {}", card, src, dst);
                true
            }
            Err(e) => {
                warn!("Auto-move from {} failed: {}", src, e);
                false
            }
        }
    }

    // --- 内部ヘルパー ---

    pub(crate) fn foundation_piles(&self) -> &[Vec<Card>] {
        &self.foundation
    }

    pub(crate) fn open_slots(&self) -> &[Option<Card>] {
        &self.open
    }

    pub(crate) fn cascade_piles(&self) -> &[Vec<Card>] {
        &self.cascade
    }

    /// 1 枚だけ動かせるカード (場札の末尾か、埋まっているフリーセル)。
    pub(crate) fn movable_single_card(&self, src: &PileRef) -> Option<Card> {
        match *src {
            PileRef::Cascade { index, card_index } => {
                let pile = self.cascade.get(index)?;
                if card_index.is_some() && pile.len().checked_sub(1) == card_index {
                    pile.last().copied()
                } else {
                    None
                }
            }
            PileRef::Open { index } => *self.open.get(index)?,
            PileRef::Foundation { .. } => None,
        }
    }

    fn take_single_card(&mut self, src: &PileRef, dst: &PileRef) -> Result<Card> {
        let illegal = || GameError::IllegalMove { from: *src, to: *dst };
        if self.movable_single_card(src).is_none() {
            return Err(illegal());
        }
        let card = match *src {
            PileRef::Cascade { index, .. } => self.cascade[index].pop(),
            PileRef::Open { index } => self.open[index].take(),
            PileRef::Foundation { .. } => None,
        };
        card.ok_or_else(illegal)
    }

    /// 行き先はチェック済みの前提。
    fn place_card(&mut self, card: Card, dst: &PileRef) {
        match *dst {
            PileRef::Cascade { index, .. } => self.cascade[index].push(card),
            PileRef::Open { index } => self.open[index] = Some(card),
            PileRef::Foundation { index } => self.foundation[index].push(card),
        }
    }

    /// テスト用: 山の中身を直接指定してゲームを作る。
    #[cfg(test)]
    pub(crate) fn from_piles(foundation: Vec<Vec<Card>>, open: Vec<Option<Card>>, cascade: Vec<Vec<Card>>) -> Self {
        FreecellGame { foundation, open, cascade }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::card::{Rank, Suit};
    use crate::logic::deck::create_standard_deck;
    use std::collections::HashSet;

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    /// 並べ替えなしのデッキを返す供給元 (配り方を確認する用)。
    struct UnshuffledDeck;

    impl DeckSource for UnshuffledDeck {
        fn shuffled_deck(&mut self) -> Vec<Card> {
            create_standard_deck()
        }
    }

    fn all_cards(game: &FreecellGame) -> Vec<Card> {
        let mut cards: Vec<Card> = game.get_foundation().into_iter().flatten().collect();
        cards.extend(game.get_open().into_iter().flatten());
        cards.extend(game.get_cascade().into_iter().flatten());
        cards
    }

    #[test]
    fn new_game_deals_round_robin() {
        let game = FreecellGame::create(4, 8).unwrap();
        let lengths: Vec<usize> = game.get_cascade().iter().map(Vec::len).collect();
        assert_eq!(lengths, vec![7, 7, 7, 7, 6, 6, 6, 6]);
        assert_eq!(game.get_num_open(), 4);
        assert_eq!(game.get_num_cascade(), 8);
        assert!(game.get_open().iter().all(Option::is_none));
        assert!(game.get_foundation().iter().all(Vec::is_empty));

        let cards = all_cards(&game);
        assert_eq!(cards.len(), 52);
        assert_eq!(cards.iter().collect::<HashSet<_>>().len(), 52, "同じカードが 2 回出てきた！");
    }

    #[test]
    fn dealing_keeps_deck_order_within_each_pile() {
        let deck = create_standard_deck();
        let game = FreecellGame::with_deck_source(&GameConfig::new(4, 8), &mut UnshuffledDeck).unwrap();
        let cascade = game.get_cascade();
        assert_eq!(cascade[0][0], deck[0]);
        assert_eq!(cascade[0][1], deck[8]);
        assert_eq!(cascade[3][6], deck[51]);
        assert_eq!(cascade[7][0], deck[7]);
    }

    #[test]
    fn single_cascade_holds_the_whole_deck() {
        let game = FreecellGame::create(1, 1).unwrap();
        assert_eq!(game.get_cascade()[0].len(), 52);
    }

    #[test]
    fn invalid_pile_counts_fail_before_dealing() {
        assert!(matches!(
            FreecellGame::create(0, 8),
            Err(GameError::InvalidConfiguration { field: "open piles", .. })
        ));
        assert!(matches!(
            FreecellGame::create(4, 53),
            Err(GameError::InvalidConfiguration { field: "cascade piles", .. })
        ));
    }

    /// 決まったカード列をそのまま返す供給元。
    struct FixedDeck(Vec<Card>);

    impl DeckSource for FixedDeck {
        fn shuffled_deck(&mut self) -> Vec<Card> {
            self.0.clone()
        }
    }

    #[test]
    fn broken_deck_sources_are_rejected() {
        let config = GameConfig::default();

        let mut short = create_standard_deck();
        short.pop();
        assert_eq!(
            FreecellGame::with_deck_source(&config, &mut FixedDeck(short)),
            Err(GameError::InvalidDeck { len: 51 })
        );

        // 枚数は 52 でも A♠ が 2 枚ある
        let mut duplicated = create_standard_deck();
        duplicated[1] = duplicated[0];
        assert_eq!(
            FreecellGame::with_deck_source(&config, &mut FixedDeck(duplicated)),
            Err(GameError::InvalidDeck { len: 52 })
        );
    }

    #[test]
    fn seeded_games_are_reproducible() {
        let config = GameConfig::default().with_seed(2024);
        assert_eq!(FreecellGame::new(&config).unwrap(), FreecellGame::new(&config).unwrap());
    }

    #[test]
    fn queries_return_independent_copies() {
        let game = FreecellGame::create(4, 8).unwrap();
        let mut cascade = game.get_cascade();
        cascade[0].clear();
        let mut open = game.get_open();
        open[0] = Some(card(Rank::Ace, Suit::Spade));
        assert_eq!(game.get_cascade()[0].len(), 7);
        assert_eq!(game.get_open()[0], None);
    }

    #[test]
    fn ace_of_spades_goes_to_empty_foundation_but_not_onto_two() {
        let ace = card(Rank::Ace, Suit::Spade);
        let game = FreecellGame::from_piles(
            vec![vec![], vec![], vec![], vec![]],
            vec![None; 4],
            vec![vec![card(Rank::Nine, Suit::Heart), ace]],
        );
        assert!(game.is_valid_move(&PileRef::cascade(0, 1), &PileRef::foundation(0)));

        let game = FreecellGame::from_piles(
            vec![vec![card(Rank::Two, Suit::Spade)], vec![], vec![], vec![]],
            vec![None; 4],
            vec![vec![card(Rank::Nine, Suit::Heart), ace]],
        );
        assert!(!game.is_valid_move(&PileRef::cascade(0, 1), &PileRef::foundation(0)));
    }

    #[test]
    fn execute_single_card_moves() {
        let mut game = FreecellGame::from_piles(
            vec![vec![], vec![], vec![], vec![]],
            vec![None, None],
            vec![
                vec![card(Rank::Eight, Suit::Club), card(Rank::Ace, Suit::Heart)],
                vec![card(Rank::Nine, Suit::Diamond)],
            ],
        );

        // 場札 -> 組札
        game.execute_move(&PileRef::cascade(0, 1), &PileRef::foundation(2)).unwrap();
        assert_eq!(game.get_foundation()[2], vec![card(Rank::Ace, Suit::Heart)]);
        assert_eq!(game.get_cascade()[0], vec![card(Rank::Eight, Suit::Club)]);

        // 場札 -> フリーセル
        game.execute_move(&PileRef::cascade(0, 0), &PileRef::open(1)).unwrap();
        assert_eq!(game.get_open()[1], Some(card(Rank::Eight, Suit::Club)));
        assert!(game.get_cascade()[0].is_empty());

        // フリーセル -> 場札 (8♣ を 9♦ の上へ)
        game.execute_move(&PileRef::open(1), &PileRef::cascade(1, 0)).unwrap();
        assert_eq!(game.get_open()[1], None);
        assert_eq!(
            game.get_cascade()[1],
            vec![card(Rank::Nine, Suit::Diamond), card(Rank::Eight, Suit::Club)]
        );
        assert_eq!(game.total_card_count(), 3);
    }

    #[test]
    fn execute_supermove_keeps_run_order() {
        let run = vec![
            card(Rank::Nine, Suit::Heart),
            card(Rank::Eight, Suit::Spade),
            card(Rank::Seven, Suit::Diamond),
        ];
        let mut source = vec![card(Rank::Two, Suit::Club)];
        source.extend(run.iter().copied());
        let mut game = FreecellGame::from_piles(
            vec![vec![], vec![], vec![], vec![]],
            vec![None, None],
            vec![source, vec![card(Rank::Ten, Suit::Club)]],
        );

        game.execute_move(&PileRef::cascade(0, 1), &PileRef::cascade(1, 0)).unwrap();
        assert_eq!(game.get_cascade()[0], vec![card(Rank::Two, Suit::Club)]);
        let mut expected = vec![card(Rank::Ten, Suit::Club)];
        expected.extend(run);
        assert_eq!(game.get_cascade()[1], expected);
    }

    #[test]
    fn illegal_execute_is_rejected_without_mutation() {
        let mut game = FreecellGame::from_piles(
            vec![vec![], vec![], vec![], vec![]],
            vec![Some(card(Rank::King, Suit::Heart))],
            vec![vec![card(Rank::Five, Suit::Club)]],
        );
        let before = game.clone();

        // 埋まっているフリーセルへの移動はダメ
        let err = game.execute_move(&PileRef::cascade(0, 0), &PileRef::open(0)).unwrap_err();
        assert_eq!(err, GameError::IllegalMove { from: PileRef::cascade(0, 0), to: PileRef::open(0) });
        // 5♣ は組札に置けない
        assert!(game.execute_move(&PileRef::cascade(0, 0), &PileRef::foundation(0)).is_err());
        assert_eq!(game, before);
    }

    #[test]
    fn single_card_errors_name_the_real_destination() {
        let mut game = FreecellGame::from_piles(
            vec![vec![], vec![], vec![], vec![]],
            vec![None],
            vec![vec![card(Rank::Five, Suit::Club)]],
        );
        // 検証をすり抜けたつもりで直接取り出しても、エラーの行き先は dst のまま
        let err = game.take_single_card(&PileRef::open(0), &PileRef::foundation(2)).unwrap_err();
        assert_eq!(err, GameError::IllegalMove { from: PileRef::open(0), to: PileRef::foundation(2) });
    }

    #[test]
    fn cascade_destination_without_card_index_is_accepted() {
        let mut game = FreecellGame::from_piles(
            vec![vec![], vec![], vec![], vec![]],
            vec![None],
            vec![vec![card(Rank::Five, Suit::Club)], vec![card(Rank::Six, Suit::Heart)]],
        );
        assert!(game.is_valid_move(&PileRef::cascade(0, 0), &PileRef::cascade_pile(1)));
        // cardIndex のない場札は移動元にはなれない
        assert!(!game.is_valid_move(&PileRef::cascade_pile(0), &PileRef::cascade_pile(1)));
        assert!(!game.attempt_auto_move(&PileRef::cascade_pile(0)));

        game.execute_move(&PileRef::cascade(0, 0), &PileRef::cascade_pile(1)).unwrap();
        assert_eq!(game.get_cascade()[1].len(), 2);
    }

    #[test]
    fn auto_move_prefers_foundation_over_open() {
        let mut game = FreecellGame::from_piles(
            vec![vec![], vec![], vec![], vec![]],
            vec![None; 4],
            vec![vec![card(Rank::Ace, Suit::Diamond)]],
        );
        assert!(game.attempt_auto_move(&PileRef::cascade(0, 0)));
        assert_eq!(game.get_foundation()[0], vec![card(Rank::Ace, Suit::Diamond)]);
        assert!(game.get_open().iter().all(Option::is_none));
    }

    #[test]
    fn auto_move_falls_back_to_first_empty_open() {
        let mut game = FreecellGame::from_piles(
            vec![vec![], vec![], vec![], vec![]],
            vec![Some(card(Rank::King, Suit::Club)), None, None],
            vec![vec![card(Rank::Six, Suit::Heart)]],
        );
        assert!(game.attempt_auto_move(&PileRef::cascade(0, 0)));
        assert_eq!(game.get_open()[1], Some(card(Rank::Six, Suit::Heart)));
        assert!(game.get_cascade()[0].is_empty());
    }

    #[test]
    fn auto_move_from_open_to_foundation_clears_the_cell() {
        let mut game = FreecellGame::from_piles(
            vec![vec![card(Rank::Ace, Suit::Club)], vec![], vec![], vec![]],
            vec![None, Some(card(Rank::Two, Suit::Club))],
            vec![vec![card(Rank::Six, Suit::Heart)]],
        );
        assert!(game.attempt_auto_move(&PileRef::open(1)));
        assert_eq!(game.get_open()[1], None);
        assert_eq!(game.get_foundation()[0].len(), 2);
    }

    #[test]
    fn auto_move_without_destination_leaves_state_alone() {
        let mut game = FreecellGame::from_piles(
            vec![vec![], vec![], vec![], vec![]],
            vec![Some(card(Rank::King, Suit::Club))],
            vec![vec![card(Rank::Six, Suit::Heart)]],
        );
        let before = game.clone();
        assert!(!game.attempt_auto_move(&PileRef::cascade(0, 0)));
        assert_eq!(game, before);
    }

    #[test]
    fn auto_move_ignores_non_tail_and_empty_sources() {
        let mut game = FreecellGame::from_piles(
            vec![vec![], vec![], vec![], vec![]],
            vec![None],
            vec![vec![card(Rank::Ace, Suit::Heart), card(Rank::Six, Suit::Heart)]],
        );
        let before = game.clone();
        // A♥ は 6♥ の下にあるので動かせない
        assert!(!game.attempt_auto_move(&PileRef::cascade(0, 0)));
        assert!(!game.attempt_auto_move(&PileRef::open(0)));
        assert!(!game.attempt_auto_move(&PileRef::cascade(5, 0)));
        assert!(!game.attempt_auto_move(&PileRef::foundation(0)));
        assert_eq!(game, before);
    }

    #[test]
    fn huge_card_index_is_just_an_unmovable_source() {
        let mut game = FreecellGame::from_piles(
            vec![vec![], vec![], vec![], vec![]],
            vec![None],
            vec![vec![card(Rank::Ace, Suit::Heart)]],
        );
        let before = game.clone();
        let src = PileRef::cascade(0, usize::MAX);
        assert!(!game.attempt_auto_move(&src));
        assert!(!game.is_valid_move(&src, &PileRef::foundation(0)));
        assert_eq!(game.get_valid_foundation_index(&src), None);
        assert_eq!(game, before);
    }

    #[test]
    fn is_build_on_last_index_is_always_true() {
        let game = FreecellGame::create(4, 8).unwrap();
        for (i, pile) in game.get_cascade().iter().enumerate() {
            assert!(game.is_build(i, pile.len() - 1));
        }
        assert!(!game.is_build(8, 0), "存在しない場札はビルドじゃない");
    }

    #[test]
    fn lookups_return_none_when_nothing_fits() {
        let game = FreecellGame::from_piles(
            vec![vec![], vec![], vec![], vec![]],
            vec![Some(card(Rank::King, Suit::Club))],
            vec![vec![card(Rank::Six, Suit::Heart)]],
        );
        assert_eq!(game.get_valid_foundation_index(&PileRef::cascade(0, 0)), None);
        assert_eq!(game.get_valid_foundation_index(&PileRef::open(3)), None);
        assert_eq!(game.get_first_available_open_index(), None);
    }

    #[test]
    fn card_at_reads_every_pile_kind() {
        let game = FreecellGame::from_piles(
            vec![vec![card(Rank::Ace, Suit::Club), card(Rank::Two, Suit::Club)], vec![], vec![], vec![]],
            vec![Some(card(Rank::King, Suit::Club))],
            vec![vec![card(Rank::Six, Suit::Heart)]],
        );
        assert_eq!(game.card_at(&PileRef::foundation(0)), Some(card(Rank::Two, Suit::Club)));
        assert_eq!(game.card_at(&PileRef::open(0)), Some(card(Rank::King, Suit::Club)));
        assert_eq!(game.card_at(&PileRef::cascade(0, 0)), Some(card(Rank::Six, Suit::Heart)));
        assert_eq!(game.card_at(&PileRef::cascade(0, 1)), None);
        assert_eq!(game.card_at(&PileRef::foundation(1)), None);
    }
}
