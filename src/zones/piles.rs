//! The four card piles of a battle.
//!
//! `CardPiles` tracks where every card instance lives:
//! - **draw**: ordered, the top card is the back of the vector
//! - **hand**: ordered, indexed by `PlayCard`
//! - **discard**: reshuffled into draw when draw runs dry
//! - **exhaust**: removed for the rest of the battle
//!
//! Piles are `im::Vector`s, so cloning a battle for look-ahead shares card
//! storage until a branch mutates it.
//!
//! ## Usage
//!
//! ```
//! use card_battler::cards::{Card, CardType};
//! use card_battler::core::GameRng;
//! use card_battler::zones::{CardPiles, PileKind};
//!
//! let mut rng = GameRng::new(1);
//! let deck = (0..6).map(|_| Card::new("Defend", CardType::Skill, 1));
//! let mut piles = CardPiles::new(deck, &mut rng);
//!
//! piles.draw(5, &mut rng);
//! assert_eq!(piles.pile(PileKind::Hand).len(), 5);
//! assert_eq!(piles.pile(PileKind::Draw).len(), 1);
//! ```

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::error::{BattleError, Result};
use crate::core::{CardUid, GameRng};

/// One of the four card piles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PileKind {
    Hand,
    Discard,
    Draw,
    Exhaust,
}

impl PileKind {
    pub const ALL: [PileKind; 4] = [PileKind::Draw, PileKind::Hand, PileKind::Discard, PileKind::Exhaust];

    /// Label shown to decision makers.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PileKind::Hand => "hand",
            PileKind::Discard => "discard",
            PileKind::Draw => "draw",
            PileKind::Exhaust => "exhaust",
        }
    }
}

/// Card locations for one battle.
#[derive(Clone, Debug, Default)]
pub struct CardPiles {
    draw: Vector<Card>,
    hand: Vector<Card>,
    discard: Vector<Card>,
    exhaust: Vector<Card>,
}

impl CardPiles {
    /// Put `deck` into the draw pile and shuffle it.
    #[must_use]
    pub fn new(deck: impl IntoIterator<Item = Card>, rng: &mut GameRng) -> Self {
        let mut piles = Self {
            draw: deck.into_iter().collect(),
            ..Self::default()
        };
        piles.shuffle_draw(rng);
        piles
    }

    #[must_use]
    pub fn pile(&self, kind: PileKind) -> &Vector<Card> {
        match kind {
            PileKind::Draw => &self.draw,
            PileKind::Hand => &self.hand,
            PileKind::Discard => &self.discard,
            PileKind::Exhaust => &self.exhaust,
        }
    }

    fn pile_mut(&mut self, kind: PileKind) -> &mut Vector<Card> {
        match kind {
            PileKind::Draw => &mut self.draw,
            PileKind::Hand => &mut self.hand,
            PileKind::Discard => &mut self.discard,
            PileKind::Exhaust => &mut self.exhaust,
        }
    }

    #[must_use]
    pub fn hand(&self) -> &Vector<Card> {
        &self.hand
    }

    /// Uids of a pile, in pile order.
    #[must_use]
    pub fn uids(&self, kind: PileKind) -> Vec<CardUid> {
        self.pile(kind).iter().map(Card::uid).collect()
    }

    /// Cards across all four piles.
    #[must_use]
    pub fn total(&self) -> usize {
        PileKind::ALL.iter().map(|&kind| self.pile(kind).len()).sum()
    }

    /// Shuffle the draw pile in place.
    pub fn shuffle_draw(&mut self, rng: &mut GameRng) {
        let mut cards: Vec<Card> = self.draw.iter().cloned().collect();
        rng.shuffle(&mut cards);
        self.draw = cards.into_iter().collect();
    }

    /// Move the discard pile under the draw pile and shuffle.
    pub fn reshuffle(&mut self, rng: &mut GameRng) {
        let discard = std::mem::take(&mut self.discard);
        self.draw.append(discard);
        self.shuffle_draw(rng);
    }

    /// Draw the top card into the hand, reshuffling first if the draw pile is
    /// empty. Does nothing when both piles are empty.
    pub fn draw_one(&mut self, rng: &mut GameRng) -> Option<CardUid> {
        if self.draw.is_empty() {
            self.reshuffle(rng);
        }
        let mut card = self.draw.pop_back()?;
        card.peek_cost(rng);
        let uid = card.uid();
        self.hand.push_back(card);
        Some(uid)
    }

    /// Draw up to `count` cards; returns how many were drawn.
    pub fn draw(&mut self, count: usize, rng: &mut GameRng) -> usize {
        (0..count).take_while(|_| self.draw_one(rng).is_some()).count()
    }

    /// Move the whole hand onto the discard pile.
    pub fn discard_hand(&mut self) {
        let hand = std::mem::take(&mut self.hand);
        self.discard.append(hand);
    }

    /// Remove and return the card at `index` of the hand.
    pub fn take_from_hand(&mut self, index: usize) -> Result<Card> {
        if index >= self.hand.len() {
            return Err(BattleError::CardIndexOutOfRange { index, hand_len: self.hand.len() });
        }
        Ok(self.hand.remove(index))
    }

    /// Put `card` back into the hand at `index`, or on top if the hand shrank.
    pub(crate) fn return_to_hand(&mut self, index: usize, card: Card) {
        let index = index.min(self.hand.len());
        self.hand.insert(index, card);
    }

    /// Put `card` on top of a pile.
    pub fn add(&mut self, kind: PileKind, card: Card) {
        self.pile_mut(kind).push_back(card);
    }

    /// Which pile holds `uid`, and where.
    #[must_use]
    pub fn locate(&self, uid: CardUid) -> Option<(PileKind, usize)> {
        PileKind::ALL.iter().find_map(|&kind| {
            self.pile(kind)
                .iter()
                .position(|c| c.uid() == uid)
                .map(|index| (kind, index))
        })
    }

    #[must_use]
    pub fn contains(&self, uid: CardUid) -> bool {
        self.locate(uid).is_some()
    }

    #[must_use]
    pub fn card(&self, uid: CardUid) -> Option<&Card> {
        let (kind, index) = self.locate(uid)?;
        self.pile(kind).get(index)
    }

    pub fn card_mut(&mut self, uid: CardUid) -> Option<&mut Card> {
        let (kind, index) = self.locate(uid)?;
        self.pile_mut(kind).get_mut(index)
    }

    /// Remove `uid` from whichever pile holds it.
    pub fn remove(&mut self, uid: CardUid) -> Option<(PileKind, Card)> {
        let (kind, index) = self.locate(uid)?;
        Some((kind, self.pile_mut(kind).remove(index)))
    }

    /// Move `uid` onto the top of `to`. Returns the pile it came from.
    pub fn move_to(&mut self, uid: CardUid, to: PileKind) -> Option<PileKind> {
        let (from, card) = self.remove(uid)?;
        self.add(to, card);
        Some(from)
    }

    /// Move `uid` to the exhaust pile. Returns false if no pile holds it.
    pub fn exhaust(&mut self, uid: CardUid) -> bool {
        self.move_to(uid, PileKind::Exhaust).is_some()
    }
}
