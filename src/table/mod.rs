pub mod seat;
pub mod stage;

pub use seat::{Chips, Seat, Status};
pub use stage::Stage;

use crate::cards::{Card, Deck, NO_CARD};

/// Fixed table size this server coordinates.
pub const SEATS: usize = 6;

/// Authoritative state for one table: seats, community cards, the pot, and
/// the stage of play. Mutated only by the game loop.
#[derive(Debug, Clone)]
pub struct Table {
    pub seats: [Seat; SEATS],
    pub dealer: usize,
    pub current: usize,
    pub community: [Card; 5],
    pub highest_bet: Chips,
    pub pot: Chips,
    pub stage: Stage,
    pub deck: Deck,
}

impl Table {
    pub fn new(starting_stack: Chips) -> Self {
        Self {
            seats: std::array::from_fn(|_| Seat::empty(starting_stack)),
            dealer: 0,
            current: 0,
            community: [NO_CARD; 5],
            highest_bet: 0,
            pot: 0,
            stage: Stage::Join,
            deck: Deck::ordered(),
        }
    }

    pub fn live_count(&self) -> usize {
        self.seats.iter().filter(|s| s.is_live()).count()
    }

    pub fn contenders(&self) -> impl Iterator<Item = usize> + '_ {
        (0..SEATS).filter(|&i| self.seats[i].is_contending())
    }

    pub fn non_folded_count(&self) -> usize {
        self.seats
            .iter()
            .filter(|s| matches!(s.status, Status::Active | Status::AllIn))
            .count()
    }

    /// First live (non-LEFT, not necessarily active) seat strictly clockwise
    /// of `from`, wrapping around. Used for dealer advancement.
    pub fn next_live_after(&self, from: usize) -> Option<usize> {
        (1..=SEATS).map(|i| (from + i) % SEATS).find(|&p| self.seats[p].is_live())
    }

    /// Lowest-index live seat. Used to seat the dealer for the very first
    /// hand, before any dealer position yet exists to advance from.
    pub fn lowest_live(&self) -> Option<usize> {
        (0..SEATS).find(|&p| self.seats[p].is_live())
    }

    /// First ACTIVE seat strictly clockwise of `from`, wrapping around.
    /// Used for action order within a street.
    pub fn next_active_after(&self, from: usize) -> Option<usize> {
        (1..=SEATS)
            .map(|i| (from + i) % SEATS)
            .find(|&p| self.seats[p].status == Status::Active)
    }

    /// Resets the table for a new hand: reshuffles, clears the board and
    /// bets, promotes all live seats to active, and advances the dealer.
    pub fn begin_hand(&mut self, seed: u64) {
        self.deck = Deck::shuffled(seed);
        self.community = [NO_CARD; 5];
        self.pot = 0;
        self.highest_bet = 0;
        for seat in self.seats.iter_mut() {
            seat.current_bet = 0;
            seat.has_acted = false;
            seat.hole = [NO_CARD, NO_CARD];
            if seat.is_live() {
                seat.status = Status::Active;
            }
        }
        self.dealer = if self.stage == Stage::Join {
            self.lowest_live().unwrap_or(self.dealer)
        } else {
            self.next_live_after(self.dealer).unwrap_or(self.dealer)
        };
        self.stage = Stage::Init;
    }

    /// Clears per-street betting state and sets `current` to the first
    /// active seat strictly clockwise of the dealer.
    pub fn begin_street(&mut self, stage: Stage) {
        self.highest_bet = 0;
        for seat in self.seats.iter_mut() {
            seat.current_bet = 0;
            seat.has_acted = false;
        }
        self.stage = stage;
        self.current = self.next_active_after(self.dealer).unwrap_or(self.dealer);
    }

    pub fn deal_hole_cards(&mut self) {
        for i in 0..SEATS {
            if self.seats[i].status == Status::Active {
                self.seats[i].hole[0] = self.deck.draw().expect("deck has 52 cards");
            }
        }
        for i in 0..SEATS {
            if self.seats[i].status == Status::Active {
                self.seats[i].hole[1] = self.deck.draw().expect("deck has 52 cards");
            }
        }
    }

    pub fn deal_community(&mut self, n: usize, offset: usize) {
        for i in offset..offset + n {
            self.community[i] = self.deck.draw().expect("deck has enough cards");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_hand_seats_dealer_at_lowest_live_index() {
        let mut table = Table::new(100);
        for seat in table.seats.iter_mut() {
            seat.status = Status::Active;
        }
        table.pot = 50;
        assert_eq!(table.stage, Stage::Join);
        table.begin_hand(1);
        assert_eq!(table.dealer, 0);
        assert_eq!(table.pot, 0);
        assert!(table.community.iter().all(|c| c.is_none()));
    }

    #[test]
    fn first_hand_skips_left_seats_for_dealer() {
        let mut table = Table::new(100);
        for seat in table.seats.iter_mut() {
            seat.status = Status::Active;
        }
        table.seats[0].status = Status::Left;
        table.begin_hand(1);
        assert_eq!(table.dealer, 1);
    }

    #[test]
    fn later_hand_advances_dealer_from_previous_position() {
        let mut table = Table::new(100);
        for seat in table.seats.iter_mut() {
            seat.status = Status::Active;
        }
        table.dealer = 0;
        table.stage = Stage::Showdown;
        table.begin_hand(1);
        assert_eq!(table.dealer, 1);
    }

    #[test]
    fn later_hand_skips_left_seats_for_dealer() {
        let mut table = Table::new(100);
        for seat in table.seats.iter_mut() {
            seat.status = Status::Active;
        }
        table.seats[1].status = Status::Left;
        table.dealer = 0;
        table.stage = Stage::Showdown;
        table.begin_hand(1);
        assert_eq!(table.dealer, 2);
    }

    #[test]
    fn begin_street_clears_bets_and_sets_current() {
        let mut table = Table::new(100);
        for seat in table.seats.iter_mut() {
            seat.status = Status::Active;
        }
        table.dealer = 0;
        table.seats[1].current_bet = 10;
        table.highest_bet = 10;
        table.begin_street(Stage::Flop);
        assert_eq!(table.highest_bet, 0);
        assert_eq!(table.seats[1].current_bet, 0);
        assert_eq!(table.current, 1);
    }

    #[test]
    fn deal_hole_cards_only_to_active_seats() {
        let mut table = Table::new(100);
        table.seats[0].status = Status::Active;
        table.seats[1].status = Status::Left;
        table.deal_hole_cards();
        assert!(!table.seats[0].hole[0].is_none());
        assert!(table.seats[1].hole[0].is_none());
    }
}
