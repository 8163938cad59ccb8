use crate::cards::{Card, NO_CARD};
use colored::Colorize;
use std::fmt;

pub type Chips = i64;

/// A seat's standing within the current hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// No player occupies this seat, or the occupant has disconnected.
    Left,
    /// In the hand, free to act.
    Active,
    /// Folded this hand; out of contention but still seated.
    Folded,
    /// Committed its entire stack this hand; still eligible to win the pot.
    AllIn,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Left => "left".red(),
            Status::Active => "active".green(),
            Status::Folded => "folded".yellow(),
            Status::AllIn => "all-in".magenta(),
        };
        write!(f, "{s}")
    }
}

/// One of the six fixed positions at the table.
#[derive(Debug, Clone)]
pub struct Seat {
    pub status: Status,
    pub stack: Chips,
    pub hole: [Card; 2],
    pub current_bet: Chips,
    pub has_acted: bool,
}

impl Seat {
    pub fn empty(starting_stack: Chips) -> Self {
        Self {
            status: Status::Left,
            stack: starting_stack,
            hole: [NO_CARD, NO_CARD],
            current_bet: 0,
            has_acted: false,
        }
    }

    pub fn is_contending(&self) -> bool {
        matches!(self.status, Status::Active | Status::AllIn)
    }

    pub fn is_live(&self) -> bool {
        !matches!(self.status, Status::Left)
    }

    /// Chips this seat still needs to add to match `highest_bet`.
    pub fn to_call(&self, highest_bet: Chips) -> Chips {
        highest_bet - self.current_bet
    }

    /// Moves `amount` from stack into the pot via `current_bet`, promoting
    /// to all-in if the stack is exhausted.
    pub fn commit(&mut self, amount: Chips) {
        debug_assert!(amount <= self.stack);
        self.stack -= amount;
        self.current_bet += amount;
        if self.stack == 0 {
            self.status = Status::AllIn;
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] stack={} bet={} hole={}{}",
            self.status, self.stack, self.current_bet, self.hole[0], self.hole[1]
        )
    }
}
