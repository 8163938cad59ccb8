use crate::table::seat::Chips;
use std::fmt;

/// An action a seat may take on its turn.
///
/// `Raise` carries the **absolute target** total bet, not a delta — a
/// seat facing `highest_bet = 10` that wants to make it 30 sends
/// `Raise(30)`, not `Raise(20)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Check,
    Call,
    Raise(Chips),
    Fold,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Check => write!(f, "check"),
            Action::Call => write!(f, "call"),
            Action::Raise(to) => write!(f, "raise {to}"),
            Action::Fold => write!(f, "fold"),
        }
    }
}

/// Why an action was rejected. Maps directly to a wire NACK; never escalates
/// to `anyhow::Error` since it represents an ordinary, expected rejection
/// rather than an I/O or invariant failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionError {
    NotYourTurn,
    SeatNotActive,
    CheckFacesABet,
    CallAmountInvalid,
    RaiseNotAboveHighestBet,
    RaiseExceedsStack,
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActionError::NotYourTurn => "not your turn",
            ActionError::SeatNotActive => "seat is not active",
            ActionError::CheckFacesABet => "cannot check facing a bet",
            ActionError::CallAmountInvalid => "call amount invalid",
            ActionError::RaiseNotAboveHighestBet => "raise target must exceed the highest bet",
            ActionError::RaiseExceedsStack => "raise exceeds stack",
        };
        write!(f, "{s}")
    }
}

impl std::error::Error for ActionError {}
