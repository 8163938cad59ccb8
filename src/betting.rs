use crate::action::{Action, ActionError};
use crate::table::{Status, Table};

/// Validates and applies one seat's action against the table, per the
/// action-handler rules. Returns the applied action's legality; on error
/// the table is left completely unchanged.
pub fn apply_action(table: &mut Table, seat: usize, action: Action) -> Result<(), ActionError> {
    if seat != table.current {
        return Err(ActionError::NotYourTurn);
    }
    if table.seats[seat].status != Status::Active {
        return Err(ActionError::SeatNotActive);
    }

    match action {
        Action::Check => {
            if table.seats[seat].current_bet != table.highest_bet {
                return Err(ActionError::CheckFacesABet);
            }
            table.seats[seat].has_acted = true;
        }
        Action::Call => {
            let to_call = table.seats[seat].to_call(table.highest_bet);
            if to_call <= 0 || to_call > table.seats[seat].stack {
                return Err(ActionError::CallAmountInvalid);
            }
            table.seats[seat].commit(to_call);
            table.pot += to_call;
            table.seats[seat].has_acted = true;
        }
        Action::Raise(target) => {
            if target <= table.highest_bet {
                return Err(ActionError::RaiseNotAboveHighestBet);
            }
            let delta = target - table.seats[seat].current_bet;
            if delta <= 0 || delta > table.seats[seat].stack {
                return Err(ActionError::RaiseExceedsStack);
            }
            table.seats[seat].commit(delta);
            table.pot += delta;
            table.highest_bet = target;
            table.seats[seat].has_acted = true;
            // Re-open the action: every other seat still in the hand must
            // act again.
            for (i, other) in table.seats.iter_mut().enumerate() {
                if i != seat && other.status == Status::Active {
                    other.has_acted = false;
                }
            }
        }
        Action::Fold => {
            table.seats[seat].status = Status::Folded;
            table.seats[seat].has_acted = true;
        }
    }
    Ok(())
}

/// True once every seat still in the hand (ACTIVE or ALL_IN) has acted this
/// street and, if ACTIVE, matched the highest bet. ALL_IN seats are always
/// satisfied since they cannot act further.
pub fn street_is_done(table: &Table) -> bool {
    table.seats.iter().all(|seat| match seat.status {
        Status::Active => seat.has_acted && seat.current_bet == table.highest_bet,
        Status::AllIn => true,
        Status::Folded | Status::Left => true,
    })
}

/// Advances `current` to the next ACTIVE seat, wrapping clockwise.
pub fn advance_turn(table: &mut Table) {
    if let Some(next) = table.next_active_after(table.current) {
        table.current = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Table;

    fn ready_table(stack: i64) -> Table {
        let mut table = Table::new(stack);
        for seat in table.seats.iter_mut() {
            seat.status = Status::Active;
        }
        table.dealer = 5;
        table.current = 0;
        table
    }

    #[test]
    fn check_requires_matching_highest_bet() {
        let mut table = ready_table(100);
        table.highest_bet = 10;
        let err = apply_action(&mut table, 0, Action::Check).unwrap_err();
        assert_eq!(err, ActionError::CheckFacesABet);
    }

    #[test]
    fn only_current_seat_may_act() {
        let mut table = ready_table(100);
        let err = apply_action(&mut table, 1, Action::Check).unwrap_err();
        assert_eq!(err, ActionError::NotYourTurn);
    }

    #[test]
    fn illegal_raise_below_highest_bet_is_rejected() {
        let mut table = ready_table(100);
        table.highest_bet = 10;
        let before = table.clone();
        let err = apply_action(&mut table, 0, Action::Raise(10)).unwrap_err();
        assert_eq!(err, ActionError::RaiseNotAboveHighestBet);
        assert_eq!(table.pot, before.pot);
        assert_eq!(table.seats[0].stack, before.seats[0].stack);
    }

    #[test]
    fn raise_reopens_action_for_other_active_seats() {
        let mut table = ready_table(100);
        table.seats[1].has_acted = true;
        apply_action(&mut table, 0, Action::Raise(10)).unwrap();
        assert!(!table.seats[1].has_acted);
        assert_eq!(table.highest_bet, 10);
        assert_eq!(table.pot, 10);
    }

    #[test]
    fn all_in_raise_promotes_status() {
        let mut table = ready_table(7);
        apply_action(&mut table, 0, Action::Raise(7)).unwrap();
        assert_eq!(table.seats[0].status, Status::AllIn);
        assert_eq!(table.seats[0].stack, 0);
    }

    #[test]
    fn street_done_requires_all_active_matched_and_acted() {
        let mut table = ready_table(100);
        table.highest_bet = 10;
        for seat in table.seats.iter_mut() {
            seat.current_bet = 10;
            seat.has_acted = true;
        }
        assert!(street_is_done(&table));
        table.seats[2].has_acted = false;
        assert!(!street_is_done(&table));
    }

    #[test]
    fn all_in_seat_does_not_block_termination() {
        let mut table = ready_table(100);
        table.highest_bet = 10;
        for seat in table.seats.iter_mut() {
            seat.current_bet = 10;
            seat.has_acted = true;
        }
        table.seats[3].status = Status::AllIn;
        table.seats[3].current_bet = 5;
        assert!(street_is_done(&table));
    }
}
