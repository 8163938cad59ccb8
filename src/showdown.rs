use crate::cards::evaluator;
use crate::table::{Status, Table, SEATS};

/// Resolves a finished hand and pays the winner. Does not itself decide
/// whether to short-circuit; the caller passes whichever seats are still in
/// the hand (one, for a fold-out; all ACTIVE/ALL_IN seats, at a full
/// showdown).
///
/// Side pots and split pots are out of scope: the entire pot goes to the
/// single best hand, ties broken by lowest seat index.
pub fn resolve(table: &mut Table) -> usize {
    let winner = find_winner(table);
    table.seats[winner].stack += table.pot;
    table.pot = 0;
    winner
}

fn find_winner(table: &Table) -> usize {
    let mut best_seat = None;
    let mut best_score = 0u32;
    for i in 0..SEATS {
        if !matches!(table.seats[i].status, Status::Active | Status::AllIn) {
            continue;
        }
        let mut cards = Vec::with_capacity(7);
        cards.extend(table.seats[i].hole.iter().filter(|c| !c.is_none()));
        cards.extend(table.community.iter().filter(|c| !c.is_none()));
        let score = evaluator::evaluate(&cards);
        if score > best_score || best_seat.is_none() {
            best_score = score;
            best_seat = Some(i);
        }
    }
    best_seat.expect("showdown requires at least one contending seat")
}

/// Index of the sole non-folded, non-left seat, if exactly one remains.
pub fn lone_survivor(table: &Table) -> Option<usize> {
    let mut contenders = (0..SEATS).filter(|&i| matches!(table.seats[i].status, Status::Active | Status::AllIn));
    let first = contenders.next()?;
    if contenders.next().is_none() {
        Some(first)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Rank, Suit};

    fn table_with_hands(hands: [[Card; 2]; SEATS], community: [Card; 5], pot: i64) -> Table {
        let mut table = Table::new(100);
        table.community = community;
        table.pot = pot;
        for i in 0..SEATS {
            table.seats[i].status = Status::Active;
            table.seats[i].hole = hands[i];
        }
        table
    }

    #[test]
    fn royal_flush_beats_four_aces() {
        let community = [
            Card::new(Rank::Ace, Suit::Spade),
            Card::new(Rank::King, Suit::Spade),
            Card::new(Rank::Queen, Suit::Spade),
            Card::new(Rank::Jack, Suit::Spade),
            Card::new(Rank::Ten, Suit::Diamond),
        ];
        let mut hands = [[crate::cards::NO_CARD; 2]; SEATS];
        hands[0] = [Card::new(Rank::Ten, Suit::Spade), Card::new(Rank::Two, Suit::Club)];
        hands[1] = [Card::new(Rank::Ace, Suit::Heart), Card::new(Rank::Ace, Suit::Diamond)];
        for seat in hands.iter_mut().skip(2) {
            *seat = [Card::new(Rank::Two, Suit::Diamond), Card::new(Rank::Three, Suit::Club)];
        }
        let mut table = table_with_hands(hands, community, 60);
        for i in 2..SEATS {
            table.seats[i].status = Status::Folded;
        }
        let winner = resolve(&mut table);
        assert_eq!(winner, 0);
        assert_eq!(table.pot, 0);
        assert_eq!(table.seats[0].stack, 160);
    }

    #[test]
    fn ties_favor_lowest_seat_index() {
        let community = [
            Card::new(Rank::Two, Suit::Diamond),
            Card::new(Rank::Five, Suit::Club),
            Card::new(Rank::Nine, Suit::Heart),
            Card::new(Rank::Jack, Suit::Spade),
            Card::new(Rank::King, Suit::Diamond),
        ];
        let mut hands = [[crate::cards::NO_CARD; 2]; SEATS];
        hands[2] = [Card::new(Rank::Ace, Suit::Club), Card::new(Rank::Three, Suit::Heart)];
        hands[4] = [Card::new(Rank::Ace, Suit::Heart), Card::new(Rank::Three, Suit::Spade)];
        for (i, seat) in hands.iter_mut().enumerate() {
            if i != 2 && i != 4 {
                *seat = [Card::new(Rank::Two, Suit::Club), Card::new(Rank::Two, Suit::Heart)];
            }
        }
        let mut table = table_with_hands(hands, community, 20);
        for i in 0..SEATS {
            if i != 2 && i != 4 {
                table.seats[i].status = Status::Folded;
            }
        }
        let winner = resolve(&mut table);
        assert_eq!(winner, 2);
    }

    #[test]
    fn lone_survivor_detects_single_contender() {
        let mut table = Table::new(100);
        table.seats[0].status = Status::Active;
        table.seats[1].status = Status::Folded;
        for seat in table.seats.iter_mut().skip(2) {
            seat.status = Status::Folded;
        }
        assert_eq!(lone_survivor(&table), Some(0));
    }

    #[test]
    fn lone_survivor_is_none_with_multiple_contenders() {
        let mut table = Table::new(100);
        table.seats[0].status = Status::Active;
        table.seats[1].status = Status::AllIn;
        assert_eq!(lone_survivor(&table), None);
    }
}
