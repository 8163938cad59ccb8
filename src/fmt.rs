//! Terminal rendering helpers. Not part of the wire protocol: these format
//! table snapshots for a human watching the server's own console, the way
//! a `Display` impl on game-tree state would for an interactive client.

use crate::cards::Card;
use crate::table::{Status, Table};
use colored::Colorize;
use std::fmt::Write as _;

fn colorize_card(card: Card) -> String {
    use crate::cards::Suit;
    if card.is_none() {
        return "--".dimmed().to_string();
    }
    let text = card.to_string();
    match card.suit() {
        Suit::Diamond | Suit::Heart => text.red().to_string(),
        Suit::Club | Suit::Spade => text.white().to_string(),
    }
}

/// Renders a one-line snapshot of the table: stage, pot, dealer, and every
/// seat's status/stack/bet.
pub fn render_table(table: &Table) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "{} pot={} dealer={} community={}",
        table.stage.to_string().bold(),
        table.pot,
        table.dealer,
        table
            .community
            .iter()
            .map(|c| colorize_card(*c))
            .collect::<Vec<_>>()
            .join(" ")
    );
    for (i, seat) in table.seats.iter().enumerate() {
        if seat.status == Status::Left {
            continue;
        }
        let _ = write!(
            out,
            "\n  seat {i}: {} stack={} bet={}",
            seat.status, seat.stack, seat.current_bet
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::seat::Status;

    #[test]
    fn render_table_includes_stage_and_pot() {
        let mut table = Table::new(100);
        table.seats[0].status = Status::Active;
        table.pot = 30;
        let rendered = render_table(&table);
        assert!(rendered.contains("30"));
        assert!(rendered.contains("seat 0"));
    }
}
