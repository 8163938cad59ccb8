//! The single authoritative game loop. One task per seat forwards decoded
//! client messages into a central channel; this loop is the only code that
//! ever mutates `Table`.

use crate::action::Action;
use crate::betting::{advance_turn, apply_action, street_is_done};
use crate::net::{self, SeatIo};
use crate::showdown;
use crate::table::{Stage, Status, Table, SEATS};
use crate::wire::{ClientMessage, ClientMessageType, EndPacket, InfoPacket, ServerMessage, VisibleStatus};
use anyhow::Result;
use tokio::net::tcp::OwnedWriteHalf;
use tokio::sync::mpsc;

pub struct Room {
    table: Table,
    writers: Vec<OwnedWriteHalf>,
    inbox: mpsc::UnboundedReceiver<(usize, ClientMessage)>,
    seed: u64,
    hand: u64,
}

impl Room {
    pub async fn bind(base_port: u16, starting_stack: i64, seed: u64) -> Result<Self> {
        let seats = net::accept_all(base_port).await?;
        let (tx, rx) = mpsc::unbounded_channel();
        let mut writers = Vec::with_capacity(SEATS);
        for (i, seat_io) in seats.into_iter().enumerate() {
            let SeatIo { mut reader, writer } = seat_io;
            writers.push(writer);
            let tx = tx.clone();
            tokio::spawn(async move {
                loop {
                    match net::receive(&mut reader).await {
                        Ok(msg) => {
                            if tx.send((i, msg)).is_err() {
                                break;
                            }
                        }
                        Err(e) => {
                            log::warn!("seat {i} disconnected: {e}");
                            let _ = tx.send((i, ClientMessage::leave()));
                            break;
                        }
                    }
                }
            });
        }
        drop(tx);
        let mut table = Table::new(starting_stack);
        for seat in table.seats.iter_mut() {
            seat.status = Status::Active;
        }
        Ok(Self { table, writers, inbox: rx, seed, hand: 0 })
    }

    pub async fn run(mut self) -> Result<()> {
        loop {
            if self.table.live_count() < 2 {
                self.broadcast(&ServerMessage::Halt).await;
                log::info!("fewer than two seats remain; halting");
                return Ok(());
            }
            if !self.collect_ready().await? {
                continue;
            }
            self.hand += 1;
            self.table.begin_hand(self.seed.wrapping_add(self.hand));
            self.table.deal_hole_cards();
            self.table.begin_street(Stage::Preflop);
            self.broadcast_info().await;

            loop {
                if showdown::lone_survivor(&self.table).is_some() {
                    break;
                }
                if street_is_done(&self.table) {
                    match self.table.stage {
                        Stage::Preflop => {
                            self.table.deal_community(3, 0);
                            self.table.begin_street(Stage::Flop);
                        }
                        Stage::Flop => {
                            self.table.deal_community(1, 3);
                            self.table.begin_street(Stage::Turn);
                        }
                        Stage::Turn => {
                            self.table.deal_community(1, 4);
                            self.table.begin_street(Stage::River);
                        }
                        Stage::River => break,
                        _ => unreachable!("begin_street only targets betting stages"),
                    }
                    self.broadcast_info().await;
                    continue;
                }
                self.drive_one_action().await?;
            }

            self.table.stage = Stage::Showdown;
            let winner = showdown::resolve(&mut self.table);
            self.broadcast_end(winner).await;
        }
    }

    /// Collects READY messages until at least two live seats are ready.
    /// Returns `Ok(false)` if fewer than two seats remain live (caller
    /// should halt) rather than blocking forever. Each wait is bounded by
    /// `ready_timeout()`; a seat that lets the clock run out simply gets
    /// re-polled on the next tick rather than being penalized.
    async fn collect_ready(&mut self) -> Result<bool> {
        let mut ready = std::collections::HashSet::new();
        loop {
            if self.table.live_count() < 2 {
                return Ok(false);
            }
            if ready.len() >= 2 {
                return Ok(true);
            }
            let (seat, msg) = match tokio::time::timeout(Self::ready_timeout(), self.inbox.recv()).await {
                Ok(Some(m)) => m,
                Ok(None) => return Ok(false),
                Err(_elapsed) => {
                    log::debug!("ready-collection tick elapsed with {} ready", ready.len());
                    continue;
                }
            };
            match msg.kind {
                ClientMessageType::Ready => {
                    ready.insert(seat);
                    self.send_to(seat, &ServerMessage::Ack).await;
                }
                ClientMessageType::Leave => {
                    self.table.seats[seat].status = Status::Left;
                    self.send_to(seat, &ServerMessage::Ack).await;
                }
                _ => self.send_to(seat, &ServerMessage::Nack).await,
            }
        }
    }

    fn ready_timeout() -> std::time::Duration {
        std::time::Duration::from_secs(60)
    }

    async fn drive_one_action(&mut self) -> Result<()> {
        let current = self.table.current;
        let (seat, msg) = match self.inbox.recv().await {
            Some(m) => m,
            None => return Ok(()),
        };
        if msg.kind == ClientMessageType::Leave {
            self.table.seats[seat].status = Status::Left;
            if seat == current {
                advance_turn(&mut self.table);
            }
            self.send_to(seat, &ServerMessage::Ack).await;
            self.broadcast_info().await;
            return Ok(());
        }
        let action = match msg.kind {
            ClientMessageType::Check => Action::Check,
            ClientMessageType::Call => Action::Call,
            ClientMessageType::Raise => Action::Raise(msg.param),
            ClientMessageType::Fold => Action::Fold,
            _ => {
                self.send_to(seat, &ServerMessage::Nack).await;
                return Ok(());
            }
        };
        match apply_action(&mut self.table, seat, action) {
            Ok(()) => {
                self.send_to(seat, &ServerMessage::Ack).await;
                if showdown::lone_survivor(&self.table).is_none() {
                    advance_turn(&mut self.table);
                }
                self.broadcast_info().await;
            }
            Err(e) => {
                log::debug!("seat {seat} action rejected: {e}");
                self.send_to(seat, &ServerMessage::Nack).await;
            }
        }
        Ok(())
    }

    async fn send_to(&mut self, seat: usize, msg: &ServerMessage) {
        if let Err(e) = net::send(&mut self.writers[seat], msg).await {
            log::warn!("send to seat {seat} failed: {e}");
            self.table.seats[seat].status = Status::Left;
        }
    }

    async fn broadcast(&mut self, msg: &ServerMessage) {
        for seat in 0..SEATS {
            if self.table.seats[seat].is_live() {
                self.send_to(seat, msg).await;
            }
        }
    }

    async fn broadcast_info(&mut self) {
        for seat in 0..SEATS {
            if !self.table.seats[seat].is_live() {
                continue;
            }
            let visible = std::array::from_fn(|i| VisibleStatus::of(self.table.seats[i].status));
            let stacks = std::array::from_fn(|i| self.table.seats[i].stack);
            let current_bets = std::array::from_fn(|i| self.table.seats[i].current_bet);
            let info = InfoPacket {
                hole: self.table.seats[seat].hole,
                community: self.table.community,
                stacks,
                current_bets,
                pot: self.table.pot,
                highest_bet: self.table.highest_bet,
                dealer: self.table.dealer as u8,
                current_seat: self.table.current as u8,
                visible_status: visible,
            };
            self.send_to(seat, &ServerMessage::Info(Box::new(info))).await;
        }
    }

    async fn broadcast_end(&mut self, winner: usize) {
        let hole = std::array::from_fn(|i| self.table.seats[i].hole);
        let visible = std::array::from_fn(|i| VisibleStatus::of(self.table.seats[i].status));
        let stacks = std::array::from_fn(|i| self.table.seats[i].stack);
        let end = EndPacket {
            hole,
            community: self.table.community,
            stacks,
            pot: self.table.pot,
            dealer: self.table.dealer as u8,
            winner: winner as u8,
            visible_status: visible,
        };
        self.broadcast(&ServerMessage::End(Box::new(end))).await;
    }
}
