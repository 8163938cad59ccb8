//! Fixed-width binary wire protocol. Every record is framed as a one-byte
//! type tag followed by a fixed-size payload, encoded little-endian via
//! `byteorder` so the framing is portable across machines regardless of
//! native endianness.

use crate::cards::{Card, NO_CARD};
use crate::table::seat::Chips;
use crate::table::SEATS;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientMessageType {
    Join = 0,
    Leave = 1,
    Ready = 2,
    Raise = 3,
    Call = 4,
    Check = 5,
    Fold = 6,
}

impl ClientMessageType {
    fn from_u8(tag: u8) -> io::Result<Self> {
        Ok(match tag {
            0 => Self::Join,
            1 => Self::Leave,
            2 => Self::Ready,
            3 => Self::Raise,
            4 => Self::Call,
            5 => Self::Check,
            6 => Self::Fold,
            n => return Err(invalid(format!("unknown client message tag {n}"))),
        })
    }
}

/// A single message from a client: a type tag plus one parameter (only
/// meaningful for RAISE, where it carries the absolute target total).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientMessage {
    pub kind: ClientMessageType,
    pub param: Chips,
}

impl ClientMessage {
    pub fn join() -> Self {
        Self { kind: ClientMessageType::Join, param: 0 }
    }
    pub fn leave() -> Self {
        Self { kind: ClientMessageType::Leave, param: 0 }
    }
    pub fn ready() -> Self {
        Self { kind: ClientMessageType::Ready, param: 0 }
    }
    pub fn raise(target: Chips) -> Self {
        Self { kind: ClientMessageType::Raise, param: target }
    }
    pub fn call() -> Self {
        Self { kind: ClientMessageType::Call, param: 0 }
    }
    pub fn check() -> Self {
        Self { kind: ClientMessageType::Check, param: 0 }
    }
    pub fn fold() -> Self {
        Self { kind: ClientMessageType::Fold, param: 0 }
    }

    pub fn encode<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_u8(self.kind as u8)?;
        w.write_i64::<LittleEndian>(self.param)?;
        Ok(())
    }

    pub fn decode<R: Read>(r: &mut R) -> io::Result<Self> {
        let tag = r.read_u8()?;
        let kind = ClientMessageType::from_u8(tag)?;
        let param = r.read_i64::<LittleEndian>()?;
        Ok(Self { kind, param })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibleStatus {
    Active = 1,
    Folded = 0,
    Left = 2,
}

impl VisibleStatus {
    pub fn of(status: crate::table::Status) -> Self {
        use crate::table::Status;
        match status {
            Status::Active | Status::AllIn => Self::Active,
            Status::Folded => Self::Folded,
            Status::Left => Self::Left,
        }
    }

    fn from_u8(n: u8) -> io::Result<Self> {
        Ok(match n {
            1 => Self::Active,
            0 => Self::Folded,
            2 => Self::Left,
            n => return Err(invalid(format!("unknown visible status {n}"))),
        })
    }
}

fn read_card<R: Read>(r: &mut R) -> io::Result<Card> {
    Ok(Card::from_u8(r.read_u8()?))
}

/// Snapshot broadcast after every accepted action, tailored per-recipient:
/// only the recipient's own hole cards are populated, opponents' hole slots
/// are always `NO_CARD`.
#[derive(Debug, Clone)]
pub struct InfoPacket {
    pub hole: [Card; 2],
    pub community: [Card; 5],
    pub stacks: [Chips; SEATS],
    pub current_bets: [Chips; SEATS],
    pub pot: Chips,
    pub highest_bet: Chips,
    pub dealer: u8,
    pub current_seat: u8,
    pub visible_status: [VisibleStatus; SEATS],
}

impl InfoPacket {
    pub fn encode<W: Write>(&self, w: &mut W) -> io::Result<()> {
        for c in self.hole {
            w.write_u8(c.to_u8())?;
        }
        for c in self.community {
            w.write_u8(c.to_u8())?;
        }
        for s in self.stacks {
            w.write_i64::<LittleEndian>(s)?;
        }
        for b in self.current_bets {
            w.write_i64::<LittleEndian>(b)?;
        }
        w.write_i64::<LittleEndian>(self.pot)?;
        w.write_i64::<LittleEndian>(self.highest_bet)?;
        w.write_u8(self.dealer)?;
        w.write_u8(self.current_seat)?;
        for v in self.visible_status {
            w.write_u8(v as u8)?;
        }
        Ok(())
    }

    pub fn decode<R: Read>(r: &mut R) -> io::Result<Self> {
        let hole = [read_card(r)?, read_card(r)?];
        let mut community = [NO_CARD; 5];
        for c in community.iter_mut() {
            *c = read_card(r)?;
        }
        let mut stacks = [0 as Chips; SEATS];
        for s in stacks.iter_mut() {
            *s = r.read_i64::<LittleEndian>()?;
        }
        let mut current_bets = [0 as Chips; SEATS];
        for b in current_bets.iter_mut() {
            *b = r.read_i64::<LittleEndian>()?;
        }
        let pot = r.read_i64::<LittleEndian>()?;
        let highest_bet = r.read_i64::<LittleEndian>()?;
        let dealer = r.read_u8()?;
        let current_seat = r.read_u8()?;
        let mut visible_status = [VisibleStatus::Left; SEATS];
        for v in visible_status.iter_mut() {
            *v = VisibleStatus::from_u8(r.read_u8()?)?;
        }
        Ok(Self { hole, community, stacks, current_bets, pot, highest_bet, dealer, current_seat, visible_status })
    }
}

/// Full reveal sent once at the end of a hand.
#[derive(Debug, Clone)]
pub struct EndPacket {
    pub hole: [[Card; 2]; SEATS],
    pub community: [Card; 5],
    pub stacks: [Chips; SEATS],
    pub pot: Chips,
    pub dealer: u8,
    pub winner: u8,
    pub visible_status: [VisibleStatus; SEATS],
}

impl EndPacket {
    pub fn encode<W: Write>(&self, w: &mut W) -> io::Result<()> {
        for pair in self.hole {
            for c in pair {
                w.write_u8(c.to_u8())?;
            }
        }
        for c in self.community {
            w.write_u8(c.to_u8())?;
        }
        for s in self.stacks {
            w.write_i64::<LittleEndian>(s)?;
        }
        w.write_i64::<LittleEndian>(self.pot)?;
        w.write_u8(self.dealer)?;
        w.write_u8(self.winner)?;
        for v in self.visible_status {
            w.write_u8(v as u8)?;
        }
        Ok(())
    }

    pub fn decode<R: Read>(r: &mut R) -> io::Result<Self> {
        let mut hole = [[NO_CARD; 2]; SEATS];
        for pair in hole.iter_mut() {
            pair[0] = read_card(r)?;
            pair[1] = read_card(r)?;
        }
        let mut community = [NO_CARD; 5];
        for c in community.iter_mut() {
            *c = read_card(r)?;
        }
        let mut stacks = [0 as Chips; SEATS];
        for s in stacks.iter_mut() {
            *s = r.read_i64::<LittleEndian>()?;
        }
        let pot = r.read_i64::<LittleEndian>()?;
        let dealer = r.read_u8()?;
        let winner = r.read_u8()?;
        let mut visible_status = [VisibleStatus::Left; SEATS];
        for v in visible_status.iter_mut() {
            *v = VisibleStatus::from_u8(r.read_u8()?)?;
        }
        Ok(Self { hole, community, stacks, pot, dealer, winner, visible_status })
    }
}

/// Tagged union sent from server to client.
#[derive(Debug, Clone)]
pub enum ServerMessage {
    Ack,
    Nack,
    Info(Box<InfoPacket>),
    End(Box<EndPacket>),
    Halt,
}

impl ServerMessage {
    pub fn encode<W: Write>(&self, w: &mut W) -> io::Result<()> {
        match self {
            ServerMessage::Ack => w.write_u8(0),
            ServerMessage::Nack => w.write_u8(1),
            ServerMessage::Info(info) => {
                w.write_u8(2)?;
                info.encode(w)
            }
            ServerMessage::End(end) => {
                w.write_u8(3)?;
                end.encode(w)
            }
            ServerMessage::Halt => w.write_u8(4),
        }
    }

    pub fn decode<R: Read>(r: &mut R) -> io::Result<Self> {
        Ok(match r.read_u8()? {
            0 => ServerMessage::Ack,
            1 => ServerMessage::Nack,
            2 => ServerMessage::Info(Box::new(InfoPacket::decode(r)?)),
            3 => ServerMessage::End(Box::new(EndPacket::decode(r)?)),
            4 => ServerMessage::Halt,
            n => return Err(invalid(format!("unknown server message tag {n}"))),
        })
    }
}

fn invalid(msg: impl Into<String>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_message_round_trips() {
        let msg = ClientMessage::raise(40);
        let mut buf = Vec::new();
        msg.encode(&mut buf).unwrap();
        let decoded = ClientMessage::decode(&mut &buf[..]).unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let buf = [9u8, 0, 0, 0, 0, 0, 0, 0, 0];
        let err = ClientMessage::decode(&mut &buf[..]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn info_packet_encodes_fixed_width() {
        let info = InfoPacket {
            hole: [NO_CARD, NO_CARD],
            community: [NO_CARD; 5],
            stacks: [100; SEATS],
            current_bets: [0; SEATS],
            pot: 0,
            highest_bet: 0,
            dealer: 0,
            current_seat: 1,
            visible_status: [VisibleStatus::Active; SEATS],
        };
        let mut buf = Vec::new();
        info.encode(&mut buf).unwrap();
        // 2 hole + 5 community + 6*8 stacks + 6*8 bets + 8 pot + 8 highest + 1 dealer + 1 current + 6 status
        assert_eq!(buf.len(), 2 + 5 + 48 + 48 + 8 + 8 + 1 + 1 + 6);
    }

    #[test]
    fn server_message_info_round_trips() {
        let info = InfoPacket {
            hole: [Card::new(crate::cards::Rank::Ace, crate::cards::Suit::Spade), NO_CARD],
            community: [NO_CARD; 5],
            stacks: [90, 110, 100, 100, 100, 100],
            current_bets: [10, 0, 0, 0, 0, 0],
            pot: 10,
            highest_bet: 10,
            dealer: 2,
            current_seat: 3,
            visible_status: [VisibleStatus::Active; SEATS],
        };
        let msg = ServerMessage::Info(Box::new(info));
        let mut buf = Vec::new();
        msg.encode(&mut buf).unwrap();
        let decoded = ServerMessage::decode(&mut &buf[..]).unwrap();
        match decoded {
            ServerMessage::Info(info) => {
                assert_eq!(info.pot, 10);
                assert_eq!(info.dealer, 2);
                assert_eq!(info.hole[0], Card::new(crate::cards::Rank::Ace, crate::cards::Suit::Spade));
            }
            _ => panic!("expected Info variant"),
        }
    }
}
