//! Scripted client driver: reads one command per line from stdin and plays
//! them against a running table. Recognized verbs: `ready`, `leave`,
//! `raise <amount|allin>`, `call`, `check`, `fold`. On EOF it switches to a
//! terminal policy: fold whenever it is asked to act, leave once the hand
//! ends.

use clap::Parser;
use sixmax::config::ClientConfig;
use sixmax::net;
use sixmax::wire::{ClientMessage, ServerMessage};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpStream;

enum Command {
    Ready,
    Leave,
    Raise(i64),
    RaiseAllIn,
    Call,
    Check,
    Fold,
}

fn parse_command(line: &str) -> Option<Command> {
    let mut words = line.split_whitespace();
    match words.next()? {
        "ready" => Some(Command::Ready),
        "leave" => Some(Command::Leave),
        "call" => Some(Command::Call),
        "check" => Some(Command::Check),
        "fold" => Some(Command::Fold),
        "raise" => match words.next()? {
            "allin" => Some(Command::RaiseAllIn),
            amount => amount.parse().ok().map(Command::Raise),
        },
        _ => None,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ClientConfig::parse();
    let port = config.base_port + config.seat as u16;
    let stream = TcpStream::connect((config.host.as_str(), port)).await?;
    let (mut reader, mut write_half) = stream.into_split();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    net::send_client(&mut write_half, &ClientMessage::join()).await?;

    // A dedicated task owns the socket's read half so a cancelled `select!`
    // branch on the stdin side never drops already-consumed frame bytes.
    let (tx, mut incoming) = tokio::sync::mpsc::unbounded_channel();
    tokio::spawn(async move {
        loop {
            match net::receive_server(&mut reader).await {
                Ok(msg) => {
                    if tx.send(msg).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });

    let mut eof = false;
    let my_seat = config.seat as usize;
    let mut my_stack: i64 = 0;
    let mut my_bet: i64 = 0;

    loop {
        if eof {
            let Some(msg) = incoming.recv().await else {
                return Ok(());
            };
            match msg {
                ServerMessage::Info(_) => {
                    net::send_client(&mut write_half, &ClientMessage::fold()).await?;
                }
                ServerMessage::End(_) => {
                    net::send_client(&mut write_half, &ClientMessage::leave()).await?;
                    return Ok(());
                }
                ServerMessage::Halt => return Ok(()),
                _ => {}
            }
            continue;
        }

        tokio::select! {
            line = lines.next_line() => {
                match line? {
                    Some(text) => {
                        let Some(cmd) = parse_command(&text) else {
                            eprintln!("unrecognized command: {text}");
                            continue;
                        };
                        let msg = match cmd {
                            Command::Ready => ClientMessage::ready(),
                            Command::Leave => ClientMessage::leave(),
                            Command::Call => ClientMessage::call(),
                            Command::Check => ClientMessage::check(),
                            Command::Fold => ClientMessage::fold(),
                            Command::Raise(amount) => ClientMessage::raise(amount),
                            Command::RaiseAllIn => ClientMessage::raise(my_bet + my_stack),
                        };
                        net::send_client(&mut write_half, &msg).await?;
                    }
                    None => eof = true,
                }
            }
            msg = incoming.recv() => {
                match msg {
                    Some(ServerMessage::Info(info)) => {
                        my_stack = info.stacks[my_seat];
                        my_bet = info.current_bets[my_seat];
                    }
                    Some(ServerMessage::Halt) | None => return Ok(()),
                    _ => {}
                }
            }
        }
    }
}
