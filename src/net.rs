//! Accepts the six seat connections and frames messages over them.
//!
//! Client->server messages are fixed-width (9 bytes) and need no length
//! prefix. Server->client messages vary in size across variants, so each is
//! sent behind a 4-byte little-endian length prefix.

use crate::table::SEATS;
use crate::wire::{ClientMessage, ClientMessageType, ServerMessage};
use anyhow::{Context, Result};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpListener;

pub const CLIENT_MESSAGE_LEN: usize = 9;

/// The read/write halves for one connected seat.
pub struct SeatIo {
    pub reader: OwnedReadHalf,
    pub writer: OwnedWriteHalf,
}

/// Binds one `TcpListener` per seat on `base_port + seat` and accepts
/// exactly one connection per seat, in seat order.
pub async fn accept_all(base_port: u16) -> Result<[SeatIo; SEATS]> {
    let mut seats: Vec<SeatIo> = Vec::with_capacity(SEATS);
    for seat in 0..SEATS {
        let port = base_port + seat as u16;
        let listener = TcpListener::bind(("0.0.0.0", port))
            .await
            .with_context(|| format!("binding seat {seat} on port {port}"))?;
        log::info!("seat {seat} listening on port {port}");
        let (stream, peer) = listener.accept().await.with_context(|| format!("accepting seat {seat}"))?;
        log::info!("seat {seat} connected from {peer}");
        let (mut reader, writer) = stream.into_split();
        let first = receive(&mut reader).await.with_context(|| format!("reading JOIN from seat {seat}"))?;
        anyhow::ensure!(first.kind == ClientMessageType::Join, "seat {seat} did not JOIN first");
        seats.push(SeatIo { reader, writer });
    }
    seats
        .try_into()
        .map_err(|_| anyhow::anyhow!("expected exactly {SEATS} seat connections"))
}

/// Reads one fixed-width client message.
pub async fn receive<R: AsyncRead + Unpin>(reader: &mut R) -> Result<ClientMessage> {
    let mut buf = [0u8; CLIENT_MESSAGE_LEN];
    reader.read_exact(&mut buf).await.context("reading client message")?;
    Ok(ClientMessage::decode(&mut &buf[..])?)
}

/// Sends one fixed-width client message (used by the scripted client).
pub async fn send_client<W: AsyncWrite + Unpin>(writer: &mut W, msg: &ClientMessage) -> Result<()> {
    let mut body = Vec::new();
    msg.encode(&mut body)?;
    writer.write_all(&body).await.context("writing client message")?;
    Ok(())
}

/// Sends one length-prefixed server message.
pub async fn send<W: AsyncWrite + Unpin>(writer: &mut W, msg: &ServerMessage) -> Result<()> {
    let mut body = Vec::new();
    msg.encode(&mut body)?;
    let len = body.len() as u32;
    writer.write_all(&len.to_le_bytes()).await.context("writing frame length")?;
    writer.write_all(&body).await.context("writing frame body")?;
    Ok(())
}

/// Reads one length-prefixed server message (used by the scripted client).
pub async fn receive_server<R: AsyncRead + Unpin>(reader: &mut R) -> Result<ServerMessage> {
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf).await.context("reading frame length")?;
    let len = u32::from_le_bytes(len_buf) as usize;
    let mut body = vec![0u8; len];
    reader.read_exact(&mut body).await.context("reading frame body")?;
    Ok(ServerMessage::decode(&mut &body[..])?)
}
