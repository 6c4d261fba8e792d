//! Per-connection session loop (§4.2): handshake, then read-dispatch until
//! `/exit` or a fatal read. One `tokio::spawn`ed task per accepted
//! connection; see `SPEC_FULL.md` §4.2 for why this relay needs no separate
//! reader/writer split.

use std::sync::Arc;

use log::{debug, info, warn};
use tokio::net::TcpStream;

use crate::commands::{shell_tokenize, split_whitespace};
use crate::handlers::{channels, messages, miscellaneous};
use crate::registry::Registry;
use crate::wire::{command_word, read_frame, ARGUMENT_ERROR, DEFAULT_CHANNEL, NICKNAME_ERROR};

/// Drives one client connection to completion. Never returns an error: a
/// read/write failure simply ends the loop the same way `/exit` would.
pub async fn run(registry: Arc<Registry>, stream: TcpStream) {
    let peer = stream.peer_addr().ok();
    let (mut reader, writer) = stream.into_split();

    let nickname = match read_frame(&mut reader).await {
        Ok(Some(nick)) if !nick.is_empty() => nick,
        _ => {
            debug!("peer {peer:?} disconnected before registering");
            return;
        }
    };

    let conn = match registry.register(nickname.clone(), writer).await {
        Ok(conn) => conn,
        Err(mut writer) => {
            use tokio::io::AsyncWriteExt;
            let _ = writer.write_all(NICKNAME_ERROR.as_bytes()).await;
            let _ = writer.shutdown().await;
            info!("rejected duplicate nickname <{nickname}> from {peer:?}");
            return;
        }
    };

    conn.send(DEFAULT_CHANNEL).await;
    if let Some(default_chan) = registry.get_channel(DEFAULT_CHANNEL).await {
        default_chan.add_member(&nickname);
    }
    info!("registered <{nickname}> from {peer:?}");

    loop {
        let frame = match read_frame(&mut reader).await {
            Ok(Some(frame)) => frame,
            Ok(None) => String::new(),
            Err(err) => {
                warn!("read error for <{nickname}>: {err}");
                String::new()
            }
        };

        if frame.is_empty() {
            miscellaneous::exit(&registry, &conn).await;
            break;
        }

        let words = split_whitespace(&frame);
        let command = words[0].as_str();

        if command_word(command).is_err() {
            miscellaneous::unknown(&conn).await;
            continue;
        }

        match command {
            "/help" => miscellaneous::help(&conn, &words[1..]).await,
            "/list" => channels::list(&registry, &conn, &words[1..]).await,
            "/names" => channels::names(&registry, &conn, &words[1..]).await,
            "/join" => channels::join(&registry, &conn, &words[1..]).await,
            "/invite" => channels::invite(&registry, &conn, &words[1..]).await,
            "/away" => match shell_tokenize(&frame) {
                Some(tokens) => miscellaneous::away(&conn, &tokens[1..]).await,
                None => conn.send(ARGUMENT_ERROR).await,
            },
            "/msg" => match shell_tokenize(&frame) {
                Some(tokens) if tokens.len() > 1 => {
                    messages::msg(&registry, &conn, &tokens[1..]).await
                }
                Some(_) => conn.send(ARGUMENT_ERROR).await,
                None => conn.send(ARGUMENT_ERROR).await,
            },
            "/exit" => {
                miscellaneous::exit(&registry, &conn).await;
                break;
            }
            _ => miscellaneous::unknown(&conn).await,
        }
    }

    info!("session for <{nickname}> ended");
}
