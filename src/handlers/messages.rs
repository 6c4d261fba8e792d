//! `/msg` (§4.3): the one handler with three distinct shapes depending on
//! token count and the middle token's shape.

use std::sync::Arc;

use crate::connection::Connection;
use crate::registry::Registry;
use crate::replies::Reply;
use crate::wire::{CHANNEL_ERROR, CHANNEL_KEY_ERROR, NICKNAME_ERROR};

use super::argument_error;

/// `args` is every shell-tokenized token after the `/msg` command word: one
/// token (just a message) or two (`target message`).
pub async fn msg(registry: &Registry, caller: &Arc<Connection>, args: &[String]) {
    match args.len() {
        1 => broadcast_to_current_channel(registry, caller, &args[0]).await,
        2 => {
            let target = &args[0];
            let body = &args[1];
            if target.starts_with('#') {
                broadcast_to_named_channel(registry, caller, target, body).await;
            } else {
                send_private(registry, caller, target, body).await;
            }
        }
        _ => argument_error(caller).await,
    }
}

async fn broadcast_to_current_channel(registry: &Registry, caller: &Arc<Connection>, body: &str) {
    let current = caller.current_channel().await;
    broadcast_to_named_channel(registry, caller, &current, body).await;
}

async fn broadcast_to_named_channel(
    registry: &Registry,
    caller: &Arc<Connection>,
    chan_name: &str,
    body: &str,
) {
    let chan = match registry.get_channel(chan_name).await {
        Some(chan) => chan,
        None => return caller.send(CHANNEL_ERROR).await,
    };
    if chan.key.is_some() {
        return caller.send(CHANNEL_KEY_ERROR).await;
    }

    let frame = Reply::ChannelChat {
        channel: chan_name,
        from: &caller.nickname,
        body,
    }
    .format();

    for member in chan.members_snapshot() {
        let users = registry.users.lock().await;
        if let Some(conn) = users.get(&member) {
            conn.send(&frame).await;
        }
    }
}

async fn send_private(registry: &Registry, caller: &Arc<Connection>, target_nick: &str, body: &str) {
    let users = registry.users.lock().await;
    let target = match users.get(target_nick) {
        Some(target) => target.clone(),
        None => return caller.send(NICKNAME_ERROR).await,
    };
    let away = target.away_message().await;
    if !away.is_empty() {
        let bounce = Reply::AwayBounce {
            target: target_nick,
            message: &away,
        }
        .format();
        drop(users);
        caller.send(&bounce).await;
        return;
    }
    let frame = Reply::Chat {
        from: &caller.nickname,
        body,
    }
    .format();
    target.send(&frame).await;
}
