//! `/list`, `/names`, `/join`, `/invite` (§4.3).

use std::sync::Arc;

use crate::connection::Connection;
use crate::registry::Registry;
use crate::replies::Reply;
use crate::wire::{normalize_channel_name, CHANNEL_ERROR, CHANNEL_KEY_ERROR, NICKNAME_ERROR};

use super::argument_error;

/// `/list`: no arguments; channel names joined by newlines, order
/// unspecified.
pub async fn list(registry: &Registry, caller: &Arc<Connection>, args: &[String]) {
    if !args.is_empty() {
        return argument_error(caller).await;
    }
    let names = registry.channel_names().await;
    caller.send(&Reply::ChannelList { names: &names }.format()).await;
}

/// `/names [channel]`: `args` is every token after the command word.
pub async fn names(registry: &Registry, caller: &Arc<Connection>, args: &[String]) {
    match args.len() {
        0 => {
            let names = registry.all_nicknames().await;
            caller.send(&Reply::NameList { names: &names }.format()).await;
        }
        1 => {
            let chan_name = normalize_channel_name(&args[0]);
            match registry.get_channel(&chan_name).await {
                Some(chan) => {
                    let names = chan.members_snapshot();
                    caller.send(&Reply::NameList { names: &names }.format()).await;
                }
                None => caller.send(CHANNEL_ERROR).await,
            }
        }
        _ => argument_error(caller).await,
    }
}

/// `/join <name> [key]`: `args` is every token after the command word.
pub async fn join(registry: &Registry, caller: &Arc<Connection>, args: &[String]) {
    if args.is_empty() || args.len() > 2 {
        return argument_error(caller).await;
    }
    let chan_name = normalize_channel_name(&args[0]);
    let supplied_key = args.get(1).cloned();

    let chan = registry
        .create_or_get_channel(chan_name.clone(), supplied_key.clone())
        .await;

    if chan.key != supplied_key {
        return caller.send(CHANNEL_KEY_ERROR).await;
    }

    let previous = caller.current_channel().await;
    chan.add_member(&caller.nickname);
    if previous != chan_name {
        if let Some(prev_chan) = registry.get_channel(&previous).await {
            prev_chan.remove_member(&caller.nickname);
        }
        caller.set_current_channel(chan_name.clone()).await;
    }
    caller
        .send(&Reply::JoinAck { channel: &chan_name }.format())
        .await;
}

/// `/invite <nick>`: `args` is every token after the command word.
///
/// The channel lookup (caller's own `current_channel`) needs no lock beyond
/// what `registry.get_channel` already takes, and it's resolved and dropped
/// before the users lock is taken for the target lookup-plus-send, per the
/// deadlock-avoidance ordering in §5.
pub async fn invite(registry: &Registry, caller: &Arc<Connection>, args: &[String]) {
    if args.len() != 1 {
        return argument_error(caller).await;
    }
    let target_nick = &args[0];

    let current_channel = caller.current_channel().await;
    let chan = registry.get_channel(&current_channel).await;
    let key = chan.as_ref().and_then(|c| c.key.as_deref());

    let frame = Reply::Invite {
        from: &caller.nickname,
        to: target_nick,
        channel: &current_channel,
        key,
    }
    .format();

    let users = registry.users.lock().await;
    match users.get(target_nick) {
        Some(target) => target.send(&frame).await,
        None => caller.send(NICKNAME_ERROR).await,
    }
}
