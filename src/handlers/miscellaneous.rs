//! `/help`, `/away`, `/exit`, and the unknown-command responder (§4.3).

use std::sync::Arc;

use crate::connection::Connection;
use crate::registry::Registry;
use crate::replies::{default_away_message, Reply};
use crate::wire::UNKNOWN_CMD_ERROR;

use super::argument_error;

/// `/help`: no arguments.
pub async fn help(caller: &Arc<Connection>, args: &[String]) {
    if !args.is_empty() {
        return argument_error(caller).await;
    }
    caller.send(&Reply::Help.format()).await;
}

/// `/away [message]`: `args` is every token after the command word.
/// No frame is ever emitted in response (§4.3).
pub async fn away(caller: &Arc<Connection>, args: &[String]) {
    if args.len() > 1 {
        return argument_error(caller).await;
    }
    let current = caller.away_message().await;
    let next = match (args.first(), current.is_empty()) {
        (None, false) => String::new(),
        (None, true) => default_away_message().to_string(),
        (Some(msg), _) => msg.clone(),
    };
    caller.set_away_message(next).await;
}

/// `/exit`: removes the caller from its channel and the registry, then
/// closes its socket. The session loop terminates right after this call.
pub async fn exit(registry: &Registry, caller: &Arc<Connection>) {
    let current = caller.current_channel().await;
    if let Some(chan) = registry.get_channel(&current).await {
        chan.remove_member(&caller.nickname);
    }
    registry.unregister(&caller.nickname).await;
    caller.close().await;
}

/// Any first token that isn't a recognized command.
pub async fn unknown(caller: &Arc<Connection>) {
    caller.send(UNKNOWN_CMD_ERROR).await;
}
