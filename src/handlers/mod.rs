//! Command handlers (§4.3): one function per command, dispatched from
//! `session::run`. Split across submodules the way the teacher splits its
//! own handlers (`channels.rs`, `messages.rs`, `miscellaneous.rs`) rather
//! than one flat file.

pub mod channels;
pub mod messages;
pub mod miscellaneous;

use std::sync::Arc;

use crate::connection::Connection;
use crate::wire::ARGUMENT_ERROR;

/// Every handler that rejects a call for wrong arity replies the same way:
/// the sentinel, no state change.
async fn argument_error(caller: &Arc<Connection>) {
    caller.send(ARGUMENT_ERROR).await;
}
