//! Minimal IRC-style chat relay.
//!
//! A long-lived TCP server that accepts many concurrent clients, registers
//! each under a unique nickname, and routes text commands between them,
//! either point-to-point (private message) or by broadcast to a named
//! channel. The server holds no persistent state; it is a pure in-memory
//! router with concurrency discipline. See `SPEC_FULL.md` for the full
//! design.

pub mod channel;
pub mod commands;
pub mod connection;
pub mod errors;
pub mod handlers;
pub mod registry;
pub mod replies;
pub mod session;
pub mod wire;

pub use errors::RelayError;
pub use registry::Registry;
