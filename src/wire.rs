//! Wire codec: sentinel tokens and frame decoding.
//!
//! Line-oriented UTF-8 over TCP, no framing delimiter: one `recv` of up to
//! [`MAX_FRAME_BYTES`] is treated as exactly one message. Messages longer
//! than the receive buffer are not supported; this mirrors the original
//! implementation this relay is descended from, which makes the same
//! trade-off explicitly (`# On ne gère pas les messages tronqués pour le
//! moment`).

use nom::{
    character::complete::{alphanumeric1, char},
    combinator::recognize,
    sequence::preceded,
    IResult, Parser,
};
use tokio::io::{AsyncRead, AsyncReadExt};

/// The nickname requested by this connection is already registered.
pub const NICKNAME_ERROR: &str = "NICKNAME_ERROR";
/// Wrong number of arguments, or malformed quoting, for a command.
pub const ARGUMENT_ERROR: &str = "ARGUMENT_ERROR";
/// The named channel does not exist.
pub const CHANNEL_ERROR: &str = "CHANNEL_ERROR";
/// The supplied channel key does not match the channel's key.
pub const CHANNEL_KEY_ERROR: &str = "CHANNEL_KEY_ERROR";
/// The first token of the command line is not a recognized command.
pub const UNKNOWN_CMD_ERROR: &str = "UNKNOWN_CMD_ERROR";

/// Channel every newly registered user joins.
pub const DEFAULT_CHANNEL: &str = "#default";

/// Default away message used when `/away` is given no argument while the
/// caller isn't already away.
pub const DEFAULT_AWAY_MESSAGE: &str = "Je suis absent pour le moment.";

/// One `recv` never yields more than this many bytes, and is treated as
/// exactly one message.
pub const MAX_FRAME_BYTES: usize = 1024;

/// Reads one frame: a single `read()` of up to [`MAX_FRAME_BYTES`], decoded
/// as UTF-8 and trimmed of surrounding whitespace.
///
/// Returns `Ok(None)` on a clean EOF (peer closed). A chunk that is not
/// valid UTF-8 is treated as an empty frame; the session loop then treats
/// it exactly like a peer-initiated `/exit`, per the caller's contract.
pub async fn read_frame<R>(reader: &mut R) -> std::io::Result<Option<String>>
where
    R: AsyncRead + Unpin,
{
    let mut buf = [0u8; MAX_FRAME_BYTES];
    let n = reader.read(&mut buf).await?;
    if n == 0 {
        return Ok(None);
    }
    let frame = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s.trim().to_string(),
        Err(_) => String::new(),
    };
    Ok(Some(frame))
}

/// Recognizes a well-formed command word (`/` followed by one or more
/// alphanumeric characters) at the start of `input`. Used only to reject
/// structurally malformed first tokens before dispatch; the dispatcher
/// still matches on the literal command string.
pub fn command_word(input: &str) -> IResult<&str, &str> {
    recognize(preceded(char('/'), alphanumeric1)).parse(input)
}

/// Normalizes a user-supplied channel argument to `#<name>`: strips any `#`
/// characters from the input and prepends exactly one.
pub fn normalize_channel_name(raw: &str) -> String {
    format!("#{}", raw.replace('#', ""))
}
