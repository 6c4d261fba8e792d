//! Command-line tokenization.
//!
//! The session loop first splits a frame on whitespace to find `cmd[0]`.
//! `/msg` and `/away` are then re-tokenized with POSIX shell-quoting rules
//! (§4.2) so a quoted substring becomes one argument. This is the direct
//! analogue of the original implementation's `shlex.split(raw_cmd,
//! posix=True)` call, realized here with the `shell-words` crate.

/// Splits `frame` on ASCII whitespace, dropping empty tokens. Used for the
/// initial `cmd[0]` lookup and for every command whose arguments don't need
/// quote-awareness.
pub fn split_whitespace(frame: &str) -> Vec<String> {
    frame.split_whitespace().map(str::to_string).collect()
}

/// Re-tokenizes `frame` with POSIX shell-quoting rules, for `/msg` and
/// `/away`. Returns `None` on unbalanced quoting; callers respond with
/// `ARGUMENT_ERROR` in that case, matching `server.py`'s
/// `try/except ValueError`.
pub fn shell_tokenize(frame: &str) -> Option<Vec<String>> {
    shell_words::split(frame).ok()
}
