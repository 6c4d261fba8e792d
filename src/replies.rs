//! Server-to-client frame formatting, one variant per shape a reply can
//! take (§4.3, §6). Grounded on the teacher's `IrcReply` enum-plus-`format`
//! pattern, narrowed to this relay's handful of frame shapes: no numeric
//! reply codes or prefix/user/host triad here, since the wire protocol has
//! neither.

use crate::wire::DEFAULT_AWAY_MESSAGE;

#[derive(Debug, Clone, PartialEq)]
pub enum Reply<'a> {
    /// Preformatted `/help` text.
    Help,
    /// `/list`: channel names, one per line.
    ChannelList { names: &'a [String] },
    /// `/names`: member/nickname list, one per line.
    NameList { names: &'a [String] },
    /// `/join <chan>` channel-change acknowledgement.
    JoinAck { channel: &'a str },
    /// Ordinary chat, either a channel broadcast or a private message.
    Chat { from: &'a str, body: &'a str },
    /// A channel broadcast, prefixed with the channel name.
    ChannelChat {
        channel: &'a str,
        from: &'a str,
        body: &'a str,
    },
    /// The bounce a caller gets back when their `/msg` target is away.
    AwayBounce { target: &'a str, message: &'a str },
    /// The composed `/invite` frame, with an optional password line.
    Invite {
        from: &'a str,
        to: &'a str,
        channel: &'a str,
        key: Option<&'a str>,
    },
}

impl<'a> Reply<'a> {
    pub fn format(&self) -> String {
        match self {
            Reply::Help => HELP_TEXT.to_string(),
            Reply::ChannelList { names } => names.join("\n"),
            Reply::NameList { names } => names.join("\n"),
            Reply::JoinAck { channel } => format!("/join {channel}"),
            Reply::Chat { from, body } => format!("<{from}> {body}"),
            Reply::ChannelChat {
                channel,
                from,
                body,
            } => format!("{channel} <{from}> {body}"),
            Reply::AwayBounce { target, message } => format!("<{target}> {message}"),
            Reply::Invite {
                from,
                to,
                channel,
                key,
            } => {
                let mut frame = format!(
                    "<{from}> Bonjour <{to}> je t'invite à me rejoindre sur le canal {channel}."
                );
                if let Some(key) = key {
                    frame.push('\n');
                    frame.push_str(&format!("Mot de passe : [{key}]."));
                }
                frame
            }
        }
    }
}

/// Default away message for `/away` with no argument, re-exported here so
/// handlers don't need to import `wire` directly just for this constant.
pub fn default_away_message() -> &'static str {
    DEFAULT_AWAY_MESSAGE
}

const HELP_TEXT: &str = "Commandes disponibles :\n\
/help - affiche cette aide\n\
/list - liste les canaux existants\n\
/names [canal] - liste les utilisateurs connectés, ou les membres d'un canal\n\
/join <canal> [clé] - rejoint ou crée un canal\n\
/msg [cible] <message> - envoie un message au canal courant, à un canal, ou en privé\n\
/invite <pseudo> - invite un utilisateur à rejoindre ton canal courant\n\
/away [message] - s'absenter ou revenir\n\
/exit - quitte le serveur";
