//! Mapping from protocol messages to relay events

use irc::proto::{Command, Message, Response};

use crate::domain::entities::IrcEvent;

pub fn to_event(message: &Message) -> IrcEvent {
    match &message.command {
        Command::Response(Response::RPL_WELCOME, _) => IrcEvent::Registered,
        Command::JOIN(channel, _, _) => match message.source_nickname() {
            Some(nick) => IrcEvent::Joined {
                nick: nick.to_string(),
                channel: channel.clone(),
            },
            None => IrcEvent::Other,
        },
        Command::PRIVMSG(target, text) => match message.source_nickname() {
            Some(nick) if is_channel(target) => privmsg_event(nick, target, text),
            _ => IrcEvent::Other,
        },
        _ => IrcEvent::Other,
    }
}

fn privmsg_event(nick: &str, channel: &str, text: &str) -> IrcEvent {
    let nick = nick.to_string();
    let channel = channel.to_string();

    let Some(ctcp) = text.strip_prefix('\x01') else {
        return IrcEvent::ChannelMessage {
            nick,
            channel,
            text: text.to_string(),
        };
    };

    match ctcp.trim_end_matches('\x01').split_once(' ') {
        Some(("ACTION", action)) => IrcEvent::ChannelAction {
            nick,
            channel,
            text: action.to_string(),
        },
        _ => IrcEvent::Other,
    }
}

pub fn is_channel(target: &str) -> bool {
    target.starts_with(['#', '&', '+', '!'])
}

/// Non-empty lines of `text`, one `PRIVMSG` each, so embedded line breaks
/// cannot smuggle extra commands onto the wire.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split(['\r', '\n'])
        .map(|line| line.replace('\0', ""))
        .filter(|line| !line.trim().is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Message {
        line.parse().unwrap()
    }

    #[test]
    fn test_welcome_is_registered() {
        assert_eq!(to_event(&parse(":irc.test 001 sirbot :Welcome")), IrcEvent::Registered);
    }

    #[test]
    fn test_join_and_channel_message() {
        assert_eq!(
            to_event(&parse(":sirbot!s@h JOIN #general")),
            IrcEvent::Joined {
                nick: "sirbot".to_string(),
                channel: "#general".to_string()
            }
        );

        assert_eq!(
            to_event(&parse(":bob!~bob@host.example PRIVMSG #general :see http://x :) ok")),
            IrcEvent::ChannelMessage {
                nick: "bob".to_string(),
                channel: "#general".to_string(),
                text: "see http://x :) ok".to_string()
            }
        );
    }

    #[test]
    fn test_private_messages_and_ctcp() {
        assert_eq!(to_event(&parse(":bob!b@h PRIVMSG sirbot :psst")), IrcEvent::Other);

        assert_eq!(
            to_event(&parse(":bob!b@h PRIVMSG #general :\x01ACTION waves\x01")),
            IrcEvent::ChannelAction {
                nick: "bob".to_string(),
                channel: "#general".to_string(),
                text: "waves".to_string()
            }
        );

        assert_eq!(to_event(&parse(":bob!b@h PRIVMSG #general :\x01VERSION\x01")), IrcEvent::Other);
    }

    #[test]
    fn test_unrelated_commands_are_other() {
        assert_eq!(to_event(&parse("PING :irc.test")), IrcEvent::Other);
        assert_eq!(to_event(&parse(":bob!b@h NOTICE #general :hello")), IrcEvent::Other);
    }

    #[test]
    fn test_split_lines() {
        assert_eq!(split_lines("[alice] hello"), vec!["[alice] hello"]);
        assert_eq!(split_lines("[alice] one\r\nQUIT :bye\n\n"), vec!["[alice] one", "QUIT :bye"]);
        assert!(split_lines("\n").is_empty());
    }
}
