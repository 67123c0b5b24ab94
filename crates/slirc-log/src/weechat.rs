//! Nom-based WeeChat log line parser.
//!
//! WeeChat's logger writes one line per buffer event:
//!
//! ```text
//! <YYYY-MM-DD HH:MM:SS> TAB <prefix> TAB <message>
//! ```
//!
//! The prefix column is a nick (with an optional mode sigil) for chat
//! lines, `-->` / `<--` for membership changes, `--` for network notices
//! and ` *` for actions.

use chrono::NaiveDateTime;
use nom::{
    bytes::complete::{tag, take_till1, take_until},
    character::complete::char,
    combinator::{opt, rest},
    error::ErrorKind,
    sequence::{delimited, preceded, terminated, tuple},
    IResult,
};

use crate::error::{LogError, Result};
use crate::event::EventKind;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Mode sigils WeeChat may put in front of a speaking nick.
const NICK_SIGILS: &[char] = &['@', '+', '%', '~', '&', '!'];

/// A decoded line, borrowing from the input.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ParsedLine<'a> {
    pub kind: EventKind,
    pub timestamp: NaiveDateTime,
    /// Channel named by the line itself. Chat lines never name one.
    pub channel: Option<&'a str>,
    pub nick: &'a str,
    pub text: &'a str,
}

struct Body<'a> {
    kind: EventKind,
    channel: Option<&'a str>,
    nick: &'a str,
    text: &'a str,
}

fn word(input: &str) -> IResult<&str, &str> {
    take_till1(|c| c == ' ')(input)
}

/// Split a line into its timestamp, prefix and message columns.
fn split_columns(input: &str) -> IResult<&str, (&str, &str, &str)> {
    tuple((
        take_until("\t"),
        preceded(char('\t'), take_until("\t")),
        preceded(char('\t'), rest),
    ))(input)
}

/// `nick (user@host)`, the host part being optional.
fn nick_with_host(input: &str) -> IResult<&str, &str> {
    terminated(
        word,
        opt(preceded(
            char(' '),
            delimited(char('('), take_until(")"), char(')')),
        )),
    )(input)
}

/// A trailing ` (reason)`, returned without its outer parentheses.
fn trailing_reason(input: &str) -> IResult<&str, &str> {
    let (input, reason) = preceded(tag(" ("), rest)(input)?;
    Ok((input, reason.strip_suffix(')').unwrap_or(reason)))
}

fn join(input: &str) -> IResult<&str, (&str, &str)> {
    tuple((nick_with_host, preceded(tag(" has joined "), word)))(input)
}

fn part(input: &str) -> IResult<&str, (&str, &str, Option<&str>)> {
    tuple((
        nick_with_host,
        preceded(tag(" has left "), word),
        opt(trailing_reason),
    ))(input)
}

fn quit(input: &str) -> IResult<&str, (&str, Option<&str>)> {
    tuple((nick_with_host, preceded(tag(" has quit"), opt(trailing_reason))))(input)
}

/// `nick has changed topic for #chan [from "old"] to "new"`.
fn topic_change(input: &str) -> IResult<&str, (&str, &str, &str)> {
    let (tail, (nick, channel)) =
        tuple((word, preceded(tag(" has changed topic for "), word)))(input)?;

    // The old topic may itself contain ` to "`, so the new topic starts at
    // the last separator.
    let new_topic = if let Some(topic) = tail.strip_prefix(" to \"") {
        topic
    } else if tail.starts_with(" from \"") {
        match tail.rfind("\" to \"") {
            Some(idx) => &tail[idx + "\" to \"".len()..],
            None => return Err(nom::Err::Error(nom::error::Error::new(tail, ErrorKind::Tag))),
        }
    } else {
        return Err(nom::Err::Error(nom::error::Error::new(tail, ErrorKind::Tag)));
    };

    let new_topic = new_topic.strip_suffix('"').unwrap_or(new_topic);
    Ok(("", (nick, channel, new_topic)))
}

/// `nick has unset topic for #chan`.
fn topic_unset(input: &str) -> IResult<&str, (&str, &str)> {
    tuple((word, preceded(tag(" has unset topic for "), word)))(input)
}

fn joined_body(body: &str) -> Result<Option<Body<'_>>> {
    match join(body) {
        Ok((_, (nick, channel))) => Ok(Some(Body {
            kind: EventKind::Join,
            channel: Some(channel),
            nick,
            text: "",
        })),
        Err(_) => Err(LogError::UnrecognizedBody {
            kind: "join",
            body: body.to_string(),
        }),
    }
}

fn left_body(body: &str) -> Option<Body<'_>> {
    if let Ok((_, (nick, channel, reason))) = part(body) {
        return Some(Body {
            kind: EventKind::Part,
            channel: Some(channel),
            nick,
            text: reason.unwrap_or(""),
        });
    }

    if let Ok((_, (nick, reason))) = quit(body) {
        return Some(Body {
            kind: EventKind::Quit,
            channel: None,
            nick,
            text: reason.unwrap_or(""),
        });
    }

    // Kicks and other departures carry no statistic.
    None
}

fn notice_body(body: &str) -> Option<Body<'_>> {
    if let Ok((_, (nick, channel, topic))) = topic_change(body) {
        return Some(Body {
            kind: EventKind::Topic,
            channel: Some(channel),
            nick,
            text: topic,
        });
    }

    if let Ok((_, (nick, channel))) = topic_unset(body) {
        return Some(Body {
            kind: EventKind::Topic,
            channel: Some(channel),
            nick,
            text: "",
        });
    }

    // Topic info, mode changes, nick changes...
    None
}

/// Parse one WeeChat log line.
///
/// Returns `Ok(None)` for lines that carry no statistic event.
pub(crate) fn parse_line(line: &str) -> Result<Option<ParsedLine<'_>>> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Ok(None);
    }

    let (_, (stamp, prefix, body)) = split_columns(line).map_err(|_| LogError::MalformedLine {
        line: line.to_string(),
    })?;

    let timestamp =
        NaiveDateTime::parse_from_str(stamp.trim(), TIMESTAMP_FORMAT).map_err(|source| {
            LogError::InvalidTimestamp {
                value: stamp.to_string(),
                source,
            }
        })?;

    let decoded = match prefix.trim() {
        "-->" => joined_body(body)?,
        "<--" => left_body(body),
        "--" => notice_body(body),
        // Actions and client errors.
        "*" | "=!=" => None,
        speaker => {
            let nick = speaker.strip_prefix(NICK_SIGILS).unwrap_or(speaker);
            if nick.is_empty() {
                return Err(LogError::MissingNick {
                    line: line.to_string(),
                });
            }
            Some(Body {
                kind: EventKind::Msg,
                channel: None,
                nick,
                text: body,
            })
        }
    };

    Ok(decoded.map(|body| ParsedLine {
        kind: body.kind,
        timestamp,
        channel: body.channel,
        nick: body.nick,
        text: body.text,
    }))
}
