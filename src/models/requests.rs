//! Shell command parsing
//!
//! Turns one line of shell input into a validated [`Command`].

use std::time::Duration;

use crate::error::{CacheError, Result};

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB

/// A single shell command
///
/// # Syntax
/// - `set <key> <value>` - the value is the rest of the line
/// - `get|has|del|touch <key>`
/// - `find <substring>` - first entry whose value contains the substring
/// - `keys`, `values`, `stats`, `clear`, `quit`
/// - `ttl <ms|off>`, `limit <n>`, `log <on|off>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set { key: String, value: String },
    Get { key: String },
    Has { key: String },
    Delete { key: String },
    Touch { key: String },
    Find { needle: String },
    Keys,
    Values,
    Stats,
    Clear,
    Ttl { ttl: Option<Duration> },
    Limit { limit: usize },
    Log { enabled: bool },
    Quit,
}

impl Command {
    /// Parses one input line.
    ///
    /// Returns `Ok(None)` for blank lines and `#` comments.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "set" => {
                let (key, value) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| invalid("set requires a key and a value"))?;
                let value = value.trim_start();
                validate_key(key)?;
                validate_value(value)?;
                Command::Set {
                    key: key.to_string(),
                    value: value.to_string(),
                }
            }
            "get" => Command::Get {
                key: single_key(verb, rest)?,
            },
            "has" => Command::Has {
                key: single_key(verb, rest)?,
            },
            "del" | "delete" => Command::Delete {
                key: single_key(verb, rest)?,
            },
            "touch" => Command::Touch {
                key: single_key(verb, rest)?,
            },
            "find" => {
                if rest.is_empty() {
                    return Err(invalid("find requires a search string"));
                }
                Command::Find {
                    needle: rest.to_string(),
                }
            }
            "ttl" => Command::Ttl {
                ttl: parse_ttl(rest)?,
            },
            "limit" => Command::Limit {
                limit: rest
                    .parse()
                    .map_err(|_| invalid(format!("limit expects a positive integer, got '{}'", rest)))?,
            },
            "log" => Command::Log {
                enabled: parse_switch(rest)?,
            },
            "keys" => no_args(verb, rest, Command::Keys)?,
            "values" => no_args(verb, rest, Command::Values)?,
            "stats" => no_args(verb, rest, Command::Stats)?,
            "clear" => no_args(verb, rest, Command::Clear)?,
            "quit" | "exit" => no_args(verb, rest, Command::Quit)?,
            other => return Err(invalid(format!("unknown command '{}'", other))),
        };

        Ok(Some(command))
    }
}

// == Validation ==
/// Validates a cache key
///
/// Keys must be non-empty and at most `MAX_KEY_LENGTH` bytes.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(invalid("Key cannot be empty"));
    }
    if key.len() > MAX_KEY_LENGTH {
        return Err(invalid(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        )));
    }
    Ok(())
}

/// Validates a cache value against `MAX_VALUE_SIZE`.
pub fn validate_value(value: &str) -> Result<()> {
    if value.len() > MAX_VALUE_SIZE {
        return Err(invalid(format!(
            "Value exceeds maximum size of {} bytes",
            MAX_VALUE_SIZE
        )));
    }
    Ok(())
}

fn invalid(message: impl Into<String>) -> CacheError {
    CacheError::InvalidCommand(message.into())
}

fn single_key(verb: &str, rest: &str) -> Result<String> {
    if rest.contains(char::is_whitespace) {
        return Err(invalid(format!("{} expects a single key", verb)));
    }
    validate_key(rest)?;
    Ok(rest.to_string())
}

fn no_args(verb: &str, rest: &str, command: Command) -> Result<Command> {
    if !rest.is_empty() {
        return Err(invalid(format!("{} takes no arguments", verb)));
    }
    Ok(command)
}

fn parse_ttl(arg: &str) -> Result<Option<Duration>> {
    match arg.to_ascii_lowercase().as_str() {
        "off" | "none" => Ok(None),
        ms => ms
            .parse()
            .map(|ms| Some(Duration::from_millis(ms)))
            .map_err(|_| invalid(format!("ttl expects milliseconds or 'off', got '{}'", arg))),
    }
}

fn parse_switch(arg: &str) -> Result<bool> {
    match arg.to_ascii_lowercase().as_str() {
        "on" | "true" | "1" => Ok(true),
        "off" | "false" | "0" => Ok(false),
        _ => Err(invalid(format!("log expects 'on' or 'off', got '{}'", arg))),
    }
}
