//! Shell Module
//!
//! Line-oriented front end over a string cache: one command per input line,
//! one JSON reply per output line.
//!
//! # Commands
//! - `set <key> <value>` - Store a key-value pair
//! - `get <key>` - Retrieve a value
//! - `has <key>` / `touch <key>` / `del <key>`
//! - `find <substring>` - First entry whose value contains the substring
//! - `keys` / `values` / `stats` / `clear`
//! - `ttl <ms|off>` / `limit <n>` / `log <on|off>`
//! - `quit` - End the session

pub mod handlers;

use std::io::{BufRead, Write};

use tracing::{info, warn};

use crate::cache::Clock;
use crate::error::Result;
use crate::models::{Command, ErrorReply, Reply};

pub use handlers::{execute, ShellCache};

/// Runs a shell session until end of input or `quit`.
///
/// Rejected lines get an error reply and the session continues.
///
/// # Returns
/// The number of commands executed.
pub fn run<C, R, W>(cache: &mut ShellCache<C>, mut input: R, mut output: W) -> Result<usize>
where
    C: Clock,
    R: BufRead,
    W: Write,
{
    info!("Shell session started");
    let mut executed = 0;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        let line = match std::str::from_utf8(strip_line_ending(&buf)) {
            Ok(line) => line,
            Err(err) => {
                warn!(%err, "Rejected non UTF-8 shell input");
                let message = format!("Invalid input: {err}");
                write_reply(&mut output, &Reply::Error(ErrorReply::new(message)))?;
                continue;
            }
        };

        let command = match Command::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                warn!(%err, "Rejected shell input");
                write_reply(&mut output, &Reply::Error(ErrorReply::new(err.to_string())))?;
                continue;
            }
        };

        let quit = command == Command::Quit;
        let reply = match execute(cache, command) {
            Ok(reply) => reply,
            Err(err) => {
                warn!(%err, "Shell command failed");
                Reply::Error(ErrorReply::new(err.to_string()))
            }
        };
        write_reply(&mut output, &reply)?;
        executed += 1;

        if quit {
            break;
        }
    }

    output.flush()?;
    info!(executed, "Shell session finished");
    Ok(executed)
}

/// Drops a trailing `\n` or `\r\n`.
fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Writes one reply as a JSON line.
fn write_reply<W: Write>(output: &mut W, reply: &Reply) -> Result<()> {
    serde_json::to_writer(&mut *output, reply)?;
    output.write_all(b"\n")?;
    Ok(())
}
