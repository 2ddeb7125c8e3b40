//! Shell Handlers
//!
//! Executes parsed commands against a string cache.

use tracing::debug;

use crate::cache::{Cache, Clock};
use crate::error::Result;
use crate::models::{
    Command, DeleteReply, FindReply, GetReply, HasReply, KeysReply, MessageReply, Reply, SetReply,
    StatsReply, TouchReply, ValuesReply,
};

/// Cache type driven by the shell.
pub type ShellCache<C> = Cache<String, String, C>;

/// Runs one command and builds its reply.
///
/// Only reconfiguration can fail (zero limit or TTL); lookups report
/// absence in the reply instead.
pub fn execute<C: Clock>(cache: &mut ShellCache<C>, command: Command) -> Result<Reply> {
    debug!(?command, "executing shell command");

    let reply = match command {
        Command::Set { key, value } => {
            let stored = cache.set(key.clone(), value);
            Reply::Set(SetReply::new(key, stored))
        }
        Command::Get { key } => {
            let value = cache.get(key.as_str());
            Reply::Get(GetReply::new(key, value))
        }
        Command::Has { key } => {
            let present = cache.has(key.as_str());
            Reply::Has(HasReply { key, present })
        }
        Command::Delete { key } => {
            cache.delete(key.as_str());
            Reply::Delete(DeleteReply::new(key))
        }
        Command::Touch { key } => {
            let touched = cache.touch(key.as_str());
            Reply::Touch(TouchReply { key, touched })
        }
        Command::Find { needle } => {
            let entry = cache.find(|_, value| value.contains(needle.as_str()));
            Reply::Find(FindReply::new(entry))
        }
        Command::Keys => Reply::Keys(KeysReply {
            keys: cache.keys().cloned().collect(),
        }),
        Command::Values => Reply::Values(ValuesReply {
            values: cache.values(),
        }),
        Command::Stats => Reply::Stats(StatsReply::new(cache.stats())),
        Command::Clear => {
            cache.clear();
            Reply::Message(MessageReply::new("Cache cleared"))
        }
        Command::Ttl { ttl } => {
            cache.set_ttl(ttl)?;
            let message = match ttl {
                Some(ttl) => format!("TTL set to {} ms", ttl.as_millis()),
                None => "TTL disabled".to_string(),
            };
            Reply::Message(MessageReply::new(message))
        }
        Command::Limit { limit } => {
            cache.set_limit(limit)?;
            Reply::Message(MessageReply::new(format!("Limit set to {}", limit)))
        }
        Command::Log { enabled } => {
            cache.set_logging(enabled);
            let state = if enabled { "enabled" } else { "disabled" };
            Reply::Message(MessageReply::new(format!("Logging {}", state)))
        }
        Command::Quit => Reply::Message(MessageReply::new("Bye")),
    };

    Ok(reply)
}
