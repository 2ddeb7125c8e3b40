//! Integration Tests for the Shell
//!
//! Drives full sessions through `shell::run` and inspects the JSON replies.

use std::io::Cursor;
use std::time::Duration;

use lru_ttl_cache::shell::{self, ShellCache};
use lru_ttl_cache::{Cache, CacheConfig, ManualClock};
use serde_json::Value;

// == Helper Functions ==

fn run_script(cache: &mut ShellCache<ManualClock>, script: &str) -> Vec<Value> {
    let mut output = Vec::new();
    shell::run(cache, Cursor::new(script), &mut output).unwrap();
    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn new_cache(limit: Option<usize>) -> (ShellCache<ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let config = CacheConfig {
        limit,
        ..CacheConfig::default()
    };
    let cache = Cache::from_config_with_clock(&config, clock.clone()).unwrap();
    (cache, clock)
}

// == Session Tests ==

#[test]
fn test_session_capacity_eviction() {
    let (mut cache, _) = new_cache(Some(3));

    let replies = run_script(
        &mut cache,
        "set a 1\nset b 2\nset c 3\nset d 4\nget a\nget b\nstats\n",
    );

    assert_eq!(replies.len(), 7);
    assert_eq!(replies[4]["found"], false);
    assert_eq!(replies[5]["value"], "2");

    let stats = &replies[6];
    assert_eq!(stats["hits"], 1);
    assert_eq!(stats["misses"], 1);
    assert_eq!(stats["size"], 3);
    assert_eq!(stats["evictions"], 1);
    assert_eq!(stats["limit"], 3);
}

#[test]
fn test_session_touch_and_limit() {
    let (mut cache, _) = new_cache(Some(3));

    let replies = run_script(
        &mut cache,
        "set a 1\nset b 2\nset c 3\ntouch a\nlimit 2\nkeys\n",
    );

    assert_eq!(replies[3]["touched"], true);
    assert_eq!(replies[4]["message"], "Limit set to 2");
    assert_eq!(replies[5]["keys"], serde_json::json!(["a", "c"]));
}

#[test]
fn test_session_ttl_across_scripts() {
    let (mut cache, clock) = new_cache(None);

    let replies = run_script(&mut cache, "ttl 100\nset a 1\nget a\n");
    assert_eq!(replies[2]["value"], "1");

    clock.advance(Duration::from_millis(150));

    let replies = run_script(&mut cache, "has a\nget a\nstats\n");
    assert_eq!(replies[0]["present"], false);
    assert_eq!(replies[1]["found"], false);
    assert_eq!(replies[2]["ttl_ms"], 100);
    assert_eq!(replies[2]["size"], 0);
}

#[test]
fn test_session_errors_do_not_abort() {
    let (mut cache, _) = new_cache(None);
    let long_key = "k".repeat(300);

    let replies = run_script(
        &mut cache,
        &format!("get {}\nset\nttl 0\nset ok yes\nget ok\n", long_key),
    );

    assert_eq!(replies.len(), 5);
    assert!(replies[0]["error"].as_str().unwrap().contains("maximum length"));
    assert!(replies[1]["error"].is_string());
    assert!(replies[2]["error"].as_str().unwrap().contains("Invalid TTL"));
    assert_eq!(replies[4]["value"], "yes");
}

#[test]
fn test_session_clear_and_values() {
    let (mut cache, _) = new_cache(None);

    let replies = run_script(
        &mut cache,
        "set a first value\nset b second\nvalues\nfind sec\nclear\nvalues\nstats\n",
    );

    assert_eq!(replies[2]["values"], serde_json::json!(["first value", "second"]));
    assert_eq!(replies[3]["key"], "b");
    assert_eq!(replies[5]["values"], serde_json::json!([]));
    assert_eq!(replies[6]["hits"], 0);
    assert_eq!(replies[6]["size"], 0);
}
