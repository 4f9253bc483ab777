//! Layout diagnostics with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the DOM front end, the style provider and the constraint generator
//! to report unsupported input and recoverable layout conditions.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// ANSI color codes for terminal output
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Record `key` and report whether it is new.
fn first_time(key: String) -> bool {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key)
}

/// Warn about a recoverable condition (prints once per unique message).
///
/// # Example
/// ```
/// strut_common::warning::warn_once("Flow", "unsupported block-progression: rl");
/// ```
pub fn warn_once(component: &str, message: &str) {
    if first_time(format!("[{component}] {message}")) {
        eprintln!("{YELLOW}[strut {component}] ⚠ {message}{RESET}");
    }
}

/// Report an error that the caller recovers from by dropping work.
///
/// Errors are also de-duplicated, but never share a key with a warning.
pub fn error_once(component: &str, message: &str) {
    if first_time(format!("[{component}] !{message}")) {
        eprintln!("{RED}[strut {component}] ✖ {message}{RESET}");
    }
}

/// Clear all recorded warnings (call before starting a new generation run).
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
