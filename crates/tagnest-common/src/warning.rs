//! Validator warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the front-ends to report inputs the validator handles in a
//! surprising way (for example self-closing tags).

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Whether warnings are colored. Turned off by `--no-color`.
static COLOR: AtomicBool = AtomicBool::new(true);

fn key(component: &str, message: &str) -> String {
    format!("[{component}] {message}")
}

/// Enable or disable ANSI colors for subsequent warnings.
pub fn set_color(enabled: bool) {
    COLOR.store(enabled, Ordering::Relaxed);
}

/// Warn about a surprising input (prints once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("Tokenizer", "self-closing tag '<br/>' is validated as an opening tag");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let should_print = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key(component, message));

    if should_print {
        let line = format!("[tagnest {component}] ⚠ {message}");
        if COLOR.load(Ordering::Relaxed) {
            eprintln!("{}", line.yellow());
        } else {
            eprintln!("{line}");
        }
    }
}

/// Returns true if this exact warning has already been printed.
#[must_use]
pub fn has_warned(component: &str, message: &str) -> bool {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&key(component, message)))
}

/// Clear all recorded warnings (call before validating a new document)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}
