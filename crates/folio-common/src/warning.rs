//! Document-building warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the metadata and structured-data collaborators to report input
//! that is accepted but probably not what the caller meant.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Record a warning and report whether it has not been seen before.
fn first_sighting(key: String) -> bool {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key)
}

/// Warn about questionable input (prints once per unique message)
///
/// `message` becomes the deduplication key, so keep caller data out of it
/// and pass it to [`warn_once_with`] instead.
///
/// # Example
/// ```ignore
/// warn_once("Schema", "structured data entry has no \"@type\"");
/// ```
pub fn warn_once(component: &str, message: &str) {
    if first_sighting(format!("[{component}] {message}")) {
        eprintln!("{}", format!("[Folio {component}] ⚠ {message}").yellow());
    }
}

/// Warn about questionable input, naming the offending value.
///
/// Only `component` and `message` identify the warning, so `detail` (usually
/// caller data such as a URL) is printed with the first sighting but never
/// stored.
///
/// # Example
/// ```ignore
/// warn_once_with("Meta", "canonical URL is not absolute", "page.html");
/// ```
pub fn warn_once_with(component: &str, message: &str, detail: &str) {
    if first_sighting(format!("[{component}] {message}")) {
        eprintln!("{}", format!("[Folio {component}] ⚠ {message}: '{detail}'").yellow());
    }
}

/// Clear all recorded warnings (call between independent documents when
/// every document should report its own problems)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorded() -> usize {
        WARNED
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map_or(0, HashSet::len)
    }

    // Single test: the set is global and tests run in parallel.
    #[test]
    fn test_first_sighting_deduplicates() {
        let key = "[Test] dedupe check".to_string();
        clear_warnings();
        assert!(first_sighting(key.clone()));
        assert!(!first_sighting(key.clone()));
        clear_warnings();
        assert!(first_sighting(key));

        // Details never reach the set, however many distinct values appear.
        clear_warnings();
        for n in 0..100 {
            warn_once_with("Test", "bad value", &format!("https://example.com/{n}"));
        }
        assert_eq!(recorded(), 1);
        assert!(!first_sighting("[Test] bad value".to_string()));
    }
}
