//! Editing operations over list fields (requirements, skills, benefits, ...).
//!
//! A list field always holds at least one entry so there is always an input
//! to type into. Entries may be empty while editing; [`compact`] drops the
//! empty ones when the payload is built.

/// Append one empty entry.
pub fn add(list: &mut Vec<String>) {
    list.push(String::new());
}

/// Replace the entry at `index`. Out-of-bounds indices are ignored.
///
/// Returns whether the list changed.
pub fn update(list: &mut [String], index: usize, value: impl Into<String>) -> bool {
    match list.get_mut(index) {
        Some(entry) => {
            *entry = value.into();
            true
        }
        None => false,
    }
}

/// Remove the entry at `index` unless it is the only one left.
///
/// Returns whether the list changed.
pub fn remove(list: &mut Vec<String>, index: usize) -> bool {
    if list.len() <= 1 || index >= list.len() {
        return false;
    }
    list.remove(index);
    true
}

/// Trimmed, non-empty entries in their original order.
pub fn compact(list: &[String]) -> Vec<String> {
    list.iter()
        .map(|entry| entry.trim())
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Restore the one-entry floor on a list that came back empty.
pub fn ensure_floor(list: &mut Vec<String>) {
    if list.is_empty() {
        list.push(String::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_add_appends_empty_entry() {
        let mut l = list(&["Rust"]);
        add(&mut l);
        assert_eq!(l, list(&["Rust", ""]));
    }

    #[test]
    fn test_update_in_bounds() {
        let mut l = list(&["", ""]);
        assert!(update(&mut l, 1, "Tokio"));
        assert_eq!(l, list(&["", "Tokio"]));
    }

    #[test]
    fn test_update_out_of_bounds_is_noop() {
        let mut l = list(&["Rust"]);
        assert!(!update(&mut l, 3, "Go"));
        assert_eq!(l, list(&["Rust"]));
    }

    #[test]
    fn test_remove_single_entry_is_noop() {
        let mut l = list(&["x"]);
        assert!(!remove(&mut l, 0));
        assert_eq!(l, list(&["x"]));
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut l = list(&["a", "b", "c"]);
        assert!(remove(&mut l, 1));
        assert_eq!(l, list(&["a", "c"]));
        assert!(!remove(&mut l, 5));
    }

    #[test]
    fn test_compact_drops_blank_entries() {
        let l = list(&["  Rust ", "", "   ", "SQL"]);
        assert_eq!(compact(&l), list(&["Rust", "SQL"]));
    }

    #[test]
    fn test_compact_is_idempotent() {
        let l = list(&[" a", "", "b ", "  ", "c"]);
        let once = compact(&l);
        assert_eq!(compact(&once), once);
    }

    #[test]
    fn test_ensure_floor() {
        let mut l = Vec::new();
        ensure_floor(&mut l);
        assert_eq!(l, list(&[""]));

        let mut l = list(&["a"]);
        ensure_floor(&mut l);
        assert_eq!(l, list(&["a"]));
    }
}
