//! Global key bindings.
//!
//! Enter while focus is outside the search input jumps back to search and
//! clears the query. Escape closes an open detail view.

/// A key press, matched case-insensitively by its code name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    Other(String),
}

impl Key {
    pub fn parse(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "enter" | "return" => Key::Enter,
            "escape" | "esc" => Key::Escape,
            other => Key::Other(other.to_string()),
        }
    }
}

/// What a key press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The query was cleared and focus belongs to the search input.
    FocusSearch,
    /// The open detail view was closed.
    ClosedDetail,
    Ignored,
}

/// Decide what `key` should do given the current focus and view.
pub fn resolve(key: &Key, search_focused: bool, detail_open: bool) -> KeyOutcome {
    match key {
        Key::Enter if !search_focused => KeyOutcome::FocusSearch,
        Key::Escape if detail_open => KeyOutcome::ClosedDetail,
        _ => KeyOutcome::Ignored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Key::parse("Enter"), Key::Enter);
        assert_eq!(Key::parse("ESCAPE"), Key::Escape);
        assert_eq!(Key::parse(" esc "), Key::Escape);
        assert_eq!(Key::parse("KeyA"), Key::Other("keya".to_string()));
    }

    #[test]
    fn test_enter_ignored_while_typing() {
        assert_eq!(resolve(&Key::Enter, true, false), KeyOutcome::Ignored);
        assert_eq!(resolve(&Key::Enter, false, false), KeyOutcome::FocusSearch);
    }

    #[test]
    fn test_escape_needs_open_detail() {
        assert_eq!(resolve(&Key::Escape, false, false), KeyOutcome::Ignored);
        assert_eq!(resolve(&Key::Escape, true, true), KeyOutcome::ClosedDetail);
    }
}
