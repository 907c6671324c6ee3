//! Tracks which search result, if any, is open for detail viewing.

/// Single-slot selection that toggles on repeat selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionController {
    selected_id: Option<String>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `id`, or deselect if it is already selected. Returns the
    /// selection after the change.
    pub fn select(&mut self, id: &str) -> Option<&str> {
        if self.selected_id.as_deref() == Some(id) {
            self.selected_id = None;
        } else {
            self.selected_id = Some(id.to_string());
        }
        self.selected_id.as_deref()
    }

    pub fn clear(&mut self) {
        self.selected_id = None;
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.selected_id.is_some()
    }
}
