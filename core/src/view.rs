//! Derived rendering data.
//!
//! A `ViewModel` is computed from the list on demand and never stored, so it
//! cannot drift from the state it describes. View layers (the terminal front
//! end, a C host through the FFI crate) render from it and nothing else.

use crate::types::TodoItem;

/// Placeholder shown while the list is empty.
pub const EMPTY_STATE_TEXT: &str = "No todos yet. Create your first one below!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub items: Vec<TodoItem>,
    /// `"1 item"` / `"N items"`, absent for an empty list.
    pub count_label: Option<String>,
    pub show_empty_state: bool,
    pub draft: String,
    pub submit_enabled: bool,
    /// The initial load is still in flight.
    pub loading: bool,
}

/// Count label for `len` items, `None` when there is nothing to count.
pub fn count_label(len: usize) -> Option<String> {
    match len {
        0 => None,
        1 => Some("1 item".to_string()),
        n => Some(format!("{n} items")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_label_pluralizes() {
        assert_eq!(count_label(0), None);
        assert_eq!(count_label(1).as_deref(), Some("1 item"));
        assert_eq!(count_label(2).as_deref(), Some("2 items"));
        assert_eq!(count_label(11).as_deref(), Some("11 items"));
    }
}
