//! Text rendering of the list view.

use std::fmt::Write;

use todo_core::{ViewModel, EMPTY_STATE_TEXT};

pub const TITLE: &str = "📝 My TODO List";
pub const SUBTITLE: &str = "Stay organized and get things done";
pub const CREATE_HEADING: &str = "Create a New TODO";
pub const PROMPT: &str = "What needs to be done?";
pub const BLANK_HINT: &str = "Type something first; blank todos are not added.";

/// Render the list section: heading, count, items or the empty state.
pub fn render(view: &ViewModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{TITLE}");
    let _ = writeln!(out, "{SUBTITLE}");
    match &view.count_label {
        Some(label) => {
            let _ = writeln!(out, "Your TODOs ({label})");
        }
        None => {
            let _ = writeln!(out, "Your TODOs");
        }
    }

    if view.loading {
        let _ = writeln!(out, "  loading…");
    }
    if view.show_empty_state {
        let _ = writeln!(out, "  ✨ {EMPTY_STATE_TEXT}");
    }
    for item in &view.items {
        let _ = writeln!(out, "  • {}", item.description);
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use todo_core::{count_label, TodoClient, TodoId, TodoItem, TodoList};

    use super::*;

    fn view(items: Vec<TodoItem>) -> ViewModel {
        ViewModel {
            count_label: count_label(items.len()),
            show_empty_state: items.is_empty(),
            items,
            draft: String::new(),
            submit_enabled: false,
            loading: false,
        }
    }

    #[test]
    fn renders_items_with_plural_label() {
        let rendered = render(&view(vec![
            TodoItem { id: TodoId::Number(1), description: "a".into() },
            TodoItem { id: TodoId::Number(2), description: "b".into() },
        ]));
        assert_eq!(
            rendered,
            format!("{TITLE}\n{SUBTITLE}\nYour TODOs (2 items)\n  • a\n  • b\n")
        );
    }

    #[test]
    fn renders_singular_label() {
        let rendered = render(&view(vec![TodoItem {
            id: TodoId::Text("x".into()),
            description: "only".into(),
        }]));
        assert!(rendered.contains("Your TODOs (1 item)\n"));
    }

    #[test]
    fn empty_list_shows_placeholder_without_count() {
        let rendered = render(&view(Vec::new()));
        assert_eq!(
            rendered,
            format!("{TITLE}\n{SUBTITLE}\nYour TODOs\n  ✨ {EMPTY_STATE_TEXT}\n")
        );
    }

    #[test]
    fn empty_list_shows_placeholder_while_loading() {
        let mut list = TodoList::new(TodoClient::new("http://localhost:8000"));
        list.begin_load().unwrap();
        let view = list.view();
        assert!(view.loading && view.show_empty_state);

        let rendered = render(&view);
        assert!(rendered.contains("  loading…\n"));
        assert!(rendered.contains(EMPTY_STATE_TEXT));
    }

    #[test]
    fn loading_with_items_shows_no_placeholder() {
        let mut v = view(vec![TodoItem {
            id: TodoId::Number(7),
            description: "created early".into(),
        }]);
        v.loading = true;
        let rendered = render(&v);
        assert!(rendered.contains("loading"));
        assert!(!rendered.contains(EMPTY_STATE_TEXT));
    }
}
