//! The new-item form's draft text.

use crate::types::NewTodo;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composer {
    draft: String,
}

impl Composer {
    pub fn text(&self) -> &str {
        &self.draft
    }

    /// Replace the draft verbatim. Trimming only gates submission; the stored
    /// text is never altered.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn can_submit(&self) -> bool {
        !self.draft.trim().is_empty()
    }

    /// The create envelope for the current draft, or `None` when the draft
    /// would be refused.
    pub fn submission(&self) -> Option<NewTodo> {
        self.can_submit().then(|| NewTodo {
            description: self.draft.clone(),
        })
    }

    pub fn clear(&mut self) {
        self.draft.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_whitespace_drafts_cannot_submit() {
        let mut composer = Composer::default();
        assert!(!composer.can_submit());
        for text in ["", " ", "\t\n", "   \r\n "] {
            composer.set_text(text);
            assert!(!composer.can_submit(), "{text:?}");
            assert!(composer.submission().is_none());
        }
    }

    #[test]
    fn any_visible_text_can_submit() {
        let mut composer = Composer::default();
        for text in ["a", " a ", "\tbuy milk\n", "."] {
            composer.set_text(text);
            assert!(composer.can_submit(), "{text:?}");
        }
    }

    #[test]
    fn stored_text_is_not_trimmed() {
        let mut composer = Composer::default();
        composer.set_text("  walk dog  ");
        assert_eq!(composer.text(), "  walk dog  ");
        assert_eq!(composer.submission().unwrap().description, "  walk dog  ");
    }

    #[test]
    fn clear_empties_the_draft() {
        let mut composer = Composer::default();
        composer.set_text("x");
        composer.clear();
        assert_eq!(composer.text(), "");
    }
}
