//! Comment box state as the client keeps it: draft text, caret position and
//! whether the emoji picker is showing.

use crate::models::comment::CreateComment;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentDraft {
    pin_id: i64,
    content: String,
    /// Caret position in characters.
    caret: usize,
    picker_open: bool,
}

impl CommentDraft {
    pub fn new(pin_id: i64) -> Self {
        Self {
            pin_id,
            content: String::new(),
            caret: 0,
            picker_open: false,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn is_picker_open(&self) -> bool {
        self.picker_open
    }

    /// Replaces the text as typed, leaving the caret at the end.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.caret = self.content.chars().count();
    }

    pub fn set_caret(&mut self, caret: usize) {
        self.caret = caret.min(self.content.chars().count());
    }

    /// Inserts `emoji` at the caret and moves the caret past it.
    pub fn insert_emoji(&mut self, emoji: &str) {
        let caret = self.caret.min(self.content.chars().count());
        let byte_index = self
            .content
            .char_indices()
            .nth(caret)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len());

        self.content.insert_str(byte_index, emoji);
        self.caret = caret + emoji.chars().count();
    }

    pub fn toggle_picker(&mut self) {
        self.picker_open = !self.picker_open;
    }

    /// A click outside the picker closes it.
    pub fn close_picker(&mut self) {
        self.picker_open = false;
    }

    /// Turns a non-blank draft into a request and clears the box.
    pub fn submit(&mut self) -> Option<CreateComment> {
        if self.content.trim().is_empty() {
            return None;
        }
        let request = CreateComment {
            content: std::mem::take(&mut self.content),
            pin_id: self.pin_id,
        };
        self.caret = 0;
        self.picker_open = false;
        Some(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emoji_goes_in_at_the_caret() {
        let mut draft = CommentDraft::new(1);
        draft.set_content("nice pin");
        draft.set_caret(4);
        draft.insert_emoji("😍");

        assert_eq!(draft.content(), "nice😍 pin");
        assert_eq!(draft.caret(), 5);

        draft.insert_emoji("👍");
        assert_eq!(draft.content(), "nice😍👍 pin");
        assert_eq!(draft.caret(), 6);
    }

    #[test]
    fn caret_is_clamped_to_the_text() {
        let mut draft = CommentDraft::new(1);
        draft.set_content("hi");
        draft.set_caret(99);
        assert_eq!(draft.caret(), 2);
        draft.insert_emoji("!");
        assert_eq!(draft.content(), "hi!");
    }

    #[test]
    fn picker_toggles_and_closes_on_outside_click() {
        let mut draft = CommentDraft::new(1);
        draft.toggle_picker();
        assert!(draft.is_picker_open());
        draft.close_picker();
        assert!(!draft.is_picker_open());
        draft.close_picker();
        assert!(!draft.is_picker_open());
    }

    #[test]
    fn submit_resets_and_skips_blank_drafts() {
        let mut draft = CommentDraft::new(7);
        draft.set_content("   ");
        assert_eq!(draft.submit(), None);

        draft.set_content("lovely");
        draft.toggle_picker();
        let request = draft.submit().unwrap();
        assert_eq!(
            request,
            CreateComment {
                content: "lovely".into(),
                pin_id: 7
            }
        );
        assert_eq!(draft.content(), "");
        assert_eq!(draft.caret(), 0);
        assert!(!draft.is_picker_open());
    }
}
