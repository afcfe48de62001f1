//! The editor side of a search session: whoever owns the text.

use std::ops::Range;

/// A change the session asks the buffer owner to apply
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BufferEdit {
    /// Replacement for the whole buffer, if the text changed
    pub text: Option<String>,
    /// New selection, as byte offsets into the (new) text
    pub selection: Option<Range<usize>>,
    /// Whether the selection should be scrolled into view
    pub scroll_into_view: bool,
}

impl BufferEdit {
    pub fn select(range: Range<usize>) -> Self {
        Self {
            text: None,
            selection: Some(range),
            scroll_into_view: true,
        }
    }

    pub fn replace_text(text: String) -> Self {
        Self {
            text: Some(text),
            selection: None,
            scroll_into_view: false,
        }
    }
}

/// The buffer owner, usually the editor view
pub trait BufferHost {
    /// The full current text
    fn text(&self) -> &str;

    fn apply(&mut self, edit: BufferEdit);
}

/// A plain string buffer that remembers the last selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
    selection: Option<Range<usize>>,
    edits: usize,
}

impl TextBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            selection: None,
            edits: 0,
        }
    }

    pub fn selection(&self) -> Option<Range<usize>> {
        self.selection.clone()
    }

    /// Text selected by the last navigation, if any
    pub fn selected_text(&self) -> Option<&str> {
        self.selection
            .clone()
            .and_then(|range| self.text.get(range))
    }

    /// Number of times the text was replaced through [`BufferHost::apply`]
    pub fn edit_count(&self) -> usize {
        self.edits
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl BufferHost for TextBuffer {
    fn text(&self) -> &str {
        &self.text
    }

    fn apply(&mut self, edit: BufferEdit) {
        if let Some(text) = edit.text {
            self.text = text;
            self.selection = None;
            self.edits += 1;
        }
        if let Some(selection) = edit.selection {
            self.selection = Some(selection);
        }
    }
}
