//! Placeholder autocomplete over `{{...}}` expressions.
//!
//! As the user types an editor-form placeholder into a bound text field, the
//! functions here detect the in-progress token at the cursor, filter the
//! available variable names, and perform the committed insertion. The keyboard
//! handling is a small pure state machine so it can be tested without a UI.

/// An in-progress, unclosed `{{` token at the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveToken {
    /// Byte offset of the opening `{{` in the text.
    pub start: usize,
    /// The trimmed text between the `{{` and the cursor.
    pub partial: String,
}

/// Finds the placeholder token the cursor is inside of, if any.
///
/// Looks for the last `{{` at or before `cursor`; if no `}}` appears between
/// it and the cursor, the (trimmed) in-between text is the partial token.
/// A closed expression deactivates autocomplete.
pub fn active_token(text: &str, cursor: usize) -> Option<ActiveToken> {
    let cursor = clamp_to_char_boundary(text, cursor);
    let before = &text[..cursor];
    let start = before.rfind("{{")?;
    let between = &before[start + 2..];
    if between.contains("}}") {
        return None;
    }
    Some(ActiveToken {
        start,
        partial: between.trim().to_string(),
    })
}

/// Filters `variables` down to those whose name starts with `partial`,
/// case-insensitively, preserving declared order.
pub fn suggestions<'a>(partial: &str, variables: &'a [String]) -> Vec<&'a str> {
    let needle = partial.to_lowercase();
    variables
        .iter()
        .map(String::as_str)
        .filter(|name| name.to_lowercase().starts_with(&needle))
        .collect()
}

/// Commits `variable` into the active token: the text from the unmatched `{{`
/// through the cursor is replaced with `{{variable}}`.
///
/// Returns the new text and the new cursor position (immediately after the
/// inserted closing braces). If no token is active the input is unchanged.
pub fn insert_variable(text: &str, cursor: usize, variable: &str) -> (String, usize) {
    let cursor = clamp_to_char_boundary(text, cursor);
    let Some(token) = active_token(text, cursor) else {
        return (text.to_string(), cursor);
    };
    let inserted = format!("{{{{{variable}}}}}");
    let mut out = String::with_capacity(text.len() + inserted.len());
    out.push_str(&text[..token.start]);
    out.push_str(&inserted);
    let new_cursor = out.len();
    out.push_str(&text[cursor..]);
    (out, new_cursor)
}

/// Editor-supplied offsets over non-ASCII text can land mid-character; clamp
/// down to the nearest boundary so slicing never panics.
fn clamp_to_char_boundary(text: &str, cursor: usize) -> usize {
    let mut cursor = cursor.min(text.len());
    while !text.is_char_boundary(cursor) {
        cursor -= 1;
    }
    cursor
}

/// A key event the suggestion list cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    Enter { shift: bool },
    Escape,
}

/// What the caller should do in response to a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// The highlight moved; re-render the list.
    Highlight(usize),
    /// Commit the suggestion at this index via [`insert_variable`].
    Commit(usize),
    /// Close the list without modifying the text.
    Dismiss,
    /// Not handled; let the field process the key normally.
    PassThrough,
}

/// Highlight state for an open suggestion list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionList {
    len: usize,
    highlighted: usize,
    pass_shift_enter: bool,
}

impl SuggestionList {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            highlighted: 0,
            pass_shift_enter: false,
        }
    }

    /// Lets Shift+Enter fall through to the field (multi-line inputs).
    pub fn with_shift_enter_passthrough(mut self) -> Self {
        self.pass_shift_enter = true;
        self
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn handle(&mut self, key: Key) -> KeyAction {
        if self.len == 0 {
            return KeyAction::PassThrough;
        }
        match key {
            Key::ArrowUp => {
                self.highlighted = self.highlighted.saturating_sub(1);
                KeyAction::Highlight(self.highlighted)
            }
            Key::ArrowDown => {
                self.highlighted = (self.highlighted + 1).min(self.len - 1);
                KeyAction::Highlight(self.highlighted)
            }
            Key::Enter { shift } => {
                if shift && self.pass_shift_enter {
                    KeyAction::PassThrough
                } else {
                    KeyAction::Commit(self.highlighted)
                }
            }
            Key::Escape => KeyAction::Dismiss,
        }
    }
}
