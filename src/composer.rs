use std::collections::VecDeque;

mod head;
mod list;
mod motion;
mod paste;
mod remap;
mod snapshot;
mod surround;
mod table;

pub use head::{HeadSpec, ordered_item_head};
pub use paste::{IdentityConverter, MarkdownConverter, PastePayload, PasteResponse};
pub use remap::{ReplaceOptions, remap_selection};
pub use snapshot::{SelectionRange, SelectionSnapshot};
pub use surround::SurroundOptions;
pub use table::extract_table;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CodeFormattingStyle {
    Fenced,
    FourSpacesIndent,
}

/// Read-only configuration consumed by the composer.
#[derive(Clone, Debug)]
pub struct ComposerSettings {
    pub enable_rich_text_paste: bool,
    pub allow_unformatted_paste: bool,
    pub code_formatting_style: CodeFormattingStyle,
    pub support_mixed_text_direction: bool,
}

impl Default for ComposerSettings {
    fn default() -> Self {
        Self {
            enable_rich_text_paste: true,
            allow_unformatted_paste: false,
            code_formatting_style: CodeFormattingStyle::Fenced,
            support_mixed_text_direction: false,
        }
    }
}

/// Host platform quirks that affect focus handling during selection restores.
#[derive(Clone, Copy, Debug, Default)]
pub struct Capabilities {
    /// Focusing the surface scrolls the caret into view on this platform.
    pub focus_jumps_viewport: bool,
    /// Focus during restores even when the platform jumps the viewport.
    pub force_focus_on_restore: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct SelectOptions {
    pub scroll: bool,
}

impl Default for SelectOptions {
    fn default() -> Self {
        Self { scroll: true }
    }
}

#[derive(Clone, Copy, Debug)]
struct PendingSelection {
    from: usize,
    len: usize,
    scroll: bool,
}

/// A computed buffer replacement plus the selection that should land on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditOutcome {
    pub value: String,
    pub select_from: usize,
    pub select_len: usize,
}

/// The editor session: owns the buffer, the live selection, and the viewport
/// scroll offset. The buffer is mutated only through [`set_value`].
///
/// [`set_value`]: ComposerEditor::set_value
pub struct ComposerEditor {
    value: String,
    anchor: usize,
    caret: usize,
    scroll_top: usize,
    view_height: usize,
    focused: bool,
    ready: bool,
    scroll_requested: bool,
    revision: u64,
    buffer_revision: u64,
    pending: VecDeque<PendingSelection>,
    settings: ComposerSettings,
    capabilities: Capabilities,
}

impl ComposerEditor {
    pub fn new(value: String, settings: ComposerSettings, capabilities: Capabilities) -> Self {
        Self {
            value,
            anchor: 0,
            caret: 0,
            scroll_top: 0,
            view_height: 1,
            focused: false,
            ready: false,
            scroll_requested: false,
            revision: 0,
            buffer_revision: 0,
            pending: VecDeque::new(),
            settings,
            capabilities,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn settings(&self) -> &ComposerSettings {
        &self.settings
    }

    pub fn selection(&self) -> SelectionRange {
        SelectionRange {
            start: self.anchor.min(self.caret),
            end: self.anchor.max(self.caret),
        }
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Bumped on every buffer commit and on every applied selection restore;
    /// observers (a preview renderer, the dirty marker) key off it.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Bumped on buffer commits only.
    pub fn buffer_revision(&self) -> u64 {
        self.buffer_revision
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    /// Single entry point for buffer mutation. Clamps the live selection to
    /// the new content and notifies observers.
    pub fn set_value(&mut self, value: String) {
        self.value = value;
        let len = char_len(&self.value);
        self.anchor = self.anchor.min(len);
        self.caret = self.caret.min(len);
        self.buffer_revision += 1;
        self.revision += 1;
    }

    pub fn set_selection(&mut self, start: usize, end: usize) {
        let len = char_len(&self.value);
        let start = start.min(len);
        self.anchor = start;
        self.caret = end.min(len).max(start);
    }

    /// Captures the current selection. `None` while the surface is not
    /// mounted; callers treat that as a no-op.
    pub fn get_selected(&self, trim_leading: bool, want_line_val: bool) -> Option<SelectionSnapshot> {
        if !self.ready {
            return None;
        }
        let sel = self.selection();
        snapshot::capture(&self.value, sel.start, sel.end, trim_leading, want_line_val)
    }

    /// Schedules `[from, from+len)` to become the live selection on the next
    /// paint, after the buffer commit that queued it has propagated.
    pub fn select_text(&mut self, from: usize, len: usize, opts: SelectOptions) {
        self.pending.push_back(PendingSelection {
            from,
            len,
            scroll: opts.scroll,
        });
    }

    /// Drains deferred selection restores; the host calls this once per frame,
    /// before layout.
    pub fn apply_pending_selections(&mut self) {
        while let Some(pending) = self.pending.pop_front() {
            self.apply_selection(pending);
        }
    }

    fn apply_selection(&mut self, pending: PendingSelection) {
        if !self.ready {
            return;
        }
        let len = char_len(&self.value);
        let from = pending.from.min(len);
        let to = from.saturating_add(pending.len).min(len);
        self.anchor = from;
        self.caret = to;
        self.revision += 1;
        if pending.scroll {
            let saved = self.scroll_top;
            if !self.capabilities.focus_jumps_viewport || self.capabilities.force_focus_on_restore {
                self.focus();
            }
            self.scroll_top = saved;
            self.scroll_requested = false;
        }
    }

    /// Focusing requests that the caret be scrolled into view on the next
    /// layout pass.
    pub fn focus(&mut self) {
        self.focused = true;
        self.scroll_requested = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Called by the host once per frame with the caret's visual line and the
    /// layout totals; honors a pending scroll-into-view request and keeps the
    /// offset in range.
    pub fn resolve_scroll(&mut self, caret_line: usize, total_lines: usize, view_height: usize) {
        self.view_height = view_height.max(1);
        if self.scroll_requested {
            if caret_line < self.scroll_top {
                self.scroll_top = caret_line;
            } else if caret_line >= self.scroll_top + self.view_height {
                self.scroll_top = caret_line + 1 - self.view_height;
            }
            self.scroll_requested = false;
        }
        self.scroll_top = self.scroll_top.min(total_lines.saturating_sub(self.view_height));
    }

    /// Replaces the snapshot's selection with `text`, collapsing the caret
    /// after it. The shared insertion path for paste and block commands.
    pub fn add_text(&mut self, sel: &SelectionSnapshot, text: &str) {
        let insert = format!("{}{}", sel.pre, text);
        let from = char_len(&insert);
        self.set_value(format!("{insert}{}", sel.post));
        self.select_text(from, 0, SelectOptions::default());
        self.focus();
    }

    pub(crate) fn commit(&mut self, outcome: EditOutcome) {
        self.set_value(outcome.value);
        self.select_text(outcome.select_from, outcome.select_len, SelectOptions::default());
    }

    /// Replaces the selection (or inserts at the caret) synchronously; the
    /// typing path, no deferral involved.
    pub fn insert_str(&mut self, text: &str) {
        if !self.ready {
            return;
        }
        let sel = self.selection();
        let start_byte = char_to_byte_idx(&self.value, sel.start);
        let end_byte = char_to_byte_idx(&self.value, sel.end);
        let mut next = String::with_capacity(self.value.len() + text.len());
        next.push_str(&self.value[..start_byte]);
        next.push_str(text);
        next.push_str(&self.value[end_byte..]);
        self.set_value(next);
        let caret = sel.start + char_len(text);
        self.anchor = caret;
        self.caret = caret;
    }

    pub fn insert_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.insert_str(ch.encode_utf8(&mut buf));
    }

    pub fn backspace(&mut self) {
        if !self.ready {
            return;
        }
        let sel = self.selection();
        if !sel.is_empty() {
            self.insert_str("");
            return;
        }
        if sel.start == 0 {
            return;
        }
        self.remove_char_range(sel.start - 1, sel.start);
        self.anchor = sel.start - 1;
        self.caret = sel.start - 1;
    }

    pub fn delete_forward(&mut self) {
        if !self.ready {
            return;
        }
        let sel = self.selection();
        if !sel.is_empty() {
            self.insert_str("");
            return;
        }
        if sel.start >= char_len(&self.value) {
            return;
        }
        self.remove_char_range(sel.start, sel.start + 1);
        self.anchor = sel.start;
        self.caret = sel.start;
    }

    fn remove_char_range(&mut self, start: usize, end: usize) {
        let start_byte = char_to_byte_idx(&self.value, start);
        let end_byte = char_to_byte_idx(&self.value, end);
        let mut next = String::with_capacity(self.value.len());
        next.push_str(&self.value[..start_byte]);
        next.push_str(&self.value[end_byte..]);
        self.set_value(next);
    }
}

pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

pub(crate) fn char_to_byte_idx(text: &str, char_idx: usize) -> usize {
    if char_idx == 0 {
        return 0;
    }
    for (count, (byte_idx, _)) in text.char_indices().enumerate() {
        if count == char_idx {
            return byte_idx;
        }
    }
    text.len()
}

pub(crate) fn char_slice(text: &str, start: usize, end: usize) -> &str {
    if end <= start {
        return "";
    }
    let start_byte = char_to_byte_idx(text, start);
    let end_byte = char_to_byte_idx(text, end);
    &text[start_byte..end_byte]
}

#[cfg(test)]
#[path = "composer_tests.rs"]
mod composer_tests;



#[cfg(test)]
#[path = "composer/remap_tests.rs"]
mod remap_tests;
