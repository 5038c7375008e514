use super::char_slice;

/// A contiguous selection, in character offsets into the buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionRange {
    pub start: usize,
    pub end: usize,
}

impl SelectionRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// A read-only view of the buffer around a selection, captured at the moment
/// an action fires and discarded after use. Fields are public so a caller may
/// fold markup it consumed into `pre`/`start` before delegating.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionSnapshot {
    pub start: usize,
    pub end: usize,
    pub value: String,
    pub pre: String,
    pub post: String,
    pub line_val: Option<String>,
}

/// Trailing whitespace is always dropped from the selection end so wrapped
/// markup never comes out as `**word **`; leading whitespace is dropped only
/// when the caller asks. Malformed bounds yield `None`.
pub fn capture(
    buffer: &str,
    raw_start: usize,
    raw_end: usize,
    trim_leading: bool,
    want_line_val: bool,
) -> Option<SelectionSnapshot> {
    let chars: Vec<char> = buffer.chars().collect();
    let len = chars.len();
    if raw_start > raw_end || raw_end > len {
        return None;
    }

    let mut start = raw_start;
    let mut end = raw_end;
    while end > start && chars[end - 1].is_whitespace() {
        end -= 1;
    }
    if trim_leading {
        while end > start && chars[start].is_whitespace() {
            start += 1;
        }
    }

    let value = char_slice(buffer, start, end).to_string();
    let pre = char_slice(buffer, 0, start).to_string();
    let post = char_slice(buffer, end, len).to_string();
    let line_val = if want_line_val {
        let line_index = pre.matches('\n').count();
        Some(buffer.split('\n').nth(line_index).unwrap_or("").to_string())
    } else {
        None
    };

    Some(SelectionSnapshot {
        start,
        end,
        value,
        pre,
        post,
        line_val,
    })
}
