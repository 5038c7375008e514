use super::{ComposerEditor, char_len};

impl ComposerEditor {
    pub fn move_left(&mut self, select: bool) {
        let sel = self.selection();
        if !select && !sel.is_empty() {
            self.set_selection(sel.start, sel.start);
            return;
        }
        let target = self.caret.saturating_sub(1);
        self.move_caret(target, select);
    }

    pub fn move_right(&mut self, select: bool) {
        let sel = self.selection();
        if !select && !sel.is_empty() {
            self.set_selection(sel.end, sel.end);
            return;
        }
        let target = (self.caret + 1).min(char_len(&self.value));
        self.move_caret(target, select);
    }

    pub fn move_up(&mut self, select: bool) {
        let target = self.vertical_target(-1);
        self.move_caret(target, select);
    }

    pub fn move_down(&mut self, select: bool) {
        let target = self.vertical_target(1);
        self.move_caret(target, select);
    }

    pub fn move_line_start(&mut self, select: bool) {
        let (line, _) = position_at(&self.value, self.caret);
        let target = offset_at(&self.value, line, 0);
        self.move_caret(target, select);
    }

    pub fn move_line_end(&mut self, select: bool) {
        let (line, _) = position_at(&self.value, self.caret);
        let target = offset_at(&self.value, line, usize::MAX);
        self.move_caret(target, select);
    }

    pub fn select_all(&mut self) {
        self.anchor = 0;
        self.caret = char_len(&self.value);
    }

    /// Logical `(line, column)` of the caret, for the status bar.
    pub fn cursor_position(&self) -> (usize, usize) {
        position_at(&self.value, self.caret)
    }

    fn move_caret(&mut self, target: usize, select: bool) {
        self.caret = target;
        if !select {
            self.anchor = target;
        }
    }

    fn vertical_target(&self, delta: i64) -> usize {
        let (line, column) = position_at(&self.value, self.caret);
        let target_line = line as i64 + delta;
        if target_line < 0 {
            return 0;
        }
        let target_line = target_line as usize;
        let line_count = self.value.split('\n').count();
        if target_line >= line_count {
            return char_len(&self.value);
        }
        offset_at(&self.value, target_line, column)
    }
}

pub(crate) fn position_at(value: &str, offset: usize) -> (usize, usize) {
    let mut line = 0usize;
    let mut column = 0usize;
    for (index, ch) in value.chars().enumerate() {
        if index == offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            column = 0;
        } else {
            column += 1;
        }
    }
    (line, column)
}

pub(crate) fn offset_at(value: &str, line: usize, column: usize) -> usize {
    let mut offset = 0usize;
    for (index, content) in value.split('\n').enumerate() {
        if index == line {
            return offset + column.min(char_len(content));
        }
        offset += char_len(content) + 1;
    }
    char_len(value)
}
