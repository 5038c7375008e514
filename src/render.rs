use ratatui::{
    layout::Alignment,
    style::Style,
    text::{Line, Span},
};
use unicode_width::UnicodeWidthChar;

use crate::composer::{ComposerEditor, SelectionRange, char_len, char_slice};
use crate::theme::Theme;

#[derive(Clone, Copy, Debug)]
pub struct CursorVisualPosition {
    pub line: usize,
    pub column: u16,
}

#[derive(Debug)]
pub struct RenderResult {
    pub lines: Vec<Line<'static>>,
    pub cursor: CursorVisualPosition,
    pub total_lines: usize,
}

struct VisualLine {
    /// Character offset of the first character into the buffer.
    start: usize,
    text: String,
}

/// Lays the buffer out into width-wrapped visual lines, highlights the
/// selection, and maps the caret to a terminal cell.
pub fn render_buffer(editor: &ComposerEditor, width: usize, theme: &Theme) -> RenderResult {
    let width = width.max(1);
    let visual = layout_lines(editor.value(), width);
    let selection = editor.selection();
    let caret = editor.caret();
    let mixed_direction = editor.settings().support_mixed_text_direction;

    let mut cursor = CursorVisualPosition { line: 0, column: 0 };
    let mut lines = Vec::with_capacity(visual.len());

    for (index, vline) in visual.iter().enumerate() {
        let line_len = char_len(&vline.text);
        if caret >= vline.start && caret <= vline.start + line_len {
            // Offsets on a wrap boundary belong to the later line; keep
            // overwriting so the last match wins.
            cursor = CursorVisualPosition {
                line: index,
                column: display_width(char_slice(&vline.text, 0, caret - vline.start)),
            };
        }
        lines.push(styled_line(vline, selection, mixed_direction, theme));
    }

    RenderResult {
        total_lines: visual.len(),
        cursor,
        lines,
    }
}

fn layout_lines(value: &str, width: usize) -> Vec<VisualLine> {
    let mut lines = Vec::new();
    let mut offset = 0usize;
    for logical in value.split('\n') {
        let mut start = offset;
        let mut text = String::new();
        let mut columns = 0usize;
        for ch in logical.chars() {
            let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
            if columns + ch_width > width && !text.is_empty() {
                lines.push(VisualLine {
                    start,
                    text: std::mem::take(&mut text),
                });
                start = offset;
                columns = 0;
            }
            text.push(ch);
            columns += ch_width;
            offset += 1;
        }
        lines.push(VisualLine { start, text });
        offset += 1; // the newline
    }
    lines
}

fn styled_line(
    vline: &VisualLine,
    selection: SelectionRange,
    mixed_direction: bool,
    theme: &Theme,
) -> Line<'static> {
    let line_len = char_len(&vline.text);
    let line_end = vline.start + line_len;
    let sel_start = selection.start.clamp(vline.start, line_end) - vline.start;
    let sel_end = selection.end.clamp(vline.start, line_end) - vline.start;

    let line = if selection.is_empty() || sel_start >= sel_end {
        Line::from(Span::raw(vline.text.clone()))
    } else {
        let selected_style = Style::default()
            .fg(theme.selection_fg)
            .bg(theme.selection_bg);
        let mut spans = Vec::new();
        if sel_start > 0 {
            spans.push(Span::raw(char_slice(&vline.text, 0, sel_start).to_string()));
        }
        spans.push(Span::styled(
            char_slice(&vline.text, sel_start, sel_end).to_string(),
            selected_style,
        ));
        if sel_end < line_len {
            spans.push(Span::raw(
                char_slice(&vline.text, sel_end, line_len).to_string(),
            ));
        }
        Line::from(spans)
    };

    if mixed_direction && starts_right_to_left(&vline.text) {
        line.alignment(Alignment::Right)
    } else {
        line
    }
}

fn display_width(text: &str) -> u16 {
    let total: usize = text
        .chars()
        .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(0))
        .sum();
    total.min(u16::MAX as usize) as u16
}

fn starts_right_to_left(text: &str) -> bool {
    text.chars()
        .find(|ch| !ch.is_whitespace())
        .is_some_and(|ch| {
            matches!(ch,
                '\u{0590}'..='\u{08FF}' | '\u{FB1D}'..='\u{FDFD}' | '\u{FE70}'..='\u{FEFC}')
        })
}
