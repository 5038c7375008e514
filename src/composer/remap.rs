use super::snapshot::SelectionRange;
use super::{ComposerEditor, SelectOptions, char_len};

/// Computes where a selection lands after the `needle` span is replaced by
/// the `replacement` span. Pure interval arithmetic: bounds fully outside the
/// needle shift by the length delta, bounds inside clamp to the replacement,
/// so the cursor never points into stale offsets.
pub fn remap_selection(
    selection: SelectionRange,
    needle: SelectionRange,
    replacement: SelectionRange,
) -> SelectionRange {
    let diff = replacement.len() as i64 - needle.len() as i64;
    let shift = |offset: usize| -> usize { (offset as i64 + diff).max(0) as usize };

    let result = if selection.end <= needle.start {
        // Selection ends (and starts) before the needle.
        selection
    } else if selection.start <= needle.start {
        if selection.end < needle.end {
            // Starts before the needle, ends inside it.
            SelectionRange::new(selection.start, needle.start)
        } else {
            // Spans the needle completely.
            SelectionRange::new(selection.start, shift(selection.end))
        }
    } else if selection.start < needle.end {
        if selection.end <= needle.end {
            // Starts and ends inside the needle.
            SelectionRange::new(replacement.end, replacement.end)
        } else {
            // Starts inside, spans the end of the needle.
            SelectionRange::new(replacement.end, shift(selection.end))
        }
    } else {
        // Starts (and ends) behind the needle.
        SelectionRange::new(shift(selection.start), shift(selection.end))
    };

    SelectionRange::new(result.start, result.end.max(result.start))
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ReplaceOptions {
    /// Restore the selection even when the surface is not focused.
    pub force_focus: bool,
}

impl ComposerEditor {
    /// Replaces the first occurrence of `needle` out-of-band and remaps the
    /// live selection so the visible cursor position survives. Returns false
    /// when the needle is absent.
    pub fn replace_text(&mut self, needle: &str, replacement: &str, opts: ReplaceOptions) -> bool {
        if needle.is_empty() {
            return false;
        }
        let Some(byte_idx) = self.value().find(needle) else {
            return false;
        };
        let start = char_len(&self.value()[..byte_idx]);
        let needle_range = SelectionRange::new(start, start + char_len(needle));
        let replacement_range = SelectionRange::new(start, start + char_len(replacement));
        let new_selection = remap_selection(self.selection(), needle_range, replacement_range);

        let value = self.value().replacen(needle, replacement, 1);
        self.set_value(value);

        if opts.force_focus || self.is_focused() {
            self.select_text(
                new_selection.start,
                new_selection.len(),
                SelectOptions::default(),
            );
        }
        true
    }
}
