use super::head::HeadSpec;
use super::snapshot::SelectionSnapshot;
use super::surround::{SurroundOptions, surround};
use super::{ComposerEditor, EditOutcome, char_len, char_slice};
use crate::locale;

/// Toggles a line-prefix marker on a single line, or delegates to the
/// multiline surround pass when the selection spans lines. The single-line
/// result is re-embedded with exactly one blank line between it and any
/// non-empty surrounding content.
pub(crate) fn toggle_list(
    sel: &SelectionSnapshot,
    head: &HeadSpec,
    placeholder: &str,
    opts: &SurroundOptions,
) -> Option<EditOutcome> {
    if sel.value.contains('\n') {
        return surround(sel, head, "", placeholder, opts);
    }

    let (hval, hlen) = head.resolve(None);
    let value = if sel.start == sel.end {
        placeholder.to_string()
    } else {
        sel.value.clone()
    };

    let line = if value.starts_with(hval.as_str()) {
        char_slice(&value, hlen, char_len(&value)).to_string()
    } else {
        format!("{hval}{value}")
    };

    let trimmed_pre = sel.pre.trim();
    let before = if trimmed_pre.is_empty() {
        String::new()
    } else {
        format!("{trimmed_pre}\n\n")
    };
    let trimmed_post = sel.post.trim();
    let after = if trimmed_post.is_empty() {
        String::new()
    } else {
        format!("\n\n{trimmed_post}")
    };

    Some(EditOutcome {
        value: format!("{before}{line}{after}"),
        select_from: char_len(&before),
        select_len: char_len(&line),
    })
}

impl ComposerEditor {
    pub fn apply_list(
        &mut self,
        sel: &SelectionSnapshot,
        head: &HeadSpec,
        example_key: &str,
        opts: SurroundOptions,
    ) {
        let placeholder = locale::t(example_key);
        let Some(outcome) = toggle_list(sel, head, placeholder, &opts) else {
            return;
        };
        self.commit(outcome);
    }
}
