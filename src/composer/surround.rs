use super::head::HeadSpec;
use super::snapshot::SelectionSnapshot;
use super::{
    CodeFormattingStyle, ComposerEditor, EditOutcome, SelectOptions, char_len, char_slice,
};
use crate::locale;

/// Options steering the surround toggle.
#[derive(Clone, Copy, Debug)]
pub struct SurroundOptions {
    /// Allow the per-line multiline pass; when false a spanning selection is
    /// wrapped as one unit.
    pub multiline: bool,
    /// Force head/tail onto their own lines when the selection spans several.
    pub use_block_mode: bool,
    /// Wrap empty lines too during a multiline pass.
    pub apply_empty_lines: bool,
}

impl Default for SurroundOptions {
    fn default() -> Self {
        Self {
            multiline: true,
            use_block_mode: false,
            apply_empty_lines: false,
        }
    }
}

/// Direction committed for a whole multiline pass. Once a line strips markup
/// the pass stays `Removed`; once a line is wrapped the pass stays `Added`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ToggleOperation {
    None,
    Added,
    Removed,
}

/// Toggles `head`/`tail` markup around the snapshot's selection. Removal wins
/// over addition whenever the exact adjacent markup is found, so re-triggering
/// an action on already-marked text unwraps instead of double-wrapping.
pub(crate) fn surround(
    sel: &SelectionSnapshot,
    head: &HeadSpec,
    tail: &str,
    placeholder: &str,
    opts: &SurroundOptions,
) -> Option<EditOutcome> {
    let pre = sel.pre.as_str();
    let post = sel.post.as_str();
    let tlen = char_len(tail);

    if sel.start == sel.end {
        if tlen == 0 {
            return None;
        }
        let (hval, hlen) = head.resolve(None);
        return Some(EditOutcome {
            value: format!("{pre}{hval}{placeholder}{tail}{post}"),
            select_from: sel.start + hlen,
            select_len: char_len(placeholder),
        });
    }

    if !opts.multiline {
        let (hval, hlen) = head.resolve(None);

        if opts.use_block_mode && sel.value.contains('\n') {
            let block_head = format!("{hval}\n");
            let block_tail = format!("\n{tail}");
            if pre.ends_with(&block_head) && post.starts_with(&block_tail) {
                let pre_len = char_len(pre);
                return Some(EditOutcome {
                    value: format!(
                        "{}{}{}",
                        char_slice(pre, 0, pre_len.saturating_sub(hlen + 1)),
                        sel.value,
                        char_slice(post, tlen + 1, char_len(post)),
                    ),
                    select_from: sel.start.saturating_sub(hlen + 1),
                    select_len: char_len(&sel.value),
                });
            }
            return Some(EditOutcome {
                value: format!("{pre}{hval}\n{}\n{tail}{post}", sel.value),
                select_from: sel.start + hlen + 1,
                select_len: char_len(&sel.value),
            });
        }

        if pre.ends_with(hval.as_str()) && post.starts_with(tail) {
            let pre_len = char_len(pre);
            return Some(EditOutcome {
                value: format!(
                    "{}{}{}",
                    char_slice(pre, 0, pre_len.saturating_sub(hlen)),
                    sel.value,
                    char_slice(post, tlen, char_len(post)),
                ),
                select_from: sel.start.saturating_sub(hlen),
                select_len: char_len(&sel.value),
            });
        }
        return Some(EditOutcome {
            value: format!("{pre}{hval}{}{tail}{post}", sel.value),
            select_from: sel.start + hlen,
            select_len: char_len(&sel.value),
        });
    }

    let lines: Vec<&str> = sel.value.split('\n').collect();
    let (hval, hlen) = head.resolve(None);

    // A single line whose surroundings carry the markup inverted (tail ahead,
    // head behind) is a selection sitting inside an existing wrap; unwrap.
    let inverse_wrapped = lines.len() == 1
        && tail_precedes(pre, tail, tlen)
        && char_slice(post, 0, hlen) == hval;
    if inverse_wrapped {
        let pre_len = char_len(pre);
        return Some(EditOutcome {
            value: format!(
                "{}{}{}",
                char_slice(pre, 0, pre_len.saturating_sub(hlen)),
                sel.value,
                char_slice(post, tlen, char_len(post)),
            ),
            select_from: sel.start.saturating_sub(hlen),
            select_len: char_len(&sel.value),
        });
    }

    let contents = map_lines(&lines, head, hval, hlen, tail, tlen, opts);
    let (select_from, select_len) = if lines.len() == 1 && tlen > 0 {
        (sel.start + hlen, char_len(&sel.value))
    } else {
        (sel.start, char_len(&contents))
    };
    Some(EditOutcome {
        value: format!("{pre}{contents}{post}"),
        select_from,
        select_len,
    })
}

fn tail_precedes(pre: &str, tail: &str, tlen: usize) -> bool {
    if tlen == 0 {
        pre.is_empty()
    } else {
        pre.ends_with(tail)
    }
}

/// Applies one toggle direction across a block of lines, re-deriving the head
/// per line so ordered markers renumber. The only place that happens.
pub(crate) fn map_lines(
    lines: &[&str],
    head: &HeadSpec,
    initial_head: String,
    initial_head_len: usize,
    tail: &str,
    tlen: usize,
    opts: &SurroundOptions,
) -> String {
    let mut operation = ToggleOperation::None;
    let mut hval = initial_head;
    let mut hlen = initial_head_len;
    let mut mapped: Vec<String> = Vec::with_capacity(lines.len());

    for line in lines {
        if !opts.apply_empty_lines && line.is_empty() {
            mapped.push(String::new());
            continue;
        }

        let strips_prefix = tlen == 0 && char_slice(line, 0, hlen) == hval;
        let strips_wrap = tlen > 0 && line.ends_with(tail);

        if operation != ToggleOperation::Added && (strips_prefix || strips_wrap) {
            operation = ToggleOperation::Removed;
            let line_len = char_len(line);
            let stripped = if tlen == 0 {
                char_slice(line, hlen, line_len).to_string()
            } else {
                char_slice(line, hlen, line_len.saturating_sub(tlen)).to_string()
            };
            let (next, next_len) = head.resolve(Some(&hval));
            hval = next;
            hlen = next_len;
            mapped.push(stripped);
            continue;
        } else if operation == ToggleOperation::None {
            operation = ToggleOperation::Added;
        } else if operation == ToggleOperation::Removed {
            mapped.push((*line).to_string());
            continue;
        }

        let wrapped = format!("{hval}{line}{tail}");
        let (next, next_len) = head.resolve(Some(&hval));
        hval = next;
        hlen = next_len;
        mapped.push(wrapped);
    }

    mapped.join("\n")
}

impl ComposerEditor {
    /// Toggles `head`/`tail` markup around the snapshot's selection, with the
    /// placeholder for empty selections resolved from the locale table.
    pub fn apply_surround(
        &mut self,
        sel: &SelectionSnapshot,
        head: &HeadSpec,
        tail: &str,
        example_key: &str,
        opts: SurroundOptions,
    ) {
        let placeholder = locale::t(example_key);
        let Some(outcome) = surround(sel, head, tail, placeholder, &opts) else {
            return;
        };
        self.commit(outcome);
    }

    /// The code action: inline code span mid-line, fenced block or four-space
    /// indent for blank-line insertions and multi-line selections.
    pub fn format_code(&mut self) {
        let Some(sel) = self.get_selected(false, true) else {
            return;
        };
        let four_spaces_indent =
            self.settings().code_formatting_style == CodeFormattingStyle::FourSpacesIndent;
        let has_newline = sel.value.contains('\n');
        let blank_line = sel
            .line_val
            .as_deref()
            .map(|line| line.trim().is_empty())
            .unwrap_or(true);

        if !has_newline {
            if sel.value.is_empty() && blank_line {
                if four_spaces_indent {
                    let example = locale::t("code_text");
                    let from = char_len(&sel.pre) + 4;
                    self.set_value(format!("{}    {example}{}", sel.pre, sel.post));
                    self.select_text(from, char_len(example), SelectOptions::default());
                } else {
                    self.apply_surround(
                        &sel,
                        &HeadSpec::Constant("```\n"),
                        "\n```",
                        "paste_code_text",
                        SurroundOptions::default(),
                    );
                }
            } else {
                self.apply_surround(
                    &sel,
                    &HeadSpec::Constant("`"),
                    "`",
                    "code_title",
                    SurroundOptions::default(),
                );
            }
        } else if four_spaces_indent {
            self.apply_surround(
                &sel,
                &HeadSpec::Constant("    "),
                "",
                "code_text",
                SurroundOptions::default(),
            );
        } else {
            let pre_newline = if sel.pre.is_empty() || sel.pre.ends_with('\n') {
                ""
            } else {
                "\n"
            };
            let post_newline = if sel.post.starts_with('\n') { "" } else { "\n" };
            let text = format!("{pre_newline}```\n{}\n```{post_newline}", sel.value);
            self.add_text(&sel, &text);
        }
    }
}
