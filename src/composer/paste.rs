use super::ComposerEditor;
use super::char_len;
use super::table::extract_table;

/// Clipboard contents as surfaced by the host's clipboard collaborator.
#[derive(Clone, Debug, Default)]
pub struct PastePayload {
    pub plain_text: Option<String>,
    pub html: Option<String>,
    pub can_paste_html: bool,
    pub can_upload: bool,
}

/// What the host should do with the paste event after the pipeline ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PasteResponse {
    /// The pipeline consumed the event and mutated the buffer.
    Handled,
    /// A binary payload should be routed to the host's upload path.
    DelegateUpload,
    /// Fall back to the host's default plain-text insertion.
    Default,
}

/// Opaque HTML-to-markdown collaborator.
pub trait MarkdownConverter {
    fn to_markdown(&self, html: &str) -> String;
}

/// Fallback converter for hosts without a real HTML pipeline.
pub struct IdentityConverter;

impl MarkdownConverter for IdentityConverter {
    fn to_markdown(&self, html: &str) -> String {
        html.to_string()
    }
}

impl ComposerEditor {
    /// Classifies one paste event and routes it to table extraction, markdown
    /// conversion, or back to the host. Never raises; degraded conversions are
    /// accepted or rejected purely by the length heuristic.
    pub fn paste(&mut self, payload: &PastePayload, converter: &dyn MarkdownConverter) -> PasteResponse {
        let Some(sel) = self.get_selected(false, true) else {
            return PasteResponse::Default;
        };

        let mut plain_text = payload.plain_text.clone().filter(|text| !text.is_empty());
        let html = payload.html.clone().filter(|text| !text.is_empty());
        let mut can_paste_html = payload.can_paste_html && html.is_some();
        let mut handled = false;

        let inline_pasting = is_inline_pasting(&sel.pre);
        let code_block = inside_code_fence(&sel.pre);

        if let Some(text) = plain_text.as_ref() {
            if self.settings().enable_rich_text_paste && !inline_pasting && !code_block {
                let text = text.replace('\r', "");
                if let Some(table) = extract_table(&text) {
                    self.add_text(&sel, &table);
                    handled = true;
                }
                plain_text = Some(text);
            }
        }

        if can_paste_html && plain_text.is_some() {
            can_paste_html = if inline_pasting {
                let line_val = sel.line_val.as_deref().unwrap_or("");
                !(line_val.starts_with("```")
                    || inside_inline_code(&sel.pre)
                    || line_val.starts_with("    "))
            } else {
                !code_block
            };
        }

        if can_paste_html && !handled {
            if let Some(html) = html.as_ref() {
                let mut markdown = converter.to_markdown(html);
                let accepted = match plain_text.as_ref() {
                    None => true,
                    Some(plain) => char_len(&markdown) <= char_len(plain),
                };
                if accepted {
                    if inline_pasting {
                        markdown = markdown.trim_start_matches('#').trim().to_string();
                        if sel.pre.chars().last().is_some_and(|ch| !ch.is_whitespace()) {
                            markdown = format!(" {markdown}");
                        }
                    }
                    if !self.settings().allow_unformatted_paste {
                        self.add_text(&sel, &markdown);
                        handled = true;
                    }
                }
            }
        }

        if handled {
            PasteResponse::Handled
        } else if payload.can_upload && plain_text.is_none() {
            PasteResponse::DelegateUpload
        } else {
            PasteResponse::Default
        }
    }
}

/// A paste lands mid-line when the character before the cursor is not a
/// newline.
pub(crate) fn is_inline_pasting(pre: &str) -> bool {
    pre.chars().last().is_some_and(|ch| ch != '\n')
}

/// Open/close parity of ``` fences at line starts; an odd count means the
/// cursor sits inside a fenced block. Not a full markdown parse.
pub(crate) fn inside_code_fence(pre: &str) -> bool {
    let bytes = pre.as_bytes();
    let mut count = 0usize;
    let mut i = 0usize;
    while i < bytes.len() {
        if bytes[i..].starts_with(b"```") && (i == 0 || bytes[i - 1] == b'\n') {
            count += 1;
            i += 3;
        } else {
            i += 1;
        }
    }
    count % 2 == 1
}

/// Backtick parity: an odd count means the cursor sits inside an inline code
/// span.
pub(crate) fn inside_inline_code(pre: &str) -> bool {
    pre.chars().filter(|&ch| ch == '`').count() % 2 == 1
}
