/// Composer interface strings. A real deployment would back this with a
/// localization catalog; lookups are total and always yield a usable string
/// (unknown keys echo the key).
pub fn t(key: &str) -> &str {
    match key {
        "bold_text" => "strong text",
        "italic_text" => "emphasized text",
        "code_text" => "enter code here",
        "paste_code_text" => "paste code here",
        "code_title" => "code",
        "list_item" => "List item",
        "blockquote_text" => "Blockquote",
        "bold_title" => "Strong",
        "italic_title" => "Emphasis",
        "code_format_title" => "Preformatted text",
        "blockquote_title" => "Blockquote",
        "ulist_title" => "Bulleted list",
        "olist_title" => "Numbered list",
        _ => key,
    }
}
