/// Detects tab-delimited clipboard text and rewrites it as a markdown table.
/// Returns `None` when the block does not look tabular; ambiguous column
/// counts are never an error, just "not a table".
pub fn extract_table(text: &str) -> Option<String> {
    let text = text.strip_suffix('\n').unwrap_or(text);

    // Quote characters toggle cell state and are dropped; newlines inside a
    // quoted cell become literal line-break markers.
    let mut scanned = String::with_capacity(text.len());
    let mut quoted_cell = false;
    for ch in text.chars() {
        match ch {
            '"' => quoted_cell = !quoted_cell,
            '\n' if quoted_cell => scanned.push_str("\\n"),
            _ => scanned.push(ch),
        }
    }
    let scanned = scanned.replace("\\n", "<br>");

    let rows: Vec<&str> = scanned.split('\n').collect();
    if rows.len() < 2 {
        return None;
    }

    let columns: Vec<usize> = rows.iter().map(|row| row.split('\t').count()).collect();
    if !columns.iter().all(|&count| count == columns[0] && count > 1) {
        return None;
    }

    // A two-column block led by a bullet or ordinal is a pasted list, not a
    // table.
    let first_cell = rows[0].split('\t').next().unwrap_or("");
    if columns[0] == 2 && looks_like_list_marker(first_cell) {
        return None;
    }

    let splitter = vec!["---"; columns[0]].join("\t");
    let mut table_rows: Vec<String> = rows.iter().map(|row| (*row).to_string()).collect();
    table_rows.insert(1, splitter);

    let body = table_rows
        .iter()
        .map(|row| row.split('\t').collect::<Vec<_>>().join("|"))
        .collect::<Vec<_>>()
        .join("|\n|");
    Some(format!("|{body}|\n"))
}

/// `•`, or one-or-more digits followed by exactly one more character
/// (`1.`, `12)`, ...).
fn looks_like_list_marker(cell: &str) -> bool {
    if cell == "•" {
        return true;
    }
    let chars: Vec<char> = cell.chars().collect();
    chars.len() >= 2 && chars[..chars.len() - 1].iter().all(|ch| ch.is_ascii_digit())
}
