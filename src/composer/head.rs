use super::char_len;

/// Markup inserted ahead of content: either a fixed fragment or a generator
/// that derives the next fragment from the previous one, which is how ordered
/// list markers increment down a block.
#[derive(Clone, Copy)]
pub enum HeadSpec {
    Constant(&'static str),
    Generator(fn(Option<&str>) -> String),
}

impl HeadSpec {
    /// Resolves to `(value, char_len)`. Constant heads ignore `previous`;
    /// generator heads are pure functions of it and total over any input.
    pub fn resolve(&self, previous: Option<&str>) -> (String, usize) {
        match self {
            HeadSpec::Constant(head) => ((*head).to_string(), char_len(head)),
            HeadSpec::Generator(next) => {
                let value = next(previous);
                let len = char_len(&value);
                (value, len)
            }
        }
    }
}

/// `1. `, `2. `, ... — parses the leading integer of the previous marker and
/// emits its successor.
pub fn ordered_item_head(previous: Option<&str>) -> String {
    match previous {
        Some(previous) => format!("{}. ", leading_number(previous) + 1),
        None => "1. ".to_string(),
    }
}

fn leading_number(text: &str) -> u64 {
    let digits: String = text.chars().take_while(|ch| ch.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}
