//! Text shaping for card fields. All lengths count characters, not bytes.

pub const TITLE_LIMIT: usize = 25;
pub const DESCRIPTION_LIMIT: usize = 100;
pub const ELLIPSIS: &str = "...";

pub fn truncate_title(title: &str) -> String {
    truncate_chars(title, TITLE_LIMIT)
}

/// First letter upper-cased, cut to the first 100 characters.
pub fn excerpt_description(description: &str) -> String {
    capitalize_first(&truncate_chars(description, DESCRIPTION_LIMIT))
}

pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}
