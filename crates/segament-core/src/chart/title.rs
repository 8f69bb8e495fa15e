/// Offset between full-width ASCII variants (U+FF01..U+FF5E) and ASCII.
const FULL_WIDTH_OFFSET: u32 = 0xFEE0;

/// Normalize a song title (or artist) into a join key.
///
/// Lowercases, folds full-width ASCII variants to half-width, and drops every
/// character that is neither an ASCII word character nor kana/kanji.
pub fn normalize_title(title: Option<&str>) -> String {
    let Some(title) = title else {
        return String::new();
    };

    title
        .to_lowercase()
        .chars()
        .map(fold_full_width)
        .filter(|&c| is_key_char(c))
        .collect::<String>()
        .trim()
        .to_string()
}

fn fold_full_width(c: char) -> char {
    if ('\u{FF01}'..='\u{FF5E}').contains(&c) {
        char::from_u32(c as u32 - FULL_WIDTH_OFFSET).unwrap_or(c)
    } else {
        c
    }
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c == '_'
        || ('\u{3040}'..='\u{309F}').contains(&c) // Hiragana
        || ('\u{30A0}'..='\u{30FF}').contains(&c) // Katakana
        || ('\u{4E00}'..='\u{9FAF}').contains(&c) // CJK
}
