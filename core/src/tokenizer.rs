use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // The character set stripped from page text before words were persisted.
    // Digits go too: the crawler's `+-=` is a range that spans `,-./0-9:;<`.
    static ref STRIPPED: Regex = Regex::new(r#"[!?,.`~@#$%^’&*()«»“”_|+\-=;:\]\['"<>/0-9]"#).expect("valid regex");
}

/// Caller-side normalization so query terms line up with persisted keys:
/// lowercase, strip punctuation and digits, split on whitespace. The engine
/// itself matches terms exactly.
pub fn normalize_query(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    STRIPPED
        .replace_all(&lowered, "")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
