//! Punctuation canonicalization applied to quote text before tokenization.

/// Replace typographic punctuation variants with their plain ASCII forms.
///
/// Idempotent: the output contains none of the replaced characters.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\u{2026}' => out.push_str("..."), // ellipsis
            '\u{2018}' | '\u{2019}' => out.push('\''), // curly single quotes
            '\u{201C}' | '\u{201D}' => out.push('"'), // curly double quotes
            '\u{2013}' => out.push('-'),       // en-dash
            '\u{2014}' => out.push_str("--"),  // em-dash
            _ => out.push(ch),
        }
    }
    out
}
