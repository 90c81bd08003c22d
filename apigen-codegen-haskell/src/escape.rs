//! Haskell lexical escaping.

/// Render a Haskell string literal, also valid as a type-level `Symbol`.
///
/// Printable ASCII is kept; quotes, backslashes and the common control
/// characters use their escapes and everything else becomes a decimal
/// escape. A decimal escape followed by a digit is closed with `\&`.
pub fn string_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');

    let mut after_numeric = false;
    for c in text.chars() {
        if after_numeric && c.is_ascii_digit() {
            out.push_str("\\&");
        }
        after_numeric = false;

        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            ' '..='~' => out.push(c),
            other => {
                out.push('\\');
                out.push_str(&u32::from(other).to_string());
                after_numeric = true;
            }
        }
    }

    out.push('"');
    out
}

/// Collapse text onto one line that is safe inside a `--` comment.
pub fn comment_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace("{-", "{ -")
        .replace("-}", "- }")
}
