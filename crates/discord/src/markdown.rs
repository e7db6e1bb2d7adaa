/// Characters Discord treats as markdown syntax.
const MARKDOWN_CHARS: &[char] = &['\\', '*', '_', '~', '`', '|', '>'];

/// Escape Discord markdown so the text renders literally.
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if MARKDOWN_CHARS.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("."), ".");
        assert_eq!(escape_markdown("*bold*"), "\\*bold\\*");
        assert_eq!(escape_markdown("a_b|c~d`e>f\\g"), "a\\_b\\|c\\~d\\`e\\>f\\\\g");
    }
}
