/// Turn a display name into the URL slug used by the catalog websites.
///
/// Lowercases the name, keeps ASCII letters, digits, `-` and `_`, turns `.`
/// and spaces into `-`, and drops everything else.
pub fn web_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter_map(|c| match c {
            'a'..='z' | '0'..='9' | '-' | '_' => Some(c),
            '.' | ' ' => Some('-'),
            _ => None,
        })
        .collect()
}
