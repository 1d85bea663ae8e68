//! Escaping for values embedded in URLs and shell words

/// Replacement for a single quote inside a single-quoted shell word
pub const SHELL_QUOTE_ESCAPE: &str = r#"'"'"'"#;

/// Percent-encode a URL component
///
/// Everything outside `A-Z a-z 0-9 - _ . ~` is encoded as UTF-8 `%XX`, so
/// spaces become `%20` (never `+`).
pub fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Escape single quotes so `value` can sit inside `'...'`
pub fn escape_single_quotes(value: &str) -> String {
    value.replace('\'', SHELL_QUOTE_ESCAPE)
}

/// Wrap `value` in single quotes for a POSIX shell
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", escape_single_quotes(value))
}
