//! HCL literal helpers

/// Escapes a value for a double-quoted HCL string: `\` and `"` only.
pub fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// `value` as a double-quoted, escaped HCL string literal.
pub fn quote(value: &str) -> String {
    format!("\"{}\"", escape(value))
}

/// Removes one layer of surrounding double quotes, if present.
///
/// TXT values are often listed already quoted (`"v=spf1 -all"`).
pub fn strip_outer_quotes(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// Turns a zone name into a Terraform identifier.
///
/// `.` and `-` become `_`, a leading character that is neither a letter nor
/// `_` gets a `_` prefix, and anything else outside `[[:alnum:]_]` becomes `_`.
pub fn sanitize_identifier(name: &str) -> String {
    let replaced = name.replace(['.', '-'], "_");
    let needs_prefix = replaced
        .chars()
        .next()
        .is_none_or(|c| !(c.is_alphabetic() || c == '_'));
    let prefixed = if needs_prefix {
        format!("_{replaced}")
    } else {
        replaced
    };
    prefixed
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Whether `name` is already a valid identifier (letter or `_`, then
/// letters, digits, `_` or `-`).
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Inverse of [`escape`], only used to check round trips.
    fn unescape(literal: &str) -> String {
        let mut out = String::new();
        let mut chars = literal.chars();
        while let Some(c) = chars.next() {
            if c == '\\' {
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn escape_handles_quotes_and_backslashes() {
        assert_eq!(escape(r#"say "hi" \o/"#), r#"say \"hi\" \\o/"#);
        assert_eq!(quote("plain"), "\"plain\"");
    }

    #[test]
    fn escaped_text_round_trips() {
        let original = r#"k=v; note="quoted" path=C:\dir\"#;
        assert_eq!(unescape(&escape(original)), original);
    }

    #[test]
    fn outer_quotes_stripped_once() {
        assert_eq!(strip_outer_quotes("\"v=spf1 -all\""), "v=spf1 -all");
        assert_eq!(strip_outer_quotes("\"\"inner\"\""), "\"inner\"");
        assert_eq!(strip_outer_quotes("unquoted"), "unquoted");
        assert_eq!(strip_outer_quotes("\""), "\"");
    }

    #[test]
    fn sanitize_replaces_separators() {
        assert_eq!(sanitize_identifier("example.com"), "example_com");
        assert_eq!(sanitize_identifier("my-site.co.uk"), "my_site_co_uk");
    }

    #[test]
    fn sanitize_prefixes_invalid_start() {
        assert_eq!(sanitize_identifier("1password.com"), "_1password_com");
        assert_eq!(sanitize_identifier(""), "_");
        assert_eq!(sanitize_identifier("_dmarc.example.com"), "_dmarc_example_com");
    }

    #[test]
    fn sanitize_replaces_other_characters() {
        assert_eq!(sanitize_identifier("a*b.example.com"), "a_b_example_com");
    }

    #[test]
    fn identifier_check() {
        assert!(is_identifier("zones"));
        assert!(is_identifier("_zones-1"));
        assert!(!is_identifier("1zones"));
        assert!(!is_identifier(""));
    }
}
