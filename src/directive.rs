//! Classification of log format directives into capture classes.
//!
//! A directive is one whitespace-delimited token of a format string, such as
//! `%h` or `%{Referer}i`. Quoted directives are written with backslash-escaped
//! quote markers (`\"%r\"`); the markers select the quoted capture classes but
//! are not part of the directive name itself.

/// The capture class assigned to a directive, determining the sub-pattern
/// used to match its value in a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveClass {
    /// A quoted string that may contain backslash-escaped characters,
    /// including escaped quotes. Used for `%r` and referer/user-agent
    /// directives, whose values routinely embed `\"`.
    EscapedQuoted,
    /// A quoted string with no embedded-quote support.
    PlainQuoted,
    /// A bracketed value such as the `%t` timestamp.
    Bracketed,
    /// The `%U` path, matched non-greedily across content other classes
    /// would stop at.
    GreedyPath,
    /// Any other directive: a maximal run of non-whitespace.
    Default,
}

impl DirectiveClass {
    /// The regex sub-pattern for this class. Each sub-pattern contains
    /// exactly one capture group.
    pub fn pattern(self) -> &'static str {
        match self {
            Self::EscapedQuoted => r#""([^"\\]*(?:\\.[^"\\]*)*)""#,
            Self::PlainQuoted => r#""([^"]*)""#,
            Self::Bracketed => r"(\[[^\]]+\])",
            Self::GreedyPath => r"(.+?)",
            Self::Default => r"(\S*)",
        }
    }
}

/// Strip leading/trailing `\"` quote markers from a format token.
///
/// Returns the unwrapped directive name and whether the token was
/// quote-wrapped. Only backslash-escaped quotes count as markers; a bare
/// `"` is left untouched.
pub fn strip_quote_markers(token: &str) -> (&str, bool) {
    if let Some(inner) = token.strip_prefix("\\\"") {
        let inner = inner.strip_suffix("\\\"").unwrap_or(inner);
        (inner, true)
    } else {
        (token, false)
    }
}

/// Classify an unwrapped directive name.
///
/// Quote detection must be resolved before this is called: a quoted token's
/// inner name may itself look like a timestamp directive (`\"%t\"` is a
/// quoted field, not a bracketed one), so `quoted` takes precedence over
/// every other check.
pub fn classify(name: &str, quoted: bool) -> DirectiveClass {
    if quoted {
        if name == "%r" || name.contains("Referer") || name.contains("User-Agent") {
            DirectiveClass::EscapedQuoted
        } else {
            DirectiveClass::PlainQuoted
        }
    } else if name.starts_with('%') && name.ends_with('t') {
        // Generic timestamp-bracket shape: covers %t and %{...}t variants.
        DirectiveClass::Bracketed
    } else if name == "%U" {
        DirectiveClass::GreedyPath
    } else {
        DirectiveClass::Default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_quote_markers() {
        assert_eq!(strip_quote_markers(r#"\"%r\""#), ("%r", true));
        assert_eq!(strip_quote_markers(r#"\"%{Referer}i\""#), ("%{Referer}i", true));
        assert_eq!(strip_quote_markers("%h"), ("%h", false));
        // A bare quote is not a marker.
        assert_eq!(strip_quote_markers(r#""%r""#), (r#""%r""#, false));
    }

    #[test]
    fn test_request_line_is_escaped_quoted() {
        assert_eq!(classify("%r", true), DirectiveClass::EscapedQuoted);
    }

    #[test]
    fn test_referer_and_user_agent_are_escaped_quoted() {
        assert_eq!(classify("%{Referer}i", true), DirectiveClass::EscapedQuoted);
        assert_eq!(classify("%{User-Agent}i", true), DirectiveClass::EscapedQuoted);
    }

    #[test]
    fn test_other_quoted_directives_are_plain_quoted() {
        assert_eq!(classify("%{Cookie}i", true), DirectiveClass::PlainQuoted);
        // Case-sensitive: the lowercase spelling gets no escape support.
        assert_eq!(classify("%{User-agent}i", true), DirectiveClass::PlainQuoted);
    }

    #[test]
    fn test_quoting_takes_precedence_over_timestamp_shape() {
        assert_eq!(classify("%t", true), DirectiveClass::PlainQuoted);
    }

    #[test]
    fn test_timestamp_directives_are_bracketed() {
        assert_eq!(classify("%t", false), DirectiveClass::Bracketed);
        assert_eq!(classify("%{%Y-%m-%d}t", false), DirectiveClass::Bracketed);
    }

    #[test]
    fn test_greedy_path() {
        assert_eq!(classify("%U", false), DirectiveClass::GreedyPath);
    }

    #[test]
    fn test_default_class() {
        assert_eq!(classify("%h", false), DirectiveClass::Default);
        assert_eq!(classify("%>s", false), DirectiveClass::Default);
        assert_eq!(classify("-", false), DirectiveClass::Default);
    }
}
