//! Classification of operator-typed search tokens.

use std::sync::LazyLock;

use regex::Regex;

static EXTRA_CREDIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<prefix>.*?)(?P<exercise>\d+)\.(?P<extra>\d+)$").unwrap()
});

static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+$").unwrap());

/// Syntactic form of a search token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenForm {
    /// `N.M` (optionally prefixed, e.g. `final/3.1`): exercise `N`, extra credit `M`.
    ExtraCredit {
        /// Normalized path prefix, empty when the token is bare.
        prefix: String,
        /// Exercise number zero-padded to two digits.
        exercise: String,
        /// Extra-credit number zero-padded to two digits.
        extra: String,
    },
    /// Bare digits, zero-padded to two digits.
    Number(String),
    /// Anything else, with `./` and trailing `/` stripped.
    Plain(String),
}

impl TokenForm {
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        if let Some(caps) = EXTRA_CREDIT_RE.captures(token) {
            return Self::ExtraCredit {
                prefix: strip_dot_prefix(&caps["prefix"]).to_string(),
                exercise: pad2(&caps["exercise"]),
                extra: pad2(&caps["extra"]),
            };
        }
        if NUMBER_RE.is_match(token) {
            return Self::Number(pad2(token));
        }
        Self::Plain(normalize_path_token(token))
    }
}

/// Left-pad a digit string with zeros to at least two characters.
pub fn pad2(digits: &str) -> String {
    format!("{digits:0>2}")
}

/// Leading ASCII digits of a directory basename (`03-params` -> `03`).
pub fn leading_digits(name: &str) -> Option<&str> {
    let end = name
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(name.len());
    if end == 0 { None } else { Some(&name[..end]) }
}

/// Whether `name` starts with the (already padded) number `padded`.
pub fn has_number(name: &str, padded: &str) -> bool {
    leading_digits(name).is_some_and(|digits| pad2(digits) == padded)
}

/// Strip leading `./` segments and trailing slashes so tokens compare against `root/name` keys.
pub fn normalize_path_token(token: &str) -> String {
    strip_dot_prefix(token).trim_end_matches('/').to_string()
}

fn strip_dot_prefix(token: &str) -> &str {
    let mut rest = token.trim();
    while let Some(stripped) = rest.strip_prefix("./") {
        rest = stripped.trim_start_matches('/');
    }
    rest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_extra_credit_token() {
        assert_eq!(
            TokenForm::parse("3.1"),
            TokenForm::ExtraCredit {
                prefix: String::new(),
                exercise: "03".to_string(),
                extra: "01".to_string(),
            }
        );
    }

    #[test]
    fn parses_prefixed_extra_credit_token() {
        assert_eq!(
            TokenForm::parse("./final/03.2"),
            TokenForm::ExtraCredit {
                prefix: "final/".to_string(),
                exercise: "03".to_string(),
                extra: "02".to_string(),
            }
        );
    }

    #[test]
    fn parses_numbers_and_plain_tokens() {
        assert_eq!(TokenForm::parse("7"), TokenForm::Number("07".to_string()));
        assert_eq!(TokenForm::parse("12"), TokenForm::Number("12".to_string()));
        assert_eq!(
            TokenForm::parse("./exercise/03/"),
            TokenForm::Plain("exercise/03".to_string())
        );
        assert_eq!(
            TokenForm::parse("03-dynamic-params"),
            TokenForm::Plain("03-dynamic-params".to_string())
        );
    }

    #[test]
    fn leading_digits_stops_at_first_non_digit() {
        assert_eq!(leading_digits("03-params"), Some("03"));
        assert_eq!(leading_digits("120"), Some("120"));
        assert_eq!(leading_digits("params"), None);
    }

    #[test]
    fn has_number_compares_padded_prefixes() {
        assert!(has_number("3-solo", "03"));
        assert!(has_number("03-params", "03"));
        assert!(!has_number("13-params", "03"));
        assert!(!has_number("params", "03"));
    }
}
