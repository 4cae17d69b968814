use regex::Regex;

use crate::error::{HdrError, Result};
use crate::header::{canonical_key, HeaderValue};

/// How a predicate decides whether a header matches.
#[derive(Debug, Clone)]
pub enum MatchMode {
    /// Exact equality against a coerced literal.
    Literal(HeaderValue),
    /// Pattern match anchored at the start of the textual value.
    Regex(Regex),
    /// The keyword must exist; its value is irrelevant.
    PresencePositive,
    /// The keyword must be absent.
    PresenceNegative,
}

/// A parsed `KEYWORD=value` predicate.
#[derive(Debug, Clone)]
pub struct ValueSpec {
    pub keyword: String,
    pub mode: MatchMode,
}

impl ValueSpec {
    pub fn literal(keyword: &str, value: impl Into<HeaderValue>) -> Self {
        Self {
            keyword: canonical_key(keyword),
            mode: MatchMode::Literal(value.into()),
        }
    }

    pub fn present(keyword: &str) -> Self {
        Self {
            keyword: canonical_key(keyword),
            mode: MatchMode::PresencePositive,
        }
    }

    pub fn absent(keyword: &str) -> Self {
        Self {
            keyword: canonical_key(keyword),
            mode: MatchMode::PresenceNegative,
        }
    }
}

/// Coerce raw predicate text to the most specific literal type, trying
/// bool, then integer, then float, then falling back to the exact
/// string. The whole token must parse as the candidate type.
pub fn coerce_literal(raw: &str) -> HeaderValue {
    if raw.eq_ignore_ascii_case("true") {
        return HeaderValue::Bool(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return HeaderValue::Bool(false);
    }
    if let Ok(int) = raw.parse::<i64>() {
        return HeaderValue::Int(int);
    }
    if let Ok(float) = raw.parse::<f64>() {
        return HeaderValue::Float(float);
    }
    HeaderValue::Str(raw.to_string())
}

/// Parse one raw predicate token.
///
/// Grammar: `KEYWORD=value` compares the value (as a regex when
/// `use_regex` is set, as a coerced literal otherwise); a bare
/// `KEYWORD` requires the keyword to exist; `KEYWORD!` requires it to
/// be absent.
pub fn parse_spec(token: &str, use_regex: bool) -> Result<ValueSpec> {
    match token.split_once('=') {
        Some((keyword, _)) if keyword.trim().is_empty() => {
            Err(HdrError::MalformedToken(token.to_string()))
        }
        Some((keyword, raw)) if use_regex => {
            let pattern = Regex::new(raw).map_err(|source| HdrError::InvalidPattern {
                pattern: raw.to_string(),
                source,
            })?;
            Ok(ValueSpec {
                keyword: canonical_key(keyword),
                mode: MatchMode::Regex(pattern),
            })
        }
        Some((keyword, raw)) => Ok(ValueSpec {
            keyword: canonical_key(keyword),
            mode: MatchMode::Literal(coerce_literal(raw)),
        }),
        None => {
            let (keyword, negated) = match token.strip_suffix('!') {
                Some(rest) => (rest, true),
                None => (token, false),
            };
            if keyword.trim().is_empty() {
                return Err(HdrError::MalformedToken(token.to_string()));
            }
            if negated {
                Ok(ValueSpec::absent(keyword))
            } else {
                Ok(ValueSpec::present(keyword))
            }
        }
    }
}

/// Parse a whole predicate list, failing on the first bad token so no
/// partial spec list is ever evaluated.
pub fn parse_specs<S: AsRef<str>>(tokens: &[S], use_regex: bool) -> Result<Vec<ValueSpec>> {
    tokens
        .iter()
        .map(|token| parse_spec(token.as_ref(), use_regex))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coercion_order_is_bool_int_float_string() {
        assert_eq!(coerce_literal("30"), HeaderValue::Int(30));
        assert_eq!(coerce_literal("30.5"), HeaderValue::Float(30.5));
        assert_eq!(coerce_literal("true"), HeaderValue::Bool(true));
        assert_eq!(coerce_literal("FALSE"), HeaderValue::Bool(false));
        assert_eq!(coerce_literal("galaxy"), HeaderValue::Str("galaxy".into()));
    }

    #[test]
    fn partial_numeric_text_stays_a_string() {
        assert_eq!(coerce_literal("30s"), HeaderValue::Str("30s".into()));
        assert_eq!(coerce_literal("1e"), HeaderValue::Str("1e".into()));
    }

    #[test]
    fn literal_token_parses() {
        let spec = parse_spec("object=galaxy", false).unwrap();
        assert_eq!(spec.keyword, "OBJECT");
        assert!(matches!(
            spec.mode,
            MatchMode::Literal(HeaderValue::Str(ref s)) if s == "galaxy"
        ));
    }

    #[test]
    fn presence_tokens_parse() {
        let spec = parse_spec("FLAT", false).unwrap();
        assert!(matches!(spec.mode, MatchMode::PresencePositive));
        let spec = parse_spec("FLAT!", false).unwrap();
        assert!(matches!(spec.mode, MatchMode::PresenceNegative));
    }

    #[test]
    fn bad_regex_fails_fast() {
        let err = parse_spec("OBJECT=gal(", true).unwrap_err();
        assert!(matches!(err, HdrError::InvalidPattern { .. }));
        let tokens = ["OBJECT=galaxy", "FILTER=[", "EXPTIME=30"];
        assert!(parse_specs(&tokens, true).is_err());
    }

    #[test]
    fn empty_keyword_is_malformed() {
        assert!(matches!(
            parse_spec("=galaxy", false),
            Err(HdrError::MalformedToken(_))
        ));
        assert!(matches!(
            parse_spec("!", false),
            Err(HdrError::MalformedToken(_))
        ));
        assert!(matches!(
            parse_spec("", false),
            Err(HdrError::MalformedToken(_))
        ));
    }

    #[test]
    fn value_keeps_embedded_equals() {
        let spec = parse_spec("COMMENT=a=b", false).unwrap();
        assert!(matches!(
            spec.mode,
            MatchMode::Literal(HeaderValue::Str(ref s)) if s == "a=b"
        ));
    }
}
