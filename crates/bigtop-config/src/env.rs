//! Parsing of watcher `env` entries into explicit mappings.
//!
//! Watcher configuration files may spell a watcher's environment either as a
//! mapping or as the compact `KEY=VALUE, KEY=VALUE` string form. Both are
//! normalised into a `BTreeMap` of trimmed strings before the entry is sent
//! over the wire, and `$NAME` references inside values are expanded.

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

/// Errors raised while parsing a watcher environment entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvParseError {
    /// A `KEY=VALUE` pair lacked the `=` separator.
    #[error("environment entry '{pair}' is missing '='")]
    MissingSeparator {
        /// The offending pair, trimmed.
        pair: String,
    },
    /// A pair or mapping key was empty after trimming.
    #[error("environment entry '{pair}' has an empty key")]
    EmptyKey {
        /// The offending pair, trimmed.
        pair: String,
    },
    /// A mapping value was not a scalar.
    #[error("environment value for '{key}' must be a string, number or boolean")]
    UnsupportedValue {
        /// Key whose value was rejected.
        key: String,
    },
    /// The entry was neither a mapping nor a string.
    #[error("env must be a mapping or a KEY=VALUE string, got {kind}")]
    UnsupportedType {
        /// JSON kind of the rejected entry.
        kind: &'static str,
    },
}

/// Parses an `env` entry, expanding `$NAME` references from the process
/// environment.
///
/// # Errors
///
/// Returns [`EnvParseError`] when the entry is not a mapping or a
/// well-formed `KEY=VALUE` list.
pub fn parse_env(value: &Value) -> Result<BTreeMap<String, String>, EnvParseError> {
    parse_env_with(value, |name| std::env::var(name).ok())
}

/// Parses an `env` entry, resolving `$NAME` references with `lookup`.
///
/// References that `lookup` cannot resolve are kept verbatim.
///
/// # Errors
///
/// Returns [`EnvParseError`] when the entry is not a mapping or a
/// well-formed `KEY=VALUE` list.
pub fn parse_env_with<F>(value: &Value, lookup: F) -> Result<BTreeMap<String, String>, EnvParseError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = match value {
        Value::Object(entries) => mapping_pairs(entries)?,
        Value::String(text) => string_pairs(text)?,
        other => {
            return Err(EnvParseError::UnsupportedType {
                kind: json_kind(other),
            });
        }
    };

    Ok(raw
        .into_iter()
        .map(|(key, text)| (key, expand_references(&text, &lookup)))
        .collect())
}

fn mapping_pairs(
    entries: &serde_json::Map<String, Value>,
) -> Result<Vec<(String, String)>, EnvParseError> {
    entries
        .iter()
        .map(|(key, value)| {
            let trimmed = key.trim();
            if trimmed.is_empty() {
                return Err(EnvParseError::EmptyKey { pair: key.clone() });
            }
            let text = match value {
                Value::String(text) => text.trim().to_owned(),
                Value::Number(number) => number.to_string(),
                Value::Bool(flag) => flag.to_string(),
                _ => {
                    return Err(EnvParseError::UnsupportedValue {
                        key: trimmed.to_owned(),
                    });
                }
            };
            Ok((trimmed.to_owned(), text))
        })
        .collect()
}

fn string_pairs(text: &str) -> Result<Vec<(String, String)>, EnvParseError> {
    text.split(',')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (raw_key, value) = pair
                .split_once('=')
                .ok_or_else(|| EnvParseError::MissingSeparator {
                    pair: pair.to_owned(),
                })?;
            let key = raw_key.trim();
            if key.is_empty() {
                return Err(EnvParseError::EmptyKey {
                    pair: pair.to_owned(),
                });
            }
            Ok((key.to_owned(), value.trim().to_owned()))
        })
        .collect()
}

/// Replaces `$NAME` references, where `NAME` starts with an uppercase ASCII
/// letter followed by uppercase letters, digits or underscores.
fn expand_references<F>(text: &str, lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut expanded = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(current) = chars.next() {
        if current != '$' || !chars.peek().is_some_and(char::is_ascii_uppercase) {
            expanded.push(current);
            continue;
        }

        let mut name = String::new();
        while let Some(next) =
            chars.next_if(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || *c == '_')
        {
            name.push(next);
        }

        match lookup(&name) {
            Some(resolved) => expanded.push_str(&resolved),
            None => {
                expanded.push('$');
                expanded.push_str(&name);
            }
        }
    }
    expanded
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn no_variables(_: &str) -> Option<String> {
        None
    }

    fn expected(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect()
    }

    #[rstest]
    #[case::single("A=1", &[("A", "1")])]
    #[case::spaced(" A = 1 , B=two ", &[("A", "1"), ("B", "two")])]
    #[case::trailing_comma("A=1,", &[("A", "1")])]
    #[case::value_with_equals("OPTS=a=b", &[("OPTS", "a=b")])]
    #[case::empty("", &[])]
    fn parses_string_form(#[case] input: &str, #[case] pairs: &[(&str, &str)]) {
        let parsed = parse_env_with(&json!(input), no_variables).expect("parse env");
        assert_eq!(parsed, expected(pairs));
    }

    #[test]
    fn parses_mapping_form_and_stringifies_scalars() {
        let parsed = parse_env_with(
            &json!({"A": "1", "PORT": 8080, "DEBUG": true}),
            no_variables,
        )
        .expect("parse env");
        assert_eq!(
            parsed,
            expected(&[("A", "1"), ("DEBUG", "true"), ("PORT", "8080")])
        );
    }

    #[test]
    fn expands_known_references_and_keeps_unknown_ones() {
        let lookup = |name: &str| (name == "HOME").then(|| String::from("/home/op"));
        let parsed = parse_env_with(&json!("PATH=$HOME/bin:$MISSING, LOWER=$home"), lookup)
            .expect("parse env");
        assert_eq!(
            parsed,
            expected(&[("LOWER", "$home"), ("PATH", "/home/op/bin:$MISSING")])
        );
    }

    #[rstest]
    #[case::missing_separator(json!("A=1,B"), "missing '='")]
    #[case::empty_key(json!("=1"), "empty key")]
    #[case::nested_value(json!({"A": {"B": "1"}}), "must be a string")]
    #[case::array(json!(["A=1"]), "got an array")]
    fn rejects_malformed_entries(#[case] input: Value, #[case] fragment: &str) {
        let error = parse_env_with(&input, no_variables).expect_err("should fail");
        assert!(
            error.to_string().contains(fragment),
            "unexpected error: {error}"
        );
    }
}
