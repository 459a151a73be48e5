//! Statement model for generated tests.
//!
//! The emitter decides *what* to assert and produces a list of [`Assertion`]s;
//! the renderer decides *how* each one is spelled in Rust source.

use std::fmt;
use std::time::Duration;

// =============================================================================
// LITERALS
// =============================================================================

/// Text ready to sit between the double quotes of a Rust string literal.
///
/// Raw NUL becomes the four characters `\x00`. Quotes, backslashes and other
/// control characters get the usual Rust escapes; everything else is kept as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Literal(String);

impl Literal {
    pub fn new(raw: &str) -> Self {
        let mut escaped = String::with_capacity(raw.len());
        for c in raw.chars() {
            match c {
                '\0' => escaped.push_str("\\x00"),
                '\\' => escaped.push_str("\\\\"),
                '"' => escaped.push_str("\\\""),
                '\n' => escaped.push_str("\\n"),
                '\r' => escaped.push_str("\\r"),
                '\t' => escaped.push_str("\\t"),
                c if c.is_control() => escaped.push_str(&format!("\\u{{{:x}}}", c as u32)),
                c => escaped.push(c),
            }
        }
        Self(escaped)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.0)
    }
}

// =============================================================================
// ASSERTIONS
// =============================================================================

/// String-valued fields of the parsed connection string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Username,
    Password,
    Database,
    AuthMechanism,
    ReplicaSet,
}

impl Field {
    /// Field name on the parser's result type.
    pub fn accessor(self) -> &'static str {
        match self {
            Field::Username => "username",
            Field::Password => "password",
            Field::Database => "database",
            Field::AuthMechanism => "auth_mechanism",
            Field::ReplicaSet => "replica_set",
        }
    }
}

/// One check inside a generated test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assertion {
    /// Parsing the input must fail. Always the only assertion of its test.
    ParseFails { uri: Literal },
    /// Parsing the input must succeed; binds the result for later assertions.
    ParseSucceeds { uri: Literal },
    HostCount { expected: usize },
    HostEquals { index: usize, expected: Literal },
    FieldEquals { field: Field, expected: Literal },
    /// The parser must report that no password was given at all.
    PasswordUnset,
    PropertyEquals { key: Literal, expected: Literal },
    WriteTimeout { expected: Duration },
}

impl Assertion {
    pub fn field(field: Field, raw: &str) -> Self {
        Assertion::FieldEquals {
            field,
            expected: Literal::new(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nul_becomes_hex_escape() {
        assert_eq!(Literal::new("foo\0bar").as_str(), r"foo\x00bar");
        assert_eq!(Literal::new("\0").to_string(), r#""\x00""#);
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(Literal::new("mongodb://localhost").as_str(), "mongodb://localhost");
        assert_eq!(Literal::new("").to_string(), "\"\"");
        assert_eq!(Literal::empty(), Literal::new(""));
    }

    #[test]
    fn quoting_characters_are_escaped() {
        assert_eq!(Literal::new(r#"a"b"#).as_str(), r#"a\"b"#);
        assert_eq!(Literal::new(r"a\b").as_str(), r"a\\b");
        assert_eq!(Literal::new("a\nb").as_str(), r"a\nb");
        assert_eq!(Literal::new("\u{1b}").as_str(), r"\u{1b}");
    }

    #[test]
    fn backslash_before_nul_stays_distinct() {
        // A literal backslash followed by NUL must not collapse into `\\x00`.
        assert_eq!(Literal::new("\\\0").as_str(), r"\\\x00");
    }
}
