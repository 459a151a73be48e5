//! In-memory shape of a connection-string specification file.
//!
//! Specification files are YAML documents of the form:
//! ```yaml
//! tests:
//!   - description: "Valid host, no auth"
//!     uri: "mongodb://localhost:27017"
//!     valid: true
//!     warning: false
//!     hosts:
//!       - { type: hostname, host: localhost, port: 27017 }
//!     auth: ~
//!     options: {}
//! ```
//!
//! YAML `null` in `hosts`, `options`, and the string fields of hosts and auth
//! decodes to the zero value, so `auth: { username: ~ }` and `auth: { username: "" }`
//! are the same record. Only the absence of `auth` as a whole is significant.

use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// FILE AND VECTOR RECORDS
// =============================================================================

/// All vectors of one specification file, in file order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VectorFile {
    #[serde(default, deserialize_with = "nullable")]
    pub tests: Vec<TestVector>,
}

/// One test case: an input string and its expected parse outcome.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TestVector {
    pub description: String,
    pub uri: String,
    pub valid: bool,
    #[serde(default)]
    pub warning: bool,
    #[serde(default, deserialize_with = "nullable")]
    pub hosts: Vec<HostSpec>,
    #[serde(default)]
    pub auth: Option<AuthSpec>,
    #[serde(default, deserialize_with = "nullable")]
    pub options: BTreeMap<String, OptionValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HostSpec {
    #[serde(rename = "type", default)]
    pub kind: HostKind,
    #[serde(default, deserialize_with = "nullable")]
    pub host: String,
    #[serde(default)]
    pub port: Option<u16>,
}

/// The `type` tag of a host entry. Only `ip_literal` changes how a host renders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum HostKind {
    #[default]
    Normal,
    Hostname,
    Ipv4,
    IpLiteral,
    Unix,
    Other(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AuthSpec {
    #[serde(default, deserialize_with = "nullable")]
    pub username: String,
    #[serde(default, deserialize_with = "nullable")]
    pub password: String,
    #[serde(rename = "db", default, deserialize_with = "nullable")]
    pub database: String,
}

// =============================================================================
// OPTION VALUES
// =============================================================================

/// A dynamically typed option value, tagged at decode time.
///
/// The emitter only understands `String`, `Integer` and `Mapping`; the other
/// variants exist so that options it ignores (`ssl: true`, `w: 1.5`, tag lists)
/// still load.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Integer(i64),
    Bool(bool),
    Float(f64),
    String(String),
    Sequence(Vec<OptionValue>),
    Mapping(BTreeMap<String, OptionValue>),
    Null,
}

impl OptionValue {
    /// Short description of the tag, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            OptionValue::Integer(_) => "an integer",
            OptionValue::Bool(_) => "a boolean",
            OptionValue::Float(_) => "a float",
            OptionValue::String(_) => "a string",
            OptionValue::Sequence(_) => "a sequence",
            OptionValue::Mapping(_) => "a mapping",
            OptionValue::Null => "null",
        }
    }

    /// Textual form of a scalar value, `None` for collections and null.
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            OptionValue::Integer(n) => Some(n.to_string()),
            OptionValue::Bool(b) => Some(b.to_string()),
            OptionValue::Float(x) => Some(x.to_string()),
            OptionValue::String(s) => Some(s.clone()),
            OptionValue::Sequence(_) | OptionValue::Mapping(_) | OptionValue::Null => None,
        }
    }
}

// =============================================================================
// HOST RENDERING
// =============================================================================

impl From<String> for HostKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "normal" => HostKind::Normal,
            "hostname" => HostKind::Hostname,
            "ipv4" => HostKind::Ipv4,
            "ip_literal" => HostKind::IpLiteral,
            "unix" => HostKind::Unix,
            _ => HostKind::Other(tag),
        }
    }
}

/// Canonical form compared against the parser's host rendering:
/// `[::1]:27017` for IP literals, `host:port` otherwise, no port when it is zero.
impl fmt::Display for HostSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind == HostKind::IpLiteral {
            write!(f, "[{}]", self.host)?;
        } else {
            f.write_str(&self.host)?;
        }
        match self.port {
            Some(port) if port != 0 => write!(f, ":{port}"),
            _ => Ok(()),
        }
    }
}

// =============================================================================
// SERDE HELPERS
// =============================================================================

/// Reads YAML `null` as the type's zero value.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
