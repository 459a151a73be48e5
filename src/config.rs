//! Per-run generator configuration.
//!
//! A [`GeneratorConfig`] is built once (from defaults, then CLI flags) and passed
//! by reference to every stage. Nothing in the crate keeps global state.

use crate::sanitize::Sanitizer;
use std::path::PathBuf;

pub const DEFAULT_INPUT_DIR: &str = "specifications/source/connection-string/tests";
pub const DEFAULT_OUTPUT_PATH: &str = "tests/spec_uri.rs";
pub const DEFAULT_EXTENSION: &str = "yml";
pub const DEFAULT_PARSER_PATH: &str = "connstring::parse_uri";
pub const DEFAULT_TEST_PREFIX: &str = "parse_uri_";

/// Name stamped into the generated-file marker comment.
pub const GENERATOR_NAME: &str = "urispec";

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub input_dir: PathBuf,
    /// File extension of specification files, without the dot.
    pub extension: String,
    pub output_path: PathBuf,
    pub target: ParserTarget,
    pub option_keys: OptionKeys,
    pub sanitizer: Sanitizer,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            extension: DEFAULT_EXTENSION.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            target: ParserTarget::default(),
            option_keys: OptionKeys::default(),
            sanitizer: Sanitizer::default(),
        }
    }
}

/// Where the parser under test lives and how generated tests refer to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserTarget {
    /// Full path imported by the generated unit, e.g. `connstring::parse_uri`.
    pub parser_path: String,
    /// Local name bound to the parse result inside each test.
    pub binding: String,
    /// Prepended to every sanitized description.
    pub test_prefix: String,
}

impl ParserTarget {
    /// The function name as called in generated code (last path segment).
    pub fn function_name(&self) -> &str {
        self.parser_path
            .rsplit("::")
            .next()
            .unwrap_or(&self.parser_path)
    }
}

impl Default for ParserTarget {
    fn default() -> Self {
        Self {
            parser_path: DEFAULT_PARSER_PATH.to_string(),
            binding: "uri".to_string(),
            test_prefix: DEFAULT_TEST_PREFIX.to_string(),
        }
    }
}

/// Option keys the emitter understands. Any other key is ignored with a warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionKeys {
    pub auth_mechanism: String,
    pub auth_mechanism_properties: String,
    pub replica_set: String,
    pub w_timeout_ms: String,
}

impl OptionKeys {
    pub fn is_known(&self, key: &str) -> bool {
        key == self.auth_mechanism
            || key == self.auth_mechanism_properties
            || key == self.replica_set
            || key == self.w_timeout_ms
    }
}

impl Default for OptionKeys {
    fn default() -> Self {
        Self {
            auth_mechanism: "authmechanism".to_string(),
            auth_mechanism_properties: "authmechanismproperties".to_string(),
            replica_set: "replicaset".to_string(),
            w_timeout_ms: "wtimeoutms".to_string(),
        }
    }
}
