//! Unit assembler: drives loading, naming, emission and rendering, then formats
//! and persists the generated test file.
//!
//! # Pipeline
//!
//! 1. **Load**: every specification file in the input directory ([`crate::loader`])
//! 2. **Name**: `<prefix><sanitized description>` per vector ([`crate::sanitize`])
//! 3. **Emit**: the assertion list per vector ([`crate::emit`])
//! 4. **Render**: one `#[test]` function per vector ([`crate::render`])
//! 5. **Format**: `syn` parse and `prettyplease` print of the whole unit
//! 6. **Write**: full overwrite of the output file
//!
//! A formatting failure is not fatal: the unformatted text is kept and the
//! error travels back in [`Unit::format_error`] so the caller can warn about it.

use crate::config::{GeneratorConfig, GENERATOR_NAME};
use crate::emit::Emitter;
use crate::errors::{GenError, GenResult};
use crate::loader;
use crate::render::{RustRenderer, SourceWriter};
use crate::vectors::TestVector;
use std::fs;
use std::path::Path;

// =============================================================================
// CORE TYPES
// =============================================================================

/// The generated test file, ready to be written.
#[derive(Debug, Clone)]
pub struct Unit {
    pub source: String,
    pub test_count: usize,
    /// Set when the raw output did not parse as Rust; `source` is then unformatted.
    pub format_error: Option<syn::Error>,
    pub ignored_options: Vec<IgnoredOption>,
}

/// An option key present in a vector that no assertion covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoredOption {
    pub description: String,
    pub key: String,
}

#[derive(Debug, Clone, Copy)]
pub struct UnitAssembler<'a> {
    config: &'a GeneratorConfig,
}

// =============================================================================
// ASSEMBLY
// =============================================================================

impl<'a> UnitAssembler<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Name of the test function generated for `vector`.
    pub fn test_name(&self, vector: &TestVector) -> String {
        format!(
            "{}{}",
            self.config.target.test_prefix,
            self.config.sanitizer.apply(&vector.description)
        )
    }

    pub fn assemble(&self, vectors: &[TestVector]) -> GenResult<Unit> {
        let emitter = Emitter::new(&self.config.option_keys);
        let renderer = RustRenderer::new(&self.config.target);

        let mut out = SourceWriter::new();
        self.write_preamble(&mut out);

        let mut ignored_options = Vec::new();
        for vector in vectors {
            let emission = emitter.emit(vector)?;
            out.blank();
            renderer.render_test(&mut out, &self.test_name(vector), &emission.assertions);
            ignored_options.extend(emission.ignored_options.into_iter().map(|key| IgnoredOption {
                description: vector.description.clone(),
                key,
            }));
        }

        let (body, format_error) = format_source(out.into_string());
        Ok(Unit {
            source: format!("{}\n\n{}", marker_line(), body),
            test_count: vectors.len(),
            format_error,
            ignored_options,
        })
    }

    fn write_preamble(&self, out: &mut SourceWriter) {
        out.line("#![allow(non_snake_case, unused_imports)]");
        out.blank();
        out.line("use std::time::Duration;");
        out.blank();
        out.line(&format!("use {};", self.config.target.parser_path));
    }
}

/// First line of every generated file.
pub fn marker_line() -> String {
    format!("// Code generated by \"{GENERATOR_NAME}\"; DO NOT EDIT.")
}

/// Canonical formatting of `raw`; on a syntax error the input comes back as is.
pub fn format_source(raw: String) -> (String, Option<syn::Error>) {
    match syn::parse_file(&raw) {
        Ok(file) => (prettyplease::unparse(&file), None),
        Err(err) => (raw, Some(err)),
    }
}

// =============================================================================
// PIPELINE ENTRY POINTS
// =============================================================================

/// Loads every vector under the configured input directory and assembles the unit.
pub fn generate(config: &GeneratorConfig) -> GenResult<Unit> {
    let vectors = loader::load_vectors(&config.input_dir, &config.extension)?;
    UnitAssembler::new(config).assemble(&vectors)
}

/// Replaces the contents of `path` with the unit.
///
/// The bytes go to a sibling temporary file first and are renamed into place.
pub fn write_unit(path: &Path, unit: &Unit) -> GenResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| GenError::write(path, e))?;
    }
    let staging = path.with_extension("rs.tmp");
    fs::write(&staging, unit.source.as_bytes()).map_err(|e| GenError::write(&staging, e))?;
    fs::rename(&staging, path).map_err(|e| GenError::write(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectors::{AuthSpec, HostKind, HostSpec, OptionValue};
    use std::collections::BTreeMap;

    fn vector(description: &str, valid: bool) -> TestVector {
        TestVector {
            description: description.to_string(),
            uri: "mongodb://localhost".to_string(),
            valid,
            hosts: vec![HostSpec {
                kind: HostKind::Hostname,
                host: "localhost".to_string(),
                port: None,
            }],
            ..TestVector::default()
        }
    }

    #[test]
    fn unit_has_marker_preamble_and_one_test_per_vector() {
        let config = GeneratorConfig::default();
        let unit = UnitAssembler::new(&config)
            .assemble(&[vector("Valid host, no auth", true), vector("Empty string", false)])
            .unwrap();

        assert!(unit.format_error.is_none());
        assert_eq!(unit.test_count, 2);
        assert!(unit
            .source
            .starts_with("// Code generated by \"urispec\"; DO NOT EDIT.\n"));
        assert!(unit.source.contains("use std::time::Duration;"));
        assert!(unit.source.contains("use connstring::parse_uri;"));
        assert!(unit.source.contains("fn parse_uri_Valid_host__no_auth()"));
        assert!(unit.source.contains("fn parse_uri_Empty_string()"));
        assert_eq!(unit.source.matches("#[test]").count(), 2);
    }

    #[test]
    fn formatted_output_parses_as_rust() {
        let config = GeneratorConfig::default();
        let unit = UnitAssembler::new(&config)
            .assemble(&[vector("Valid host, no auth", true), vector("Empty string", false)])
            .unwrap();
        assert!(syn::parse_file(&unit.source).is_ok());
    }

    #[test]
    fn unparsable_output_is_kept_with_an_error() {
        let config = GeneratorConfig::default();
        let unit = UnitAssembler::new(&config)
            .assemble(&[vector("Version 2.0 hosts", true)])
            .unwrap();
        assert!(unit.format_error.is_some());
        assert!(unit.source.contains("fn parse_uri_Version_2.0_hosts() {"));
        assert!(unit.source.contains("assert!(!uri.password_set"));
    }

    #[test]
    fn ignored_options_are_collected_per_vector() {
        let config = GeneratorConfig::default();
        let mut with_ssl = vector("With ssl", true);
        with_ssl.auth = Some(AuthSpec::default());
        with_ssl.options = BTreeMap::from([
            ("ssl".to_string(), OptionValue::Bool(true)),
            ("replicaset".to_string(), OptionValue::String("rs".to_string())),
        ]);
        let unit = UnitAssembler::new(&config).assemble(&[with_ssl]).unwrap();
        assert_eq!(
            unit.ignored_options,
            vec![IgnoredOption {
                description: "With ssl".to_string(),
                key: "ssl".to_string(),
            }]
        );
    }

    #[test]
    fn malformed_option_fails_the_unit() {
        let config = GeneratorConfig::default();
        let mut bad = vector("Bad", true);
        bad.options = BTreeMap::from([("wtimeoutms".to_string(), OptionValue::Bool(true))]);
        assert!(UnitAssembler::new(&config).assemble(&[bad]).is_err());
    }

    #[test]
    fn custom_target_changes_imports_and_names() {
        let mut config = GeneratorConfig::default();
        config.target.parser_path = "my_driver::uri::parse".to_string();
        config.target.test_prefix = "spec_".to_string();
        let unit = UnitAssembler::new(&config)
            .assemble(&[vector("Empty string", false)])
            .unwrap();
        assert!(unit.source.contains("use my_driver::uri::parse;"));
        assert!(unit.source.contains("fn spec_Empty_string()"));
    }
}
