//! urispec error handling.
//!
//! Every failure the compiler can hit is a variant of [`GenError`]. All of them
//! are fatal for the run; the two non-fatal conditions (reformat failures and
//! ignored option keys) are reported as warnings by the assembler instead.

use miette::{Diagnostic, NamedSource, SourceSpan};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result alias used throughout the crate.
pub type GenResult<T> = Result<T, GenError>;

// ============================================================================
// ERROR TYPE
// ============================================================================

#[derive(Error, Diagnostic, Debug)]
pub enum GenError {
    #[error("cannot list specification directory '{}'", .path.display())]
    #[diagnostic(code(urispec::input::read_dir))]
    ReadDir {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("cannot open specification directory '{}'", .path.display())]
    #[diagnostic(
        code(urispec::input::open_dir),
        help("pass the directory holding the connection-string .yml files with --input")
    )]
    OpenDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{}' is not a directory", .path.display())]
    #[diagnostic(code(urispec::input::not_a_directory))]
    NotADirectory { path: PathBuf },

    #[error("cannot read specification file '{}'", .path.display())]
    #[diagnostic(code(urispec::input::read_file))]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("specification file '{name}' does not match the test vector shape")]
    #[diagnostic(code(urispec::input::deserialize))]
    Deserialize {
        name: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("does not match here")]
        span: Option<SourceSpan>,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("option '{key}' of vector \"{description}\" must be {expected}, found {found}")]
    #[diagnostic(
        code(urispec::emit::malformed_option),
        help("fix the option value in the specification file")
    )]
    MalformedOption {
        description: String,
        key: String,
        expected: &'static str,
        found: String,
    },

    #[error("cannot write generated tests to '{}'", .path.display())]
    #[diagnostic(code(urispec::output::write))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("generated tests at '{}' are out of date", .path.display())]
    #[diagnostic(
        code(urispec::output::stale),
        help("run `urispec generate` and commit the result")
    )]
    Stale { path: PathBuf },
}

// ============================================================================
// CONSTRUCTORS
// ============================================================================

impl GenError {
    /// Builds a deserialization error that points into the offending file.
    pub fn deserialize(path: &Path, content: String, source: serde_yaml::Error) -> Self {
        let span = source
            .location()
            .map(|loc| SourceSpan::from((loc.index(), 0)));
        Self::Deserialize {
            name: path.display().to_string(),
            src: NamedSource::new(path.display().to_string(), content),
            span,
            source,
        }
    }

    pub fn malformed_option(
        description: &str,
        key: &str,
        expected: &'static str,
        found: impl Into<String>,
    ) -> Self {
        Self::MalformedOption {
            description: description.to_string(),
            key: key.to_string(),
            expected,
            found: found.into(),
        }
    }

    pub fn write(path: &Path, source: std::io::Error) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miette::Report;

    #[test]
    fn deserialize_error_carries_file_name_and_location() {
        let content = "tests:\n  - description: 3\n    valid: [\n".to_string();
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>(&content).unwrap_err();
        let err = GenError::deserialize(Path::new("broken.yml"), content, yaml_err);

        let GenError::Deserialize { span, name, .. } = &err else {
            panic!("expected a deserialize error");
        };
        assert_eq!(name, "broken.yml");
        assert!(span.is_some());

        let rendered = format!("{:?}", Report::new(err));
        assert!(rendered.contains("urispec::input::deserialize"));
    }

    #[test]
    fn malformed_option_names_vector_and_key() {
        let err = GenError::malformed_option("Bad timeout", "wtimeoutms", "an integer", "a string");
        assert_eq!(
            err.to_string(),
            "option 'wtimeoutms' of vector \"Bad timeout\" must be an integer, found a string"
        );
    }
}
