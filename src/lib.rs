//! urispec: a test-vector compiler for connection-string parsers.
//!
//! Reads a directory of YAML specification files and emits one Rust source file
//! with a `#[test]` per vector, asserting that a parser produces the expected
//! hosts, credentials, database and options. See [`assembler::generate`] for
//! the pipeline entry point.

pub use crate::errors::{GenError, GenResult};

pub mod assembler;
pub mod assertion;
pub mod cli;
pub mod config;
pub mod emit;
pub mod errors;
pub mod loader;
pub mod render;
pub mod sanitize;
pub mod vectors;
