//! Defines the command-line arguments and subcommands for the urispec CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use crate::config::{
    GeneratorConfig, DEFAULT_EXTENSION, DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_PATH,
    DEFAULT_PARSER_PATH, DEFAULT_TEST_PREFIX,
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "urispec",
    version,
    about = "Compiles connection-string specification vectors into Rust regression tests."
)]
pub struct UrispecArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate the test file from a directory of specification files.
    Generate {
        #[command(flatten)]
        generator: GeneratorArgs,
        /// Print the generated source instead of writing the output file.
        #[arg(long)]
        stdout: bool,
    },
    /// Fail if the output file is missing or differs from a fresh generation.
    Check {
        #[command(flatten)]
        generator: GeneratorArgs,
    },
    /// List every vector with the test name it compiles to.
    List {
        #[command(flatten)]
        generator: GeneratorArgs,
        /// Emit the listing as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Flags shared by every subcommand; each one overrides a [`GeneratorConfig`] field.
#[derive(Debug, Clone, Args)]
pub struct GeneratorArgs {
    /// Directory holding the specification files.
    #[arg(short, long, default_value = DEFAULT_INPUT_DIR)]
    pub input: PathBuf,
    /// Extension of specification files, without the dot.
    #[arg(long, default_value = DEFAULT_EXTENSION)]
    pub extension: String,
    /// Path of the generated Rust test file.
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,
    /// Path of the parse function under test, as imported by the generated file.
    #[arg(long, default_value = DEFAULT_PARSER_PATH)]
    pub parser: String,
    /// Prefix of every generated test function name.
    #[arg(long, default_value = DEFAULT_TEST_PREFIX)]
    pub prefix: String,
}

impl GeneratorArgs {
    pub fn to_config(&self) -> GeneratorConfig {
        let mut config = GeneratorConfig {
            input_dir: self.input.clone(),
            extension: self.extension.clone(),
            output_path: self.output.clone(),
            ..GeneratorConfig::default()
        };
        config.target.parser_path = self.parser.clone();
        config.target.test_prefix = self.prefix.clone();
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        UrispecArgs::command().debug_assert();
    }

    #[test]
    fn defaults_match_generator_config() {
        let args = UrispecArgs::parse_from(["urispec", "generate"]);
        let Command::Generate { generator, stdout } = args.command else {
            panic!("expected generate");
        };
        assert!(!stdout);
        let config = generator.to_config();
        let defaults = GeneratorConfig::default();
        assert_eq!(config.input_dir, defaults.input_dir);
        assert_eq!(config.output_path, defaults.output_path);
        assert_eq!(config.target, defaults.target);
    }

    #[test]
    fn flags_override_config() {
        let args = UrispecArgs::parse_from([
            "urispec",
            "list",
            "--input",
            "specs",
            "--extension",
            "yaml",
            "--parser",
            "driver::parse",
            "--prefix",
            "t_",
            "--json",
        ]);
        let Command::List { generator, json } = args.command else {
            panic!("expected list");
        };
        assert!(json);
        let config = generator.to_config();
        assert_eq!(config.input_dir, PathBuf::from("specs"));
        assert_eq!(config.extension, "yaml");
        assert_eq!(config.target.function_name(), "parse");
        assert_eq!(config.target.test_prefix, "t_");
    }
}
