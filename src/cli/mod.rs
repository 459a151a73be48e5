//! The urispec command-line interface.
//!
//! This module is the entry point for all CLI commands and orchestrates the
//! library pipeline. Errors are rendered through `miette` and end the process
//! with status 1.

use crate::assembler::{self, UnitAssembler};
use crate::cli::args::{Command, GeneratorArgs, UrispecArgs};
use crate::errors::{GenError, GenResult};
use crate::loader;
use clap::Parser;
use serde::Serialize;
use std::{fs, process};

pub mod args;
pub mod output;

/// One row of `urispec list`.
#[derive(Debug, Serialize)]
pub struct VectorSummary {
    pub file: String,
    pub description: String,
    pub test_name: String,
    pub valid: bool,
}

/// The main entry point for the CLI.
pub fn run() {
    let args = UrispecArgs::parse();

    let result = match args.command {
        Command::Generate { generator, stdout } => handle_generate(&generator, stdout),
        Command::Check { generator } => handle_check(&generator),
        Command::List { generator, json } => handle_list(&generator, json),
    };

    if let Err(e) = result {
        eprintln!("{:?}", miette::Report::new(e));
        process::exit(1);
    }
}

/// Handles the `generate` subcommand.
fn handle_generate(args: &GeneratorArgs, stdout: bool) -> GenResult<()> {
    let config = args.to_config();
    let unit = assembler::generate(&config)?;
    output::report_unit(&unit);

    if stdout {
        print!("{}", unit.source);
        return Ok(());
    }
    assembler::write_unit(&config.output_path, &unit)?;
    output::print_written(&unit, &config.output_path);
    Ok(())
}

/// Handles the `check` subcommand.
fn handle_check(args: &GeneratorArgs) -> GenResult<()> {
    let config = args.to_config();
    let unit = assembler::generate(&config)?;
    output::report_unit(&unit);

    let existing = fs::read_to_string(&config.output_path).unwrap_or_default();
    if existing == unit.source {
        output::print_status(
            "fresh",
            &format!("{} is up to date", config.output_path.display()),
        );
        return Ok(());
    }
    output::print_diff(&existing, &unit.source);
    Err(GenError::Stale {
        path: config.output_path,
    })
}

/// Handles the `list` subcommand.
fn handle_list(args: &GeneratorArgs, json: bool) -> GenResult<()> {
    let config = args.to_config();
    let assembler = UnitAssembler::new(&config);

    let mut rows = Vec::new();
    for loaded in loader::load_dir(&config.input_dir, &config.extension)? {
        let file = loaded.path.display().to_string();
        for vector in &loaded.file.tests {
            rows.push(VectorSummary {
                file: file.clone(),
                description: vector.description.clone(),
                test_name: assembler.test_name(vector),
                valid: vector.valid,
            });
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&rows).unwrap_or_default());
        return Ok(());
    }
    for row in &rows {
        let validity = if row.valid { "valid" } else { "invalid" };
        println!("{}\t{}\t{}", row.file, validity, row.test_name);
    }
    Ok(())
}
