//! Implementation of the `ttiny check` command.

use std::fs::read_to_string;
use std::path::PathBuf;

use miette::{miette, IntoDiagnostic, Report};
use serde::Serialize;
use ttiny::disambiguate;

use crate::output::table::{format_check_table, FileReport};
use crate::output::TemplateDiagnostic;

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Template files to check
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output format for check results.
#[derive(Debug, Serialize)]
struct CheckJson {
    file: String,
    blocks: usize,
    passes: usize,
    error: Option<String>,
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> miette::Result<i32> {
    let mut reports: Vec<FileReport> = Vec::new();

    for path in &args.files {
        let content = read_to_string(path)
            .into_diagnostic()
            .map_err(|e| miette!("Failed to read template {:?}: {}", path, e))?;

        match disambiguate(&content) {
            Ok(result) => reports.push(FileReport {
                file: path.display().to_string(),
                blocks: result.ids.len(),
                passes: result.passes,
                error: None,
            }),
            Err(e) => {
                if !args.json {
                    let diagnostic = TemplateDiagnostic::from_parse_error(path, &content, &e);
                    eprintln!("{:?}", Report::new(diagnostic));
                }
                reports.push(FileReport {
                    file: path.display().to_string(),
                    blocks: 0,
                    passes: 0,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    let any_failed = reports.iter().any(|r| r.error.is_some());

    if args.json {
        let json_data: Vec<CheckJson> = reports
            .iter()
            .map(|r| CheckJson {
                file: r.file.clone(),
                blocks: r.blocks,
                passes: r.passes,
                error: r.error.clone(),
            })
            .collect();

        let json_output = serde_json::to_string_pretty(&json_data).into_diagnostic()?;
        println!("{}", json_output);
    } else {
        println!("{}", format_check_table(&reports));
    }

    if any_failed {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}
