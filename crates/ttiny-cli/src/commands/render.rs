//! Implementation of the `ttiny render` command.

use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use miette::{miette, Report};
use serde::Serialize;
use ttiny::interpreter::DEFAULT_MAX_DEPTH;
use ttiny::{Engine, ProcessError, Stash, Value};

use crate::output::TemplateDiagnostic;

/// Arguments for the render command.
#[derive(Debug, clap::Args)]
pub struct RenderArgs {
    /// Template file to render
    pub template: PathBuf,

    /// JSON file with the stash to render against
    #[arg(long)]
    pub stash: Option<PathBuf>,

    /// Stash variables in name=value format (repeatable); values are read as
    /// JSON when they parse, as strings otherwise
    #[arg(short = 's', long = "set", value_parser = parse_key_val)]
    pub vars: Vec<(String, String)>,

    /// Maximum block nesting depth
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for render results.
#[derive(Serialize)]
pub struct RenderResult {
    pub output: String,
}

/// Parse a key=value variable string.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid variable format '{}': expected name=value", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

/// Read a `-s` value as JSON, falling back to a plain string.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::from(raw))
}

fn load_stash(path: &Path) -> miette::Result<Stash> {
    let content = read_to_string(path)
        .map_err(|e| miette!("Cannot read stash file {}: {}", path.display(), e))?;
    serde_json::from_str(&content)
        .map_err(|e| miette!("Invalid stash JSON in {}: {}", path.display(), e))
}

/// Run the render command.
pub fn run_render(args: RenderArgs) -> miette::Result<i32> {
    let mut stash = match &args.stash {
        Some(path) => load_stash(path)?,
        None => Stash::new(),
    };
    for (key, raw) in &args.vars {
        stash.insert(key.clone(), parse_value(raw));
    }

    let content = read_to_string(&args.template).map_err(|e| {
        miette!("Cannot read template {}: {}", args.template.display(), e)
    })?;

    let engine = Engine::builder().max_depth(args.max_depth).build();
    match engine.process(&content, &mut stash) {
        Ok(output) => {
            if args.json {
                let result = RenderResult { output };
                println!(
                    "{}",
                    serde_json::to_string_pretty(&result).map_err(|e| miette!("{e}"))?
                );
            } else {
                print!("{}", output);
            }
            Ok(exitcode::OK)
        }
        Err(ProcessError::Parse(e)) if !args.json => {
            let diagnostic = TemplateDiagnostic::from_parse_error(&args.template, &content, &e);
            eprintln!("{:?}", Report::new(diagnostic));
            Ok(exitcode::DATAERR)
        }
        Err(e) => {
            if args.json {
                let output = serde_json::json!({
                    "error": e.to_string()
                });
                eprintln!(
                    "{}",
                    serde_json::to_string_pretty(&output).map_err(|e| miette!("{e}"))?
                );
            } else {
                eprintln!("Render error: {}", e);
            }
            Ok(exitcode::DATAERR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_val_splits_on_first_equals() {
        assert_eq!(
            parse_key_val("title=a=b"),
            Ok(("title".to_string(), "a=b".to_string()))
        );
        assert!(parse_key_val("novalue").is_err());
    }

    #[test]
    fn values_prefer_json() {
        assert_eq!(parse_value("3"), Value::Number(3));
        assert_eq!(parse_value("true"), Value::Bool(true));
        assert_eq!(parse_value("[1,2]"), Value::from(vec![1, 2]));
        assert_eq!(parse_value("hello"), Value::from("hello"));
    }
}
