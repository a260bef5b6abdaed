use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

use dpath_validator::config::Config;
use dpath_validator::document::node::DataNode;
use dpath_validator::file::loader::{load_data_file, load_data_from_stdin, load_template_file};
use dpath_validator::validator::Validator;

/// Validate YAML/JSON data against structural templates
#[derive(Parser)]
#[command(name = "dpath-validator")]
#[command(version)]
#[command(about = "Validate YAML/JSON data against structural templates", long_about = None)]
struct Cli {
    /// Template file; may be repeated. Every document in the file is loaded.
    #[arg(short, long = "template", value_name = "FILE", required = true)]
    templates: Vec<PathBuf>,

    /// Data files to validate ("-" reads stdin)
    #[arg(value_name = "DATA")]
    data: Vec<String>,

    /// Require every path to match (overrides the config file)
    #[arg(long)]
    strict: bool,

    /// Treat each element of a top-level sequence as its own candidate
    #[arg(long)]
    each: bool,

    /// Print the compiled path expressions and exit
    #[arg(long)]
    print_paths: bool,

    /// Output format for verdicts
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Config file (default: ~/.config/dpath-validator/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct Verdict<'a> {
    source: &'a str,
    index: usize,
    valid: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(2)
        }
    }
}

/// Returns whether every candidate passed.
fn run(cli: Cli) -> Result<bool> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load(),
    };
    if cli.strict {
        config.strict_mode = true;
    }

    let mut validator = Validator::new(&config);
    for path in &cli.templates {
        let templates = load_template_file(path, &config.wildcard)?;
        validator.load_all(&templates);
    }

    if cli.print_paths {
        for path in validator.templates() {
            println!("{}", path);
        }
        return Ok(true);
    }

    if cli.data.is_empty() {
        anyhow::bail!("No data files given");
    }

    let mut verdicts = Vec::new();
    let mut sources = Vec::new();
    for source in &cli.data {
        let candidates = load_candidates(source, cli.each)?;
        let results = validator
            .validate(&candidates)
            .with_context(|| format!("Failed to validate {}", source))?;
        sources.push((source.as_str(), results));
    }

    for (source, results) in &sources {
        for (index, valid) in results.iter().enumerate() {
            verdicts.push(Verdict {
                source,
                index,
                valid: *valid,
            });
        }
    }

    match cli.format {
        OutputFormat::Text => {
            for verdict in &verdicts {
                println!(
                    "{}#{}\t{}",
                    verdict.source,
                    verdict.index,
                    if verdict.valid { "PASS" } else { "FAIL" }
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&verdicts)?);
        }
    }

    Ok(verdicts.iter().all(|verdict| verdict.valid))
}

fn load_candidates(source: &str, each: bool) -> Result<Vec<DataNode>> {
    let documents = if source == "-" {
        load_data_from_stdin()?
    } else {
        load_data_file(source)?
    };

    if !each {
        return Ok(documents);
    }

    Ok(documents
        .into_iter()
        .flat_map(|document| match document {
            DataNode::Sequence(items) => items,
            other => vec![other],
        })
        .collect())
}
