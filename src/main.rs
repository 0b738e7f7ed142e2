//! Tag Template CLI
//!
//! Usage:
//!   tag-template [OPTIONS] [FILE]
//!
//! Options:
//!   -d, --data <FILE>        Supplied data (JSON object)
//!   -s, --schema <FILE>      Supplied-data schema (TOML, or JSON array)
//!   -t, --today <DATE>       Freeze the current date (YYYY-MM-DD)
//!   --allow-unknown-keys     Accept supplied-data keys the schema does not declare
//!   --json                   Print the full resolution as JSON
//!   -l, --list               List built-in tags and pipes
//!   -h, --help               Print help

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tag_template::registry::{PIPES, TAGS};
use tag_template::{
    format_errors, resolve_template_with_config, ResolveConfig, SuppliedData,
    SuppliedDataFieldSchema, UnknownKeys,
};

#[derive(Parser)]
#[command(name = "tag-template")]
#[command(about = "Resolve { TAG | pipe } expressions in text templates")]
struct Cli {
    /// Template file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Supplied data file (JSON object)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Supplied-data schema file (TOML, or JSON array)
    #[arg(short, long)]
    schema: Option<PathBuf>,

    /// Freeze the current date (YYYY-MM-DD)
    #[arg(short, long)]
    today: Option<NaiveDate>,

    /// Accept supplied-data keys the schema does not declare
    #[arg(long)]
    allow_unknown_keys: bool,

    /// Print the full resolution as JSON
    #[arg(long)]
    json: bool,

    /// List built-in tags and pipes
    #[arg(short, long)]
    list: bool,
}

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    if cli.list {
        print_catalog();
        return;
    }

    // Load schema
    let schema = match &cli.schema {
        Some(path) => match SuppliedDataFieldSchema::load(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error loading schema '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Vec::new(),
    };

    // Load supplied data
    let data: Option<SuppliedData> = match &cli.data {
        Some(path) => {
            let parsed = fs::read_to_string(path)
                .map_err(|e| e.to_string())
                .and_then(|content| serde_json::from_str(&content).map_err(|e| e.to_string()));
            match parsed {
                Ok(d) => Some(d),
                Err(e) => {
                    eprintln!("Error loading data '{}': {}", path.display(), e);
                    std::process::exit(1);
                }
            }
        }
        None => None,
    };

    // Read template
    let source = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let mut config = ResolveConfig::new();
    if let Some(today) = cli.today {
        config = config.with_today(today);
    }
    if cli.allow_unknown_keys {
        config = config.with_unknown_keys(UnknownKeys::Ignore);
    }
    if let Some(path) = &cli.input {
        config = config.with_filename(path.display().to_string());
    }

    let resolution = resolve_template_with_config(&source, data.as_ref(), &schema, &config);

    if cli.json {
        match serde_json::to_string_pretty(&resolution) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        if !resolution.is_valid {
            std::process::exit(1);
        }
        return;
    }

    match resolution.resolved_template {
        Some(text) => print!("{}", text),
        None => {
            eprint!("{}", format_errors(&resolution.errors, &source, &config.filename));
            std::process::exit(1);
        }
    }
}

fn print_catalog() {
    println!("TAGS");
    println!("----");
    for tag in TAGS {
        println!("{:<16} {}", tag.name, tag.value_type);
    }
    println!();
    println!("PIPES");
    println!("-----");
    for pipe in PIPES {
        let types = pipe
            .allowed_types
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let params = pipe
            .params
            .iter()
            .map(|p| format!(":{}", p))
            .collect::<String>();
        println!("{:<16} [{}]", format!("{}{}", pipe.name, params), types);
    }
    println!();
    println!("Supplied values are referenced as SUPPLIED_DATA.<key>.");
}
