use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use rustmemocollect::{Collection, PaginationConfig};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "collect-tool")]
#[command(about = "Load a JSON document into a collection and query it")]
struct Cli {
    /// JSON file holding an array or an object of elements
    file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Count,
    First,
    ToArray,
    Where {
        #[arg(long)]
        column: String,
        /// Parsed as JSON when possible, otherwise taken as a string
        #[arg(long)]
        value: String,
    },
    List {
        #[arg(long)]
        value_column: String,
        #[arg(long, default_value = "id")]
        key_column: String,
    },
    Slice {
        #[arg(long, allow_hyphen_values = true)]
        begin: isize,
        #[arg(long, allow_hyphen_values = true)]
        end: isize,
        #[arg(long)]
        exclusive: bool,
    },
    Filter {
        #[arg(long = "field", required = true)]
        fields: Vec<String>,
    },
    Page {
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = 15)]
        per_page: usize,
        #[arg(long, default_value_t = 3)]
        links: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let collection = load_collection(&cli.file)?;
    let output = run(&collection, cli.command)?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn load_collection(path: &Path) -> Result<Collection> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    let collection = Collection::from_json_str(&text)
        .with_context(|| format!("Failed to load collection from '{}'", path.display()))?;

    if collection.is_empty() {
        return Err(anyhow!(
            "'{}' holds no elements. Expected a JSON array or object",
            path.display()
        ));
    }
    Ok(collection)
}

fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn run(collection: &Collection, command: Command) -> Result<Value> {
    let output = match command {
        Command::Count => Value::from(collection.count()),
        Command::First => collection.first().cloned().unwrap_or(Value::Null),
        Command::ToArray => Value::Array(collection.to_array()),
        Command::Where { column, value } => {
            Value::Array(collection.where_eq(&column, parse_value(&value)).to_array())
        }
        Command::List {
            value_column,
            key_column,
        } => Value::Object(collection.list(&value_column, &key_column)),
        Command::Slice {
            begin,
            end,
            exclusive,
        } => Value::Array(collection.slice(begin, end, !exclusive)),
        Command::Filter { fields } => Value::Array(collection.filter(&fields).to_vec()),
        Command::Page {
            page,
            per_page,
            links,
        } => {
            let config = PaginationConfig::new()
                .page(page)
                .per_page(per_page)
                .number_of_pages(links);
            serde_json::to_value(collection.paginate_with(&config))?
        }
    };
    Ok(output)
}
