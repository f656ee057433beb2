//! CLI entry point for `rows2sql`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use rows2sql::generator::sql_renderer::HashFn;
use rows2sql::loader::{CsvSource, JsonSource, RowSource, XlsxSource};
use rows2sql::output::formatter;
use rows2sql::parser::sql_check;
use rows2sql::{SeedTarget, Seeder, SeederConfig};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InputFormat {
    Json,
    Csv,
    Xlsx,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum HashAlgorithm {
    None,
    Blake3,
}

#[derive(Parser)]
#[command(
    name = "rows2sql",
    about = "Generate SQL INSERT statements from JSON or CSV rows with relation-encoded column names"
)]
struct Cli {
    /// Input file (JSON array of objects, CSV with a header row, or an .xlsx workbook)
    input: PathBuf,

    /// Input format; inferred from the file extension when omitted
    #[arg(long, value_enum)]
    format: Option<InputFormat>,

    /// Schema of the target table
    #[arg(long, default_value = "")]
    schema: String,

    /// Target table
    #[arg(long, required_unless_present = "function", conflicts_with = "function")]
    table: Option<String>,

    /// Emit a single call to this SQL function with the rows as JSONB instead of INSERTs
    #[arg(long)]
    function: Option<String>,

    /// JSON configuration file (delimiters, strict mode)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the one-to-many delimiter
    #[arg(long)]
    one_to_many_delimiter: Option<String>,

    /// Override the many-to-many delimiter
    #[arg(long)]
    many_to_many_delimiter: Option<String>,

    /// Override the separator between many-to-many cell tokens
    #[arg(long)]
    row_delimiter: Option<String>,

    /// Workbook sheet to read; the first sheet when omitted
    #[arg(long)]
    sheet: Option<String>,

    /// JSON object renaming CSV or sheet header cells (matched after trim + lowercase)
    #[arg(long)]
    column_map: Option<PathBuf>,

    /// Quote every literal and escape single quotes
    #[arg(long)]
    strict: bool,

    /// Hash applied to `#`-marked columns
    #[arg(long, value_enum, default_value = "none")]
    hash: HashAlgorithm,

    /// Parse the generated SQL before writing it
    #[arg(long)]
    check: bool,

    /// Output file; stdout when omitted
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print verbose diagnostics
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(message) = run(&cli) {
        eprintln!("Error: {message}");
        process::exit(2);
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let config = load_config(cli)?;
    let mut seeder = Seeder::new(config).map_err(|e| e.to_string())?;
    if let Some(hash) = hash_function(cli.hash) {
        seeder = seeder.with_hash(hash);
    }

    let source = load_source(cli)?;

    let target = match (&cli.function, &cli.table) {
        (Some(name), _) => SeedTarget::function(name),
        (None, Some(table)) => SeedTarget::table(&cli.schema, table),
        (None, None) => return Err("either --table or --function is required".to_string()),
    };

    let sql = seeder
        .seed_from(source.as_ref(), &target)
        .map_err(|e| e.to_string())?;

    if cli.check {
        let statements = sql_check::parse_generated_sql(&sql).map_err(|e| e.to_string())?;
        tracing::info!(statements = statements.len(), "generated SQL parses");
    }

    formatter::write_output(cli.output.as_deref(), &sql).map_err(|e| e.to_string())
}

fn load_source(cli: &Cli) -> Result<Box<dyn RowSource>, String> {
    let read_error = |e: std::io::Error| format!("failed to read {}: {e}", cli.input.display());
    let mapper = match &cli.column_map {
        Some(path) => load_column_map(path)?,
        None => HashMap::new(),
    };
    let source: Box<dyn RowSource> = match input_format(cli) {
        InputFormat::Json => {
            let content = std::fs::read_to_string(&cli.input).map_err(read_error)?;
            Box::new(JsonSource::new(content))
        }
        InputFormat::Csv => {
            let content = std::fs::read_to_string(&cli.input).map_err(read_error)?;
            Box::new(CsvSource::new(content).with_columns_mapper(mapper))
        }
        InputFormat::Xlsx => {
            let content = std::fs::read(&cli.input).map_err(read_error)?;
            let mut source = XlsxSource::new(content).with_columns_mapper(mapper);
            if let Some(sheet) = &cli.sheet {
                source = source.with_sheet_name(sheet);
            }
            Box::new(source)
        }
    };
    Ok(source)
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<SeederConfig, String> {
    let mut config = match &cli.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
            SeederConfig::from_json(&json).map_err(|e| e.to_string())?
        }
        None => SeederConfig::default(),
    };
    if let Some(delimiter) = &cli.one_to_many_delimiter {
        config.one_to_many_delimiter = delimiter.clone();
    }
    if let Some(delimiter) = &cli.many_to_many_delimiter {
        config.many_to_many_delimiter = delimiter.clone();
    }
    if let Some(delimiter) = &cli.row_delimiter {
        config.row_item_delimiter = delimiter.clone();
    }
    config.strict |= cli.strict;
    Ok(config)
}

fn load_column_map(path: &Path) -> Result<HashMap<String, String>, String> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&json).map_err(|e| format!("invalid column map {}: {e}", path.display()))
}

fn input_format(cli: &Cli) -> InputFormat {
    if let Some(format) = cli.format {
        return format;
    }
    match cli.input.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => InputFormat::Csv,
        Some(ext) if ext.eq_ignore_ascii_case("xlsx") => InputFormat::Xlsx,
        _ => InputFormat::Json,
    }
}

fn hash_function(algorithm: HashAlgorithm) -> Option<HashFn> {
    match algorithm {
        HashAlgorithm::None => None,
        HashAlgorithm::Blake3 => {
            let hash: HashFn =
                Arc::new(|value: &str| blake3::hash(value.as_bytes()).to_hex().to_string());
            Some(hash)
        }
    }
}
