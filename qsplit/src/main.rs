use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use qsplit::render::{known_tables_hint, splits_to_json, splits_to_sql};
use qsplit::{
    BindValue, Error, MemCatalog, MinMaxResult, QuerySplitter, Result, ScalarType, SplitOptions,
    SplitRequest, SqlDialect, TypeFamily,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "qsplit",
    version,
    about = "Split a single-table SELECT into disjoint range queries"
)]
struct Cli {
    /// JSON catalog describing tables, primary keys and indexes.
    #[arg(long, value_name = "PATH")]
    catalog: PathBuf,
    /// Number of splits to produce; values below 1 mean 1.
    #[arg(long = "split-count", default_value_t = 1, allow_negative_numbers = true)]
    split_count: i64,
    /// Indexed column to split on. Defaults to the leading primary-key column.
    #[arg(long = "split-column", value_name = "COLUMN")]
    split_column: Option<String>,
    /// Declared type of the split column, e.g. int64, uint32, float64, varbinary.
    #[arg(long = "column-type", default_value = "int64", value_parser = parse_scalar_type)]
    column_type: ScalarType,
    /// Smallest value of the split column, as returned by the min/max query.
    #[arg(long, requires = "max", allow_hyphen_values = true)]
    min: Option<String>,
    /// Largest value of the split column, as returned by the min/max query.
    #[arg(long, requires = "min", allow_hyphen_values = true)]
    max: Option<String>,
    /// SQL grammar: generic, mysql or postgres.
    #[arg(long, default_value_t = SqlDialect::Generic, value_parser = parse_dialect)]
    dialect: SqlDialect,
    /// Bind a variable referenced by the statement, e.g. --bind uid=7.
    #[arg(long = "bind", value_name = "NAME=VALUE", value_parser = parse_bind)]
    binds: Vec<(String, BindValue)>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
    /// Print the MIN/MAX aggregate statement for the split column and exit.
    #[arg(long = "min-max-query")]
    min_max_query: bool,
    /// The SELECT statement to split.
    #[arg(value_name = "SQL")]
    sql: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Sql,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        tracing::debug!(kind = ?err.kind(), "qsplit failed");
        eprintln!("error: {err}");
        process::exit(1);
    }
}

#[allow(clippy::print_stdout)]
fn run(cli: Cli) -> Result<()> {
    let catalog = MemCatalog::from_path(&cli.catalog)?;
    tracing::debug!(path = %cli.catalog.display(), tables = catalog.len(), "loaded catalog");

    let mut request = SplitRequest::new(cli.sql, cli.split_count);
    if let Some(column) = cli.split_column {
        request = request.with_split_column(column);
    }
    request.bind_variables.extend(cli.binds);

    let options = SplitOptions::default().with_dialect(cli.dialect);
    let splitter = match QuerySplitter::with_options(request, &catalog, options) {
        Err(err @ Error::TableNotFound(_)) => {
            eprintln!("{}", known_tables_hint(&catalog));
            return Err(err);
        }
        other => other?,
    };

    if cli.min_max_query {
        println!("{}", splitter.min_max_query()?);
        return Ok(());
    }

    let min_max = match (cli.min, cli.max) {
        (Some(min), Some(max)) => Some(MinMaxResult::single(min, max)),
        (None, None) => None,
        _ => {
            return Err(Error::InvalidArgumentError(
                "--min and --max must be given together".into(),
            ));
        }
    };

    if min_max.is_some() && cli.column_type.family() == TypeFamily::Binary {
        tracing::warn!(column_type = %cli.column_type, "binary split columns ignore --min and --max");
    }

    let splits = splitter.split(cli.column_type, min_max.as_ref())?;
    match cli.format {
        OutputFormat::Json => println!("{}", splits_to_json(&splits)?),
        OutputFormat::Sql => print!("{}", splits_to_sql(&splits)),
    }
    Ok(())
}

fn parse_scalar_type(raw: &str) -> std::result::Result<ScalarType, String> {
    raw.parse().map_err(|err: Error| err.to_string())
}

fn parse_dialect(raw: &str) -> std::result::Result<SqlDialect, String> {
    raw.parse().map_err(|err: Error| err.to_string())
}

fn parse_bind(raw: &str) -> std::result::Result<(String, BindValue), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| "expected NAME=VALUE".to_string())?;
    let name = name.trim().trim_start_matches(':');
    if name.is_empty() {
        return Err(format!("missing bind variable name in '{raw}'"));
    }
    Ok((name.to_string(), BindValue::from_literal(value)))
}
