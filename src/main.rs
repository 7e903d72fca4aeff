//! Game Data CSV - command line front end
//!
//! Encodes, decodes, exports, imports and inspects admin CSV data.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use gamedata_csv::admin::{AdminService, EntityKind, MemoryStore, RecordStore};
use gamedata_csv::codec::{parse_document, records_from_json, write_objects};
use gamedata_csv::config::AdminConfig;
use gamedata_csv::data::{document_to_frame, summarize};

fn main() {
    // Logs go to stderr so stdout carries only CSV/JSON output
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}

#[derive(Parser)]
#[command(
    name = "gamedata-csv",
    about = "CSV import/export tools for physics game admin data"
)]
struct Cli {
    /// JSON config file with import limits and field orders.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a JSON array of records as CSV.
    Encode(EncodeArgs),
    /// Decode CSV into a JSON array of records.
    Decode(InputArgs),
    /// Export collections from a seed file as CSV.
    Export(ExportArgs),
    /// Import CSV into a collection and report the inserted count.
    Import(ImportArgs),
    /// Print a per-column summary of a CSV document.
    Inspect(InputArgs),
}

#[derive(Args)]
struct InputArgs {
    /// Input file; reads stdin when omitted or `-`.
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
}

#[derive(Args)]
struct EncodeArgs {
    /// Column order, comma separated.
    #[arg(long, value_delimiter = ',', required = true)]
    fields: Vec<String>,
    #[command(flatten)]
    input: InputArgs,
}

#[derive(Args)]
struct ExportArgs {
    /// Collection to export; exports every collection when omitted.
    #[arg(value_name = "ENTITY", value_parser = parse_entity)]
    entity: Option<EntityKind>,
    /// JSON object mapping collection names to record arrays.
    #[arg(long, value_name = "PATH")]
    seed: Option<PathBuf>,
    /// Directory for per-collection files when exporting everything.
    #[arg(long = "out-dir", value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,
}

#[derive(Args)]
struct ImportArgs {
    /// Collection to import into.
    #[arg(value_name = "ENTITY", value_parser = parse_entity)]
    entity: EntityKind,
    /// JSON object mapping collection names to existing record arrays.
    #[arg(long, value_name = "PATH")]
    seed: Option<PathBuf>,
    #[command(flatten)]
    input: InputArgs,
}

fn parse_entity(value: &str) -> Result<EntityKind, String> {
    value.parse()
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AdminConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AdminConfig::default(),
    };

    match cli.command {
        Command::Encode(args) => encode(args),
        Command::Decode(args) => decode(args),
        Command::Export(args) => export(args, config),
        Command::Import(args) => import(args, config),
        Command::Inspect(args) => inspect(args),
    }
}

fn read_input(args: &InputArgs) -> Result<String> {
    match args.input.as_deref() {
        Some(path) if path != Path::new("-") => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
        }
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            Ok(buf)
        }
    }
}

fn encode(args: EncodeArgs) -> Result<()> {
    let json: serde_json::Value =
        serde_json::from_str(&read_input(&args.input)?).context("parsing JSON records")?;
    let records = records_from_json(&json)?;

    let stdout = io::stdout();
    write_objects(&mut stdout.lock(), &records, &args.fields)?;
    Ok(())
}

fn decode(args: InputArgs) -> Result<()> {
    let document = parse_document(&read_input(&args)?);
    let json = serde_json::to_string_pretty(&document.records)?;
    println!("{json}");
    Ok(())
}

fn load_seed(path: Option<&Path>) -> Result<MemoryStore> {
    let mut store = MemoryStore::new();
    let Some(path) = path else {
        return Ok(store);
    };

    let content =
        fs::read_to_string(path).with_context(|| format!("reading seed {}", path.display()))?;
    let json: serde_json::Value = serde_json::from_str(&content).context("parsing seed JSON")?;
    let collections = json
        .as_object()
        .ok_or_else(|| anyhow!("seed file must be a JSON object of collections"))?;

    for (name, records) in collections {
        let entity: EntityKind = name.parse().map_err(|e: String| anyhow!(e))?;
        let records =
            records_from_json(records).with_context(|| format!("seed collection {name}"))?;
        store.insert_many(entity, records)?;
    }
    Ok(store)
}

fn export(args: ExportArgs, config: AdminConfig) -> Result<()> {
    let store = load_seed(args.seed.as_deref())?;
    let service = AdminService::new(store, config);

    match args.entity {
        Some(entity) => {
            let export = service.export(entity)?;
            io::stdout().write_all(export.body.as_bytes())?;
        }
        None => {
            fs::create_dir_all(&args.out_dir)
                .with_context(|| format!("creating {}", args.out_dir.display()))?;
            for export in service.export_all()? {
                let path = args.out_dir.join(&export.filename);
                fs::write(&path, &export.body)
                    .with_context(|| format!("writing {}", path.display()))?;
                println!("{}\t{} rows", path.display(), export.rows);
            }
        }
    }
    Ok(())
}

fn import(args: ImportArgs, config: AdminConfig) -> Result<()> {
    let store = load_seed(args.seed.as_deref())?;
    let mut service = AdminService::new(store, config);
    let body = read_input(&args.input)?;

    let summary = service.import(args.entity, &body)?;
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}

fn inspect(args: InputArgs) -> Result<()> {
    let document = parse_document(&read_input(&args)?);
    let df = document_to_frame(&document)?;
    let summary = summarize(&df)?;

    println!("{} rows, {} columns", df.height(), document.fields.len());
    if document.ragged_rows > 0 {
        println!("{} ragged rows padded or truncated", document.ragged_rows);
    }
    let width = summary.iter().map(|s| s.name.len()).max().unwrap_or(0).max(6);
    println!("{:<width$}  {:>8}  {:>8}", "column", "filled", "distinct");
    for column in summary {
        println!(
            "{:<width$}  {:>8}  {:>8}",
            column.name, column.filled, column.distinct
        );
    }
    Ok(())
}
