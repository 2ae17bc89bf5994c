//! sstkv Demo Binary
//!
//! Fills a memtable with a fixed dataset, flushes it to an SSTable and looks
//! up one key.

use clap::Parser;
use sstkv::{Config, Lookup, MemTable, SSTableReader};
use tracing_subscriber::{fmt, EnvFilter};

/// sstkv Demo
#[derive(Parser, Debug)]
#[command(name = "sstkv-demo")]
#[command(about = "Flush a memtable to an SSTable and look up a key")]
#[command(version)]
struct Args {
    /// Directory for the SSTable file
    #[arg(short, long, default_value = ".")]
    data_dir: String,

    /// SSTable file name
    #[arg(short, long, default_value = "sstable.sst")]
    table: String,

    /// Key to look up after the flush
    #[arg(short, long, default_value = "carrot")]
    key: String,

    /// Skip fsync after writing the table
    #[arg(long)]
    no_sync: bool,

    /// Print every record of the table after the flush
    #[arg(long)]
    dump: bool,
}

const DATASET: &[(&str, &str)] = &[
    ("apple", "fruit"),
    ("carrot", "vegetable"),
    ("banana", "fruit"),
];

fn main() {
    // Logs go to stderr; stdout carries only the demo output
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,sstkv=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!("sstkv demo v{}", sstkv::VERSION);

    let config = match Config::builder()
        .data_dir(&args.data_dir)
        .table_file(&args.table)
        .sync_on_flush(!args.no_sync)
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let mut memtable = MemTable::new();
    for (key, value) in DATASET {
        memtable.put(*key, *value);
    }

    let path = config.table_path();

    if let Err(e) = sstkv::flush_with_config(&memtable, &path, &config) {
        println!("Error flushing to SSTable: {}", e);
        std::process::exit(1);
    }
    println!("Flushed MemTable to SSTable: {}", path.display());

    if args.dump {
        if let Err(e) = dump(&path, &config) {
            println!("Error reading SSTable: {}", e);
            std::process::exit(1);
        }
    }

    match sstkv::search_with_config(&path, &args.key, &config) {
        Ok(Lookup::Found(value)) => {
            println!("Found key '{}' with value '{}' in SSTable", args.key, value);
        }
        Ok(Lookup::NotFound) => {
            println!("Key '{}' not found in SSTable", args.key);
        }
        Err(e) => {
            println!("Error searching SSTable: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print every record in file order
fn dump(path: &std::path::Path, config: &Config) -> sstkv::Result<()> {
    let mut reader = SSTableReader::open_with_config(path, config)?;
    for record in reader.iter()? {
        let record = record?;
        println!("  {} => {}", record.key, record.value);
    }
    Ok(())
}
