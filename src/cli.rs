use crate::config::{parse_delimiter, Compression, FileType, FileTypeProfile, HasherConfig};
use crate::error::HasherError;
use crate::pipeline;
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(author, version, about, long_about = "Replace MSISDN/IMSI columns of CHG files with their MD5 digest")]
struct Cli {
    /// Name of the CHG file to be hashed
    #[arg(short, long, value_name = "FILE")]
    filename: PathBuf,

    /// CHG type of the file [hourly, monthly, subs, revenue]
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    file_type: FileType,

    /// Input compression [plain, gzip, zstd, auto]
    #[arg(short, long, default_value = "plain")]
    compression: Compression,

    /// Single-byte field separator
    #[arg(short, long, default_value = "|")]
    delimiter: String,

    /// Comma separated zero-based columns to hash, overriding the type's columns
    #[arg(long, value_name = "COLS")]
    columns: Option<String>,

    /// Output file name (default: <FILE>.hashed.out)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Show a record counter while hashing
    #[arg(long)]
    progress: bool,
}

pub fn run() -> Result<(), HasherError> {
    let cli = Cli::parse();
    let start = Instant::now();

    let profile = match &cli.columns {
        Some(columns) => FileTypeProfile::from_columns(cli.file_type.name(), columns)?,
        None => FileTypeProfile::from(cli.file_type),
    };
    let config = HasherConfig {
        profile,
        compression: cli.compression,
        delimiter: parse_delimiter(&cli.delimiter)?,
        progress: cli.progress,
    };
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| pipeline::output_path_for(&cli.filename));

    log::info!("Processing CHG file input: {}", cli.filename.display());
    log::info!("CHG type is: {} (compression: {})", cli.file_type, config.compression);
    log::info!("Hashing column(s) {:?} of {}", config.profile.positions(), cli.filename.display());
    log::info!("Hashed CHG is written to: {}", output.display());

    let stats = pipeline::hash_file(&cli.filename, &output, &config)?;

    println!("Hashing successful!");
    println!("  Records:       {}", stats.records);
    println!("  Fields hashed: {}", stats.fields_hashed);
    println!("  Output:        {}", output.display());
    log::info!("Run took {:.2?}", start.elapsed());

    Ok(())
}
