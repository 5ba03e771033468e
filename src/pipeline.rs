use crate::config::HasherConfig;
use crate::decompress::open_source;
use crate::error::HasherError;
use crate::reader::{read_header, RecordReader};
use crate::transform::transform;
use crate::writer::{terminator_for, write_header, RecordWriter};
use csv::ByteRecord;
use indicatif::{ProgressBar, ProgressStyle};
use std::ffi::OsString;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

pub const OUTPUT_SUFFIX: &str = ".hashed.out";

#[derive(Debug, Clone, PartialEq)]
pub struct HashStats {
	/// Data records written, header excluded.
	pub records: u64,
	pub fields_hashed: u64,
	pub elapsed: Duration,
}

/// `<input>.hashed.out`, next to the input.
pub fn output_path_for(input: &Path) -> PathBuf {
	let mut name = OsString::from(input.as_os_str());
	name.push(OUTPUT_SUFFIX);
	PathBuf::from(name)
}

fn progress_bar(enabled: bool) -> ProgressBar {
	if !enabled {
		return ProgressBar::hidden();
	}
	let pb = ProgressBar::new_spinner();
	if let Ok(style) = ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {pos} records ({per_sec})") {
		pb.set_style(style);
	}
	pb
}

/// Copy the header through, then hash every following record and flush it
/// before the next one is read.
///
/// Any error aborts the run. Records already written stay in `writer`.
pub fn hash_stream<R: Read, W: Write>(
	reader: &mut R,
	writer: &mut W,
	config: &HasherConfig,
) -> Result<HashStats, HasherError> {
	let start = Instant::now();

	// OPEN
	let mut source = open_source(reader, config.compression)?;
	let header = read_header(&mut source)?;
	write_header(writer, &header)?;
	log::debug!("Header passed through ({} bytes)", header.len());

	let mut records = RecordReader::new(source, config.delimiter, 1);
	let mut sink = RecordWriter::new(writer, config.delimiter, terminator_for(&header));
	let pb = progress_bar(config.progress);

	// STREAMING
	let mut stats = HashStats { records: 0, fields_hashed: 0, elapsed: Duration::ZERO };
	let streamed = stream_records(&mut records, &mut sink, config, &mut stats, &pb);

	// CLOSED
	pb.finish_and_clear();
	streamed?;
	stats.elapsed = start.elapsed();
	Ok(stats)
}

fn stream_records<R: BufRead, W: Write>(
	records: &mut RecordReader<R>,
	sink: &mut RecordWriter<W>,
	config: &HasherConfig,
	stats: &mut HashStats,
	pb: &ProgressBar,
) -> Result<(), HasherError> {
	let per_record = config.profile.positions().len() as u64;
	let mut record = ByteRecord::new();
	while records.read_record(&mut record)? {
		let hashed = transform(&record, &config.profile, records.line())?;
		sink.write_record(&hashed)?;
		stats.records += 1;
		stats.fields_hashed += per_record;
		pb.inc(1);
	}
	Ok(())
}

pub fn hash_file(input: &Path, output: &Path, config: &HasherConfig) -> Result<HashStats, HasherError> {
	let mut in_file = BufReader::new(File::open(input)?);
	let mut out_file = BufWriter::new(File::create(output)?);

	let stats = hash_stream(&mut in_file, &mut out_file, config)?;

	let out_file = out_file.into_inner().map_err(|e| e.into_error())?;
	out_file.sync_all()?;
	Ok(stats)
}
