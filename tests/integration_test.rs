use chg_hasher::config::{Compression, FileType, FileTypeProfile, HasherConfig};
use chg_hasher::{digest, pipeline, HasherError};
use flate2::write::GzEncoder;
use rand::Rng;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

fn write_gzip(path: &Path, data: &[u8]) {
	let mut enc = GzEncoder::new(fs::File::create(path).unwrap(), flate2::Compression::default());
	enc.write_all(data).unwrap();
	enc.finish().unwrap();
}

fn column_one() -> HasherConfig {
	HasherConfig::default().with_profile(FileTypeProfile::new("test", vec![1]).unwrap())
}

#[test]
fn hashes_plain_file_to_derived_path() {
	let dir = TempDir::new().unwrap();
	let input = dir.path().join("chg.csv");
	fs::write(&input, b"a|b|c\n1|2|3\n").unwrap();

	let output = pipeline::output_path_for(&input);
	let stats = pipeline::hash_file(&input, &output, &column_one()).unwrap();

	assert_eq!(stats.records, 1);
	assert_eq!(output.file_name().and_then(|n| n.to_str()), Some("chg.csv.hashed.out"));
	assert_eq!(
		fs::read_to_string(&output).unwrap(),
		"a|b|c\n1|26ab0db90d72e28ad0ba1e22ee510510|3\n"
	);
}

#[test]
fn gzip_input_matches_plain_output() {
	let dir = TempDir::new().unwrap();
	let content = b"a|b|c\n1|2|3\n4|5|6\n";
	let plain = dir.path().join("chg.csv");
	let packed = dir.path().join("chg.csv.gz");
	fs::write(&plain, content).unwrap();
	write_gzip(&packed, content);

	let plain_out = dir.path().join("plain.out");
	let gzip_out = dir.path().join("gzip.out");
	pipeline::hash_file(&plain, &plain_out, &column_one()).unwrap();
	pipeline::hash_file(&packed, &gzip_out, &column_one().with_compression(Compression::Gzip)).unwrap();

	assert_eq!(fs::read(&plain_out).unwrap(), fs::read(&gzip_out).unwrap());
}

#[test]
fn auto_detects_gzip_and_zstd() {
	let dir = TempDir::new().unwrap();
	let content = b"msisdn|imsi\n555|111\n";
	let gz = dir.path().join("subs.gz");
	let zst = dir.path().join("subs.zst");
	write_gzip(&gz, content);
	fs::write(&zst, zstd::stream::encode_all(&content[..], 3).unwrap()).unwrap();

	let config = HasherConfig::default()
		.with_profile(FileType::Subs)
		.with_compression(Compression::Auto);
	let expected = "msisdn|imsi\n41d9737bc75ae8fa57b7a84a44fba01c|1181c1834012245d785120e3505ed169\n";
	for input in [&gz, &zst] {
		let out = dir.path().join("out");
		pipeline::hash_file(input, &out, &config).unwrap();
		assert_eq!(fs::read_to_string(&out).unwrap(), expected);
	}
}

#[test]
fn short_record_leaves_flushed_prefix() {
	let dir = TempDir::new().unwrap();
	let input = dir.path().join("hourly.csv");
	let output = dir.path().join("hourly.out");
	fs::write(&input, b"d|h|msisdn\n1|0|6281\n2|1\n3|2|6283\n").unwrap();

	let config = HasherConfig::default().with_profile(FileType::Hourly);
	let err = pipeline::hash_file(&input, &output, &config).unwrap_err();
	assert!(matches!(err, HasherError::Index { position: 2, field_count: 2, line: 3 }));

	let written = fs::read_to_string(&output).unwrap();
	assert_eq!(written, format!("d|h|msisdn\n1|0|{}\n", digest(b"6281")));
}

#[test]
fn missing_input_is_io_error() {
	let dir = TempDir::new().unwrap();
	let err = pipeline::hash_file(
		&dir.path().join("absent.csv"),
		&dir.path().join("absent.out"),
		&HasherConfig::default(),
	)
	.unwrap_err();
	assert!(matches!(err, HasherError::Io(_)));
}

#[test]
fn plain_file_declared_gzip_is_format_error() {
	let dir = TempDir::new().unwrap();
	let input = dir.path().join("not-gzip.csv");
	fs::write(&input, b"a|b|c\n1|2|3\n").unwrap();
	let err = pipeline::hash_file(
		&input,
		&dir.path().join("out"),
		&column_one().with_compression(Compression::Gzip),
	)
	.unwrap_err();
	assert!(matches!(err, HasherError::Format(_)));
}

#[test]
fn header_passes_through_byte_identical() {
	let dir = TempDir::new().unwrap();
	let input = dir.path().join("odd-header.csv");
	let header = "\"quoted\"| spaced |x\"y\r\n";
	fs::write(&input, format!("{}1|2|3\n", header)).unwrap();

	let output = dir.path().join("out");
	pipeline::hash_file(&input, &output, &column_one()).unwrap();
	let written = fs::read_to_string(&output).unwrap();
	assert!(written.starts_with(header));
}

#[test]
fn rerun_on_output_changes_it() {
	let dir = TempDir::new().unwrap();
	let input = dir.path().join("monthly.csv");
	let mut rng = rand::thread_rng();
	let mut content = String::from("month|msisdn|rev\n");
	for i in 0..500 {
		content.push_str(&format!("{}|62{}|{}\n", i, rng.gen_range(800_000_000u64..900_000_000), i * 3));
	}
	fs::write(&input, &content).unwrap();

	let config = HasherConfig::default().with_profile(FileType::Monthly);
	let first = pipeline::output_path_for(&input);
	let second = pipeline::output_path_for(&first);
	assert_eq!(pipeline::hash_file(&input, &first, &config).unwrap().records, 500);
	pipeline::hash_file(&first, &second, &config).unwrap();

	let first_bytes = fs::read(&first).unwrap();
	let second_bytes = fs::read(&second).unwrap();
	assert_ne!(first_bytes, second_bytes);
	assert_eq!(first_bytes.len(), second_bytes.len());
	assert_eq!(content.lines().count(), String::from_utf8(first_bytes).unwrap().lines().count());
}
