use chg_hasher::config::{FileType, HasherConfig};
use chg_hasher::pipeline;

fn main() {
	let data = b"msisdn|imsi|plan\n6281122334455|510101234567890|prepaid\n".to_vec();
	let mut input = std::io::Cursor::new(data);
	let mut hashed = Vec::new();
	let cfg = HasherConfig::default().with_profile(FileType::Subs);
	let stats = pipeline::hash_stream(&mut input, &mut hashed, &cfg).unwrap();
	println!("hashed {} records ({} fields)", stats.records, stats.fields_hashed);
	print!("{}", String::from_utf8_lossy(&hashed));
}
