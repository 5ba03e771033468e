//! # CHG Hasher
//!
//! Streaming anonymizer for pipe-delimited CHG files. Subscriber identifiers
//! (MSISDN, IMSI) are replaced by the MD5 digest of the value followed by a
//! newline, which matches `echo $msisdn | md5sum`. Every other byte of the
//! record is left as it was.
//!
//! ## Features
//!
//! - **Streaming**: one record is read, hashed, written and flushed before the
//!   next is read. Memory use does not depend on file size.
//! - **Compressed input**: gzip (including multi-member) and zstd inputs are
//!   inflated transparently, or detected by their magic bytes.
//! - **Lenient parsing**: ragged rows and stray quotes never abort a run.
//! - **Fail fast**: a record too short for a hash column stops the run with
//!   [`HasherError::Index`]. Everything written before it stays on disk.
//!
//! ## Quick Start
//!
//! ```rust
//! use chg_hasher::{hash_data, FileType, HasherConfig};
//!
//! let config = HasherConfig::default().with_profile(FileType::Subs);
//! let hashed = hash_data(b"msisdn|imsi\n555|111\n", &config).unwrap();
//! assert_eq!(
//!     hashed,
//!     b"msisdn|imsi\n41d9737bc75ae8fa57b7a84a44fba01c|1181c1834012245d785120e3505ed169\n"
//! );
//! ```
//!
//! ### Working with Files
//!
//! ```rust,no_run
//! use chg_hasher::{pipeline, Compression, FileType, HasherConfig};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), chg_hasher::HasherError> {
//! let config = HasherConfig::default()
//!     .with_profile(FileType::Hourly)
//!     .with_compression(Compression::Gzip);
//! let input = Path::new("CHG_HOURLY_2024010100.csv.gz");
//! let stats = pipeline::hash_file(input, &pipeline::output_path_for(input), &config)?;
//! println!("hashed {} records", stats.records);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod decompress;
pub mod digest;
pub mod error;
pub mod pipeline;
pub mod reader;
pub mod transform;
pub mod writer;

pub use config::{Compression, FileType, FileTypeProfile, HasherConfig};
pub use digest::{digest, Digest};
pub use error::{HasherError, Result};
pub use pipeline::{hash_file, hash_stream, output_path_for, HashStats};

use std::io::Cursor;

/// Hash an in-memory file.
///
/// Convenience wrapper over [`pipeline::hash_stream`] for small inputs and tests.
pub fn hash_data(data: &[u8], config: &HasherConfig) -> Result<Vec<u8>> {
    let mut input = Cursor::new(data);
    let mut output = Vec::new();
    pipeline::hash_stream(&mut input, &mut output, config)?;
    Ok(output)
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
