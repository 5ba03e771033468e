use crate::decompress::CorruptStream;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HasherError {
	#[error("I/O error: {0}")]
	Io(std::io::Error),

	#[error("Invalid compressed input: {0}")]
	Format(String),

	#[error("Field position {position} out of range for record at line {line} with {field_count} field(s)")]
	Index { position: usize, field_count: usize, line: u64 },

	#[error("Input has no header record")]
	EmptyInput,

	#[error("Configuration error: {0}")]
	Config(String),
}

pub type Result<T> = std::result::Result<T, HasherError>;

// Decoder failures arrive as io::Error through the csv parser, tagged by the adapter.
impl From<std::io::Error> for HasherError {
	fn from(err: std::io::Error) -> Self {
		match err.get_ref().and_then(|inner| inner.downcast_ref::<CorruptStream>()) {
			Some(corrupt) => HasherError::Format(corrupt.to_string()),
			None => HasherError::Io(err),
		}
	}
}

impl From<csv::Error> for HasherError {
	fn from(err: csv::Error) -> Self {
		match err.into_kind() {
			csv::ErrorKind::Io(io_err) => HasherError::from(io_err),
			other => HasherError::Io(std::io::Error::new(
				std::io::ErrorKind::InvalidData,
				format!("malformed delimited input: {:?}", other),
			)),
		}
	}
}
