//! Decompression adapter
//!
//! Turns a raw byte source into a buffered stream of decompressed bytes. Plain
//! input passes through unchanged. Decoder failures are tagged so they surface
//! as [`HasherError::Format`] instead of a generic I/O error.

use crate::config::Compression;
use crate::error::{HasherError, Result};
use flate2::read::MultiGzDecoder;
use std::fmt;
use std::io::{self, BufRead, BufReader, Read};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const ZSTD_MAGIC: [u8; 4] = [0x28, 0xb5, 0x2f, 0xfd];

/// Marker carried inside an `io::Error` raised by a decoder.
#[derive(Debug)]
pub struct CorruptStream {
    codec: Compression,
    source: io::Error,
}

impl CorruptStream {
    pub fn wrap(codec: Compression, source: io::Error) -> io::Error {
        io::Error::new(io::ErrorKind::InvalidData, CorruptStream { codec, source })
    }
}

impl fmt::Display for CorruptStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} stream is corrupt: {}", self.codec, self.source)
    }
}

impl std::error::Error for CorruptStream {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Error raised by the raw source underneath a decoder.
#[derive(Debug)]
struct SourceFailure(io::Error);

impl fmt::Display for SourceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for SourceFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

/// Marks errors of the raw source so the decoder layer can tell them apart.
struct Source<R> {
    inner: R,
}

impl<R: Read> Read for Source<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf).map_err(|e| match e.kind() {
            io::ErrorKind::Interrupted => e,
            kind => io::Error::new(kind, SourceFailure(e)),
        })
    }
}

fn from_source(err: &io::Error) -> bool {
    err.get_ref().map_or(false, |inner| inner.is::<SourceFailure>())
}

/// Tags errors raised by the decoder itself. Source errors and interrupted
/// reads pass through untouched.
struct Tagged<R> {
    inner: R,
    codec: Compression,
}

impl<R: Read> Read for Tagged<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf).map_err(|e| {
            if e.kind() == io::ErrorKind::Interrupted || from_source(&e) {
                e
            } else {
                CorruptStream::wrap(self.codec, e)
            }
        })
    }
}

/// Guess the codec from the leading bytes of a stream.
pub fn detect_compression(head: &[u8]) -> Compression {
    if head.starts_with(&GZIP_MAGIC) {
        Compression::Gzip
    } else if head.starts_with(&ZSTD_MAGIC) {
        Compression::Zstd
    } else {
        Compression::Plain
    }
}

/// Wrap `source` so reads yield decompressed content.
///
/// `Compression::Auto` resolves to a concrete codec by peeking at the first
/// buffered bytes. A declared codec whose magic is missing is rejected up front.
pub fn open_source<'a, R: Read + 'a>(source: R, compression: Compression) -> Result<Box<dyn BufRead + 'a>> {
    let mut buffered = BufReader::new(Source { inner: source });
    let detected = detect_compression(buffered.fill_buf()?);

    let codec = match compression {
        Compression::Auto => detected,
        Compression::Plain => Compression::Plain,
        declared => {
            if detected != declared {
                return Err(HasherError::Format(format!(
                    "input was declared {} but does not start with {} magic bytes",
                    declared, declared
                )));
            }
            declared
        }
    };
    log::debug!("Input codec resolved to {}", codec);

    let stream: Box<dyn BufRead + 'a> = match codec {
        Compression::Gzip => Box::new(BufReader::new(Tagged {
            inner: MultiGzDecoder::new(buffered),
            codec,
        })),
        Compression::Zstd => {
            let decoder = zstd::stream::read::Decoder::with_buffer(buffered)
                .map_err(|e| HasherError::Format(format!("zstd decoder init failed: {}", e)))?;
            Box::new(BufReader::new(Tagged { inner: decoder, codec }))
        }
        Compression::Plain | Compression::Auto => Box::new(buffered),
    };
    Ok(stream)
}
