use crate::error::Result;
use csv::{ByteRecord, QuoteStyle, Terminator, WriterBuilder};
use std::io::Write;

/// Write the header bytes exactly as read and flush them.
pub fn write_header<W: Write>(writer: &mut W, header: &[u8]) -> Result<()> {
    writer.write_all(header)?;
    writer.flush()?;
    Ok(())
}

/// Record terminator matching the header's: `\r\n` when the header used it, else `\n`.
pub fn terminator_for(header: &[u8]) -> Terminator {
    if header.ends_with(b"\r\n") {
        Terminator::CRLF
    } else {
        Terminator::Any(b'\n')
    }
}

/// Delimited writer that flushes after every record, so the sink always holds
/// a prefix of whole records.
pub struct RecordWriter<W: Write> {
    inner: csv::Writer<W>,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(writer: W, delimiter: u8, terminator: Terminator) -> Self {
        let inner = WriterBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true)
            .quote_style(QuoteStyle::Necessary)
            .terminator(terminator)
            .from_writer(writer);
        Self { inner }
    }

    pub fn write_record(&mut self, record: &ByteRecord) -> Result<()> {
        self.inner.write_byte_record(record)?;
        self.inner.flush()?;
        Ok(())
    }
}
