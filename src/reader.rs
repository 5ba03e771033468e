use crate::error::{HasherError, Result};
use csv::ByteRecord;
use memchr::memchr;
use std::io::BufRead;

/// Read the first line verbatim, terminator included.
pub fn read_header<R: BufRead>(reader: &mut R) -> Result<Vec<u8>> {
    let mut header = Vec::new();
    if reader.read_until(b'\n', &mut header)? == 0 {
        return Err(HasherError::EmptyInput);
    }
    Ok(header)
}

/// Forward-only reader over delimited records.
///
/// Ragged rows are accepted and quoting is lenient:
/// - a quote that does not start a field is literal (`ab"c`)
/// - a quote closing a quoted section but followed by anything other than the
///   delimiter, another quote or the line end is kept, and the rest of the
///   field is read unquoted (`"a"b` gives `a"b`)
/// - a quoted field left open runs across lines up to end of input
///
/// `\r\n` terminators are normalized to `\n` inside quoted fields. Blank lines
/// are skipped.
pub struct RecordReader<R: BufRead> {
    inner: R,
    delimiter: u8,
    line: Vec<u8>,
    field: Vec<u8>,
    terminated: bool,
    lines_read: u64,
    line_offset: u64,
    record_line: u64,
}

impl<R: BufRead> RecordReader<R> {
    /// `line_offset` is the number of input lines consumed before `reader`.
    pub fn new(reader: R, delimiter: u8, line_offset: u64) -> Self {
        Self {
            inner: reader,
            delimiter,
            line: Vec::with_capacity(1 << 10),
            field: Vec::new(),
            terminated: false,
            lines_read: 0,
            line_offset,
            record_line: 0,
        }
    }

    /// 1-based input line where the last record read starts.
    pub fn line(&self) -> u64 {
        self.record_line
    }

    fn next_line(&mut self) -> Result<bool> {
        self.line.clear();
        if self.inner.read_until(b'\n', &mut self.line)? == 0 {
            return Ok(false);
        }
        self.lines_read += 1;
        self.terminated = self.line.last() == Some(&b'\n');
        if self.terminated {
            self.line.pop();
        }
        if self.line.last() == Some(&b'\r') {
            self.line.pop();
        }
        Ok(true)
    }

    /// Returns `Ok(false)` once the input is exhausted.
    pub fn read_record(&mut self, record: &mut ByteRecord) -> Result<bool> {
        record.clear();
        loop {
            if !self.next_line()? {
                return Ok(false);
            }
            if !self.line.is_empty() {
                break;
            }
        }
        self.record_line = self.lines_read + self.line_offset;

        let delim = self.delimiter;
        let mut pos = 0;
        'fields: loop {
            if self.line.get(pos) != Some(&b'"') {
                let rest = &self.line[pos..];
                match memchr(delim, rest) {
                    Some(i) => {
                        record.push_field(&rest[..i]);
                        pos += i + 1;
                        continue 'fields;
                    }
                    None => {
                        record.push_field(rest);
                        return Ok(true);
                    }
                }
            }

            self.field.clear();
            pos += 1;
            loop {
                let Some(i) = memchr(b'"', &self.line[pos..]) else {
                    self.field.extend_from_slice(&self.line[pos..]);
                    if self.terminated {
                        self.field.push(b'\n');
                    }
                    if !self.next_line()? {
                        record.push_field(&self.field);
                        return Ok(true);
                    }
                    pos = 0;
                    continue;
                };

                self.field.extend_from_slice(&self.line[pos..pos + i]);
                pos += i + 1;
                match self.line.get(pos).copied() {
                    Some(b'"') => {
                        self.field.push(b'"');
                        pos += 1;
                    }
                    Some(b) if b == delim => {
                        record.push_field(&self.field);
                        pos += 1;
                        continue 'fields;
                    }
                    None => {
                        record.push_field(&self.field);
                        return Ok(true);
                    }
                    Some(_) => {
                        self.field.push(b'"');
                        let rest = &self.line[pos..];
                        match memchr(delim, rest) {
                            Some(j) => {
                                self.field.extend_from_slice(&rest[..j]);
                                record.push_field(&self.field);
                                pos += j + 1;
                                continue 'fields;
                            }
                            None => {
                                self.field.extend_from_slice(rest);
                                record.push_field(&self.field);
                                return Ok(true);
                            }
                        }
                    }
                }
            }
        }
    }
}
