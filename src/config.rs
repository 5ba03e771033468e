use crate::error::HasherError;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_DELIMITER: u8 = b'|';

/// CHG file layouts and the zero-based columns carrying subscriber identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Hourly,
    Monthly,
    Subs,
    Revenue,
}

impl FileType {
    pub fn positions(self) -> &'static [usize] {
        match self {
            FileType::Hourly => &[2],
            FileType::Monthly => &[1],
            // MSISDN, IMSI
            FileType::Subs => &[0, 1],
            FileType::Revenue => &[2],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FileType::Hourly => "hourly",
            FileType::Monthly => "monthly",
            FileType::Subs => "subs",
            FileType::Revenue => "revenue",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FileType {
    type Err = HasherError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hourly" => Ok(FileType::Hourly),
            "monthly" => Ok(FileType::Monthly),
            "subs" | "subs-info" | "subscriber-info" => Ok(FileType::Subs),
            "revenue" => Ok(FileType::Revenue),
            _ => Err(HasherError::Config(format!(
                "Invalid file type: {} (expected hourly, monthly, subs or revenue)",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    Plain,
    Gzip,
    Zstd,
    /// Sniff the magic bytes of the input.
    Auto,
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Compression::Plain => "plain",
            Compression::Gzip => "gzip",
            Compression::Zstd => "zstd",
            Compression::Auto => "auto",
        };
        f.write_str(name)
    }
}

impl FromStr for Compression {
    type Err = HasherError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" | "none" => Ok(Compression::Plain),
            "gzip" | "gz" => Ok(Compression::Gzip),
            "zstd" | "zst" => Ok(Compression::Zstd),
            "auto" => Ok(Compression::Auto),
            _ => Err(HasherError::Config(format!("Invalid compression mode: {}", s))),
        }
    }
}

/// Named set of field positions to hash in every data record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTypeProfile {
    name: String,
    positions: Vec<usize>,
}

impl FileTypeProfile {
    pub fn new(name: impl Into<String>, positions: Vec<usize>) -> Result<Self, HasherError> {
        let name = name.into();
        if positions.is_empty() {
            return Err(HasherError::Config(format!(
                "Profile '{}' must hash at least one column",
                name
            )));
        }
        for (i, pos) in positions.iter().enumerate() {
            if positions[..i].contains(pos) {
                return Err(HasherError::Config(format!(
                    "Profile '{}' lists column {} more than once",
                    name, pos
                )));
            }
        }
        Ok(Self { name, positions })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// Profile built from a comma separated column list such as `"0,3"`.
    pub fn from_columns(name: impl Into<String>, columns: &str) -> Result<Self, HasherError> {
        let positions = columns
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(|c| {
                c.parse::<usize>()
                    .map_err(|_| HasherError::Config(format!("Invalid column index: {}", c)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(name, positions)
    }
}

impl From<FileType> for FileTypeProfile {
    fn from(file_type: FileType) -> Self {
        Self {
            name: file_type.name().to_string(),
            positions: file_type.positions().to_vec(),
        }
    }
}

/// Parse a single-byte delimiter. Accepts `\t` as an escape for tab.
pub fn parse_delimiter(s: &str) -> Result<u8, HasherError> {
    let byte = match s {
        "\\t" | "\t" => b'\t',
        _ if s.len() == 1 && s.is_ascii() => s.as_bytes()[0],
        _ => {
            return Err(HasherError::Config(format!(
                "Delimiter must be a single ASCII byte, got {:?}",
                s
            )))
        }
    };
    match byte {
        b'\n' | b'\r' | b'"' => Err(HasherError::Config(format!(
            "Delimiter {:?} conflicts with record or quote syntax",
            byte as char
        ))),
        _ => Ok(byte),
    }
}

#[derive(Debug, Clone)]
pub struct HasherConfig {
    pub profile: FileTypeProfile,
    pub compression: Compression,
    pub delimiter: u8,
    pub progress: bool,
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self {
            profile: FileType::Hourly.into(),
            compression: Compression::Plain,
            delimiter: DEFAULT_DELIMITER,
            progress: false,
        }
    }
}

impl HasherConfig {
    pub fn with_profile(mut self, profile: impl Into<FileTypeProfile>) -> Self {
        self.profile = profile.into();
        self
    }

    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }
}
