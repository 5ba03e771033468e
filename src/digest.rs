use std::fmt;

/// Lowercase hex MD5, always 32 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Digest(String);

impl Digest {
    pub const LEN: usize = 32;

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

/// Hash a field value the way `echo "$value" | md5sum` does: MD5 over the
/// value followed by a single `\n`.
///
/// Unkeyed and unsalted. This pseudonymizes identifiers; it does not protect them.
pub fn digest(value: &[u8]) -> Digest {
    let mut ctx = md5::Context::new();
    ctx.consume(value);
    ctx.consume(b"\n");
    Digest(format!("{:x}", ctx.compute()))
}
