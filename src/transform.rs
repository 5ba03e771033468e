use crate::config::FileTypeProfile;
use crate::digest::digest;
use crate::error::{HasherError, Result};
use csv::ByteRecord;

/// Replace each profile position with its digest. Field order and count are unchanged.
///
/// All positions are range-checked before any field is touched.
pub fn transform(record: &ByteRecord, profile: &FileTypeProfile, line: u64) -> Result<ByteRecord> {
    let field_count = record.len();
    if let Some(&position) = profile.positions().iter().find(|&&p| p >= field_count) {
        return Err(HasherError::Index { position, field_count, line });
    }

    let mut out = ByteRecord::with_capacity(record.as_slice().len(), field_count);
    for (i, field) in record.iter().enumerate() {
        if profile.positions().contains(&i) {
            out.push_field(digest(field).as_ref());
        } else {
            out.push_field(field);
        }
    }
    Ok(out)
}
