//! Versioned little-endian snapshot file.
//!
//! Layout (format version 1):
//!
//! ```text
//! magic    b"RCAL"
//! version  u16
//! month    u8
//! days     u8
//! capacity u32
//! count    u32
//! count x { roll u32, name_len u32, name utf-8, sheet u32 bitmask, remark u8 }
//! ```
//!
//! Strings are length-prefixed (wide enough for names of any length) and the
//! sheet is a packed bitmask, so the format is independent of in-memory
//! struct layout. All 31 sheet slots are persisted regardless of the current
//! month, preserving flags hidden by a shorter month. Saves go through a
//! sibling temp file and a rename, so an interrupted save never destroys the
//! previous snapshot.

use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::{
    core::store::{RosterSnapshotV1, RosterStore},
    persist::{PersistError, PersistResult, SnapshotSink},
    student::{AttendanceSheet, StudentRecord},
    types::Remark,
};

const MAGIC: [u8; 4] = *b"RCAL";
/// Version number written into every snapshot file.
pub const SNAPSHOT_FORMAT_VERSION: u16 = 1;

/// Flat-file implementation of [`SnapshotSink`].
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    /// Sink backed by the file at `path`; nothing is touched until a
    /// save or load.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Loads roster state, falling back to a default roster when no usable
    /// file exists. Absent and truncated files are not fatal.
    pub fn load_store(&self) -> PersistResult<RosterStore> {
        match self.load()? {
            Some(snapshot) => Ok(RosterStore::from_snapshot(snapshot)?),
            None => Ok(RosterStore::new()),
        }
    }

    fn write_snapshot(&self, snapshot: &RosterSnapshotV1) -> PersistResult<()> {
        let tmp = self.temp_path();
        {
            let file = fs::File::create(&tmp)?;
            let mut w = BufWriter::new(file);
            w.write_all(&MAGIC)?;
            w.write_all(&SNAPSHOT_FORMAT_VERSION.to_le_bytes())?;
            w.write_all(&[snapshot.month, snapshot.days_in_month])?;
            w.write_all(&snapshot.capacity.to_le_bytes())?;
            w.write_all(&(snapshot.records.len() as u32).to_le_bytes())?;
            for rec in &snapshot.records {
                w.write_all(&rec.roll.to_le_bytes())?;
                let name = rec.name.as_bytes();
                w.write_all(&(name.len() as u32).to_le_bytes())?;
                w.write_all(name)?;
                w.write_all(&rec.attendance.to_bits().to_le_bytes())?;
                w.write_all(&[remark_tag(rec.remark)])?;
            }
            w.flush()?;
        }
        fs::rename(&tmp, &self.path)?;
        debug!(
            "saved {} records for month {} to {}",
            snapshot.records.len(),
            snapshot.month,
            self.path.display()
        );
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn read_snapshot(&self) -> PersistResult<Option<RosterSnapshotV1>> {
        let buf = match fs::read(&self.path) {
            Ok(buf) => buf,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!("no snapshot at {}, starting fresh", self.path.display());
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };

        match decode_snapshot(&buf)? {
            Some(snapshot) => {
                debug!(
                    "loaded {} records for month {} from {}",
                    snapshot.records.len(),
                    snapshot.month,
                    self.path.display()
                );
                Ok(Some(snapshot))
            }
            None => {
                warn!(
                    "snapshot at {} is truncated, starting fresh",
                    self.path.display()
                );
                Ok(None)
            }
        }
    }
}

impl SnapshotSink for SnapshotFile {
    fn save(&mut self, snapshot: &RosterSnapshotV1) -> PersistResult<()> {
        self.write_snapshot(snapshot)
    }

    fn load(&self) -> PersistResult<Option<RosterSnapshotV1>> {
        self.read_snapshot()
    }
}

/// Decodes a snapshot payload. `Ok(None)` means the payload ended early;
/// callers treat that the same as an absent file.
fn decode_snapshot(buf: &[u8]) -> PersistResult<Option<RosterSnapshotV1>> {
    let mut r = Reader::new(buf);

    let Some(magic) = r.bytes(4) else {
        return Ok(None);
    };
    if magic != MAGIC {
        return Err(PersistError::Corrupt("bad magic".to_string()));
    }
    let Some(version) = r.u16() else {
        return Ok(None);
    };
    if version != SNAPSHOT_FORMAT_VERSION {
        return Err(PersistError::UnsupportedVersion(version));
    }
    let (Some(month), Some(days), Some(capacity), Some(count)) =
        (r.u8(), r.u8(), r.u32(), r.u32())
    else {
        return Ok(None);
    };

    let mut records = Vec::with_capacity(count.min(1024) as usize);
    for _ in 0..count {
        let (Some(roll), Some(name_len)) = (r.u32(), r.u32()) else {
            return Ok(None);
        };
        let Some(name_bytes) = r.bytes(name_len as usize) else {
            return Ok(None);
        };
        let name = std::str::from_utf8(name_bytes)
            .map_err(|_| PersistError::Corrupt("name is not utf-8".to_string()))?
            .to_string();
        let (Some(bits), Some(tag)) = (r.u32(), r.u8()) else {
            return Ok(None);
        };
        let remark = remark_from_tag(tag)
            .ok_or_else(|| PersistError::Corrupt(format!("unknown remark tag {tag}")))?;
        records.push(StudentRecord {
            roll,
            name,
            attendance: AttendanceSheet::from_bits(bits),
            remark,
        });
    }

    Ok(Some(RosterSnapshotV1 {
        month,
        days_in_month: days,
        capacity,
        records,
    }))
}

fn remark_tag(remark: Remark) -> u8 {
    match remark {
        Remark::None => 0,
        Remark::Poor => 1,
        Remark::Average => 2,
        Remark::Good => 3,
        Remark::Excellent => 4,
    }
}

fn remark_from_tag(tag: u8) -> Option<Remark> {
    match tag {
        0 => Some(Remark::None),
        tag => Remark::from_selector(tag),
    }
}

struct Reader<'a> {
    buf: &'a [u8],
    off: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, off: 0 }
    }

    fn bytes(&mut self, n: usize) -> Option<&'a [u8]> {
        let end = self.off.checked_add(n)?;
        let out = self.buf.get(self.off..end)?;
        self.off = end;
        Some(out)
    }

    fn u8(&mut self) -> Option<u8> {
        self.bytes(1).map(|b| b[0])
    }

    fn u16(&mut self) -> Option<u16> {
        self.bytes(2).map(|b| u16::from_le_bytes([b[0], b[1]]))
    }

    fn u32(&mut self) -> Option<u32> {
        self.bytes(4)
            .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncated_payload_decodes_to_none() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&MAGIC);
        buf.extend_from_slice(&SNAPSHOT_FORMAT_VERSION.to_le_bytes());
        buf.push(5);
        // Cut off before days/count.
        assert!(matches!(decode_snapshot(&buf), Ok(None)));
    }

    #[test]
    fn bad_magic_is_corrupt_not_truncated() {
        let err = decode_snapshot(b"XXXXrest").unwrap_err();
        assert!(matches!(err, PersistError::Corrupt(_)));
    }

    #[test]
    fn future_version_is_rejected() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&MAGIC);
        buf.extend_from_slice(&99u16.to_le_bytes());
        buf.extend_from_slice(&[5, 31, 0, 0, 0, 0]);
        let err = decode_snapshot(&buf).unwrap_err();
        assert!(matches!(err, PersistError::UnsupportedVersion(99)));
    }
}
