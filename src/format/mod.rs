use crate::cursor::ByteCursor;
use crate::error::{DecodeError, DecodeResult};
use crate::model::chart::{Chart, Note};
use log::debug;

pub mod v1;
pub mod v2;

pub const SIGNATURE: &[u8; 4] = b"SS+m";

/// Marker definition name that identifies position-bearing notes in v2 files.
pub const NOTE_MARKER: &str = "ssp_note";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    /// Flat sequential layout.
    V1,
    /// Offset-indexed sections with a marker definition table.
    V2,
}

/// Reads the signature and version tag, leaving the cursor at the start of the version body.
///
/// A bad signature is reported before anything past it is read.
pub fn read_header(cursor: &mut ByteCursor) -> DecodeResult<Version> {
    let signature = cursor.bytes(SIGNATURE.len())?;
    if signature != SIGNATURE.as_slice() {
        let mut got = [0u8; 4];
        got.copy_from_slice(signature);
        return Err(DecodeError::BadSignature { got });
    }

    let version = cursor.u16()?;
    debug!("SSPM version: {}", version);

    match version {
        1 => Ok(Version::V1),
        2 => Ok(Version::V2),
        other => Err(DecodeError::UnsupportedVersion(other)),
    }
}

/// Decodes the body following the header into a raw chart (file order, unscaled timestamps).
pub fn decode_body(cursor: &mut ByteCursor, version: Version) -> DecodeResult<Chart> {
    match version {
        Version::V1 => v1::decode(cursor),
        Version::V2 => v2::decode(cursor),
    }
}

/// Reads the `is_quantum` flag and the coordinate pair that follows it.
fn read_note(cursor: &mut ByteCursor, ms: u32) -> DecodeResult<Note> {
    let note = if cursor.bool()? {
        let x = cursor.f32()?;
        let y = cursor.f32()?;
        Note::quantum(x, y, ms as u64)
    } else {
        let x = cursor.u8()?;
        let y = cursor.u8()?;
        Note::grid(x, y, ms as u64)
    };

    Ok(note)
}
