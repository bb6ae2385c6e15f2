use crate::cursor::ByteCursor;
use crate::error::DecodeResult;
use crate::format::{decode_body, read_header};
use crate::model::chart::Chart;
use crate::normalizer::{TimeScale, normalize};
use anyhow::{Result, anyhow};
use log::debug;
use std::fs;
use std::path::Path;

/// Reads and decodes an `.sspm` file, returning time-sorted notes scaled by `time_scale`.
pub fn import_sspm_file<P: AsRef<Path>>(path: P, time_scale: f64) -> Result<Chart> {
    let bytes = fs::read(path.as_ref()).map_err(|e| {
        anyhow!(
            "Failed to read SSPM file {}: {}",
            path.as_ref().display(),
            e
        )
    })?;

    decode(&bytes, time_scale).map_err(|e| {
        anyhow!(
            "Failed to decode SSPM file {}: {}",
            path.as_ref().display(),
            e
        )
    })
}

/// Decodes `bytes` and normalizes the result: timestamps divided by `time_scale`
/// (truncating), notes stably sorted by time.
pub fn decode(bytes: &[u8], time_scale: f64) -> DecodeResult<Chart> {
    let scale = TimeScale::new(time_scale)?;
    let chart = decode_raw(bytes)?;

    Ok(normalize(chart, scale))
}

/// Decodes `bytes` without scaling or sorting; notes stay in file order.
pub fn decode_raw(bytes: &[u8]) -> DecodeResult<Chart> {
    let mut cursor = ByteCursor::new(bytes);
    let version = read_header(&mut cursor)?;
    let chart = decode_body(&mut cursor, version)?;

    debug!(
        "Decoded {:?} map '{}' with {} notes ({} of {} bytes consumed)",
        version,
        chart.map_name,
        chart.notes.len(),
        cursor.position(),
        bytes.len()
    );

    Ok(chart)
}
