use super::read_note;
use crate::cursor::ByteCursor;
use crate::error::DecodeResult;
use crate::model::chart::Chart;
use log::debug;

/// Cover tag value meaning "a length-prefixed cover payload follows".
const COVER_PRESENT: u8 = 2;

/// Smallest possible encoded note: ms + quantum flag + two grid bytes.
const MIN_NOTE_LEN: usize = 4 + 1 + 2;

/// Decodes the flat v1 body. The cursor must sit right after the version tag.
pub fn decode(cursor: &mut ByteCursor) -> DecodeResult<Chart> {
    cursor.skip(2)?;

    let map_id = cursor.line()?;
    let map_name = cursor.line()?;
    let mappers = cursor.line()?;

    let last_ms = cursor.u32()?;
    let note_count = cursor.u32()?;
    let difficulty = cursor.u8()?;
    debug!(
        "v1 map '{}' ({}): {} notes, last note at {}ms, difficulty {}",
        map_name, map_id, note_count, last_ms, difficulty
    );

    if cursor.u8()? == COVER_PRESENT {
        let cover_len = cursor.u64()?;
        debug!("Skipping {} byte cover..!", cover_len);
        cursor.skip(cover_len)?;
    }

    if cursor.bool()? {
        let audio_len = cursor.u64()?;
        debug!("Skipping {} byte audio..!", audio_len);
        cursor.skip(audio_len)?;
    }

    let capacity = (note_count as usize).min(cursor.remaining() / MIN_NOTE_LEN);
    let mut notes = Vec::with_capacity(capacity);
    for _ in 0..note_count {
        let ms = cursor.u32()?;
        notes.push(read_note(cursor, ms)?);
    }

    Ok(Chart {
        map_id,
        map_name,
        mappers,
        notes,
    })
}
