use super::{NOTE_MARKER, read_note};
use crate::cursor::ByteCursor;
use crate::error::DecodeResult;
use crate::model::chart::Chart;
use log::{debug, warn};

/// Smallest possible encoded marker: ms + type index + quantum flag + two grid bytes.
const MIN_MARKER_LEN: usize = 4 + 1 + 1 + 2;

/// Absolute position and byte length of one v2 section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Section {
    pub offset: u64,
    pub length: u64,
}

impl Section {
    fn read(cursor: &mut ByteCursor) -> DecodeResult<Self> {
        Ok(Self {
            offset: cursor.u64()?,
            length: cursor.u64()?,
        })
    }
}

/// The five section descriptors, in on-disk order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct SectionTable {
    pub custom_data: Section,
    pub audio: Section,
    pub cover: Section,
    pub marker_definitions: Section,
    pub markers: Section,
}

impl SectionTable {
    fn read(cursor: &mut ByteCursor) -> DecodeResult<Self> {
        Ok(Self {
            custom_data: Section::read(cursor)?,
            audio: Section::read(cursor)?,
            cover: Section::read(cursor)?,
            marker_definitions: Section::read(cursor)?,
            markers: Section::read(cursor)?,
        })
    }
}

/// Decodes the offset-indexed v2 body. The cursor must sit right after the version tag.
pub fn decode(cursor: &mut ByteCursor) -> DecodeResult<Chart> {
    // reserved, then the unverified hash
    cursor.skip(4)?;
    cursor.skip(20)?;

    let last_ms = cursor.u32()?;
    let note_count = cursor.u32()?;
    let marker_count = cursor.u32()?;

    let difficulty = cursor.u8()?;
    let rating = cursor.u16()?;
    let contains_audio = cursor.bool()?;
    let contains_cover = cursor.bool()?;
    let requires_mod = cursor.bool()?;
    debug!(
        "v2 header: {} notes, {} markers, last note at {}ms, difficulty {}, rating {}, audio: {}, cover: {}, mod: {}",
        note_count,
        marker_count,
        last_ms,
        difficulty,
        rating,
        contains_audio,
        contains_cover,
        requires_mod
    );

    let sections = SectionTable::read(cursor)?;
    for (name, section) in [
        ("custom data", sections.custom_data),
        ("audio", sections.audio),
        ("cover", sections.cover),
    ] {
        debug!(
            "Skipping {} section: {} bytes at offset {}",
            name, section.length, section.offset
        );
    }
    debug!(
        "Marker definitions: {} bytes at offset {}, markers: {} bytes at offset {}",
        sections.marker_definitions.length,
        sections.marker_definitions.offset,
        sections.markers.length,
        sections.markers.offset
    );

    let map_id = cursor.string_u16()?;
    let map_name = cursor.string_u16()?;
    let song_name = cursor.string_u16()?;
    debug!("v2 map '{}' ({}), song '{}'", map_name, map_id, song_name);

    let mapper_count = cursor.u16()?;
    let mut mappers = Vec::with_capacity(mapper_count.min(64) as usize);
    for _ in 0..mapper_count {
        mappers.push(cursor.string_u16()?);
    }

    let mut chart = Chart {
        map_id,
        map_name,
        mappers: mappers.join("\n"),
        notes: Vec::new(),
    };

    cursor.seek(sections.marker_definitions.offset)?;
    if !first_definition_is_note(cursor)? {
        warn!(
            "First marker definition is not '{}', treating the map as having no notes..!",
            NOTE_MARKER
        );
        return Ok(chart);
    }

    cursor.seek(sections.markers.offset)?;
    let capacity = (note_count as usize).min(cursor.remaining() / MIN_MARKER_LEN);
    chart.notes.reserve(capacity);
    for _ in 0..note_count {
        let ms = cursor.u32()?;
        // only definition 0 is ever a note, so the type index carries nothing here
        let _marker_type = cursor.u8()?;
        chart.notes.push(read_note(cursor, ms)?);
    }

    Ok(chart)
}

/// Walks the whole marker definition table and reports whether definition 0 is the note type.
///
/// Only index 0 is considered; a note definition at any other index is not recognised.
/// The bytes after each definition's value count are opaque and skipped up to
/// and including the first zero byte.
fn first_definition_is_note(cursor: &mut ByteCursor) -> DecodeResult<bool> {
    let definition_count = cursor.u8()?;
    let mut has_notes = false;

    for i in 0..definition_count {
        let name = cursor.string_u16()?;
        let value_count = cursor.u8()?;
        debug!("Marker definition {}: '{}' ({} values)", i, name, value_count);

        if i == 0 && name == NOTE_MARKER {
            has_notes = true;
        }

        while cursor.u8()? != 0 {}
    }

    Ok(has_notes)
}
