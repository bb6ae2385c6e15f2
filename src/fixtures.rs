use crate::format::{NOTE_MARKER, SIGNATURE};

#[derive(Debug, Clone, Copy)]
pub enum RawNote {
    Grid(u32, u8, u8),
    Quantum(u32, f32, f32),
}

impl RawNote {
    fn write_position(&self, out: &mut Vec<u8>) {
        match *self {
            RawNote::Grid(_, x, y) => {
                out.push(0);
                out.push(x);
                out.push(y);
            }
            RawNote::Quantum(_, x, y) => {
                out.push(1);
                out.extend_from_slice(&x.to_le_bytes());
                out.extend_from_slice(&y.to_le_bytes());
            }
        }
    }

    fn ms(&self) -> u32 {
        match *self {
            RawNote::Grid(ms, ..) | RawNote::Quantum(ms, ..) => ms,
        }
    }
}

fn varstr(out: &mut Vec<u8>, s: &str) {
    out.extend_from_slice(&(s.len() as u16).to_le_bytes());
    out.extend_from_slice(s.as_bytes());
}

/// Lays out a synthetic v1 `.sspm` buffer.
#[derive(Debug, Clone)]
pub struct V1Builder {
    pub map_id: String,
    pub map_name: String,
    pub mappers: String,
    pub cover: Option<Vec<u8>>,
    pub audio: Option<Vec<u8>>,
    pub notes: Vec<RawNote>,
}

impl Default for V1Builder {
    fn default() -> Self {
        Self {
            map_id: "ss_archive_test_map".into(),
            map_name: "Test Map".into(),
            mappers: "someone".into(),
            cover: None,
            audio: None,
            notes: Vec::new(),
        }
    }
}

impl V1Builder {
    pub fn notes(mut self, notes: &[RawNote]) -> Self {
        self.notes = notes.to_vec();
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(SIGNATURE);
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&[0, 0]);

        for field in [&self.map_id, &self.map_name, &self.mappers] {
            out.extend_from_slice(field.as_bytes());
            out.push(b'\n');
        }

        let last_ms = self.notes.iter().map(RawNote::ms).max().unwrap_or(0);
        out.extend_from_slice(&last_ms.to_le_bytes());
        out.extend_from_slice(&(self.notes.len() as u32).to_le_bytes());
        out.push(3); // difficulty

        match &self.cover {
            Some(cover) => {
                out.push(2);
                out.extend_from_slice(&(cover.len() as u64).to_le_bytes());
                out.extend_from_slice(cover);
            }
            None => out.push(0),
        }

        match &self.audio {
            Some(audio) => {
                out.push(1);
                out.extend_from_slice(&(audio.len() as u64).to_le_bytes());
                out.extend_from_slice(audio);
            }
            None => out.push(0),
        }

        for note in &self.notes {
            out.extend_from_slice(&note.ms().to_le_bytes());
            note.write_position(&mut out);
        }

        out
    }
}

/// Lays out a synthetic v2 `.sspm` buffer.
#[derive(Debug, Clone)]
pub struct V2Builder {
    pub map_id: String,
    pub map_name: String,
    pub song_name: String,
    pub mappers: Vec<String>,
    /// Definition names paired with their opaque value-type bytes (all nonzero).
    pub definitions: Vec<(String, Vec<u8>)>,
    pub custom_data: Vec<u8>,
    pub audio: Vec<u8>,
    pub cover: Vec<u8>,
    pub notes: Vec<RawNote>,
    /// Overrides the header's note count when set.
    pub note_count: Option<u32>,
    /// Overrides the markers section offset when set.
    pub markers_offset: Option<u64>,
}

impl Default for V2Builder {
    fn default() -> Self {
        Self {
            map_id: "ss_archive_test_map".into(),
            map_name: "Test Map".into(),
            song_name: "Test Song".into(),
            mappers: vec!["someone".into()],
            definitions: vec![(NOTE_MARKER.into(), vec![0x07])],
            custom_data: Vec::new(),
            audio: Vec::new(),
            cover: Vec::new(),
            notes: Vec::new(),
            note_count: None,
            markers_offset: None,
        }
    }
}

impl V2Builder {
    pub fn notes(mut self, notes: &[RawNote]) -> Self {
        self.notes = notes.to_vec();
        self
    }

    /// Sections are laid out as custom data, definitions, audio, markers, cover,
    /// so reaching the markers requires seeking over the audio payload.
    pub fn build(&self) -> Vec<u8> {
        let mut strings = Vec::new();
        varstr(&mut strings, &self.map_id);
        varstr(&mut strings, &self.map_name);
        varstr(&mut strings, &self.song_name);
        strings.extend_from_slice(&(self.mappers.len() as u16).to_le_bytes());
        for mapper in &self.mappers {
            varstr(&mut strings, mapper);
        }

        let mut definitions = vec![self.definitions.len() as u8];
        for (name, values) in &self.definitions {
            varstr(&mut definitions, name);
            definitions.push(values.len() as u8);
            definitions.extend_from_slice(values);
            definitions.push(0);
        }

        let mut markers = Vec::new();
        for note in &self.notes {
            markers.extend_from_slice(&note.ms().to_le_bytes());
            markers.push(0);
            note.write_position(&mut markers);
        }

        const FIXED_HEADER: u64 = 4 + 2 + 4 + 20 + 4 + 4 + 4 + 1 + 2 + 1 + 1 + 1 + 5 * 16;
        let custom_offset = FIXED_HEADER + strings.len() as u64;
        let defs_offset = custom_offset + self.custom_data.len() as u64;
        let audio_offset = defs_offset + definitions.len() as u64;
        let markers_offset = audio_offset + self.audio.len() as u64;
        let cover_offset = markers_offset + markers.len() as u64;

        let mut out = Vec::new();
        out.extend_from_slice(SIGNATURE);
        out.extend_from_slice(&2u16.to_le_bytes());
        out.extend_from_slice(&[0; 4]);
        out.extend_from_slice(&[0xAB; 20]);

        let last_ms = self.notes.iter().map(RawNote::ms).max().unwrap_or(0);
        let note_count = self.note_count.unwrap_or(self.notes.len() as u32);
        out.extend_from_slice(&last_ms.to_le_bytes());
        out.extend_from_slice(&note_count.to_le_bytes());
        out.extend_from_slice(&(self.notes.len() as u32).to_le_bytes());
        out.push(2); // difficulty
        out.extend_from_slice(&0u16.to_le_bytes()); // rating
        out.push(!self.audio.is_empty() as u8);
        out.push(!self.cover.is_empty() as u8);
        out.push(0);

        let sections = [
            (custom_offset, self.custom_data.len() as u64),
            (audio_offset, self.audio.len() as u64),
            (cover_offset, self.cover.len() as u64),
            (defs_offset, definitions.len() as u64),
            (
                self.markers_offset.unwrap_or(markers_offset),
                markers.len() as u64,
            ),
        ];
        for (offset, len) in sections {
            out.extend_from_slice(&offset.to_le_bytes());
            out.extend_from_slice(&len.to_le_bytes());
        }
        assert_eq!(out.len() as u64, FIXED_HEADER);

        out.extend_from_slice(&strings);
        out.extend_from_slice(&self.custom_data);
        out.extend_from_slice(&definitions);
        out.extend_from_slice(&self.audio);
        out.extend_from_slice(&markers);
        out.extend_from_slice(&self.cover);

        out
    }
}
