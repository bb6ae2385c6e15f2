use crate::model::chart::{Chart, Note};
use anyhow::{Result, anyhow};
use log::debug;
use std::fs;
use std::path::Path;

/// One `x|y|ms` entry of a note listing, as read back for playback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListingNote {
    pub x: f64,
    pub y: f64,
    pub time_ms: f64,
}

impl From<&Note> for ListingNote {
    fn from(note: &Note) -> Self {
        Self {
            x: note.x.as_f64(),
            y: note.y.as_f64(),
            time_ms: note.timestamp_ms as f64,
        }
    }
}

pub fn chart_to_listing(chart: &Chart) -> Vec<ListingNote> {
    chart.notes.iter().map(ListingNote::from).collect()
}

/// Parses `x|y|ms` lines. Lines with fewer than three fields or unparsable numbers
/// (blank lines, the `# Total Notes` summary) are skipped. Extra fields are ignored.
pub fn parse_listing(text: &str) -> Vec<ListingNote> {
    let mut notes = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        let parts: Vec<&str> = line.trim().split('|').collect();
        if parts.len() < 3 {
            continue;
        }

        match (
            parts[0].trim().parse::<f64>(),
            parts[1].trim().parse::<f64>(),
            parts[2].trim().parse::<f64>(),
        ) {
            (Ok(x), Ok(y), Ok(time_ms)) => notes.push(ListingNote { x, y, time_ms }),
            _ => debug!("Skipping unparsable listing line {}: '{}'", line_no + 1, line),
        }
    }

    notes
}

pub fn read_listing_file<P: AsRef<Path>>(path: P) -> Result<Vec<ListingNote>> {
    let text = fs::read_to_string(path.as_ref()).map_err(|e| {
        anyhow!(
            "Failed to read note listing {}: {}",
            path.as_ref().display(),
            e
        )
    })?;

    Ok(parse_listing(&text))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::exporter::render_txt;

    #[test]
    fn parses_exported_listing() {
        env_logger::try_init().unwrap_or(());

        let chart = Chart {
            notes: vec![
                Note::grid(1, 2, 100),
                Note::quantum(0.5, -0.25, 250),
                Note::quantum(1e-5, 2.0, 300),
            ],
            ..Default::default()
        };

        let notes = parse_listing(&render_txt(&chart).unwrap());
        assert_eq!(notes, chart_to_listing(&chart));
        assert_eq!(
            notes[0],
            ListingNote {
                x: 1.0,
                y: 2.0,
                time_ms: 100.0
            }
        );
    }

    #[test]
    fn skips_summary_blank_and_garbage_lines() {
        env_logger::try_init().unwrap_or(());

        let text = "0|0|10\n\
                    \n\
                    hello|world|now\n\
                    1|2\n\
                    \x20 2 | 1 | 20 | extra \n\
                    # Total Notes: 2\n";

        assert_eq!(
            parse_listing(text),
            vec![
                ListingNote {
                    x: 0.0,
                    y: 0.0,
                    time_ms: 10.0
                },
                ListingNote {
                    x: 2.0,
                    y: 1.0,
                    time_ms: 20.0
                },
            ]
        );
    }

    #[test]
    fn keeps_file_order() {
        env_logger::try_init().unwrap_or(());

        let notes = parse_listing("0|0|300\n1|1|100\n");
        assert_eq!(notes[0].time_ms, 300.0);
        assert_eq!(notes[1].time_ms, 100.0);
    }

    #[test]
    fn listing_file_round_trip() {
        env_logger::try_init().unwrap_or(());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "2|2|5\n\n\n# Total Notes: 1\n").unwrap();

        assert_eq!(read_listing_file(&path).unwrap().len(), 1);
        assert!(read_listing_file(dir.path().join("missing.txt")).is_err());
    }
}
