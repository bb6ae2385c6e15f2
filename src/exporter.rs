use crate::model::chart::Chart;
use anyhow::{Result, anyhow};
use log::debug;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// One `x|y|timestamp_ms` line per note, two blank lines, then the note total.
fn write_listing<W: fmt::Write>(chart: &Chart, out: &mut W) -> fmt::Result {
    for note in &chart.notes {
        writeln!(out, "{}|{}|{}", note.x, note.y, note.timestamp_ms)?;
    }
    out.write_str("\n\n")?;
    writeln!(out, "# Total Notes: {}", chart.notes.len())
}

pub fn render_txt(chart: &Chart) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_listing(chart, &mut out)?;
    Ok(out)
}

pub fn write_txt<W: io::Write>(chart: &Chart, mut writer: W) -> io::Result<()> {
    let text = render_txt(chart).map_err(io::Error::other)?;
    writer.write_all(text.as_bytes())?;
    writer.flush()
}

pub fn render_json(chart: &Chart) -> Result<String> {
    serde_json::to_string_pretty(chart).map_err(|e| anyhow!("Failed to serialize chart: {}", e))
}

pub fn export_txt_file<P: AsRef<Path>>(chart: &Chart, path: P) -> Result<()> {
    let file = create(path.as_ref())?;
    write_txt(chart, BufWriter::new(file))
        .map_err(|e| anyhow!("Failed to write {}: {}", path.as_ref().display(), e))?;

    debug!(
        "Wrote {} notes to {}",
        chart.notes.len(),
        path.as_ref().display()
    );
    Ok(())
}

pub fn export_json_file<P: AsRef<Path>>(chart: &Chart, path: P) -> Result<()> {
    let json = render_json(chart)?;
    let mut file = create(path.as_ref())?;
    file.write_all(json.as_bytes())
        .map_err(|e| anyhow!("Failed to write {}: {}", path.as_ref().display(), e))?;

    debug!("Wrote chart JSON to {}", path.as_ref().display());
    Ok(())
}

fn create(path: &Path) -> Result<File> {
    File::create(path).map_err(|e| anyhow!("Failed to create {}: {}", path.display(), e))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::chart::Note;

    fn chart_with(notes: Vec<Note>) -> Chart {
        Chart {
            map_id: "ss_archive_test".into(),
            map_name: "Test".into(),
            mappers: "someone".into(),
            notes,
        }
    }

    #[test]
    fn grid_notes_render_as_integers() {
        env_logger::try_init().unwrap_or(());

        let chart = chart_with(vec![
            Note::grid(1, 2, 100),
            Note::grid(1, 2, 300),
            Note::grid(1, 2, 500),
        ]);

        assert_eq!(
            render_txt(&chart).unwrap(),
            "1|2|100\n1|2|300\n1|2|500\n\n\n# Total Notes: 3\n"
        );
    }

    #[test]
    fn quantum_notes_render_as_floats() {
        env_logger::try_init().unwrap_or(());

        let chart = chart_with(vec![
            Note::quantum(1.0, 0.5, 10),
            Note::quantum(-0.25, 2.75, 20),
        ]);

        assert_eq!(
            render_txt(&chart).unwrap(),
            "1.0|0.5|10\n-0.25|2.75|20\n\n\n# Total Notes: 2\n"
        );
    }

    #[test]
    fn empty_chart_still_has_summary() {
        env_logger::try_init().unwrap_or(());

        assert_eq!(
            render_txt(&chart_with(Vec::new())).unwrap(),
            "\n\n# Total Notes: 0\n"
        );
    }

    #[test]
    fn writer_gets_the_same_text() {
        env_logger::try_init().unwrap_or(());

        let chart = chart_with(vec![Note::quantum(18014398509481984.0, 1.0, 3), Note::grid(255, 0, 4)]);
        let mut out = Vec::new();
        write_txt(&chart, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), render_txt(&chart).unwrap());
        assert!(render_txt(&chart).unwrap().starts_with("1.8014398509481984e+16|1.0|3\n255|0|4\n"));
    }

    #[test]
    fn json_keeps_coordinate_encoding() {
        env_logger::try_init().unwrap_or(());

        let chart = chart_with(vec![Note::grid(2, 0, 5), Note::quantum(1.0, 0.5, 6)]);
        let json = render_json(&chart).unwrap();
        let back: Chart = serde_json::from_str(&json).unwrap();

        assert_eq!(back, chart);
        assert!(!back.notes[0].is_quantum());
        assert!(back.notes[1].is_quantum());
    }

    #[test]
    fn txt_file_export() {
        env_logger::try_init().unwrap_or(());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let chart = chart_with(vec![Note::grid(0, 1, 42)]);

        export_txt_file(&chart, &path).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "0|1|42\n\n\n# Total Notes: 1\n"
        );
    }

    #[test]
    fn export_into_missing_directory_fails() {
        env_logger::try_init().unwrap_or(());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.txt");

        assert!(export_txt_file(&chart_with(Vec::new()), &path).is_err());
        assert!(export_json_file(&chart_with(Vec::new()), &path).is_err());
    }
}
