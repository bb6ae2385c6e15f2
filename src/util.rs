use crate::listing::{ListingNote, chart_to_listing, read_listing_file};
use crate::sspm_importer::import_sspm_file;
use anyhow::{Result, bail};
use log::info;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// `x|y|ms` lines followed by the note total.
    #[default]
    Txt,

    /// The whole chart, metadata included, as pretty-printed JSON.
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Json => "json",
        }
    }
}

pub fn parse_format(s: &str) -> ExportFormat {
    match s.to_lowercase().as_str() {
        "t" | "txt" | "text" => ExportFormat::Txt,
        "j" | "json" => ExportFormat::Json,
        other => {
            info!("Unknown format '{}', defaulting to `txt`..!", other);
            ExportFormat::Txt
        }
    }
}

/// Where to write when no output path was given: next to the input, with the format's extension.
pub fn default_output_path(input: &Path, format: ExportFormat) -> PathBuf {
    input.with_extension(format.extension())
}

pub fn ensure_sspm_extension(path: &Path) -> Result<()> {
    if !has_sspm_extension(path) {
        bail!(
            "'{}' is not a .sspm file..! Pass --force to convert it anyway.",
            path.display()
        );
    }
    Ok(())
}

fn has_sspm_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("sspm"))
}

/// Parses `WIDTHxHEIGHT`, e.g. `1920x1080`.
pub fn parse_screen_size(s: &str) -> Option<(i32, i32)> {
    let (width, height) = s.trim().split_once(['x', 'X'])?;
    let width: i32 = width.trim().parse().ok()?;
    let height: i32 = height.trim().parse().ok()?;

    (width > 0 && height > 0).then_some((width, height))
}

pub fn parse_delay(seconds: f64) -> Result<Duration> {
    if seconds < 0.0 {
        bail!("Start delay cannot be negative (got {})..!", seconds);
    }
    Duration::try_from_secs_f64(seconds)
        .map_err(|e| anyhow::anyhow!("Invalid start delay {}: {}", seconds, e))
}

/// Notes to play back: `.sspm` files are decoded and scaled, anything else is read as a listing.
pub fn load_playback_notes(path: &Path, time_scale: f64) -> Result<Vec<ListingNote>> {
    if has_sspm_extension(path) {
        let chart = import_sspm_file(path, time_scale)?;
        Ok(chart_to_listing(&chart))
    } else {
        read_listing_file(path)
    }
}
