mod cursor;
mod engine;
mod error;
mod exporter;
mod format;
mod listing;
mod model;
mod normalizer;
mod player;
mod sspm_importer;
mod util;

#[cfg(test)]
mod fixtures;

pub use cursor::*;
pub use engine::*;
pub use error::*;
pub use exporter::*;
pub use format::{NOTE_MARKER, SIGNATURE, Version, decode_body, read_header};
pub use listing::*;
pub use model::chart::*;
pub use model::config::*;
pub use normalizer::*;
pub use player::*;
pub use sspm_importer::*;
pub use util::*;
