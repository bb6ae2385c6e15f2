use serde::{Deserialize, Serialize};
use std::fmt;

/// A single note coordinate, kept in the encoding it was decoded from.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(untagged)]
pub enum Coord {
    /// Fixed-grid byte coordinate.
    Grid(u8),
    /// Free-form "quantum" coordinate.
    Quantum(f32),
}

impl Coord {
    pub fn as_f64(self) -> f64 {
        match self {
            Coord::Grid(v) => v as f64,
            Coord::Quantum(v) => v as f64,
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coord::Grid(v) => write!(f, "{}", v),
            Coord::Quantum(v) => f.write_str(&float_repr(*v as f64)),
        }
    }
}

/// Shortest round-trip form with a decimal point on whole numbers (`1.0`) and a
/// signed, two-digit exponent outside `1e-4..1e16` (`1e-05`, `1.5e+16`).
pub fn float_repr(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_owned();
    }

    let repr = format!("{:?}", v);
    let Some((mantissa, exponent)) = repr.split_once('e') else {
        return repr;
    };

    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{}e{}{:0>2}", mantissa, sign, digits)
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub x: Coord,
    pub y: Coord,
    pub timestamp_ms: u64,
}

impl Note {
    pub fn grid(x: u8, y: u8, timestamp_ms: u64) -> Self {
        Self {
            x: Coord::Grid(x),
            y: Coord::Grid(y),
            timestamp_ms,
        }
    }

    pub fn quantum(x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self {
            x: Coord::Quantum(x),
            y: Coord::Quantum(y),
            timestamp_ms,
        }
    }

    pub fn is_quantum(&self) -> bool {
        matches!(self.x, Coord::Quantum(_))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Chart {
    pub map_id: String,
    pub map_name: String,
    /// Newline-joined mapper names.
    pub mappers: String,
    pub notes: Vec<Note>,
}
