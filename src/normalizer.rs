use crate::error::{DecodeError, DecodeResult};
use crate::model::chart::Chart;
use log::debug;

/// A validated time-scale divisor. Always positive and finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale(f64);

impl TimeScale {
    pub const IDENTITY: TimeScale = TimeScale(1.0);

    pub fn new(factor: f64) -> DecodeResult<Self> {
        if factor.is_finite() && factor > 0.0 {
            Ok(Self(factor))
        } else {
            Err(DecodeError::InvalidScale(factor))
        }
    }

    pub fn factor(self) -> f64 {
        self.0
    }

    /// Divides and truncates toward zero, e.g. `2001 / 2.0 -> 1000`.
    pub fn apply(self, timestamp_ms: u64) -> u64 {
        (timestamp_ms as f64 / self.0) as u64
    }
}

impl Default for TimeScale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TryFrom<f64> for TimeScale {
    type Error = DecodeError;

    fn try_from(factor: f64) -> DecodeResult<Self> {
        Self::new(factor)
    }
}

/// Scales every timestamp, then sorts notes ascending by time.
///
/// The sort is stable, so notes sharing a timestamp keep their file order.
pub fn normalize(mut chart: Chart, scale: TimeScale) -> Chart {
    for note in chart.notes.iter_mut() {
        note.timestamp_ms = scale.apply(note.timestamp_ms);
    }
    chart.notes.sort_by_key(|note| note.timestamp_ms);

    debug!(
        "Normalized {} notes with time scale {}",
        chart.notes.len(),
        scale.factor()
    );

    chart
}
