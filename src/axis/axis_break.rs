use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

pub const DEFAULT_BREAK_SIZE: f64 = 0.01;

/// Generic discontinuity state shared by every break kind.
///
/// `break_size` is the share of the break's natural span that stays visible
/// once the axis compresses it. Adjusted values are written by the owning axis
/// when it validates its data range; they stay `None` until then.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisBreak {
    break_size: f64,
    #[serde(skip)]
    adjusted_start_value: Option<f64>,
    #[serde(skip)]
    adjusted_end_value: Option<f64>,
}

impl Default for AxisBreak {
    fn default() -> Self {
        Self::new()
    }
}

impl AxisBreak {
    #[must_use]
    pub fn new() -> Self {
        Self {
            break_size: DEFAULT_BREAK_SIZE,
            adjusted_start_value: None,
            adjusted_end_value: None,
        }
    }

    pub fn with_break_size(break_size: f64) -> ChartResult<Self> {
        let mut axis_break = Self::new();
        axis_break.set_break_size(break_size)?;
        Ok(axis_break)
    }

    #[must_use]
    pub fn break_size(&self) -> f64 {
        self.break_size
    }

    /// Returns `true` when the size changed.
    pub fn set_break_size(&mut self, break_size: f64) -> ChartResult<bool> {
        let break_size = validate_break_size(break_size)?;
        if self.break_size == break_size {
            return Ok(false);
        }
        self.break_size = break_size;
        Ok(true)
    }

    #[must_use]
    pub fn adjusted_start_value(&self) -> Option<f64> {
        self.adjusted_start_value
    }

    #[must_use]
    pub fn adjusted_end_value(&self) -> Option<f64> {
        self.adjusted_end_value
    }

    /// Span that remains after compression, in axis units.
    #[must_use]
    pub fn collapsed_span(&self) -> Option<f64> {
        let (start, end) = self.adjusted_range()?;
        Some((end - start) * self.break_size)
    }

    #[must_use]
    pub fn adjusted_range(&self) -> Option<(f64, f64)> {
        Some((self.adjusted_start_value?, self.adjusted_end_value?))
    }

    pub(crate) fn set_adjusted_range(&mut self, range: Option<(f64, f64)>) {
        self.adjusted_start_value = range.map(|(start, _)| start);
        self.adjusted_end_value = range.map(|(_, end)| end);
    }
}

pub(crate) fn validate_break_size(break_size: f64) -> ChartResult<f64> {
    if !break_size.is_finite() || !(0.0..=1.0).contains(&break_size) {
        return Err(ChartError::InvalidBreakSize(break_size));
    }
    Ok(break_size)
}
