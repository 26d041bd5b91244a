use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ChartError, ChartResult};

use super::break_kind::AxisBreakConfig;
use super::category_axis::{AxisId, BreakId, CategoryAxis, DEFAULT_AXIS_LENGTH_PX};

/// Serializable category axis setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAxisConfig {
    pub categories: Vec<String>,
    #[serde(default = "default_length_px")]
    pub length_px: f64,
    #[serde(default)]
    pub breaks: Vec<AxisBreakConfig>,
}

impl CategoryAxisConfig {
    #[must_use]
    pub fn new<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
            length_px: default_length_px(),
            breaks: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_length_px(mut self, length_px: f64) -> Self {
        self.length_px = length_px;
        self
    }

    #[must_use]
    pub fn with_break(mut self, axis_break: AxisBreakConfig) -> Self {
        self.breaks.push(axis_break);
        self
    }

    /// Builds the axis, adopts every break and validates the data range.
    pub fn build(self, id: AxisId) -> ChartResult<(CategoryAxis, Vec<BreakId>)> {
        let mut axis = CategoryAxis::new(id, self.categories).with_length_px(self.length_px)?;
        let mut break_ids = Vec::with_capacity(self.breaks.len());
        for axis_break in self.breaks {
            break_ids.push(axis.add_break(axis_break.into_break()?));
        }
        axis.validate_data_range();
        debug!(axis = id.0, breaks = break_ids.len(), "built category axis");
        Ok((axis, break_ids))
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_length_px() -> f64 {
    DEFAULT_AXIS_LENGTH_PX
}
