use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

use super::axis_break::DEFAULT_BREAK_SIZE;
use super::category_break::CategoryAxisBreak;

/// Break types that can be created by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AxisBreakKind {
    Category,
}

impl AxisBreakKind {
    pub const ALL: [Self; 1] = [Self::Category];

    #[must_use]
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Category => "CategoryAxisBreak",
        }
    }

    pub fn from_type_name(name: &str) -> ChartResult<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.type_name() == name)
            .ok_or_else(|| ChartError::UnknownBreakKind(name.to_owned()))
    }

    #[must_use]
    pub fn create(self) -> CategoryAxisBreak {
        match self {
            Self::Category => CategoryAxisBreak::new(),
        }
    }
}

/// Serialized break definition, tagged by break type name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AxisBreakConfig {
    #[serde(rename = "CategoryAxisBreak")]
    Category {
        #[serde(default)]
        start_category: Option<String>,
        #[serde(default)]
        end_category: Option<String>,
        #[serde(default)]
        start_value: Option<f64>,
        #[serde(default)]
        end_value: Option<f64>,
        #[serde(default = "default_break_size")]
        break_size: f64,
    },
}

impl AxisBreakConfig {
    #[must_use]
    pub fn kind(&self) -> AxisBreakKind {
        match self {
            Self::Category { .. } => AxisBreakKind::Category,
        }
    }

    /// Builds a detached break from this definition.
    pub fn into_break(self) -> ChartResult<CategoryAxisBreak> {
        let kind = self.kind();
        match self {
            Self::Category {
                start_category,
                end_category,
                start_value,
                end_value,
                break_size,
            } => {
                let mut axis_break = kind.create().with_break_size(break_size)?;
                if let Some(category) = start_category {
                    axis_break.set_start_category(category);
                }
                if let Some(category) = end_category {
                    axis_break.set_end_category(category);
                }
                if let Some(value) = start_value {
                    axis_break.set_start_value(value);
                }
                if let Some(value) = end_value {
                    axis_break.set_end_value(value);
                }
                Ok(axis_break)
            }
        }
    }
}

fn default_break_size() -> f64 {
    DEFAULT_BREAK_SIZE
}

#[cfg(test)]
mod tests {
    use super::AxisBreakKind;
    use crate::error::ChartError;

    #[test]
    fn type_name_round_trips_through_lookup() {
        for kind in AxisBreakKind::ALL {
            assert_eq!(
                AxisBreakKind::from_type_name(kind.type_name()).expect("known kind"),
                kind
            );
        }
    }

    #[test]
    fn unknown_type_name_is_rejected() {
        let err = AxisBreakKind::from_type_name("ValueAxisBreak").expect_err("unknown kind");
        assert!(matches!(err, ChartError::UnknownBreakKind(name) if name == "ValueAxisBreak"));
    }
}
