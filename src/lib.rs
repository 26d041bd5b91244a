//! chart-axis-breaks: collapsed ranges on category chart axes.
//!
//! A [`CategoryAxis`] owns an ordered list of categories and the breaks placed
//! on it. Each [`CategoryAxisBreak`] names its range by category or by numeric
//! index, resolves against the axis on read, and invalidates the axis data
//! range whenever its configuration changes.

pub mod axis;
pub mod core;
pub mod error;
pub mod telemetry;

pub use axis::{
    AttachedBreak, AttachedBreakMut, AxisBreak, AxisBreakConfig, AxisBreakKind, AxisId, BreakId,
    CategoryAxis, CategoryAxisBreak, CategoryAxisConfig, CategoryAxisLink,
};
pub use error::{ChartError, ChartResult};
