pub mod axis_break;
pub mod break_kind;
pub mod category_axis;
pub mod category_break;
pub mod config;
pub mod property_store;

pub use axis_break::{AxisBreak, DEFAULT_BREAK_SIZE};
pub use break_kind::{AxisBreakConfig, AxisBreakKind};
pub use category_axis::{
    AttachedBreak, AttachedBreakMut, AxisId, BreakId, CategoryAxis, DEFAULT_AXIS_LENGTH_PX,
};
pub use category_break::{CategoryAxisBreak, CategoryAxisLink};
pub use config::CategoryAxisConfig;
pub use property_store::{BreakProperty, PropertyStore, PropertyValue};
