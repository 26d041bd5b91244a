use serde::{Deserialize, Serialize};

use crate::error::ChartResult;

use super::axis_break::AxisBreak;
use super::category_axis::AxisId;
use super::property_store::{BreakProperty, PropertyStore, PropertyValue};

/// What a category break needs from the axis it is attached to.
pub trait CategoryAxisLink {
    /// Resolves a category name to its index on the axis.
    fn category_to_index(&self, category: &str) -> Option<f64>;

    /// Converts an axis index into a pixel position along the axis.
    fn index_to_position(&self, index: f64) -> Option<f64>;
}

/// One collapsed range on a category axis.
///
/// The range is given by a start and end category, or by numeric start/end
/// indices when the matching category is unset. Category names are resolved
/// against the axis on every read, so the result always follows the axis's
/// current category order.
///
/// A detached break only records its configuration. Once adopted by a
/// [`CategoryAxis`](super::CategoryAxis) it is read and edited through
/// [`AttachedBreak`](super::AttachedBreak) / [`AttachedBreakMut`](super::AttachedBreakMut),
/// which resolve against that axis and invalidate its data range on change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryAxisBreak {
    base: AxisBreak,
    properties: PropertyStore,
    #[serde(skip)]
    axis: Option<AxisId>,
}

impl CategoryAxisBreak {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_categories(start: impl Into<String>, end: impl Into<String>) -> Self {
        let mut axis_break = Self::new();
        axis_break.set_start_category(start);
        axis_break.set_end_category(end);
        axis_break
    }

    #[must_use]
    pub fn with_values(start: f64, end: f64) -> Self {
        let mut axis_break = Self::new();
        axis_break.set_start_value(start);
        axis_break.set_end_value(end);
        axis_break
    }

    pub fn with_break_size(mut self, break_size: f64) -> ChartResult<Self> {
        self.base.set_break_size(break_size)?;
        Ok(self)
    }

    #[must_use]
    pub fn base(&self) -> &AxisBreak {
        &self.base
    }

    pub(crate) fn base_mut(&mut self) -> &mut AxisBreak {
        &mut self.base
    }

    #[must_use]
    pub fn properties(&self) -> &PropertyStore {
        &self.properties
    }

    /// Handle of the axis holding this break, if any.
    #[must_use]
    pub fn axis_id(&self) -> Option<AxisId> {
        self.axis
    }

    pub(crate) fn attach(&mut self, axis: AxisId) {
        self.axis = Some(axis);
    }

    pub(crate) fn detach(&mut self) {
        self.axis = None;
        self.base.set_adjusted_range(None);
    }

    #[must_use]
    pub fn start_category(&self) -> Option<&str> {
        self.properties.text(BreakProperty::StartCategory)
    }

    #[must_use]
    pub fn end_category(&self) -> Option<&str> {
        self.properties.text(BreakProperty::EndCategory)
    }

    /// Returns `true` when the stored value changed.
    pub fn set_start_category(&mut self, category: impl Into<String>) -> bool {
        self.properties.set(
            BreakProperty::StartCategory,
            Some(PropertyValue::Text(category.into())),
        )
    }

    pub fn clear_start_category(&mut self) -> bool {
        self.properties.set(BreakProperty::StartCategory, None)
    }

    pub fn set_end_category(&mut self, category: impl Into<String>) -> bool {
        self.properties.set(
            BreakProperty::EndCategory,
            Some(PropertyValue::Text(category.into())),
        )
    }

    pub fn clear_end_category(&mut self) -> bool {
        self.properties.set(BreakProperty::EndCategory, None)
    }

    pub fn set_start_value(&mut self, value: f64) -> bool {
        self.properties
            .set(BreakProperty::StartValue, Some(PropertyValue::Number(value)))
    }

    pub fn clear_start_value(&mut self) -> bool {
        self.properties.set(BreakProperty::StartValue, None)
    }

    pub fn set_end_value(&mut self, value: f64) -> bool {
        self.properties
            .set(BreakProperty::EndValue, Some(PropertyValue::Number(value)))
    }

    pub fn clear_end_value(&mut self) -> bool {
        self.properties.set(BreakProperty::EndValue, None)
    }

    /// Numeric fallback stored for the start, ignoring any start category.
    #[must_use]
    pub fn stored_start_value(&self) -> Option<f64> {
        self.properties.number(BreakProperty::StartValue)
    }

    #[must_use]
    pub fn stored_end_value(&self) -> Option<f64> {
        self.properties.number(BreakProperty::EndValue)
    }

    /// Start index without an axis to resolve against.
    ///
    /// A set start category cannot be resolved here, so the result is absent.
    #[must_use]
    pub fn start_value(&self) -> Option<f64> {
        self.start_value_with(None)
    }

    #[must_use]
    pub fn end_value(&self) -> Option<f64> {
        self.end_value_with(None)
    }

    /// Positions need an axis; a detached break has none.
    #[must_use]
    pub fn start_position(&self) -> Option<f64> {
        self.start_position_with(None)
    }

    #[must_use]
    pub fn end_position(&self) -> Option<f64> {
        self.end_position_with(None)
    }

    #[must_use]
    pub fn start_value_with(&self, axis: Option<&dyn CategoryAxisLink>) -> Option<f64> {
        resolve_value(self.start_category(), self.stored_start_value(), axis)
    }

    #[must_use]
    pub fn end_value_with(&self, axis: Option<&dyn CategoryAxisLink>) -> Option<f64> {
        resolve_value(self.end_category(), self.stored_end_value(), axis)
    }

    /// Pixel position of the adjusted start.
    ///
    /// Before the axis has validated its breaks the resolved start index is
    /// used instead.
    #[must_use]
    pub fn start_position_with(&self, axis: Option<&dyn CategoryAxisLink>) -> Option<f64> {
        let axis = axis?;
        let index = self
            .base
            .adjusted_start_value()
            .or_else(|| self.start_value_with(Some(axis)))?;
        axis.index_to_position(index)
    }

    #[must_use]
    pub fn end_position_with(&self, axis: Option<&dyn CategoryAxisLink>) -> Option<f64> {
        let axis = axis?;
        let index = self
            .base
            .adjusted_end_value()
            .or_else(|| self.end_value_with(Some(axis)))?;
        axis.index_to_position(index)
    }
}

fn resolve_value(
    category: Option<&str>,
    fallback: Option<f64>,
    axis: Option<&dyn CategoryAxisLink>,
) -> Option<f64> {
    match category {
        Some(category) if !category.is_empty() => axis?.category_to_index(category),
        _ => fallback,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{CategoryAxisBreak, CategoryAxisLink};

    struct FixedAxis {
        indices: HashMap<&'static str, f64>,
        positions: HashMap<i64, f64>,
    }

    impl CategoryAxisLink for FixedAxis {
        fn category_to_index(&self, category: &str) -> Option<f64> {
            self.indices.get(category).copied()
        }

        fn index_to_position(&self, index: f64) -> Option<f64> {
            self.positions.get(&(index as i64)).copied()
        }
    }

    fn fixed_axis() -> FixedAxis {
        FixedAxis {
            indices: HashMap::from([("A", 2.0), ("B", 7.0)]),
            positions: HashMap::from([(2, 20.0), (3, 42.0), (7, 70.0), (9, 90.0)]),
        }
    }

    #[test]
    fn category_takes_precedence_over_stored_value() {
        let axis = fixed_axis();
        let mut axis_break = CategoryAxisBreak::with_values(5.0, 9.0);
        axis_break.set_start_category("A");

        assert_eq!(axis_break.start_value_with(Some(&axis)), Some(2.0));
        assert_eq!(axis_break.stored_start_value(), Some(5.0));
        assert_eq!(axis_break.end_value_with(Some(&axis)), Some(9.0));
    }

    #[test]
    fn empty_category_falls_back_to_stored_value() {
        let axis = fixed_axis();
        let mut axis_break = CategoryAxisBreak::with_values(5.0, 9.0);
        axis_break.set_start_category("");

        assert_eq!(axis_break.start_value_with(Some(&axis)), Some(5.0));
    }

    #[test]
    fn unknown_category_defers_to_axis_lookup() {
        let axis = fixed_axis();
        let axis_break = CategoryAxisBreak::with_categories("Z", "B");

        assert_eq!(axis_break.start_value_with(Some(&axis)), None);
        assert_eq!(axis_break.end_value_with(Some(&axis)), Some(7.0));
    }

    #[test]
    fn position_uses_adjusted_value_when_present() {
        let axis = fixed_axis();
        let mut axis_break = CategoryAxisBreak::with_categories("A", "B");
        axis_break.base_mut().set_adjusted_range(Some((3.0, 9.0)));

        assert_eq!(axis_break.start_position_with(Some(&axis)), Some(42.0));
        assert_eq!(axis_break.end_position_with(Some(&axis)), Some(90.0));
    }

    #[test]
    fn position_falls_back_to_resolved_value_before_validation() {
        let axis = fixed_axis();
        let axis_break = CategoryAxisBreak::with_categories("A", "B");

        assert_eq!(axis_break.start_position_with(Some(&axis)), Some(20.0));
        assert_eq!(axis_break.end_position_with(Some(&axis)), Some(70.0));
    }

    #[test]
    fn positions_are_absent_without_axis() {
        let mut axis_break = CategoryAxisBreak::with_values(3.0, 9.0);
        axis_break.base_mut().set_adjusted_range(Some((3.0, 9.0)));

        assert_eq!(axis_break.start_position(), None);
        assert_eq!(axis_break.end_position(), None);
    }

    #[test]
    fn detached_category_cannot_be_resolved() {
        let axis_break = CategoryAxisBreak::with_categories("A", "B");
        assert_eq!(axis_break.start_value(), None);
        assert_eq!(axis_break.start_category(), Some("A"));
    }

    #[test]
    fn break_size_lives_in_base_not_property_store() {
        let axis_break = CategoryAxisBreak::new()
            .with_break_size(0.5)
            .expect("valid size");
        assert_eq!(axis_break.base().break_size(), 0.5);
        assert!(axis_break.properties().is_empty());
    }
}
