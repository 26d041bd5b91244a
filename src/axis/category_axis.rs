use std::cmp::Ordering;

use indexmap::{IndexMap, IndexSet};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::core::LinearScale;
use crate::core::scale::validate_length;
use crate::error::ChartResult;

use super::category_break::{CategoryAxisBreak, CategoryAxisLink};

pub const DEFAULT_AXIS_LENGTH_PX: f64 = 1000.0;

/// Non-owning handle naming an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AxisId(pub u32);

/// Stable handle of a break inside its axis. Not reused after removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BreakId(pub u64);

/// Validated break range used by layout: `(start, end, break_size)`.
type LayoutRange = (f64, f64, f64);

/// Discrete axis over an ordered list of named categories.
///
/// Category `i` sits at index `i`; the axis spans `[0, category_count]`.
/// The axis owns its breaks. Any change that affects the data range marks it
/// invalid until [`CategoryAxis::validate_data_range`] recomputes the adjusted
/// break ranges.
#[derive(Debug, Clone)]
pub struct CategoryAxis {
    id: AxisId,
    categories: IndexSet<String>,
    length_px: f64,
    breaks: IndexMap<BreakId, CategoryAxisBreak>,
    next_break_id: u64,
    data_range_invalid: bool,
    data_range_invalidations: u64,
}

impl CategoryAxis {
    /// Creates an axis; duplicate category names keep their first index.
    #[must_use]
    pub fn new<I, S>(id: AxisId, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id,
            categories: categories.into_iter().map(Into::into).collect(),
            length_px: DEFAULT_AXIS_LENGTH_PX,
            breaks: IndexMap::new(),
            next_break_id: 0,
            data_range_invalid: true,
            data_range_invalidations: 0,
        }
    }

    pub fn with_length_px(mut self, length_px: f64) -> ChartResult<Self> {
        self.set_length_px(length_px)?;
        Ok(self)
    }

    #[must_use]
    pub fn id(&self) -> AxisId {
        self.id
    }

    #[must_use]
    pub fn length_px(&self) -> f64 {
        self.length_px
    }

    pub fn set_length_px(&mut self, length_px: f64) -> ChartResult<()> {
        self.length_px = validate_length(length_px)?;
        Ok(())
    }

    #[must_use]
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(String::as_str)
    }

    pub fn set_categories<I, S>(&mut self, categories: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        debug!(count = self.categories.len(), "set axis categories");
        self.invalidate_data_range();
    }

    #[must_use]
    pub fn index_to_category(&self, index: usize) -> Option<&str> {
        self.categories.get_index(index).map(String::as_str)
    }

    /// Marks the data range stale. Safe to call repeatedly.
    pub fn invalidate_data_range(&mut self) {
        self.data_range_invalid = true;
        self.data_range_invalidations += 1;
        trace!(
            axis = self.id.0,
            count = self.data_range_invalidations,
            "invalidate data range"
        );
    }

    #[must_use]
    pub fn is_data_range_invalid(&self) -> bool {
        self.data_range_invalid
    }

    /// Number of invalidation signals received since creation.
    #[must_use]
    pub fn data_range_invalidations(&self) -> u64 {
        self.data_range_invalidations
    }

    /// Recomputes adjusted break ranges and clears the invalid flag.
    ///
    /// Layout does not depend on this call: while the axis is invalid,
    /// positions are computed from the current break configuration.
    pub fn validate_data_range(&mut self) {
        let (merged, unresolved) = self.merged_break_ranges();

        for (id, range) in &merged {
            if let Some(axis_break) = self.breaks.get_mut(id) {
                axis_break.base_mut().set_adjusted_range(Some(*range));
            }
        }
        for id in &unresolved {
            if let Some(axis_break) = self.breaks.get_mut(id) {
                warn!(
                    axis = self.id.0,
                    break_id = id.0,
                    start_category = axis_break.start_category(),
                    end_category = axis_break.end_category(),
                    "axis break does not resolve; skipping"
                );
                axis_break.base_mut().set_adjusted_range(None);
            }
        }

        self.data_range_invalid = false;
        debug!(
            axis = self.id.0,
            breaks = self.breaks.len(),
            unresolved = unresolved.len(),
            "validated axis data range"
        );
    }

    /// Adjusted range of a break as layout currently sees it.
    #[must_use]
    pub fn adjusted_range(&self, id: BreakId) -> Option<(f64, f64)> {
        if !self.data_range_invalid {
            return self.breaks.get(&id)?.base().adjusted_range();
        }
        let (merged, _) = self.merged_break_ranges();
        merged
            .into_iter()
            .find_map(|(break_id, range)| (break_id == id).then_some(range))
    }

    /// Ends are ordered and clamped to the axis span. Breaks are processed in
    /// start order; a break starting inside an earlier one extends it and
    /// collapses to an empty range at the final merged end. Breaks whose ends
    /// do not resolve are returned separately.
    fn merged_break_ranges(&self) -> (Vec<(BreakId, (f64, f64))>, SmallVec<[BreakId; 4]>) {
        let (mut resolved, unresolved) = self.resolve_break_ranges();
        resolved.sort_by(|a, b| compare_ranges(a.1, b.1));

        let mut merged: Vec<(BreakId, (f64, f64))> = Vec::with_capacity(resolved.len());
        let mut heads: Vec<Option<usize>> = Vec::with_capacity(resolved.len());
        let mut head: Option<usize> = None;
        for (id, (start, end)) in resolved {
            match head {
                Some(head_index) if start <= merged[head_index].1.1 => {
                    let (_, head_range) = &mut merged[head_index];
                    head_range.1 = head_range.1.max(end);
                    let collapsed_at = head_range.1;
                    merged.push((id, (collapsed_at, collapsed_at)));
                    heads.push(Some(head_index));
                }
                _ => {
                    head = Some(merged.len());
                    merged.push((id, (start, end)));
                    heads.push(None);
                }
            }
        }

        // Members absorbed early still point at an intermediate head end.
        for (member, head_index) in heads.into_iter().enumerate() {
            if let Some(head_index) = head_index {
                let merged_end = merged[head_index].1.1;
                merged[member].1 = (merged_end, merged_end);
            }
        }

        (merged, unresolved)
    }

    /// Adopts `axis_break`, pointing it at this axis.
    pub fn add_break(&mut self, mut axis_break: CategoryAxisBreak) -> BreakId {
        let id = BreakId(self.next_break_id);
        self.next_break_id += 1;
        axis_break.attach(self.id);
        self.breaks.insert(id, axis_break);
        self.invalidate_data_range();
        id
    }

    /// Releases a break; the returned break is detached.
    pub fn remove_break(&mut self, id: BreakId) -> Option<CategoryAxisBreak> {
        let mut axis_break = self.breaks.shift_remove(&id)?;
        axis_break.detach();
        self.invalidate_data_range();
        Some(axis_break)
    }

    #[must_use]
    pub fn break_count(&self) -> usize {
        self.breaks.len()
    }

    #[must_use]
    pub fn axis_break(&self, id: BreakId) -> Option<AttachedBreak<'_>> {
        let inner = self.breaks.get(&id)?;
        Some(AttachedBreak {
            axis: self,
            id,
            inner,
        })
    }

    #[must_use]
    pub fn axis_break_mut(&mut self, id: BreakId) -> Option<AttachedBreakMut<'_>> {
        if !self.breaks.contains_key(&id) {
            return None;
        }
        Some(AttachedBreakMut { axis: self, id })
    }

    /// Breaks in insertion order.
    pub fn breaks(&self) -> impl Iterator<Item = AttachedBreak<'_>> {
        self.breaks.iter().map(move |(id, inner)| AttachedBreak {
            axis: self,
            id: *id,
            inner,
        })
    }

    /// Converts a pixel offset along the axis back to an index.
    #[must_use]
    pub fn position_to_index(&self, position: f64) -> Option<f64> {
        if !position.is_finite() {
            return None;
        }
        let ranges = self.layout_ranges();
        let scale = self.compressed_scale(&ranges)?;
        let compressed = scale.pixel_to_domain(position, self.length_px).ok()?;
        Some(expand(compressed, &ranges))
    }

    fn resolve_break_ranges(&self) -> (Vec<(BreakId, (f64, f64))>, SmallVec<[BreakId; 4]>) {
        let span_end = self.categories.len() as f64;
        let mut resolved = Vec::with_capacity(self.breaks.len());
        let mut unresolved = SmallVec::new();

        for (id, axis_break) in &self.breaks {
            let start = axis_break.start_value_with(Some(self));
            let end = axis_break.end_value_with(Some(self));
            match (start, end) {
                (Some(start), Some(end)) if start.is_finite() && end.is_finite() => {
                    let low = start.min(end).clamp(0.0, span_end);
                    let high = start.max(end).clamp(0.0, span_end);
                    resolved.push((*id, (low, high)));
                }
                _ => unresolved.push(*id),
            }
        }

        (resolved, unresolved)
    }

    fn layout_ranges(&self) -> SmallVec<[LayoutRange; 4]> {
        let mut ranges: SmallVec<[LayoutRange; 4]> = if self.data_range_invalid {
            let (merged, _) = self.merged_break_ranges();
            merged
                .into_iter()
                .filter_map(|(id, (start, end))| {
                    let size = self.breaks.get(&id)?.base().break_size();
                    (end > start).then_some((start, end, size))
                })
                .collect()
        } else {
            self.breaks
                .values()
                .filter_map(|axis_break| {
                    let base = axis_break.base();
                    let (start, end) = base.adjusted_range()?;
                    (end > start).then_some((start, end, base.break_size()))
                })
                .collect()
        };
        ranges.sort_by(|a, b| compare_ranges((a.0, a.1), (b.0, b.1)));
        ranges
    }

    fn compressed_scale(&self, ranges: &[LayoutRange]) -> Option<LinearScale> {
        let removed: f64 = ranges
            .iter()
            .map(|(start, end, size)| (end - start) * (1.0 - size))
            .sum();
        let compressed_len = self.categories.len() as f64 - removed;
        if compressed_len <= 0.0 {
            return None;
        }
        LinearScale::new(0.0, compressed_len).ok()
    }
}

impl CategoryAxisLink for CategoryAxis {
    fn category_to_index(&self, category: &str) -> Option<f64> {
        self.categories
            .get_index_of(category)
            .map(|index| index as f64)
    }

    /// Reflects the current break configuration even before validation.
    fn index_to_position(&self, index: f64) -> Option<f64> {
        if !index.is_finite() {
            return None;
        }
        let ranges = self.layout_ranges();
        let scale = self.compressed_scale(&ranges)?;
        scale
            .domain_to_pixel(compress(index, &ranges), self.length_px)
            .ok()
    }
}

fn compare_ranges(a: (f64, f64), b: (f64, f64)) -> Ordering {
    OrderedFloat(a.0)
        .cmp(&OrderedFloat(b.0))
        .then_with(|| OrderedFloat(a.1).cmp(&OrderedFloat(b.1)))
}

fn compress(index: f64, ranges: &[LayoutRange]) -> f64 {
    let mut shift = 0.0;
    for (start, end, size) in ranges {
        if index <= *start {
            break;
        }
        if index >= *end {
            shift += (end - start) * (1.0 - size);
        } else {
            shift += (index - start) * (1.0 - size);
            break;
        }
    }
    index - shift
}

fn expand(compressed: f64, ranges: &[LayoutRange]) -> f64 {
    let mut shift = 0.0;
    for (start, end, size) in ranges {
        let compressed_start = start - shift;
        if compressed <= compressed_start {
            break;
        }
        let collapsed = (end - start) * size;
        if compressed < compressed_start + collapsed {
            return start + (compressed - compressed_start) / size;
        }
        shift += (end - start) * (1.0 - size);
    }
    compressed + shift
}

/// Read view of a break held by a [`CategoryAxis`].
#[derive(Debug, Clone, Copy)]
pub struct AttachedBreak<'a> {
    axis: &'a CategoryAxis,
    id: BreakId,
    inner: &'a CategoryAxisBreak,
}

impl<'a> AttachedBreak<'a> {
    #[must_use]
    pub fn id(&self) -> BreakId {
        self.id
    }

    #[must_use]
    pub fn inner(&self) -> &'a CategoryAxisBreak {
        self.inner
    }

    #[must_use]
    pub fn axis(&self) -> &'a CategoryAxis {
        self.axis
    }

    #[must_use]
    pub fn start_category(&self) -> Option<&'a str> {
        self.inner.start_category()
    }

    #[must_use]
    pub fn end_category(&self) -> Option<&'a str> {
        self.inner.end_category()
    }

    /// Live lookup of the start category, or the stored start value.
    #[must_use]
    pub fn start_value(&self) -> Option<f64> {
        self.inner.start_value_with(Some(self.axis))
    }

    #[must_use]
    pub fn end_value(&self) -> Option<f64> {
        self.inner.end_value_with(Some(self.axis))
    }

    /// Pixel position of the adjusted start, following edits not yet validated.
    #[must_use]
    pub fn start_position(&self) -> Option<f64> {
        let index = match self.axis.adjusted_range(self.id) {
            Some((start, _)) => start,
            None => self.start_value()?,
        };
        self.axis.index_to_position(index)
    }

    #[must_use]
    pub fn end_position(&self) -> Option<f64> {
        let index = match self.axis.adjusted_range(self.id) {
            Some((_, end)) => end,
            None => self.end_value()?,
        };
        self.axis.index_to_position(index)
    }
}

/// Edit view of a break held by a [`CategoryAxis`].
///
/// Every setter returns whether the stored value changed; a change
/// invalidates the axis data range once.
#[derive(Debug)]
pub struct AttachedBreakMut<'a> {
    axis: &'a mut CategoryAxis,
    id: BreakId,
}

impl AttachedBreakMut<'_> {
    #[must_use]
    pub fn id(&self) -> BreakId {
        self.id
    }

    #[must_use]
    pub fn view(&self) -> AttachedBreak<'_> {
        AttachedBreak {
            axis: &*self.axis,
            id: self.id,
            inner: &self.axis.breaks[&self.id],
        }
    }

    pub fn set_start_category(&mut self, category: impl Into<String>) -> bool {
        let category = category.into();
        self.edit(|axis_break| axis_break.set_start_category(category))
    }

    pub fn clear_start_category(&mut self) -> bool {
        self.edit(CategoryAxisBreak::clear_start_category)
    }

    pub fn set_end_category(&mut self, category: impl Into<String>) -> bool {
        let category = category.into();
        self.edit(|axis_break| axis_break.set_end_category(category))
    }

    pub fn clear_end_category(&mut self) -> bool {
        self.edit(CategoryAxisBreak::clear_end_category)
    }

    pub fn set_start_value(&mut self, value: f64) -> bool {
        self.edit(|axis_break| axis_break.set_start_value(value))
    }

    pub fn clear_start_value(&mut self) -> bool {
        self.edit(CategoryAxisBreak::clear_start_value)
    }

    pub fn set_end_value(&mut self, value: f64) -> bool {
        self.edit(|axis_break| axis_break.set_end_value(value))
    }

    pub fn clear_end_value(&mut self) -> bool {
        self.edit(CategoryAxisBreak::clear_end_value)
    }

    pub fn set_break_size(&mut self, break_size: f64) -> ChartResult<bool> {
        let changed = self.inner_mut().base_mut().set_break_size(break_size)?;
        if changed {
            self.axis.invalidate_data_range();
        }
        Ok(changed)
    }

    fn inner_mut(&mut self) -> &mut CategoryAxisBreak {
        // The view is only built for ids present in the axis.
        &mut self.axis.breaks[&self.id]
    }

    fn edit(&mut self, apply: impl FnOnce(&mut CategoryAxisBreak) -> bool) -> bool {
        let changed = apply(self.inner_mut());
        if changed {
            self.axis.invalidate_data_range();
        }
        changed
    }
}
