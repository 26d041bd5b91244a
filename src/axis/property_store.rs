use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Named properties an axis break keeps in its store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BreakProperty {
    StartCategory,
    EndCategory,
    StartValue,
    EndValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Text(String),
    Number(f64),
}

impl PropertyValue {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Number(_) => None,
        }
    }

    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(_) => None,
        }
    }

    /// Equality used for change detection.
    ///
    /// Numbers compare by total order, so storing `NaN` over `NaN` is a no-op.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => OrderedFloat(*a) == OrderedFloat(*b),
            _ => false,
        }
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Key/value storage with change detection.
///
/// `set` reports whether the stored value actually changed so callers can
/// decide whether to fire their side effects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyStore {
    values: IndexMap<BreakProperty, PropertyValue>,
}

impl PropertyStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: BreakProperty) -> Option<&PropertyValue> {
        self.values.get(&key)
    }

    #[must_use]
    pub fn text(&self, key: BreakProperty) -> Option<&str> {
        self.get(key).and_then(PropertyValue::as_text)
    }

    #[must_use]
    pub fn number(&self, key: BreakProperty) -> Option<f64> {
        self.get(key).and_then(PropertyValue::as_number)
    }

    /// Stores `value` under `key`; `None` clears the entry.
    ///
    /// Returns `true` when the stored state changed.
    pub fn set(&mut self, key: BreakProperty, value: Option<PropertyValue>) -> bool {
        match value {
            Some(value) => {
                if let Some(previous) = self.values.get(&key) {
                    if previous.same_as(&value) {
                        return false;
                    }
                }
                self.values.insert(key, value);
                true
            }
            None => self.values.shift_remove(&key).is_some(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BreakProperty, &PropertyValue)> {
        self.values.iter().map(|(key, value)| (*key, value))
    }
}
