//! Listing and search criteria.

use crate::item::Item;

/// Offset/limit window over the store's natural (identifier) order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Page {
    pub skip: u64,
    pub limit: u64,
}

impl Page {
    pub const DEFAULT_LIMIT: u64 = 100;

    pub fn new(skip: u64, limit: u64) -> Self {
        Self { skip, limit }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

/// AND-combined search criteria. A `None` criterion imposes no filter.
///
/// Text criteria are case-sensitive substring tests; an empty string is treated
/// the same as an absent criterion. Price bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemFilter {
    pub name: Option<String>,
    pub description: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub quantity: Option<i64>,
}

impl ItemFilter {
    pub fn name_criterion(&self) -> Option<&str> {
        non_empty(&self.name)
    }

    pub fn description_criterion(&self) -> Option<&str> {
        non_empty(&self.description)
    }

    /// True when no criterion is set, i.e. every item matches.
    pub fn is_unbounded(&self) -> bool {
        self.name_criterion().is_none()
            && self.description_criterion().is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.quantity.is_none()
    }

    pub fn matches(&self, item: &Item) -> bool {
        if let Some(needle) = self.name_criterion() {
            if !item.name.contains(needle) {
                return false;
            }
        }
        if let Some(needle) = self.description_criterion() {
            if !item.description.contains(needle) {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if item.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if item.price > max {
                return false;
            }
        }
        if let Some(quantity) = self.quantity {
            if item.quantity != quantity {
                return false;
            }
        }
        true
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
