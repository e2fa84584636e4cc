use serde::Deserialize;

use stockroom_core::{ItemFields, ItemFilter, Page};

/// Default page size for `GET /items/` when `limit` is omitted.
pub const DEFAULT_LIST_LIMIT: u64 = 10;

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /items/` and `PUT /items/{id}`. Every field is required;
/// an update overwrites all of them.
#[derive(Debug, Deserialize)]
pub struct ItemRequest {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: i64,
}

impl ItemRequest {
    pub fn into_fields(self) -> ItemFields {
        ItemFields {
            name: self.name,
            description: self.description,
            price: self.price,
            quantity: self.quantity,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListItemsQuery {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

impl ListItemsQuery {
    pub fn page(&self) -> Page {
        Page::new(
            self.skip.unwrap_or(0),
            self.limit.unwrap_or(DEFAULT_LIST_LIMIT),
        )
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchItemsQuery {
    pub name: Option<String>,
    pub description: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub quantity: Option<i64>,
}

/// Price bounds must be finite; `NaN` and infinities are rejected.
impl TryFrom<SearchItemsQuery> for ItemFilter {
    type Error = String;

    fn try_from(q: SearchItemsQuery) -> Result<Self, Self::Error> {
        Ok(ItemFilter {
            name: q.name,
            description: q.description,
            min_price: finite_bound("min_price", q.min_price)?,
            max_price: finite_bound("max_price", q.max_price)?,
            quantity: q.quantity,
        })
    }
}

fn finite_bound(param: &str, value: Option<f64>) -> Result<Option<f64>, String> {
    match value {
        Some(v) if !v.is_finite() => Err(format!("{param} must be a finite number")),
        other => Ok(other),
    }
}
