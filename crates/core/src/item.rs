use serde::{Deserialize, Serialize};

use crate::id::ItemId;

/// Field values of an item, as supplied by a caller on create or update.
///
/// Price and quantity are expected to be non-negative but this is not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemFields {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: i64,
}

/// A persisted item record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: i64,
}

impl Item {
    pub fn from_fields(id: ItemId, fields: ItemFields) -> Self {
        Self {
            id,
            name: fields.name,
            description: fields.description,
            price: fields.price,
            quantity: fields.quantity,
        }
    }

    /// Replace every field with `fields`. The identifier never changes.
    pub fn overwrite(&mut self, fields: ItemFields) {
        self.name = fields.name;
        self.description = fields.description;
        self.price = fields.price;
        self.quantity = fields.quantity;
    }

    pub fn fields(&self) -> ItemFields {
        ItemFields {
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            quantity: self.quantity,
        }
    }
}
