//! Refrigerated vehicle and its perishable load
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Cargo label shown in status output
    pub item: String,
    /// Optional unit count; the search never reads it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    /// Time units left before the load spoils. Negative values mean the
    /// cargo is already lost and are kept as-is.
    pub shelf_life: i32,
}

impl Vehicle {
    #[must_use]
    pub fn new(item: impl Into<String>, quantity: Option<u32>, shelf_life: i32) -> Self {
        Self {
            item: item.into(),
            quantity,
            shelf_life,
        }
    }

    /// Copy of this vehicle after `elapsed` time units on the road.
    #[must_use]
    pub fn after_transit(&self, elapsed: u32) -> Self {
        let elapsed = i32::try_from(elapsed).unwrap_or(i32::MAX);
        Self {
            item: self.item.clone(),
            quantity: self.quantity,
            shelf_life: self.shelf_life.saturating_sub(elapsed),
        }
    }

    #[must_use]
    pub const fn is_spoiled(&self) -> bool {
        self.shelf_life <= 0
    }
}
