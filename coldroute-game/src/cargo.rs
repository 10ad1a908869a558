//! Perishable cargo catalog and vehicle loading.
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::ConfigError;
use crate::graph::normalize_location;
use crate::vehicle::Vehicle;

/// A kind of perishable goods and how long it keeps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Perishable {
    pub name: String,
    pub shelf_life: i32,
}

/// Every cargo type a shipment can carry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CargoCatalog {
    pub items: Vec<Perishable>,
}

impl CargoCatalog {
    /// Create an empty catalog (useful for tests)
    #[must_use]
    pub fn empty() -> Self {
        Self { items: Vec::new() }
    }

    /// Load a catalog from a JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or an entry is invalid.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Built-in catalog: milk, fruits, and medicines.
    #[must_use]
    pub fn default_config() -> Self {
        serde_json::from_str(include_str!("../assets/data/perishables.json"))
            .unwrap_or_else(|_| Self::empty())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for item in &self.items {
            if !seen.insert(item.name.to_lowercase()) {
                return Err(ConfigError::DuplicateItem {
                    name: item.name.clone(),
                });
            }
            if item.shelf_life <= 0 {
                return Err(ConfigError::NonPositiveShelfLife {
                    name: item.name.clone(),
                    shelf_life: item.shelf_life,
                });
            }
        }
        Ok(())
    }

    /// Case-insensitive lookup by item name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Perishable> {
        let wanted = normalize_location(name);
        self.items
            .iter()
            .find(|item| item.name.eq_ignore_ascii_case(&wanted))
    }

    /// Load a fresh vehicle with the named cargo at full shelf life.
    #[must_use]
    pub fn vehicle_for(&self, name: &str, quantity: Option<u32>) -> Option<Vehicle> {
        self.find(name)
            .map(|item| Vehicle::new(item.name.clone(), quantity, item.shelf_life))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_lists_builtin_goods() {
        let catalog = CargoCatalog::default_config();
        let names: Vec<&str> = catalog.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Milk", "Fruits", "Medicines"]);
        assert_eq!(catalog.find("medicines").map(|i| i.shelf_life), Some(90));
    }

    #[test]
    fn vehicle_for_uses_catalog_shelf_life() {
        let catalog = CargoCatalog::default_config();
        let vehicle = catalog.vehicle_for(" milk ", Some(40)).unwrap();
        assert_eq!(vehicle.item, "Milk");
        assert_eq!(vehicle.shelf_life, 50);
        assert_eq!(vehicle.quantity, Some(40));
        assert!(catalog.vehicle_for("Ice Cream", None).is_none());
    }

    #[test]
    fn catalog_rejects_duplicates_and_dead_goods() {
        let dup = r#"{"items": [{"name": "Milk", "shelf_life": 5}, {"name": "milk", "shelf_life": 6}]}"#;
        assert!(matches!(
            CargoCatalog::from_json(dup),
            Err(ConfigError::DuplicateItem { .. })
        ));

        let dead = r#"{"items": [{"name": "Fish", "shelf_life": 0}]}"#;
        assert!(matches!(
            CargoCatalog::from_json(dead),
            Err(ConfigError::NonPositiveShelfLife { .. })
        ));
    }
}
