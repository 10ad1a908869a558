//! Shipment snapshots. Every transition builds a new [`ShipmentState`];
//! nothing here mutates a state in place, so search branches never share
//! edits.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::vehicle::Vehicle;

/// One entry of the disruption log.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DisruptionEntry {
    /// Delay outcome picked by the search for a simulated hop.
    Delay(u32),
    /// Caller-injected event such as a weather or traffic delay.
    Event(String),
}

impl fmt::Display for DisruptionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delay(minutes) => write!(f, "+{minutes}"),
            Self::Event(label) => f.write_str(label),
        }
    }
}

/// Coarse classification of a shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentStatus {
    InTransit,
    Delivered,
    Spoiled,
    /// Route exhausted without a delivery, e.g. source equals destination.
    Halted,
}

impl ShipmentStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::InTransit => "In transit",
            Self::Delivered => "Delivered Successfully!",
            Self::Spoiled => "Goods Spoiled!",
            Self::Halted => "Route ended without delivery",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentState {
    pub vehicle: Vehicle,
    /// City the vehicle is parked at.
    pub current: String,
    /// Stops still to visit, destination last.
    pub remaining: Vec<String>,
    #[serde(default)]
    pub disruptions: Vec<DisruptionEntry>,
    /// Elapsed transit time, including delays.
    #[serde(default)]
    pub cost: u32,
    #[serde(default)]
    pub delivered: bool,
}

impl ShipmentState {
    /// Fresh shipment at the head of `route`. Returns `None` for an empty
    /// route.
    #[must_use]
    pub fn start(vehicle: Vehicle, route: &[String]) -> Option<Self> {
        Self::resume(vehicle, route, Vec::new(), 0)
    }

    /// Shipment placed at the head of `route` that keeps an existing log and
    /// elapsed cost. Never marked delivered.
    #[must_use]
    pub fn resume(
        vehicle: Vehicle,
        route: &[String],
        disruptions: Vec<DisruptionEntry>,
        cost: u32,
    ) -> Option<Self> {
        let (current, remaining) = route.split_first()?;
        Some(Self {
            vehicle,
            current: current.clone(),
            remaining: remaining.to_vec(),
            disruptions,
            cost,
            delivered: false,
        })
    }

    /// Successor after driving to the next stop. `base` is the edge weight
    /// and `delay` the extra time lost on the way; a delay of zero leaves
    /// the disruption log untouched. Returns `None` when no stops remain.
    #[must_use]
    pub fn after_hop(&self, base: u32, delay: u32) -> Option<Self> {
        let (next, rest) = self.remaining.split_first()?;
        let elapsed = base.saturating_add(delay);
        let vehicle = self.vehicle.after_transit(elapsed);
        let mut disruptions = self.disruptions.clone();
        if delay > 0 {
            disruptions.push(DisruptionEntry::Delay(delay));
        }
        let delivered = rest.is_empty() && vehicle.shelf_life > 0;
        Some(Self {
            vehicle,
            current: next.clone(),
            remaining: rest.to_vec(),
            disruptions,
            cost: self.cost.saturating_add(elapsed),
            delivered,
        })
    }

    /// Copy of this state with one more log entry.
    #[must_use]
    pub fn with_disruption(&self, entry: DisruptionEntry) -> Self {
        let mut next = self.clone();
        next.disruptions.push(entry);
        next
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.remaining.is_empty() || self.vehicle.is_spoiled() || self.delivered
    }

    #[must_use]
    pub fn status(&self) -> ShipmentStatus {
        if self.delivered {
            ShipmentStatus::Delivered
        } else if self.vehicle.is_spoiled() {
            ShipmentStatus::Spoiled
        } else if self.remaining.is_empty() {
            ShipmentStatus::Halted
        } else {
            ShipmentStatus::InTransit
        }
    }

    #[must_use]
    pub fn next_stop(&self) -> Option<&str> {
        self.remaining.first().map(String::as_str)
    }

    /// Final stop of the planned route; the current city once nothing remains.
    #[must_use]
    pub fn destination(&self) -> &str {
        self.remaining.last().unwrap_or(&self.current)
    }

    /// Current city followed by the remaining stops.
    #[must_use]
    pub fn route(&self) -> Vec<String> {
        std::iter::once(self.current.clone())
            .chain(self.remaining.iter().cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stops(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    fn sample() -> ShipmentState {
        ShipmentState::start(
            Vehicle::new("Milk", Some(3), 50),
            &stops(&["Delhi", "Jaipur", "Mumbai"]),
        )
        .unwrap()
    }

    #[test]
    fn start_places_vehicle_at_route_head() {
        let state = sample();
        assert_eq!(state.current, "Delhi");
        assert_eq!(state.remaining, stops(&["Jaipur", "Mumbai"]));
        assert_eq!(state.cost, 0);
        assert!(state.disruptions.is_empty());
        assert!(!state.delivered);
        assert_eq!(state.destination(), "Mumbai");
        assert_eq!(state.status(), ShipmentStatus::InTransit);
        assert!(ShipmentState::start(Vehicle::new("Milk", None, 5), &[]).is_none());
    }

    #[test]
    fn hop_consumes_stop_and_shelf_life() {
        let state = sample();
        let next = state.after_hop(5, 15).unwrap();
        assert_eq!(next.current, "Jaipur");
        assert_eq!(next.remaining, stops(&["Mumbai"]));
        assert_eq!(next.vehicle.shelf_life, 30);
        assert_eq!(next.cost, 20);
        assert_eq!(next.disruptions, vec![DisruptionEntry::Delay(15)]);
        assert!(!next.delivered);
        assert_eq!(state.current, "Delhi", "source state is untouched");

        let arrived = next.after_hop(12, 0).unwrap();
        assert!(arrived.delivered);
        assert!(arrived.is_terminal());
        assert_eq!(arrived.disruptions.len(), 1);
        assert_eq!(arrived.status(), ShipmentStatus::Delivered);
        assert!(arrived.after_hop(1, 0).is_none());
    }

    #[test]
    fn arriving_spoiled_is_not_a_delivery() {
        let state = ShipmentState::start(
            Vehicle::new("Milk", None, 10),
            &stops(&["Delhi", "Jaipur"]),
        )
        .unwrap();
        let late = state.after_hop(5, 30).unwrap();
        assert!(late.remaining.is_empty());
        assert!(!late.delivered);
        assert_eq!(late.vehicle.shelf_life, -25);
        assert_eq!(late.status(), ShipmentStatus::Spoiled);
    }

    #[test]
    fn terminal_iff_empty_spoiled_or_delivered() {
        let mut state = sample();
        assert!(!state.is_terminal());

        state.vehicle.shelf_life = 0;
        assert!(state.is_terminal());

        let mut state = sample();
        state.delivered = true;
        assert!(state.is_terminal());

        let mut state = sample();
        state.remaining.clear();
        assert!(state.is_terminal());
        assert_eq!(state.status(), ShipmentStatus::Halted);
        assert_eq!(state.destination(), "Delhi");
    }

    #[test]
    fn disruption_entries_render_for_display() {
        let state = sample().with_disruption(DisruptionEntry::Event("Weather delay".into()));
        let labels: Vec<String> = state.disruptions.iter().map(ToString::to_string).collect();
        assert_eq!(labels, vec!["Weather delay"]);
        assert_eq!(DisruptionEntry::Delay(30).to_string(), "+30");
    }
}
