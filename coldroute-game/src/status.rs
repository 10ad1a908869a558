//! Read-only projection of a shipment for display.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::RouteError;
use crate::graph::RouteNetwork;
use crate::state::{ShipmentState, ShipmentStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteStatus {
    pub location: String,
    /// Current city followed by the remaining stops.
    pub route: Vec<String>,
    /// Transit time left on the remaining route at current weights.
    pub eta: u32,
    pub elapsed: u32,
    pub shelf_life: i32,
    pub disruptions: Vec<String>,
    pub status: ShipmentStatus,
}

impl RouteStatus {
    /// Project `state` against the network's current weights.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InvalidEdgeReference`] when a remaining hop has
    /// no edge.
    pub fn capture(state: &ShipmentState, network: &RouteNetwork) -> Result<Self, RouteError> {
        let route = state.route();
        let eta = match network.route_cost(&route) {
            Some(eta) => eta,
            None => {
                let broken = route
                    .windows(2)
                    .find(|hop| network.weight(&hop[0], &hop[1]).is_none())
                    .map_or_else(
                        || RouteError::missing_edge(&state.current, state.destination()),
                        |hop| RouteError::missing_edge(&hop[0], &hop[1]),
                    );
                return Err(broken);
            }
        };

        Ok(Self {
            location: state.current.clone(),
            route,
            eta,
            elapsed: state.cost,
            shelf_life: state.vehicle.shelf_life,
            disruptions: state.disruptions.iter().map(ToString::to_string).collect(),
            status: state.status(),
        })
    }
}

impl fmt::Display for RouteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Truck currently at: {}", self.location)?;
        writeln!(f, "Route status: {}", self.route.join(" -> "))?;
        writeln!(f, "ETA: {}", self.eta)?;
        writeln!(f, "Elapsed time: {}", self.elapsed)?;
        writeln!(f, "Shelf life left: {}", self.shelf_life)?;
        write!(f, "Disruptions: [{}]", self.disruptions.join(", "))
    }
}
