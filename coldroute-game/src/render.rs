//! Structural map snapshot for an external renderer. Nothing here draws.
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::disruption::EdgeRef;
use crate::graph::RouteNetwork;
use crate::state::ShipmentState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub name: String,
    /// `(x, y)` in the unit square, x from longitude and y from latitude.
    /// Present only when every city in the network has coordinates.
    pub position: Option<(f64, f64)>,
    pub is_source: bool,
    pub is_destination: bool,
    pub is_current: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSnapshot {
    pub from: String,
    pub to: String,
    pub weight: u32,
    pub disrupted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<NodeSnapshot>,
    pub edges: Vec<EdgeSnapshot>,
    pub source: Option<String>,
    pub destination: Option<String>,
    pub current: String,
}

impl GraphSnapshot {
    /// Capture current weights, disrupted edges, and route endpoints.
    #[must_use]
    pub fn capture(
        network: &RouteNetwork,
        state: &ShipmentState,
        endpoints: Option<(&str, &str)>,
        disrupted: &BTreeSet<EdgeRef>,
    ) -> Self {
        let positions = normalized_positions(network);
        let (source, destination) = endpoints.unzip();

        let nodes = network
            .locations()
            .enumerate()
            .map(|(i, name)| NodeSnapshot {
                name: name.to_string(),
                position: positions.as_ref().map(|p| p[i]),
                is_source: source == Some(name),
                is_destination: destination == Some(name),
                is_current: state.current == name,
            })
            .collect();

        let edges = network
            .edges()
            .map(|edge| EdgeSnapshot {
                from: edge.from.to_string(),
                to: edge.to.to_string(),
                weight: edge.weight,
                disrupted: disrupted.contains(&EdgeRef::new(edge.from, edge.to)),
            })
            .collect();

        Self {
            nodes,
            edges,
            source: source.map(str::to_string),
            destination: destination.map(str::to_string),
            current: state.current.clone(),
        }
    }
}

/// Min-max scale coordinates into the unit square. A degenerate axis maps
/// to the middle.
fn normalized_positions(network: &RouteNetwork) -> Option<Vec<(f64, f64)>> {
    let coords: Vec<(f64, f64)> = network
        .locations()
        .map(|name| network.coords(name))
        .collect::<Option<_>>()?;
    if coords.is_empty() {
        return None;
    }

    let bounds = |values: &mut dyn Iterator<Item = f64>| {
        values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        })
    };
    let (min_lat, max_lat) = bounds(&mut coords.iter().map(|&(lat, _)| lat));
    let (min_lon, max_lon) = bounds(&mut coords.iter().map(|&(_, lon)| lon));
    let scale = |v: f64, lo: f64, hi: f64| {
        if hi > lo { (v - lo) / (hi - lo) } else { 0.5 }
    };

    Some(
        coords
            .iter()
            .map(|&(lat, lon)| (scale(lon, min_lon, max_lon), scale(lat, min_lat, max_lat)))
            .collect(),
    )
}
