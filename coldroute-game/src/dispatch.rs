//! Shipment dispatch: plans routes over an owned network and re-plans them
//! around disruptions.
use std::collections::BTreeSet;

use crate::config::EngineConfig;
use crate::disruption::{EdgeRef, Magnitude};
use crate::error::{ConfigError, RouteError};
use crate::graph::{EdgeMutation, RouteNetwork, normalize_location};
use crate::render::GraphSnapshot;
use crate::replan::Replanner;
use crate::search::{Role, minimax};
use crate::state::{DisruptionEntry, ShipmentState};
use crate::status::RouteStatus;
use crate::vehicle::Vehicle;

/// The active route as first planned and as amended by reroutes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePlan {
    pub origin: String,
    pub destination: String,
    /// Full route from origin to destination, including stops already passed.
    pub route: Vec<String>,
}

/// Result of [`Dispatcher::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    Moved(ShipmentState),
    Terminal { delivered: bool },
}

/// Result of [`Dispatcher::disrupt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisruptOutcome {
    Applied {
        state: ShipmentState,
        rerouted: bool,
    },
    Terminal {
        delivered: bool,
    },
}

/// Owns the route network and drives shipments across it.
///
/// Edge weights and the disrupted set persist across routes started on the
/// same dispatcher.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    network: RouteNetwork,
    config: EngineConfig,
    plan: Option<RoutePlan>,
    disrupted: BTreeSet<EdgeRef>,
}

impl Dispatcher {
    /// Build a dispatcher over `network`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails validation.
    pub fn new(network: RouteNetwork, config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            network,
            config,
            plan: None,
            disrupted: BTreeSet::new(),
        })
    }

    /// Dispatcher over the bundled ten-city map with default tuning.
    #[must_use]
    pub fn with_reference_map() -> Self {
        Self {
            network: RouteNetwork::reference(),
            config: EngineConfig::default(),
            plan: None,
            disrupted: BTreeSet::new(),
        }
    }

    #[must_use]
    pub const fn network(&self) -> &RouteNetwork {
        &self.network
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub const fn route_plan(&self) -> Option<&RoutePlan> {
        self.plan.as_ref()
    }

    #[must_use]
    pub const fn disrupted_edges(&self) -> &BTreeSet<EdgeRef> {
        &self.disrupted
    }

    /// Plan the fewest-hop route and place `vehicle` at its head. City names
    /// are title-cased before lookup.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InvalidLocation`] for an unknown endpoint and
    /// [`RouteError::NoRouteFound`] when the destination is unreachable.
    pub fn start_route(
        &mut self,
        source: &str,
        destination: &str,
        vehicle: Vehicle,
    ) -> Result<ShipmentState, RouteError> {
        let origin = normalize_location(source);
        let destination = normalize_location(destination);
        for name in [&origin, &destination] {
            if !self.network.contains(name) {
                return Err(RouteError::InvalidLocation { name: name.clone() });
            }
        }

        let route = self.network.find_path(&origin, &destination).ok_or_else(|| {
            RouteError::NoRouteFound {
                origin: origin.clone(),
                destination: destination.clone(),
            }
        })?;
        let state = ShipmentState::start(vehicle, &route).ok_or_else(|| {
            RouteError::NoRouteFound {
                origin: origin.clone(),
                destination: destination.clone(),
            }
        })?;
        log::debug!(
            "route planned for {}: {}",
            state.vehicle.item,
            route.join(" -> ")
        );

        self.plan = Some(RoutePlan {
            origin,
            destination,
            route,
        });
        Ok(state)
    }

    /// Move the shipment one hop, picking the successor the search rates best.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InvalidEdgeReference`] when the planned route
    /// crosses a missing edge.
    pub fn advance(&self, state: &ShipmentState) -> Result<Advance, RouteError> {
        if state.is_terminal() {
            return Ok(Self::terminal(state));
        }
        let outcome = minimax(
            state,
            self.config.search_depth,
            Role::Maximizing,
            &self.network,
        )?;
        let Some(next) = outcome.state else {
            return Ok(Self::terminal(state));
        };
        log::debug!(
            "advanced to {} (score {}, cost {})",
            next.current,
            outcome.score,
            next.cost
        );
        if next.is_terminal() {
            log::info!("shipment {} at {}", next.status().label(), next.current);
        }
        Ok(Advance::Moved(next))
    }

    /// Slow down `edge` and re-plan the shipment around it.
    ///
    /// The edge weight grows by the resolved magnitude (and its reverse too
    /// under [`EdgeMutation::Symmetric`]), the event is appended to the
    /// shipment's log, and every simple route to the destination is
    /// re-scored. The shipment takes the first top-scoring candidate in
    /// enumeration order, which can differ from its active route on a tie.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InvalidEdgeReference`] for an edge missing from
    /// the network and [`RouteError::MalformedDisruptionInput`] for a
    /// zero-length delay. Nothing is mutated on error.
    pub fn disrupt(
        &mut self,
        state: &ShipmentState,
        edge: &EdgeRef,
        magnitude: Magnitude,
    ) -> Result<DisruptOutcome, RouteError> {
        if state.is_terminal() {
            return Ok(DisruptOutcome::Terminal {
                delivered: state.delivered,
            });
        }
        if self.network.weight(&edge.from, &edge.to).is_none() {
            return Err(RouteError::missing_edge(&edge.from, &edge.to));
        }
        let delay = magnitude.resolve(&self.config.magnitudes);
        if delay == 0 {
            return Err(RouteError::MalformedDisruptionInput {
                input: edge.to_string(),
            });
        }

        let mutation = self.config.edge_mutation;
        let weight = self
            .network
            .apply_disruption(&edge.from, &edge.to, delay, mutation)?;
        self.disrupted.insert(edge.clone());
        let reverse = edge.reversed();
        if mutation == EdgeMutation::Symmetric
            && self.network.weight(&reverse.from, &reverse.to).is_some()
        {
            self.disrupted.insert(reverse);
        }
        log::debug!("edge {edge} now weighs {weight} after +{delay}");

        let entry = DisruptionEntry::Event(magnitude.describe(delay, edge));
        let logged = state.with_disruption(entry);
        let planner = Replanner::new(
            &self.network,
            self.config.path_limits,
            self.config.search_depth,
        );
        let Some(decision) = planner.replan(&logged, state.destination())? else {
            return Ok(DisruptOutcome::Applied {
                state: logged,
                rerouted: false,
            });
        };

        if decision.rerouted
            && let Some(plan) = self.plan.as_mut()
        {
            plan.route = splice_route(&plan.route, &decision.route);
        }
        Ok(DisruptOutcome::Applied {
            state: decision.state,
            rerouted: decision.rerouted,
        })
    }

    /// Disrupt the edge from the shipment's current city to its next stop.
    ///
    /// # Errors
    ///
    /// Same as [`Dispatcher::disrupt`].
    pub fn disrupt_next_hop(
        &mut self,
        state: &ShipmentState,
        magnitude: Magnitude,
    ) -> Result<DisruptOutcome, RouteError> {
        let Some(next) = state.next_stop().filter(|_| !state.is_terminal()) else {
            return Ok(DisruptOutcome::Terminal {
                delivered: state.delivered,
            });
        };
        let edge = EdgeRef::new(state.current.clone(), next);
        self.disrupt(state, &edge, magnitude)
    }

    /// Snapshot of location, route, ETA, and history for display.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InvalidEdgeReference`] if the remaining route
    /// crosses a missing edge.
    pub fn describe(&self, state: &ShipmentState) -> Result<RouteStatus, RouteError> {
        RouteStatus::capture(state, &self.network)
    }

    #[must_use]
    pub fn render_graph(&self, state: &ShipmentState) -> GraphSnapshot {
        let endpoints = self
            .plan
            .as_ref()
            .map(|plan| (plan.origin.as_str(), plan.destination.as_str()));
        GraphSnapshot::capture(&self.network, state, endpoints, &self.disrupted)
    }

    fn terminal(state: &ShipmentState) -> Advance {
        log::info!("shipment {} at {}", state.status().label(), state.current);
        Advance::Terminal {
            delivered: state.delivered,
        }
    }
}

/// Keep the travelled prefix of `full` up to the reroute point and append the
/// new tail. The reroute point is the latest visit to the shipment's city, as
/// an amended plan can pass through a city twice.
fn splice_route(full: &[String], reroute: &[String]) -> Vec<String> {
    let Some(head) = reroute.first() else {
        return full.to_vec();
    };
    match full.iter().rposition(|stop| stop == head) {
        Some(at) => full[..at]
            .iter()
            .chain(reroute.iter())
            .cloned()
            .collect(),
        None => reroute.to_vec(),
    }
}
