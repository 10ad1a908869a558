//! Route re-planning after the network changes.
use crate::error::RouteError;
use crate::graph::{PathLimits, RouteNetwork};
use crate::search::{Role, minimax};
use crate::state::ShipmentState;

/// Best alternative found by [`Replanner::replan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplanDecision {
    /// Winning route, starting at the shipment's current city.
    pub route: Vec<String>,
    /// Shipment rebuilt on `route`; equals the input state when not rerouted.
    pub state: ShipmentState,
    pub score: i32,
    /// Number of candidate routes scored.
    pub candidates: usize,
    pub rerouted: bool,
    /// Set when [`PathLimits`] cut enumeration short, so some routes went
    /// unscored.
    pub truncated: bool,
}

/// Scores every simple route from the shipment's position to its destination
/// and keeps the best one.
#[derive(Debug, Clone, Copy)]
pub struct Replanner<'a> {
    network: &'a RouteNetwork,
    limits: PathLimits,
    depth: u32,
}

impl<'a> Replanner<'a> {
    #[must_use]
    pub const fn new(network: &'a RouteNetwork, limits: PathLimits, depth: u32) -> Self {
        Self {
            network,
            limits,
            depth,
        }
    }

    /// Re-score alternatives for `state` heading to `destination`. Returns
    /// `None` when no candidate route with at least one hop exists.
    ///
    /// # Errors
    ///
    /// Propagates search errors for routes that reference missing edges.
    pub fn replan(
        &self,
        state: &ShipmentState,
        destination: &str,
    ) -> Result<Option<ReplanDecision>, RouteError> {
        let mut best: Option<(i32, Vec<String>)> = None;
        let mut candidates = 0;

        let mut paths = self
            .network
            .simple_paths(&state.current, destination, self.limits);
        for path in paths.by_ref() {
            if path.len() < 2 {
                continue;
            }
            let Some(candidate) = ShipmentState::resume(
                state.vehicle.clone(),
                &path,
                state.disruptions.clone(),
                state.cost,
            ) else {
                continue;
            };
            candidates += 1;

            let outcome = minimax(&candidate, self.depth, Role::Maximizing, self.network)?;
            log::debug!("replan candidate {} scored {}", path.join(" -> "), outcome.score);
            if best
                .as_ref()
                .is_none_or(|(incumbent, _)| outcome.score > *incumbent)
            {
                best = Some((outcome.score, path));
            }
        }

        let truncated = paths.truncated();
        let Some((score, route)) = best else {
            return Ok(None);
        };
        if truncated {
            log::debug!(
                "replan at {} scored {candidates} routes before the path limits cut it short",
                state.current
            );
        }

        let rerouted = route != state.route();
        let rebuilt = if rerouted {
            ShipmentState::resume(
                state.vehicle.clone(),
                &route,
                state.disruptions.clone(),
                state.cost,
            )
            .unwrap_or_else(|| state.clone())
        } else {
            state.clone()
        };
        if rerouted {
            log::info!(
                "rerouting shipment at {} via {} (score {score})",
                state.current,
                route.join(" -> ")
            );
        }

        Ok(Some(ReplanDecision {
            route,
            state: rebuilt,
            score,
            candidates,
            rerouted,
            truncated,
        }))
    }
}
