use anyhow::{Context, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::Serialize;

use coldroute_game::{
    Advance, Difficulty, DisruptOutcome, DisruptionRoll, Dispatcher, ShipmentState,
    ShipmentStatus, Vehicle,
};

use super::assets::TesterAssets;

/// Hard stop for a single journey. Reroutes can lengthen a route, so the
/// loop is capped independently of the route length.
pub const MAX_TURNS: u32 = 256;

/// What to ship and where.
#[derive(Debug, Clone)]
pub struct JourneyRequest {
    pub source: String,
    pub destination: String,
    pub item: String,
    /// Overrides the catalog shelf life when set.
    pub shelf_life: Option<i32>,
    pub quantity: Option<u32>,
}

/// Per-hop disruption settings for unattended runs.
#[derive(Debug, Clone, Copy)]
pub struct DisruptionPlan {
    pub chance: f32,
    pub difficulty: Difficulty,
}

impl DisruptionPlan {
    const fn roller(self) -> DisruptionRoll {
        DisruptionRoll::new(self.chance, self.difficulty)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JourneySummary {
    pub seed: u64,
    pub initial_route: Vec<String>,
    pub final_location: String,
    pub status: ShipmentStatus,
    pub cost: u32,
    pub shelf_life: i32,
    pub turns: u32,
    pub reroutes: u32,
    pub disruptions: Vec<String>,
    /// Status text after every turn, kept for verbose console output.
    #[serde(skip)]
    pub timeline: Vec<String>,
}

impl JourneySummary {
    #[must_use]
    pub const fn delivered(&self) -> bool {
        matches!(self.status, ShipmentStatus::Delivered)
    }
}

/// Resolve the vehicle a request ships with.
///
/// # Errors
///
/// Fails when the item is not in the catalog and no shelf life override was
/// given.
pub fn vehicle_for(assets: &TesterAssets, request: &JourneyRequest) -> Result<Vehicle> {
    if let Some(shelf_life) = request.shelf_life {
        return Ok(Vehicle::new(
            request.item.clone(),
            request.quantity,
            shelf_life,
        ));
    }
    assets
        .catalog
        .vehicle_for(&request.item, request.quantity)
        .with_context(|| {
            format!(
                "unknown item '{}' (use --list-items or pass --shelf-life)",
                request.item
            )
        })
}

/// Drive one shipment to a terminal state on a fresh copy of the network.
///
/// # Errors
///
/// Propagates routing errors such as unknown cities or unreachable
/// destinations.
pub fn run_journey(
    assets: &TesterAssets,
    request: &JourneyRequest,
    disruptions: DisruptionPlan,
    seed: u64,
) -> Result<JourneySummary> {
    let mut dispatcher = Dispatcher::new(assets.network.clone(), assets.engine.clone())
        .context("invalid engine configuration")?;
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let roller = disruptions.roller();

    let vehicle = vehicle_for(assets, request)?;
    let mut state = dispatcher
        .start_route(&request.source, &request.destination, vehicle)
        .with_context(|| {
            format!(
                "cannot plan {} -> {}",
                request.source, request.destination
            )
        })?;
    let initial_route = state.route();
    let mut timeline = vec![dispatcher.describe(&state)?.to_string()];
    let mut turns = 0;
    let mut reroutes = 0;

    while turns < MAX_TURNS {
        if let Some((edge, magnitude)) = roller.roll(&state, &mut rng) {
            match dispatcher.disrupt(&state, &edge, magnitude)? {
                DisruptOutcome::Applied {
                    state: next,
                    rerouted,
                } => {
                    if rerouted {
                        reroutes += 1;
                    }
                    state = next;
                }
                DisruptOutcome::Terminal { .. } => break,
            }
        }

        match dispatcher.advance(&state)? {
            Advance::Moved(next) => state = next,
            Advance::Terminal { .. } => break,
        }
        turns += 1;
        timeline.push(dispatcher.describe(&state)?.to_string());
    }
    if turns == MAX_TURNS {
        log::warn!("seed {seed}: journey stopped after {MAX_TURNS} turns");
    }

    Ok(summarize(seed, initial_route, &state, turns, reroutes, timeline))
}

fn summarize(
    seed: u64,
    initial_route: Vec<String>,
    state: &ShipmentState,
    turns: u32,
    reroutes: u32,
    timeline: Vec<String>,
) -> JourneySummary {
    JourneySummary {
        seed,
        initial_route,
        final_location: state.current.clone(),
        status: state.status(),
        cost: state.cost,
        shelf_life: state.vehicle.shelf_life,
        turns,
        reroutes,
        disruptions: state.disruptions.iter().map(ToString::to_string).collect(),
        timeline,
    }
}

/// Roll-up of many journeys for one request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct JourneyAggregate {
    pub runs: usize,
    pub delivered: usize,
    pub spoiled: usize,
    pub halted: usize,
    pub mean_cost: f64,
    pub mean_reroutes: f64,
}

#[must_use]
pub fn aggregate(summaries: &[JourneySummary]) -> JourneyAggregate {
    if summaries.is_empty() {
        return JourneyAggregate::default();
    }
    let count = |status: ShipmentStatus| summaries.iter().filter(|s| s.status == status).count();
    #[allow(clippy::cast_precision_loss)]
    let runs = summaries.len() as f64;
    let total_cost: f64 = summaries.iter().map(|s| f64::from(s.cost)).sum();
    let total_reroutes: f64 = summaries.iter().map(|s| f64::from(s.reroutes)).sum();

    JourneyAggregate {
        runs: summaries.len(),
        delivered: summaries.iter().filter(|s| s.delivered()).count(),
        spoiled: count(ShipmentStatus::Spoiled),
        halted: count(ShipmentStatus::Halted),
        mean_cost: total_cost / runs,
        mean_reroutes: total_reroutes / runs,
    }
}
