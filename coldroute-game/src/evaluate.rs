//! Heuristic desirability of a shipment state.
use crate::constants::{
    PENALTY_PER_DISRUPTION, PENALTY_PER_REMAINING_STOP, SCORE_DELIVERED_BASE,
    SCORE_IN_TRANSIT_BASE, SCORE_SPOILED, SHELF_LIFE_COMFORT,
};
use crate::state::ShipmentState;

fn as_score(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Score a state. Delivery is rewarded by how cheaply it happened, spoilage
/// is a flat loss, and anything in between is penalized for remaining stops,
/// low shelf life, and logged disruptions.
#[must_use]
pub fn score(state: &ShipmentState) -> i32 {
    if state.delivered {
        let cost = i32::try_from(state.cost).unwrap_or(i32::MAX);
        return SCORE_DELIVERED_BASE.saturating_sub(cost);
    }
    if state.vehicle.is_spoiled() {
        return SCORE_SPOILED;
    }

    let distance_penalty = as_score(state.remaining.len()).saturating_mul(PENALTY_PER_REMAINING_STOP);
    let spoilage_risk = SHELF_LIFE_COMFORT.saturating_sub(state.vehicle.shelf_life).max(0);
    let disruption_penalty =
        as_score(state.disruptions.len()).saturating_mul(PENALTY_PER_DISRUPTION);

    SCORE_IN_TRANSIT_BASE
        .saturating_sub(distance_penalty)
        .saturating_sub(spoilage_risk)
        .saturating_sub(disruption_penalty)
}
