//! Successor generation for the search.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::constants::{DELAY_MAJOR, DELAY_MINOR, DELAY_NORMAL};
use crate::error::RouteError;
use crate::graph::RouteNetwork;
use crate::state::ShipmentState;

/// Delay outcome for a single hop. The set is fixed; it does not depend on
/// the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DelayCategory {
    Normal,
    Minor,
    Major,
}

impl DelayCategory {
    /// Outcomes in the order successors are generated.
    pub const ALL: [Self; 3] = [Self::Normal, Self::Minor, Self::Major];

    /// Extra time units this outcome adds to the hop.
    #[must_use]
    pub const fn delay(self) -> u32 {
        match self {
            Self::Normal => DELAY_NORMAL,
            Self::Minor => DELAY_MINOR,
            Self::Major => DELAY_MAJOR,
        }
    }
}

/// A successor state tagged with the delay that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub delay: DelayCategory,
    pub state: ShipmentState,
}

/// Successors of one state; never more than one per delay category.
pub type MoveSet = SmallVec<[Move; 3]>;

/// Enumerate the successors of `state`, one per [`DelayCategory`]. Terminal
/// states have none.
///
/// # Errors
///
/// Returns [`RouteError::InvalidEdgeReference`] when the next hop of the
/// planned route has no edge in `network`.
pub fn possible_moves(
    state: &ShipmentState,
    network: &RouteNetwork,
) -> Result<MoveSet, RouteError> {
    let mut moves = MoveSet::new();
    if state.is_terminal() {
        return Ok(moves);
    }
    let Some(next) = state.next_stop() else {
        return Ok(moves);
    };
    let base = network
        .weight(&state.current, next)
        .ok_or_else(|| RouteError::missing_edge(&state.current, next))?;

    for delay in DelayCategory::ALL {
        if let Some(successor) = state.after_hop(base, delay.delay()) {
            moves.push(Move {
                delay,
                state: successor,
            });
        }
    }
    Ok(moves)
}
