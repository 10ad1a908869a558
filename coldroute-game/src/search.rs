//! Depth-limited minimax over delay outcomes.
//!
//! Both roles draw from the same three successors produced by
//! [`possible_moves`]: the maximizing role models the planner, the
//! minimizing role models worst-case delays, and there is no separate
//! adversary move set. Recursion depth is bounded by the caller's `depth`
//! and by the remaining route, since every level consumes one stop.
use serde::{Deserialize, Serialize};

use crate::error::RouteError;
use crate::evaluate::score;
use crate::graph::RouteNetwork;
use crate::moves::possible_moves;
use crate::state::ShipmentState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Maximizing,
    Minimizing,
}

impl Role {
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Self::Maximizing => Self::Minimizing,
            Self::Minimizing => Self::Maximizing,
        }
    }

    /// Strict comparison, so the first-seen candidate keeps ties.
    const fn prefers(self, candidate: i32, incumbent: i32) -> bool {
        match self {
            Self::Maximizing => candidate > incumbent,
            Self::Minimizing => candidate < incumbent,
        }
    }
}

impl From<bool> for Role {
    fn from(maximizing: bool) -> Self {
        if maximizing {
            Self::Maximizing
        } else {
            Self::Minimizing
        }
    }
}

/// Result of a search call. At a leaf the state is the searched state itself;
/// otherwise it is the chosen immediate successor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub score: i32,
    pub state: Option<ShipmentState>,
}

/// Search `depth` plies below `state`.
///
/// # Errors
///
/// Propagates [`RouteError::InvalidEdgeReference`] when a route hop has no
/// edge in `network`.
pub fn minimax(
    state: &ShipmentState,
    depth: u32,
    role: Role,
    network: &RouteNetwork,
) -> Result<SearchOutcome, RouteError> {
    if depth == 0 || state.is_terminal() {
        return Ok(SearchOutcome {
            score: score(state),
            state: Some(state.clone()),
        });
    }

    let mut best: Option<(i32, ShipmentState)> = None;
    for mv in possible_moves(state, network)? {
        let child = minimax(&mv.state, depth - 1, role.flip(), network)?;
        let improves = best
            .as_ref()
            .is_none_or(|(incumbent, _)| role.prefers(child.score, *incumbent));
        if improves {
            best = Some((child.score, mv.state));
        }
    }

    Ok(match best {
        Some((score, state)) => SearchOutcome {
            score,
            state: Some(state),
        },
        None => SearchOutcome {
            score: score(state),
            state: None,
        },
    })
}
