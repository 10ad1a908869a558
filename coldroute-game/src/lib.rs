//! Coldroute routing engine
//!
//! Plans and re-plans cold-chain deliveries of perishable goods over a
//! weighted city network. Hops are chosen with a depth-limited minimax over
//! delay outcomes; disruptions raise edge weights and trigger a re-score of
//! every simple route to the destination. No UI or platform dependencies.

pub mod cargo;
pub mod config;
pub mod constants;
pub mod disruption;
pub mod dispatch;
pub mod error;
pub mod evaluate;
pub mod graph;
pub mod moves;
pub mod render;
pub mod replan;
pub mod search;
pub mod state;
pub mod status;
pub mod vehicle;

// Re-export commonly used types
pub use cargo::{CargoCatalog, Perishable};
pub use config::EngineConfig;
pub use constants::QUICK_DISRUPTION_DELAY;
pub use disruption::{
    Difficulty, DifficultyDelays, DisruptionKind, DisruptionRoll, EdgeRef, Magnitude,
    MagnitudeTable,
};
pub use dispatch::{Advance, DisruptOutcome, Dispatcher, RoutePlan};
pub use error::{ConfigError, RouteError};
pub use evaluate::score;
pub use graph::{
    CityConfig, EdgeMutation, EdgeView, LinkConfig, NetworkConfig, PathLimits, RouteNetwork,
    SimplePaths, normalize_location,
};
pub use moves::{DelayCategory, Move, MoveSet, possible_moves};
pub use render::{EdgeSnapshot, GraphSnapshot, NodeSnapshot};
pub use replan::{ReplanDecision, Replanner};
pub use search::{Role, SearchOutcome, minimax};
pub use state::{DisruptionEntry, ShipmentState, ShipmentStatus};
pub use status::RouteStatus;
pub use vehicle::Vehicle;
