//! Centralized scoring and tuning constants for Coldroute routing logic.
//!
//! These values define the deterministic math for the search. Keeping them
//! together ensures the evaluator can only be adjusted via code changes
//! reviewed in version control, rather than through external JSON assets.

// Delay outcomes -----------------------------------------------------------
pub(crate) const DELAY_NORMAL: u32 = 0;
pub(crate) const DELAY_MINOR: u32 = 15;
pub(crate) const DELAY_MAJOR: u32 = 30;

// Evaluator ----------------------------------------------------------------
pub(crate) const SCORE_DELIVERED_BASE: i32 = 100;
pub(crate) const SCORE_SPOILED: i32 = -100;
pub(crate) const SCORE_IN_TRANSIT_BASE: i32 = 50;
pub(crate) const PENALTY_PER_REMAINING_STOP: i32 = 10;
pub(crate) const PENALTY_PER_DISRUPTION: i32 = 5;
/// Shelf life above this level carries no spoilage-risk penalty.
pub(crate) const SHELF_LIFE_COMFORT: i32 = 50;

// Search -------------------------------------------------------------------
pub(crate) const DEFAULT_SEARCH_DEPTH: u32 = 2;
pub(crate) const DEFAULT_MAX_PATHS: usize = 512;
pub(crate) const DEFAULT_MAX_HOPS: usize = 16;

// Disruption magnitudes ----------------------------------------------------
pub(crate) const WEATHER_DELAY_EASY: u32 = 10;
pub(crate) const WEATHER_DELAY_MEDIUM: u32 = 15;
pub(crate) const WEATHER_DELAY_HARD: u32 = 20;
pub(crate) const TRAFFIC_DELAY_EASY: u32 = 20;
pub(crate) const TRAFFIC_DELAY_MEDIUM: u32 = 30;
pub(crate) const TRAFFIC_DELAY_HARD: u32 = 40;
/// Magnitude used by the quick "delay the next hop" disruption.
pub const QUICK_DISRUPTION_DELAY: u32 = 15;
