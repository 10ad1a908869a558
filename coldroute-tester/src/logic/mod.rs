pub mod assets;
pub mod reports;
pub mod simulation;

pub use assets::TesterAssets;
pub use simulation::{
    DisruptionPlan, JourneyRequest, JourneySummary, aggregate, run_journey,
};
