//! Disruption inputs: edge references, weather/traffic magnitudes, and a
//! random roller for automated runs.
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{
    TRAFFIC_DELAY_EASY, TRAFFIC_DELAY_HARD, TRAFFIC_DELAY_MEDIUM, WEATHER_DELAY_EASY,
    WEATHER_DELAY_HARD, WEATHER_DELAY_MEDIUM,
};
use crate::error::{ConfigError, RouteError};
use crate::graph::normalize_location;
use crate::state::ShipmentState;

/// A directed edge named by its endpoint cities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeRef {
    pub from: String,
    pub to: String,
}

impl EdgeRef {
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Parse caller input of the form `City1-City2`. Each side is trimmed and
    /// title-cased.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::MalformedDisruptionInput`] unless the input has
    /// exactly two non-empty sides.
    pub fn parse(input: &str) -> Result<Self, RouteError> {
        let malformed = || RouteError::MalformedDisruptionInput {
            input: input.to_string(),
        };
        let mut parts = input.split('-');
        let (Some(from), Some(to), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(malformed());
        };
        let from = normalize_location(from);
        let to = normalize_location(to);
        if from.is_empty() || to.is_empty() {
            return Err(malformed());
        }
        Ok(Self { from, to })
    }

    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::new(self.to.clone(), self.from.clone())
    }
}

impl fmt::Display for EdgeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

impl FromStr for EdgeRef {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisruptionKind {
    Weather,
    Traffic,
}

impl DisruptionKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Weather => "Weather",
            Self::Traffic => "Traffic",
        }
    }
}

impl FromStr for DisruptionKind {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weather" => Ok(Self::Weather),
            "traffic" => Ok(Self::Traffic),
            _ => Err(RouteError::MalformedDisruptionInput {
                input: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl FromStr for Difficulty {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(RouteError::MalformedDisruptionInput {
                input: s.to_string(),
            }),
        }
    }
}

/// Delay per difficulty level for one disruption kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyDelays {
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
}

impl DifficultyDelays {
    #[must_use]
    pub const fn for_difficulty(self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }

    fn validate(self, field: &'static str) -> Result<(), ConfigError> {
        let min = [self.easy, self.medium, self.hard].into_iter().min().unwrap_or(0);
        if min == 0 {
            return Err(ConfigError::MinViolation {
                field,
                min: 1,
                value: u64::from(min),
            });
        }
        Ok(())
    }
}

/// Delay table used to resolve [`Magnitude::Category`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MagnitudeTable {
    #[serde(default = "MagnitudeTable::default_weather")]
    pub weather: DifficultyDelays,
    #[serde(default = "MagnitudeTable::default_traffic")]
    pub traffic: DifficultyDelays,
}

impl MagnitudeTable {
    const fn default_weather() -> DifficultyDelays {
        DifficultyDelays {
            easy: WEATHER_DELAY_EASY,
            medium: WEATHER_DELAY_MEDIUM,
            hard: WEATHER_DELAY_HARD,
        }
    }

    const fn default_traffic() -> DifficultyDelays {
        DifficultyDelays {
            easy: TRAFFIC_DELAY_EASY,
            medium: TRAFFIC_DELAY_MEDIUM,
            hard: TRAFFIC_DELAY_HARD,
        }
    }

    #[must_use]
    pub const fn delay(&self, kind: DisruptionKind, difficulty: Difficulty) -> u32 {
        match kind {
            DisruptionKind::Weather => self.weather.for_difficulty(difficulty),
            DisruptionKind::Traffic => self.traffic.for_difficulty(difficulty),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        self.weather.validate("magnitudes.weather")?;
        self.traffic.validate("magnitudes.traffic")
    }
}

impl Default for MagnitudeTable {
    fn default() -> Self {
        Self {
            weather: Self::default_weather(),
            traffic: Self::default_traffic(),
        }
    }
}

/// How hard a disruption hits the edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Magnitude {
    /// Explicit extra transit time.
    Fixed(u32),
    /// Looked up in the [`MagnitudeTable`].
    Category {
        kind: DisruptionKind,
        difficulty: Difficulty,
    },
}

impl Magnitude {
    #[must_use]
    pub const fn resolve(self, table: &MagnitudeTable) -> u32 {
        match self {
            Self::Fixed(delay) => delay,
            Self::Category { kind, difficulty } => table.delay(kind, difficulty),
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fixed(_) => "Fixed",
            Self::Category { kind, .. } => kind.label(),
        }
    }

    /// Log line recorded on the shipment when this disruption lands.
    #[must_use]
    pub fn describe(self, delay: u32, edge: &EdgeRef) -> String {
        format!("{} delay of {delay} at edge {edge}", self.label())
    }
}

/// Random disruption source for unattended simulation runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisruptionRoll {
    /// Chance per hop that some edge on the remaining route is disrupted.
    pub chance: f32,
    pub difficulty: Difficulty,
}

impl DisruptionRoll {
    #[must_use]
    pub const fn new(chance: f32, difficulty: Difficulty) -> Self {
        Self { chance, difficulty }
    }

    /// Maybe pick an edge on the shipment's remaining route and a disruption
    /// kind. Terminal shipments are never disrupted.
    pub fn roll<R: Rng>(
        &self,
        state: &ShipmentState,
        rng: &mut R,
    ) -> Option<(EdgeRef, Magnitude)> {
        if state.is_terminal() || rng.r#gen::<f32>() >= self.chance {
            return None;
        }
        let route = state.route();
        let hop = rng.gen_range(0..route.len() - 1);
        let kind = if rng.r#gen::<bool>() {
            DisruptionKind::Weather
        } else {
            DisruptionKind::Traffic
        };
        Some((
            EdgeRef::new(route[hop].clone(), route[hop + 1].clone()),
            Magnitude::Category {
                kind,
                difficulty: self.difficulty,
            },
        ))
    }
}
