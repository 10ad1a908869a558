//! City network: a directed weighted graph with BFS routing, disruption
//! mutation, and bounded simple-path enumeration.
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

use crate::constants::{DEFAULT_MAX_HOPS, DEFAULT_MAX_PATHS};
use crate::error::{ConfigError, RouteError};

/// Outgoing link of a city as written in the network asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkConfig {
    pub to: String,
    pub weight: u32,
}

/// A city entry in the network asset. Link order defines neighbor order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityConfig {
    pub name: String,
    /// Latitude and longitude, used only for map snapshots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coords: Option<(f64, f64)>,
    #[serde(default)]
    pub links: Vec<LinkConfig>,
}

/// Serializable description of a city network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct NetworkConfig {
    pub cities: Vec<CityConfig>,
}

impl NetworkConfig {
    /// Load a network description from JSON and validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or the network is inconsistent.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// The embedded ten-city reference network.
    #[must_use]
    pub fn default_config() -> Self {
        serde_json::from_str(include_str!("../assets/data/network.json")).unwrap_or_default()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut names = HashSet::new();
        for city in &self.cities {
            if !names.insert(city.name.as_str()) {
                return Err(ConfigError::DuplicateCity {
                    name: city.name.clone(),
                });
            }
        }

        for city in &self.cities {
            let mut seen = HashSet::new();
            for link in &city.links {
                if link.to == city.name {
                    return Err(ConfigError::SelfLoop {
                        name: city.name.clone(),
                    });
                }
                if !names.contains(link.to.as_str()) {
                    return Err(ConfigError::UnknownLinkTarget {
                        from: city.name.clone(),
                        to: link.to.clone(),
                    });
                }
                if link.weight == 0 {
                    return Err(ConfigError::NonPositiveWeight {
                        from: city.name.clone(),
                        to: link.to.clone(),
                    });
                }
                if !seen.insert(link.to.as_str()) {
                    return Err(ConfigError::DuplicateLink {
                        from: city.name.clone(),
                        to: link.to.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// How a disruption on `A-B` propagates to the reverse edge `B-A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EdgeMutation {
    /// Only the named direction is slowed down.
    ForwardOnly,
    /// Both directions are slowed down when the reverse edge exists.
    #[default]
    Symmetric,
}

/// Hard caps for simple-path enumeration during replanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathLimits {
    #[serde(default = "PathLimits::default_max_paths")]
    pub max_paths: usize,
    #[serde(default = "PathLimits::default_max_hops")]
    pub max_hops: usize,
}

impl PathLimits {
    const fn default_max_paths() -> usize {
        DEFAULT_MAX_PATHS
    }

    const fn default_max_hops() -> usize {
        DEFAULT_MAX_HOPS
    }
}

impl Default for PathLimits {
    fn default() -> Self {
        Self {
            max_paths: Self::default_max_paths(),
            max_hops: Self::default_max_hops(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Link {
    to: usize,
    weight: u32,
}

/// Read-only view of a directed edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeView<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub weight: u32,
}

/// Directed weighted city graph. Weights only change through
/// [`RouteNetwork::apply_disruption`].
#[derive(Debug, Clone)]
pub struct RouteNetwork {
    names: Vec<String>,
    index: HashMap<String, usize>,
    coords: Vec<Option<(f64, f64)>>,
    adjacency: Vec<Vec<Link>>,
}

impl RouteNetwork {
    /// Build a network from a configuration, validating it first.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is inconsistent.
    pub fn from_config(config: &NetworkConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let names: Vec<String> = config.cities.iter().map(|c| c.name.clone()).collect();
        let index: HashMap<String, usize> = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        let coords = config.cities.iter().map(|c| c.coords).collect();
        let adjacency = config
            .cities
            .iter()
            .map(|city| {
                city.links
                    .iter()
                    .filter_map(|link| {
                        index.get(&link.to).map(|&to| Link {
                            to,
                            weight: link.weight,
                        })
                    })
                    .collect()
            })
            .collect();

        Ok(Self {
            names,
            index,
            coords,
            adjacency,
        })
    }

    /// The embedded ten-city reference network.
    #[must_use]
    pub fn reference() -> Self {
        Self::from_config(&NetworkConfig::default_config()).unwrap_or_else(|_| Self::empty())
    }

    /// A network with no cities.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            names: Vec::new(),
            index: HashMap::new(),
            coords: Vec::new(),
            adjacency: Vec::new(),
        }
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// City names in configuration order.
    pub fn locations(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    #[must_use]
    pub fn location_count(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn coords(&self, name: &str) -> Option<(f64, f64)> {
        self.index.get(name).and_then(|&i| self.coords[i])
    }

    /// Current transit weight of the directed edge `from -> to`.
    #[must_use]
    pub fn weight(&self, from: &str, to: &str) -> Option<u32> {
        let from = *self.index.get(from)?;
        let to = *self.index.get(to)?;
        self.link(from, to).map(|link| link.weight)
    }

    /// Outgoing neighbors of a city with their current weights.
    pub fn neighbors<'a>(&'a self, name: &str) -> impl Iterator<Item = (&'a str, u32)> + 'a {
        self.index
            .get(name)
            .map(|&i| self.adjacency[i].as_slice())
            .unwrap_or(&[])
            .iter()
            .map(move |link| (self.names[link.to].as_str(), link.weight))
    }

    /// Every directed edge, grouped by source in configuration order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeView<'_>> {
        self.adjacency.iter().enumerate().flat_map(move |(from, links)| {
            links.iter().map(move |link| EdgeView {
                from: &self.names[from],
                to: &self.names[link.to],
                weight: link.weight,
            })
        })
    }

    /// Sum of current weights along consecutive stops, or `None` when a hop
    /// has no edge.
    #[must_use]
    pub fn route_cost(&self, stops: &[String]) -> Option<u32> {
        stops.windows(2).try_fold(0_u32, |total, hop| {
            self.weight(&hop[0], &hop[1])
                .map(|weight| total.saturating_add(weight))
        })
    }

    /// Breadth-first search returning the first-discovered path with the
    /// fewest hops. Neighbors are expanded in configuration order and no
    /// city is visited twice.
    #[must_use]
    pub fn find_path(&self, source: &str, destination: &str) -> Option<Vec<String>> {
        let start = *self.index.get(source)?;
        let goal = *self.index.get(destination)?;

        let mut visited = vec![false; self.names.len()];
        let mut parent: Vec<Option<usize>> = vec![None; self.names.len()];
        let mut queue = VecDeque::from([start]);
        visited[start] = true;

        while let Some(node) = queue.pop_front() {
            if node == goal {
                return Some(self.trace_back(&parent, goal));
            }
            for link in &self.adjacency[node] {
                if !visited[link.to] {
                    visited[link.to] = true;
                    parent[link.to] = Some(node);
                    queue.push_back(link.to);
                }
            }
        }

        None
    }

    fn trace_back(&self, parent: &[Option<usize>], goal: usize) -> Vec<String> {
        let mut path = vec![self.names[goal].clone()];
        let mut cursor = goal;
        while let Some(prev) = parent[cursor] {
            path.push(self.names[prev].clone());
            cursor = prev;
        }
        path.reverse();
        path
    }

    /// Increase the weight of `from -> to` by `extra` and return the new
    /// weight. Under [`EdgeMutation::Symmetric`] the reverse edge, when it
    /// exists, receives the same increase. Disruptions accumulate and never
    /// decay.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InvalidEdgeReference`] if either city or the
    /// edge itself is missing.
    pub fn apply_disruption(
        &mut self,
        from: &str,
        to: &str,
        extra: u32,
        mutation: EdgeMutation,
    ) -> Result<u32, RouteError> {
        let (Some(&a), Some(&b)) = (self.index.get(from), self.index.get(to)) else {
            return Err(RouteError::missing_edge(from, to));
        };
        let Some(forward) = self.link_mut(a, b) else {
            return Err(RouteError::missing_edge(from, to));
        };
        forward.weight = forward.weight.saturating_add(extra);
        let updated = forward.weight;

        if mutation == EdgeMutation::Symmetric
            && let Some(reverse) = self.link_mut(b, a)
        {
            reverse.weight = reverse.weight.saturating_add(extra);
        }
        Ok(updated)
    }

    /// Lazily enumerate simple paths from `source` to `destination`,
    /// depth-first in neighbor order, within `limits`.
    #[must_use]
    pub fn simple_paths(
        &self,
        source: &str,
        destination: &str,
        limits: PathLimits,
    ) -> SimplePaths<'_> {
        let mut on_path = vec![false; self.names.len()];
        let (stack, target) = match (self.index.get(source), self.index.get(destination)) {
            (Some(&start), Some(&goal)) => {
                on_path[start] = true;
                (vec![Frame { node: start, cursor: 0 }], goal)
            }
            _ => (Vec::new(), 0),
        };
        SimplePaths {
            network: self,
            target,
            limits,
            stack,
            on_path,
            emitted: 0,
            truncated: false,
            hop_capped: false,
        }
    }

    fn link(&self, from: usize, to: usize) -> Option<&Link> {
        self.adjacency[from].iter().find(|link| link.to == to)
    }

    fn link_mut(&mut self, from: usize, to: usize) -> Option<&mut Link> {
        self.adjacency[from].iter_mut().find(|link| link.to == to)
    }
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    node: usize,
    cursor: usize,
}

/// Iterator over simple paths produced by [`RouteNetwork::simple_paths`].
#[derive(Debug)]
pub struct SimplePaths<'a> {
    network: &'a RouteNetwork,
    target: usize,
    limits: PathLimits,
    stack: Vec<Frame>,
    on_path: Vec<bool>,
    emitted: usize,
    truncated: bool,
    hop_capped: bool,
}

impl SimplePaths<'_> {
    /// True once a limit cut the enumeration short: a path past the hop cap
    /// was skipped, or another path existed beyond the path cap.
    #[must_use]
    pub const fn truncated(&self) -> bool {
        self.truncated
    }

    fn path_to(&self, last: usize) -> Vec<String> {
        self.stack
            .iter()
            .map(|frame| frame.node)
            .chain(std::iter::once(last))
            .map(|node| self.network.names[node].clone())
            .collect()
    }

    fn note_hop_cap(&mut self) {
        if !self.hop_capped {
            log::warn!(
                "simple path enumeration stopped at the {} hop cap",
                self.limits.max_hops
            );
            self.hop_capped = true;
        }
        self.truncated = true;
    }

    fn search(&mut self) -> Option<Vec<String>> {
        loop {
            let frame = self.stack.last_mut()?;
            let node = frame.node;
            let Some(link) = self.network.adjacency[node].get(frame.cursor).copied() else {
                self.stack.pop();
                self.on_path[node] = false;
                continue;
            };
            frame.cursor += 1;

            if self.on_path[link.to] {
                continue;
            }
            let hops = self.stack.len();
            if link.to == self.target {
                if hops > self.limits.max_hops {
                    self.note_hop_cap();
                    continue;
                }
                return Some(self.path_to(link.to));
            }
            if hops >= self.limits.max_hops {
                self.note_hop_cap();
                continue;
            }
            self.on_path[link.to] = true;
            self.stack.push(Frame {
                node: link.to,
                cursor: 0,
            });
        }
    }
}

impl Iterator for SimplePaths<'_> {
    type Item = Vec<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.emitted < self.limits.max_paths {
            let path = self.search()?;
            self.emitted += 1;
            return Some(path);
        }
        if !self.stack.is_empty() {
            // One more path past the cap means the enumeration was cut short.
            if self.search().is_some() {
                log::warn!(
                    "simple path enumeration stopped at the {} path cap",
                    self.limits.max_paths
                );
                self.truncated = true;
            }
            self.stack.clear();
        }
        None
    }
}

/// Normalize free-form city input: trim, then capitalize the first letter of
/// each word and lowercase the rest.
#[must_use]
pub fn normalize_location(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut word_start = true;
    for ch in raw.trim().chars() {
        if ch.is_alphabetic() {
            if word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            word_start = false;
        } else {
            out.push(ch);
            word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(to: &str, weight: u32) -> LinkConfig {
        LinkConfig {
            to: to.to_string(),
            weight,
        }
    }

    fn city(name: &str, links: Vec<LinkConfig>) -> CityConfig {
        CityConfig {
            name: name.to_string(),
            coords: None,
            links,
        }
    }

    fn names(stops: &[&str]) -> Vec<String> {
        stops.iter().map(ToString::to_string).collect()
    }

    /// A -> B -> D, A -> C -> D, plus B <-> C.
    fn diamond() -> RouteNetwork {
        let config = NetworkConfig {
            cities: vec![
                city("A", vec![link("B", 1), link("C", 2)]),
                city("B", vec![link("C", 1), link("D", 5)]),
                city("C", vec![link("B", 1), link("D", 1)]),
                city("D", vec![]),
            ],
        };
        RouteNetwork::from_config(&config).unwrap()
    }

    #[test]
    fn reference_network_loads_all_cities() {
        let network = RouteNetwork::reference();
        assert_eq!(network.location_count(), 10);
        assert_eq!(network.weight("Delhi", "Jaipur"), Some(5));
        assert_eq!(network.weight("Kolkata", "Chennai"), Some(18));
        assert!(network.coords("Mumbai").is_some());
        assert_eq!(network.edges().count(), 28);
    }

    #[test]
    fn bfs_prefers_fewest_hops_in_neighbor_order() {
        let network = diamond();
        assert_eq!(
            network.find_path("A", "D"),
            Some(vec!["A".to_string(), "B".to_string(), "D".to_string()])
        );
        assert_eq!(network.find_path("A", "A"), Some(vec!["A".to_string()]));
        assert_eq!(network.find_path("D", "A"), None);
        assert_eq!(network.find_path("A", "Z"), None);
    }

    #[test]
    fn bfs_path_never_repeats_a_city() {
        let network = RouteNetwork::reference();
        let cities: Vec<String> = network.locations().map(str::to_string).collect();
        for from in &cities {
            for to in &cities {
                let path = network.find_path(from, to).expect("reference map is connected");
                let unique: HashSet<&String> = path.iter().collect();
                assert_eq!(unique.len(), path.len(), "{from} -> {to}: {path:?}");
                assert_eq!(path.first(), Some(from));
                assert_eq!(path.last(), Some(to));
            }
        }
    }

    #[test]
    fn symmetric_disruption_updates_both_directions() {
        let mut network = RouteNetwork::reference();
        let updated = network
            .apply_disruption("Delhi", "Jaipur", 15, EdgeMutation::Symmetric)
            .unwrap();
        assert_eq!(updated, 20);
        assert_eq!(network.weight("Jaipur", "Delhi"), Some(20));

        network
            .apply_disruption("Delhi", "Jaipur", 10, EdgeMutation::ForwardOnly)
            .unwrap();
        assert_eq!(network.weight("Delhi", "Jaipur"), Some(30));
        assert_eq!(network.weight("Jaipur", "Delhi"), Some(20));
    }

    #[test]
    fn disruption_without_reverse_edge_only_touches_forward() {
        let mut network = diamond();
        network
            .apply_disruption("B", "D", 3, EdgeMutation::Symmetric)
            .unwrap();
        assert_eq!(network.weight("B", "D"), Some(8));
        assert_eq!(network.weight("D", "B"), None);
    }

    #[test]
    fn disruption_on_missing_edge_is_rejected() {
        let mut network = RouteNetwork::reference();
        let err = network
            .apply_disruption("Delhi", "Chennai", 15, EdgeMutation::Symmetric)
            .unwrap_err();
        assert_eq!(err, RouteError::missing_edge("Delhi", "Chennai"));
        assert!(
            network
                .apply_disruption("Gotham", "Delhi", 15, EdgeMutation::Symmetric)
                .is_err()
        );
    }

    #[test]
    fn simple_paths_enumerate_depth_first() {
        let network = diamond();
        let paths: Vec<Vec<String>> = network
            .simple_paths("A", "D", PathLimits::default())
            .collect();
        let rendered: Vec<String> = paths.iter().map(|p| p.join("")).collect();
        assert_eq!(rendered, vec!["ABCD", "ABD", "ACBD", "ACD"]);
    }

    #[test]
    fn simple_paths_respect_limits() {
        let network = diamond();
        let mut capped = network.simple_paths(
            "A",
            "D",
            PathLimits {
                max_paths: 2,
                max_hops: 16,
            },
        );
        assert_eq!(capped.by_ref().count(), 2);
        assert!(capped.truncated());

        let short: Vec<Vec<String>> = network
            .simple_paths(
                "A",
                "D",
                PathLimits {
                    max_paths: 16,
                    max_hops: 2,
                },
            )
            .collect();
        assert!(short.iter().all(|p| p.len() <= 3));
        assert_eq!(short.len(), 2);
    }

    #[test]
    fn hop_cap_marks_enumeration_truncated() {
        let network = RouteNetwork::reference();
        let mut paths = network.simple_paths(
            "Delhi",
            "Chennai",
            PathLimits {
                max_paths: 512,
                max_hops: 3,
            },
        );
        let found: Vec<Vec<String>> = paths.by_ref().collect();
        assert_eq!(found, vec![names(&["Delhi", "Lucknow", "Kolkata", "Chennai"])]);
        assert!(paths.truncated());
    }

    #[test]
    fn path_cap_equal_to_total_is_not_truncated() {
        let network = RouteNetwork::reference();
        let total = network
            .simple_paths("Hyderabad", "Chennai", PathLimits::default())
            .count();
        assert!(total > 1);

        let mut exact = network.simple_paths(
            "Hyderabad",
            "Chennai",
            PathLimits {
                max_paths: total,
                max_hops: 16,
            },
        );
        assert_eq!(exact.by_ref().count(), total);
        assert!(!exact.truncated());

        let mut short = network.simple_paths(
            "Hyderabad",
            "Chennai",
            PathLimits {
                max_paths: total - 1,
                max_hops: 16,
            },
        );
        assert_eq!(short.by_ref().count(), total - 1);
        assert!(short.truncated());
    }

    #[test]
    fn simple_paths_for_unknown_or_identical_endpoints_are_empty() {
        let network = diamond();
        assert_eq!(network.simple_paths("A", "Z", PathLimits::default()).count(), 0);
        assert_eq!(network.simple_paths("A", "A", PathLimits::default()).count(), 0);
    }

    #[test]
    fn route_cost_sums_current_weights() {
        let network = RouteNetwork::reference();
        let stops: Vec<String> = ["Delhi", "Lucknow", "Kolkata", "Chennai"]
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(network.route_cost(&stops), Some(39));
        assert_eq!(network.route_cost(&stops[..1]), Some(0));
        let broken = vec!["Delhi".to_string(), "Chennai".to_string()];
        assert_eq!(network.route_cost(&broken), None);
    }

    #[test]
    fn invalid_configs_are_rejected() {
        let dup = NetworkConfig {
            cities: vec![city("A", vec![]), city("A", vec![])],
        };
        assert!(matches!(
            RouteNetwork::from_config(&dup),
            Err(ConfigError::DuplicateCity { .. })
        ));

        let unknown = NetworkConfig {
            cities: vec![city("A", vec![link("B", 1)])],
        };
        assert!(matches!(
            RouteNetwork::from_config(&unknown),
            Err(ConfigError::UnknownLinkTarget { .. })
        ));

        let zero = NetworkConfig {
            cities: vec![city("A", vec![link("B", 0)]), city("B", vec![])],
        };
        assert!(matches!(
            RouteNetwork::from_config(&zero),
            Err(ConfigError::NonPositiveWeight { .. })
        ));

        let looped = NetworkConfig {
            cities: vec![city("A", vec![link("A", 3)])],
        };
        assert!(matches!(
            RouteNetwork::from_config(&looped),
            Err(ConfigError::SelfLoop { .. })
        ));

        assert!(matches!(
            NetworkConfig::from_json(r#"{"cities": [{"name": "A", "links": [{"to": "B"}]}]}"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn neighbors_follow_configuration_order() {
        let network = RouteNetwork::reference();
        let names: Vec<&str> = network.neighbors("Mumbai").map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Ahmedabad", "Jaipur", "Hyderabad", "Bangalore"]);
        assert_eq!(network.neighbors("Nowhere").count(), 0);
    }

    #[test]
    fn location_input_is_title_cased() {
        assert_eq!(normalize_location("  delhi "), "Delhi");
        assert_eq!(normalize_location("mUMBAI"), "Mumbai");
        assert_eq!(normalize_location("new delhi"), "New Delhi");
    }
}
