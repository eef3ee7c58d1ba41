//! Station graph derived from an undirected edge set.

use std::collections::HashMap;

use crate::errors::domain::{DomainError, ValidationKind};

/// Symmetric adjacency over a fixed list of stations.
///
/// Built only through [`StationGraph::from_edges`], which inserts every edge in
/// both directions. Neighbour order follows the order in which edges were
/// first seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationGraph {
    stations: Vec<String>,
    adjacency: HashMap<String, Vec<String>>,
}

impl StationGraph {
    pub fn from_edges(
        stations: &[String],
        edges: &[(String, String)],
    ) -> Result<Self, DomainError> {
        let mut adjacency: HashMap<String, Vec<String>> = HashMap::with_capacity(stations.len());
        for station in stations {
            if adjacency.insert(station.clone(), Vec::new()).is_some() {
                return Err(DomainError::validation(
                    ValidationKind::Other("DUPLICATE_STATION".into()),
                    format!("Station '{station}' is listed more than once"),
                ));
            }
        }

        for (a, b) in edges {
            for endpoint in [a, b] {
                if !adjacency.contains_key(endpoint) {
                    return Err(DomainError::validation(
                        ValidationKind::UnknownStation,
                        format!("Edge {a} - {b} references unknown station '{endpoint}'"),
                    ));
                }
            }
            if a == b {
                return Err(DomainError::validation(
                    ValidationKind::Other("SELF_LOOP".into()),
                    format!("Station '{a}' cannot be adjacent to itself"),
                ));
            }

            link(&mut adjacency, a, b);
            link(&mut adjacency, b, a);
        }

        Ok(Self {
            stations: stations.to_vec(),
            adjacency,
        })
    }

    /// Stations in configuration order.
    pub fn stations(&self) -> &[String] {
        &self.stations
    }

    pub fn contains(&self, station: &str) -> bool {
        self.adjacency.contains_key(station)
    }

    /// Neighbours of `station`; empty for unknown stations.
    pub fn neighbors(&self, station: &str) -> &[String] {
        self.adjacency
            .get(station)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_adjacent(&self, from: &str, to: &str) -> bool {
        self.neighbors(from).iter().any(|n| n == to)
    }

    /// `(station, neighbours)` pairs in station order.
    pub fn adjacency(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.stations
            .iter()
            .map(|s| (s.as_str(), self.neighbors(s)))
    }
}

fn link(adjacency: &mut HashMap<String, Vec<String>>, from: &str, to: &str) {
    if let Some(list) = adjacency.get_mut(from) {
        if !list.iter().any(|n| n == to) {
            list.push(to.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn edge(a: &str, b: &str) -> (String, String) {
        (a.to_string(), b.to_string())
    }

    #[test]
    fn neighbours_follow_first_appearance() {
        let graph = StationGraph::from_edges(
            &names(&["Central", "Admiralty", "Star Ferry"]),
            &[edge("Central", "Admiralty"), edge("Central", "Star Ferry")],
        )
        .unwrap();

        assert_eq!(graph.neighbors("Central"), ["Admiralty", "Star Ferry"]);
        assert_eq!(graph.neighbors("Admiralty"), ["Central"]);
        assert!(graph.is_adjacent("Star Ferry", "Central"));
        assert!(!graph.is_adjacent("Admiralty", "Star Ferry"));
    }

    #[test]
    fn duplicate_and_reversed_edges_collapse() {
        let graph = StationGraph::from_edges(
            &names(&["A", "B"]),
            &[edge("A", "B"), edge("B", "A"), edge("A", "B")],
        )
        .unwrap();

        assert_eq!(graph.neighbors("A"), ["B"]);
        assert_eq!(graph.neighbors("B"), ["A"]);
    }

    #[test]
    fn unknown_station_has_no_neighbours() {
        let graph = StationGraph::from_edges(&names(&["A"]), &[]).unwrap();
        assert!(graph.neighbors("Nowhere").is_empty());
        assert!(!graph.contains("Nowhere"));
    }

    #[test]
    fn edge_to_unknown_station_is_rejected() {
        let err = StationGraph::from_edges(&names(&["A"]), &[edge("A", "Z")]).unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationKind::UnknownStation, _)
        ));
    }

    #[test]
    fn self_loop_and_duplicate_station_are_rejected() {
        assert!(StationGraph::from_edges(&names(&["A"]), &[edge("A", "A")]).is_err());
        assert!(StationGraph::from_edges(&names(&["A", "A"]), &[]).is_err());
    }
}
