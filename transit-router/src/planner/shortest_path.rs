//! Single-source, single-target Dijkstra.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};

use crate::domain::StationId;
use crate::graph::{Path, WeightedGraph};

/// Path cost in km with a total order, for use as a heap key.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Cost(pub f64);

impl PartialEq for Cost {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Find the cheapest path from `source` to `dest`.
///
/// Returns `None` when the two are disconnected in the current graph, or
/// when either is absent (as happens while the K-shortest-paths search has
/// nodes knocked out). Equal-cost alternatives are resolved by settling
/// nodes in (cost, identifier) order, so the result is deterministic.
pub fn shortest_path(graph: &WeightedGraph, source: &StationId, dest: &StationId) -> Option<Path> {
    if !graph.contains(source) || !graph.contains(dest) {
        return None;
    }
    if source == dest {
        return Some(Path::new(vec![source.clone()]));
    }

    let mut dist: HashMap<&StationId, f64> = HashMap::new();
    let mut prev: HashMap<&StationId, &StationId> = HashMap::new();

    // Min-heap via Reverse; the station id breaks cost ties.
    let mut heap = BinaryHeap::new();
    dist.insert(source, 0.0);
    heap.push(Reverse((Cost(0.0), source)));

    while let Some(Reverse((Cost(cost), node))) = heap.pop() {
        if node == dest {
            return Some(reconstruct(&prev, dest));
        }

        // Stale entry
        if dist.get(node).is_some_and(|&d| cost > d) {
            continue;
        }

        for (neighbour, weight) in graph.neighbours(node) {
            let next = cost + weight;
            if dist.get(neighbour).is_none_or(|&d| next < d) {
                dist.insert(neighbour, next);
                prev.insert(neighbour, node);
                heap.push(Reverse((Cost(next), neighbour)));
            }
        }
    }

    None
}

fn reconstruct(prev: &HashMap<&StationId, &StationId>, dest: &StationId) -> Path {
    let mut stations = vec![dest.clone()];
    let mut current = dest;
    while let Some(&p) = prev.get(current) {
        stations.push(p.clone());
        current = p;
    }
    stations.reverse();
    Path::new(stations)
}
