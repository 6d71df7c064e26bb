//! K shortest loopless paths by deviation search.
//!
//! Starting from the shortest path, each round takes the most recently
//! accepted path and, for every station along it (the spur node), looks
//! for the cheapest way to reach the destination that shares the prefix
//! before the spur node (the root path) but then deviates from every
//! accepted path with that same root. The cheapest of all deviations found
//! so far becomes the next accepted path.
//!
//! Deviations are found by temporarily knocking edges and nodes out of the
//! live graph. Everything removed is put back before the next spur node is
//! tried, so the graph leaves the search exactly as it came in.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet};

use serde::Serialize;
use tracing::{debug, trace, warn};

use super::shortest_path::{Cost, shortest_path};
use crate::domain::StationId;
use crate::graph::{GraphError, Path, Removal, WeightedGraph};

/// A path with its total weight in km.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPath {
    pub path: Path,
    pub weight: f64,
}

/// A deviation waiting in the candidate queue.
///
/// Ordered by weight, then by the order candidates were found, so equal
/// weights come out first-found-first.
#[derive(Debug)]
struct Candidate {
    weight: Cost,
    seq: u64,
    path: Path,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.weight, self.seq).cmp(&(other.weight, other.seq))
    }
}

/// K-shortest-paths search parameters.
#[derive(Debug, Clone)]
pub struct KShortestPaths {
    k: usize,
    spur_budget: Option<usize>,
}

impl KShortestPaths {
    /// Search for up to `k` paths with no bound on work.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            spur_budget: None,
        }
    }

    /// Stop after `budget` spur searches, keeping the paths found so far.
    pub fn with_spur_budget(mut self, budget: usize) -> Self {
        self.spur_budget = Some(budget);
        self
    }

    /// Find up to `k` loopless paths from `source` to `dest`, cheapest first.
    ///
    /// Returns an empty list when the two are disconnected. Fewer than `k`
    /// paths means no further distinct paths exist (or the spur budget ran
    /// out). `graph` is mutated during the search and restored before
    /// every return, including error returns from graph operations.
    pub fn run(
        &self,
        graph: &mut WeightedGraph,
        source: &StationId,
        dest: &StationId,
    ) -> Result<Vec<RankedPath>, GraphError> {
        if self.k == 0 {
            return Ok(Vec::new());
        }
        let Some(first) = shortest_path(graph, source, dest) else {
            debug!(%source, %dest, "No path between stations");
            return Ok(Vec::new());
        };

        // Original weights, consulted while the live graph has holes in it.
        let snapshot = graph.clone();

        let mut seen: HashSet<Path> = HashSet::new();
        seen.insert(first.clone());
        let mut accepted = vec![RankedPath {
            weight: snapshot.path_weight(&first).unwrap_or(0.0),
            path: first,
        }];

        let mut candidates: BinaryHeap<Reverse<Candidate>> = BinaryHeap::new();
        let mut seq = 0u64;
        let mut spur_searches = 0usize;

        while accepted.len() < self.k {
            let prev = accepted[accepted.len() - 1].path.clone();

            for i in 0..prev.len().saturating_sub(1) {
                if self.spur_budget.is_some_and(|b| spur_searches >= b) {
                    warn!(
                        spur_searches,
                        found = accepted.len(),
                        "Spur search budget exhausted"
                    );
                    return Ok(accepted);
                }
                spur_searches += 1;

                let spur = &prev.stations()[i];
                let root = prev.prefix(i);

                let mut removal = Removal::new();
                let deviation = deviate(graph, &mut removal, &accepted, root, spur, dest);
                graph.restore(removal)?;
                debug_assert_eq!(*graph, snapshot, "graph not restored after spur search");

                let Some(spur_path) = deviation? else {
                    continue;
                };

                let total = Path::join(root, spur_path);
                if !seen.insert(total.clone()) {
                    continue;
                }
                let Some(weight) = snapshot.path_weight(&total) else {
                    continue;
                };

                trace!(spur = %spur, weight, stations = total.len(), "Queued candidate");
                candidates.push(Reverse(Candidate {
                    weight: Cost(weight),
                    seq,
                    path: total,
                }));
                seq += 1;
            }

            let Some(Reverse(best)) = candidates.pop() else {
                break;
            };
            accepted.push(RankedPath {
                path: best.path,
                weight: best.weight.0,
            });
        }

        debug!(
            found = accepted.len(),
            requested = self.k,
            spur_searches,
            "K shortest paths complete"
        );
        Ok(accepted)
    }
}

/// Knock out the root path and the edges already used after it, then search
/// from the spur node.
///
/// Everything removed is recorded in `removal`; the caller restores it.
fn deviate(
    graph: &mut WeightedGraph,
    removal: &mut Removal,
    accepted: &[RankedPath],
    root: &[StationId],
    spur: &StationId,
    dest: &StationId,
) -> Result<Option<Path>, GraphError> {
    let i = root.len();

    for p in accepted {
        if p.path.prefix(i) != root {
            continue;
        }
        let stations = p.path.stations();
        if let (Some(from), Some(to)) = (stations.get(i), stations.get(i + 1)) {
            removal.remove_edge(graph, from, to)?;
        }
    }

    for node in root {
        if node != spur {
            removal.remove_node(graph, node)?;
        }
    }

    Ok(shortest_path(graph, spur, dest))
}

/// Find up to `k` shortest loopless paths, without a work bound.
///
/// # Examples
///
/// ```
/// use transit_router::domain::StationId;
/// use transit_router::graph::WeightedGraph;
/// use transit_router::planner::k_shortest_paths;
///
/// let id = |s: &str| StationId::new(s);
/// let mut g = WeightedGraph::new();
/// for n in ["a", "b", "c"] {
///     g.add_node(&id(n));
/// }
/// g.add_edge(&id("a"), &id("b"), 1.0).unwrap();
/// g.add_edge(&id("b"), &id("c"), 1.0).unwrap();
/// g.add_edge(&id("a"), &id("c"), 3.0).unwrap();
///
/// let paths = k_shortest_paths(&mut g, &id("a"), &id("c"), 5).unwrap();
/// assert_eq!(paths.len(), 2);
/// assert_eq!(paths[0].stations().len(), 3);
/// ```
pub fn k_shortest_paths(
    graph: &mut WeightedGraph,
    source: &StationId,
    dest: &StationId,
    k: usize,
) -> Result<Vec<Path>, GraphError> {
    let ranked = KShortestPaths::new(k).run(graph, source, dest)?;
    Ok(ranked.into_iter().map(|r| r.path).collect())
}
