//! Depth-first and breadth-first traversal.
//!
//! Not used by route search itself; handy for inspecting connectivity of a
//! network graph in isolation.

use std::collections::{HashMap, HashSet, VecDeque};

use super::{GraphError, WeightedGraph};
use crate::domain::StationId;

impl WeightedGraph {
    /// Visit every node reachable from `start` depth-first.
    ///
    /// `visit` receives each node with its depth in the traversal tree.
    /// Neighbours are explored in identifier order.
    pub fn traverse_depth_first<F>(&self, start: &StationId, mut visit: F) -> Result<(), GraphError>
    where
        F: FnMut(&StationId, usize),
    {
        let start = self
            .nodes
            .get_key_value(start)
            .map(|(k, _)| k)
            .ok_or_else(|| GraphError::InvalidNode(start.clone()))?;

        let mut visited: HashSet<&StationId> = HashSet::new();
        let mut stack = vec![(start, 0)];
        while let Some((node, depth)) = stack.pop() {
            if !visited.insert(node) {
                continue;
            }
            visit(node, depth);
            // Reversed so the smallest neighbour is popped first
            let next: Vec<_> = self
                .neighbours(node)
                .filter(|(n, _)| !visited.contains(n))
                .collect();
            stack.extend(next.into_iter().rev().map(|(n, _)| (n, depth + 1)));
        }
        Ok(())
    }

    /// Visit every node reachable from `start` breadth-first.
    ///
    /// `visit` receives each node with its hop count from `start`.
    pub fn traverse_breadth_first<F>(
        &self,
        start: &StationId,
        mut visit: F,
    ) -> Result<(), GraphError>
    where
        F: FnMut(&StationId, usize),
    {
        let start = self
            .nodes
            .get_key_value(start)
            .map(|(k, _)| k)
            .ok_or_else(|| GraphError::InvalidNode(start.clone()))?;

        let mut depth: HashMap<&StationId, usize> = HashMap::new();
        let mut queue = VecDeque::new();
        depth.insert(start, 0);
        queue.push_back(start);

        while let Some(node) = queue.pop_front() {
            let d = depth[node];
            visit(node, d);
            for (neighbour, _) in self.neighbours(node) {
                if !depth.contains_key(neighbour) {
                    depth.insert(neighbour, d + 1);
                    queue.push_back(neighbour);
                }
            }
        }
        Ok(())
    }

    /// Returns true if `b` is reachable from `a`.
    pub fn is_connected(&self, a: &StationId, b: &StationId) -> bool {
        let mut found = false;
        let _ = self.traverse_breadth_first(a, |node, _| found |= node == b);
        found
    }
}
