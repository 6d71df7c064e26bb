//! Paths through the graph.

use std::collections::HashSet;

use serde::Serialize;

use crate::domain::StationId;

/// An ordered sequence of stations from a search source to its target.
///
/// Paths compare by value, so two searches that find the same stations in
/// the same order produce equal paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Path(Vec<StationId>);

impl Path {
    /// Wrap a station sequence.
    pub fn new(stations: Vec<StationId>) -> Self {
        Self(stations)
    }

    /// Returns the stations in travel order.
    pub fn stations(&self) -> &[StationId] {
        &self.0
    }

    /// Returns the number of stations.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the path has no stations.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the first station.
    pub fn source(&self) -> Option<&StationId> {
        self.0.first()
    }

    /// Returns the last station.
    pub fn destination(&self) -> Option<&StationId> {
        self.0.last()
    }

    /// Returns the first `len` stations (the whole path if shorter).
    pub fn prefix(&self, len: usize) -> &[StationId] {
        &self.0[..len.min(self.0.len())]
    }

    /// Iterate consecutive station pairs.
    pub fn hops(&self) -> impl Iterator<Item = (&StationId, &StationId)> {
        self.0.windows(2).map(|w| (&w[0], &w[1]))
    }

    /// Returns true if no station appears twice.
    pub fn is_loopless(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.0.len());
        self.0.iter().all(|s| seen.insert(s))
    }

    /// Build `root ++ spur`.
    pub fn join(root: &[StationId], spur: Path) -> Self {
        let mut stations = Vec::with_capacity(root.len() + spur.len());
        stations.extend_from_slice(root);
        stations.extend(spur.0);
        Self(stations)
    }
}

impl<S: Into<StationId>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
