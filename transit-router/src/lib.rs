//! Transit route planner.
//!
//! Answers: "how do I get from here to there by rail?" Given two
//! coordinates, snaps each to its nearest station, finds the K shortest
//! loopless paths through the rail network, and describes each as a
//! walk/ride/change itinerary.

pub mod cache;
pub mod domain;
pub mod graph;
pub mod network;
pub mod planner;
pub mod web;
