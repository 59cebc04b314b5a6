//! The contractor → parking → route configuration model.
//!
//! # Shape
//!
//! `FleetConfig` mirrors the persisted JSON exactly: two levels of string
//! keys (contractor, then parking location) over [`RouteConfig`] leaves.
//! `BTreeMap` rather than a hash map on purpose: route iteration order
//! feeds the optimiser's recommendation order and must be deterministic.
//!
//! The pipeline treats the config as read-only; the optimiser clones it and
//! edits only departure times on the clone.

use std::collections::BTreeMap;
use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use dq_core::{SiteRegistry, SubPointId};

// ── RouteConfig ──────────────────────────────────────────────────────────────

/// One contractor route out of a parking location.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    pub loading_location: String,
    pub dumping_location: String,
    /// `"H:MM"` clock string. Kept as text because that is the persisted
    /// form; the event builder parses it per run with a 7:00 fallback.
    #[serde(default = "default_departure_time")]
    pub departure_time:   String,
    #[serde(default)]
    pub number_of_trucks: u32,
}

fn default_departure_time() -> String {
    String::from("7:00")
}

// ── RouteKey ─────────────────────────────────────────────────────────────────

/// Identity of one route: who runs it and where it stages.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct RouteKey {
    pub contractor: String,
    pub parking:    String,
}

impl RouteKey {
    pub fn new(contractor: &str, parking: &str) -> Self {
        Self {
            contractor: contractor.to_owned(),
            parking:    parking.to_owned(),
        }
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.contractor, self.parking)
    }
}

// ── FleetConfig ──────────────────────────────────────────────────────────────

/// The whole fleet: every contractor's routes, in stable sorted order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FleetConfig {
    contractors: BTreeMap<String, BTreeMap<String, RouteConfig>>,
}

impl FleetConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of routes across all contractors.
    pub fn len(&self) -> usize {
        self.contractors.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn insert(&mut self, contractor: &str, parking: &str, route: RouteConfig) {
        self.contractors
            .entry(contractor.to_owned())
            .or_default()
            .insert(parking.to_owned(), route);
    }

    pub fn get(&self, contractor: &str, parking: &str) -> Option<&RouteConfig> {
        self.contractors.get(contractor)?.get(parking)
    }

    /// Overwrite one route's departure time. Returns `false` if the route
    /// does not exist.
    pub fn set_departure(&mut self, key: &RouteKey, time: &str) -> bool {
        match self
            .contractors
            .get_mut(&key.contractor)
            .and_then(|routes| routes.get_mut(&key.parking))
        {
            Some(route) => {
                route.departure_time = time.to_owned();
                true
            }
            None => false,
        }
    }

    /// All routes in (contractor, parking) sorted order.
    pub fn routes(&self) -> impl Iterator<Item = (&str, &str, &RouteConfig)> {
        self.contractors.iter().flat_map(|(contractor, routes)| {
            routes
                .iter()
                .map(move |(parking, cfg)| (contractor.as_str(), parking.as_str(), cfg))
        })
    }

    pub fn total_trucks(&self) -> u32 {
        self.routes().map(|(_, _, cfg)| cfg.number_of_trucks).sum()
    }

    /// Configured trucks per resolvable dump sub-point.
    ///
    /// Counts every route whose dump location resolves to a leaf sub-point,
    /// whether or not the route would produce arrival events (a route with a
    /// missing loading location still parks its trucks somewhere). This map
    /// is the weighting input for zone aggregation.
    pub fn trucks_per_sub_point(&self, registry: &SiteRegistry) -> FxHashMap<SubPointId, u32> {
        let mut trucks: FxHashMap<SubPointId, u32> = FxHashMap::default();
        for (_, _, cfg) in self.routes() {
            if let Some(id) = registry.sub_id(&cfg.dumping_location) {
                *trucks.entry(id).or_insert(0) += cfg.number_of_trucks;
            }
        }
        trucks
    }
}
