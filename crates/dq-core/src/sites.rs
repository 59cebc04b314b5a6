//! Dump-site registry: macro zones, sub-points, line ranges, server counts.
//!
//! # Design
//!
//! The dump hierarchy is two-level and closed: exactly two macro zones, each
//! owning a set of named sub-points, each sub-point carrying an inclusive
//! dump-line range whose cardinality is its parallel server count. All name
//! resolution happens against a [`SiteRegistry`] built once at startup;
//! the pipeline itself never parses location strings.
//!
//! Name lookups are case-insensitive on trimmed input. A name resolves to
//! either a leaf sub-point or a whole zone (via the zone's display name or a
//! registered alias such as a location code); anything else is unknown and
//! served by the registry's fallback server count.

use std::fmt;

use rustc_hash::FxHashMap;
use tracing::warn;

use crate::{CoreError, CoreResult};

// ── Zone ─────────────────────────────────────────────────────────────────────

/// One of the two macro dump zones.
///
/// Deliberately a closed enum rather than a string: every aggregation in the
/// pipeline produces exactly two zone totals, and a third zone is a schema
/// change, not a data change.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Zone {
    A,
    B,
}

impl Zone {
    pub const ALL: [Zone; 2] = [Zone::A, Zone::B];

    /// Cast to `usize` for indexing per-zone arrays.
    #[inline(always)]
    pub fn index(self) -> usize {
        match self {
            Zone::A => 0,
            Zone::B => 1,
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::A => write!(f, "zone A"),
            Zone::B => write!(f, "zone B"),
        }
    }
}

// ── SubPointId ───────────────────────────────────────────────────────────────

/// Typed index of a sub-point in a [`SiteRegistry`].
///
/// `Copy + Ord + Hash` so it can key maps and sorted collections without
/// ceremony. The inner integer is `pub` for direct indexing into parallel
/// `Vec`s, but callers should prefer [`SubPointId::index`] for clarity.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubPointId(pub u32);

impl SubPointId {
    /// Sentinel meaning "no valid ID", equivalent to `u32::MAX`.
    pub const INVALID: SubPointId = SubPointId(u32::MAX);

    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Default for SubPointId {
    /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for SubPointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubPointId({})", self.0)
    }
}

// ── LineRange ────────────────────────────────────────────────────────────────

/// Inclusive dump-line number range, e.g. lines 65–66.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineRange {
    pub lo: u32,
    pub hi: u32,
}

impl LineRange {
    /// Number of lines in the range, floored at 1 even for inverted ranges.
    #[inline]
    pub fn count(self) -> u32 {
        self.hi.saturating_sub(self.lo) + 1
    }

    /// Parse a `"lo-hi"` string. Returns `None` unless both sides are
    /// unsigned integers separated by exactly one `-`.
    pub fn parse(s: &str) -> Option<LineRange> {
        let (lo, hi) = s.trim().split_once('-')?;
        let lo = lo.trim().parse().ok()?;
        let hi = hi.trim().parse().ok()?;
        Some(LineRange { lo, hi })
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.lo, self.hi)
    }
}

// ── SubPoint ─────────────────────────────────────────────────────────────────

/// One registered dump sub-point.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubPoint {
    pub name:     String,
    pub zone:     Zone,
    /// `None` when the registered line string failed to parse; such
    /// sub-points serve with a single line.
    pub lines:    Option<LineRange>,
    /// Display ordering hint carried through to reports.
    pub priority: u32,
}

impl SubPoint {
    /// Parallel server count: line-range cardinality, or 1 with no range.
    #[inline]
    pub fn servers(&self) -> u32 {
        self.lines.map(LineRange::count).unwrap_or(1)
    }
}

// ── SiteRef ──────────────────────────────────────────────────────────────────

/// A location name resolved against the registry.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum SiteRef {
    /// A leaf sub-point.
    Sub(SubPointId),
    /// A whole macro zone (display name or alias).
    Zone(Zone),
}

// ── SiteRegistry ─────────────────────────────────────────────────────────────

/// Immutable dump-site catalogue built once at startup.
#[derive(Clone, Debug)]
pub struct SiteRegistry {
    subs:             Vec<SubPoint>,
    by_name:          FxHashMap<String, SiteRef>,
    zone_names:       [String; 2],
    zone_servers:     [u32; 2],
    fallback_servers: u32,
}

impl SiteRegistry {
    pub fn builder() -> SiteRegistryBuilder {
        SiteRegistryBuilder::new()
    }

    /// Number of registered sub-points.
    pub fn len(&self) -> usize {
        self.subs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subs.is_empty()
    }

    /// All sub-points in registration order, indexable by `SubPointId`.
    pub fn sub_points(&self) -> &[SubPoint] {
        &self.subs
    }

    pub fn sub_point(&self, id: SubPointId) -> &SubPoint {
        &self.subs[id.index()]
    }

    /// Sub-points belonging to `zone`, in registration order.
    pub fn subs_in(&self, zone: Zone) -> impl Iterator<Item = (SubPointId, &SubPoint)> {
        self.subs
            .iter()
            .enumerate()
            .filter(move |(_, sp)| sp.zone == zone)
            .map(|(i, sp)| (SubPointId(i as u32), sp))
    }

    /// Resolve a location name to a sub-point or zone. `None` if unknown.
    pub fn resolve(&self, name: &str) -> Option<SiteRef> {
        self.by_name.get(&lookup_key(name)).copied()
    }

    /// Resolve a name that must be a leaf sub-point (the only legal dump
    /// target for a route).
    pub fn sub_id(&self, name: &str) -> Option<SubPointId> {
        match self.resolve(name)? {
            SiteRef::Sub(id) => Some(id),
            SiteRef::Zone(_) => None,
        }
    }

    /// The macro zone owning a named location, if it resolves at all.
    pub fn zone_of(&self, name: &str) -> Option<Zone> {
        match self.resolve(name)? {
            SiteRef::Sub(id) => Some(self.subs[id.index()].zone),
            SiteRef::Zone(z) => Some(z),
        }
    }

    /// Display name of a macro zone.
    pub fn zone_name(&self, zone: Zone) -> &str {
        &self.zone_names[zone.index()]
    }

    /// Server count for a sub-point ID.
    #[inline]
    pub fn servers_of(&self, id: SubPointId) -> u32 {
        self.subs[id.index()].servers()
    }

    /// Server count for an arbitrary location name.
    ///
    /// Leaf sub-point → its line-range cardinality; zone name or alias → the
    /// sum over the zone's sub-points (floored at 1); unknown → the
    /// registry's fallback count.
    pub fn server_count(&self, name: &str) -> u32 {
        match self.resolve(name) {
            Some(SiteRef::Sub(id)) => self.servers_of(id),
            Some(SiteRef::Zone(z)) => self.zone_servers[z.index()].max(1),
            None => self.fallback_servers,
        }
    }
}

// ── Builder ──────────────────────────────────────────────────────────────────

/// Fluent constructor for [`SiteRegistry`].
///
/// Registration methods are chainable and infallible; structural problems
/// (duplicate names, a sub-point name colliding with a zone alias) surface
/// from [`SiteRegistryBuilder::build`]. A malformed line string is *not* an
/// error: the sub-point is kept with a single server and a warning is logged.
pub struct SiteRegistryBuilder {
    subs:             Vec<SubPoint>,
    zone_names:       [String; 2],
    aliases:          Vec<(String, Zone)>,
    fallback_servers: u32,
}

impl SiteRegistryBuilder {
    pub fn new() -> Self {
        Self {
            subs:             Vec::new(),
            zone_names:       [String::from("ZONE A"), String::from("ZONE B")],
            aliases:          Vec::new(),
            fallback_servers: 2,
        }
    }

    /// Set a zone's display name. The name also resolves back to the zone.
    pub fn zone_name(mut self, zone: Zone, name: &str) -> Self {
        self.zone_names[zone.index()] = name.to_owned();
        self
    }

    /// Register an extra name (e.g. a location code) resolving to `zone`.
    pub fn zone_alias(mut self, zone: Zone, alias: &str) -> Self {
        self.aliases.push((alias.to_owned(), zone));
        self
    }

    /// Register a sub-point with its `"lo-hi"` line string and priority.
    pub fn sub_point(mut self, zone: Zone, name: &str, lines: &str, priority: u32) -> Self {
        let parsed = LineRange::parse(lines);
        if parsed.is_none() {
            warn!(sub_point = name, lines, "unparsable line range, assuming 1 server");
        }
        self.subs.push(SubPoint {
            name: name.to_owned(),
            zone,
            lines: parsed,
            priority,
        });
        self
    }

    /// Server count returned for names the registry does not know.
    pub fn fallback_servers(mut self, count: u32) -> Self {
        self.fallback_servers = count.max(1);
        self
    }

    pub fn build(self) -> CoreResult<SiteRegistry> {
        let mut by_name: FxHashMap<String, SiteRef> =
            FxHashMap::with_capacity_and_hasher(self.subs.len() + 4, Default::default());
        let mut zone_servers = [0u32; 2];

        for (i, sp) in self.subs.iter().enumerate() {
            let prev = by_name.insert(lookup_key(&sp.name), SiteRef::Sub(SubPointId(i as u32)));
            if prev.is_some() {
                return Err(CoreError::Registry(format!(
                    "duplicate sub-point name {:?}",
                    sp.name
                )));
            }
            zone_servers[sp.zone.index()] += sp.servers();
        }

        for zone in Zone::ALL {
            let name = &self.zone_names[zone.index()];
            if by_name.insert(lookup_key(name), SiteRef::Zone(zone)).is_some() {
                return Err(CoreError::Registry(format!(
                    "zone name {name:?} collides with a sub-point"
                )));
            }
        }
        for (alias, zone) in &self.aliases {
            match by_name.insert(lookup_key(alias), SiteRef::Zone(*zone)) {
                // Re-registering the same zone under an existing alias is harmless.
                Some(SiteRef::Zone(z)) if z == *zone => {}
                Some(_) => {
                    return Err(CoreError::Registry(format!(
                        "zone alias {alias:?} collides with another name"
                    )));
                }
                None => {}
            }
        }

        Ok(SiteRegistry {
            subs: self.subs,
            by_name,
            zone_names: self.zone_names,
            zone_servers,
            fallback_servers: self.fallback_servers,
        })
    }
}

impl Default for SiteRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Canonical map key: trimmed, uppercased.
fn lookup_key(name: &str) -> String {
    name.trim().to_uppercase()
}
