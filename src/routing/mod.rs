//! Platform to region routing.
//!
//! Summoner and league endpoints are served per platform (a single server
//! cluster such as `na1`), match endpoints per region (`americas`, ...).

use std::collections::HashMap;
use std::fmt;

/// Regions and the platforms they serve
pub const REGION_PLATFORMS: &[(&str, &[&str])] = &[
    ("americas", &["br1", "la1", "la2", "na1"]),
    ("asia", &["jp1", "kr", "oc1"]),
    ("europe", &["eun1", "euw1", "tr1", "ru"]),
];

/// Kind of routing domain an endpoint is addressed against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingScope {
    Platform,
    Region,
}

impl fmt::Display for RoutingScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutingScope::Platform => write!(f, "platform"),
            RoutingScope::Region => write!(f, "region"),
        }
    }
}

/// Lookup table from platform to region, built once and read-only afterwards
#[derive(Debug, Clone)]
pub struct RegionRouter {
    regions: HashMap<&'static str, &'static [&'static str]>,
    platform_to_region: HashMap<&'static str, &'static str>,
}

impl RegionRouter {
    /// Build the router from the static region table
    pub fn new() -> Self {
        Self::from_table(REGION_PLATFORMS)
    }

    pub fn from_table(table: &'static [(&'static str, &'static [&'static str])]) -> Self {
        let mut regions = HashMap::new();
        let mut platform_to_region = HashMap::new();

        for (region, platforms) in table {
            regions.insert(*region, *platforms);
            for platform in platforms.iter() {
                platform_to_region.insert(*platform, *region);
            }
        }

        Self {
            regions,
            platform_to_region,
        }
    }

    /// Region that serves `platform`, `None` for an unlisted platform
    pub fn region_of(&self, platform: &str) -> Option<&'static str> {
        self.platform_to_region.get(platform).copied()
    }

    /// Platforms served by `region`
    pub fn platforms_of(&self, region: &str) -> Option<&'static [&'static str]> {
        self.regions.get(region).copied()
    }

    pub fn is_platform(&self, domain: &str) -> bool {
        self.platform_to_region.contains_key(domain)
    }

    pub fn is_region(&self, domain: &str) -> bool {
        self.regions.contains_key(domain)
    }

    /// Whether `domain` is any known routing value
    pub fn is_known(&self, domain: &str) -> bool {
        self.scope_of(domain).is_some()
    }

    pub fn scope_of(&self, domain: &str) -> Option<RoutingScope> {
        if self.is_platform(domain) {
            Some(RoutingScope::Platform)
        } else if self.is_region(domain) {
            Some(RoutingScope::Region)
        } else {
            None
        }
    }

    /// Region names, sorted
    pub fn regions(&self) -> Vec<&'static str> {
        let mut regions: Vec<_> = self.regions.keys().copied().collect();
        regions.sort_unstable();
        regions
    }
}

impl Default for RegionRouter {
    fn default() -> Self {
        Self::new()
    }
}
