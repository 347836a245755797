use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::{Creature, CreatureId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Alola,
    Galar,
    Hisui,
    Paldea,
    Seira,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::Alola,
        Region::Galar,
        Region::Hisui,
        Region::Paldea,
        Region::Seira,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Region::Alola => "alola",
            Region::Galar => "galar",
            Region::Hisui => "hisui",
            Region::Paldea => "paldea",
            Region::Seira => "seira",
        }
    }

    /// Lowercase name fragments that mark a regional variant.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Region::Alola => &["alolan", "alola"],
            Region::Galar => &["galarian", "galar"],
            Region::Hisui => &["hisuian", "hisui"],
            Region::Paldea => &["paldean", "paldea"],
            Region::Seira => &["seirian", "seira"],
        }
    }

    /// Keyword heuristic alone. Names like "Seira Guardian" also match; known
    /// limitation, fixed by listing ids explicitly.
    pub fn matches_name(self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.keywords().iter().any(|k| name.contains(k))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Region::ALL
            .into_iter()
            .find(|r| r.as_str() == wanted)
            .ok_or_else(|| format!("unknown region '{}'", s.trim()))
    }
}

/// Explicit regional form ids per region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionTable {
    explicit: HashMap<Region, HashSet<CreatureId>>,
}

impl RegionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ids(mut self, region: Region, ids: impl IntoIterator<Item = CreatureId>) -> Self {
        self.explicit.entry(region).or_default().extend(ids);
        self
    }

    pub fn ids(&self, region: Region) -> Option<&HashSet<CreatureId>> {
        self.explicit.get(&region)
    }

    /// Listed explicitly, or the name carries one of the region's keywords.
    pub fn contains(&self, region: Region, creature: &Creature) -> bool {
        let listed = self
            .explicit
            .get(&region)
            .is_some_and(|ids| ids.contains(&creature.id));
        listed || region.matches_name(&creature.name)
    }
}
