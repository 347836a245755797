use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::catalog::{CollectionKind, CreatureId, ItemId, MapId, SourceUrls};
use crate::query::{Region, RegionTable, ShopLists};

pub const DEFAULT_PER_PAGE: usize = 15;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("{0}")]
    Invalid(String),
}

/// Runtime settings of a browsing session.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    pub sources: SourceUrls,
    pub per_page: usize,
    pub http_timeout: Option<Duration>,
    pub regions: RegionTable,
    pub shops: ShopLists,
    pub hidden_maps: HashSet<MapId>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            sources: SourceUrls::default(),
            per_page: DEFAULT_PER_PAGE,
            http_timeout: None,
            regions: RegionTable::new(),
            shops: ShopLists::default(),
            hidden_maps: HashSet::new(),
        }
    }
}

////////////////////
/// TOML STRUCTS ///
////////////////////

#[derive(Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    sources: SourcesConfig,
    pagination: PaginationConfig,
    http: HttpConfig,
    regions: HashMap<String, Vec<CreatureId>>, // [regions] alola = [...]
    shops: ShopsConfig,
    maps: MapsConfig,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct SourcesConfig {
    base_url: Option<String>,
    creatures: Option<String>,
    moves: Option<String>,
    abilities: Option<String>,
    items: Option<String>,
    maps: Option<String>,
    objects: Option<String>,
}

#[derive(Deserialize)]
#[serde(default)]
struct PaginationConfig {
    per_page: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        PaginationConfig {
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct HttpConfig {
    timeout_secs: Option<u64>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ShopsConfig {
    casino: Vec<ItemId>,
    mile: Vec<ItemId>,
    book: Vec<ItemId>,
    tm: Vec<ItemId>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct MapsConfig {
    hidden: Vec<MapId>,
}

pub fn load_config_from_file(path: &Path) -> Result<CatalogConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_config_from_str(&contents)
}

pub fn load_config_from_str(contents: &str) -> Result<CatalogConfig, ConfigError> {
    let file: ConfigFile = toml::from_str(contents)?;

    // Basic validation
    if file.pagination.per_page == 0 {
        return Err(ConfigError::Invalid(
            "pagination.per_page must be at least 1".into(),
        ));
    }
    if file.http.timeout_secs == Some(0) {
        return Err(ConfigError::Invalid(
            "http.timeout_secs must be at least 1".into(),
        ));
    }

    let base_url = match file.sources.base_url {
        Some(url) if url.trim().is_empty() => {
            return Err(ConfigError::Invalid("sources.base_url may not be empty".into()));
        }
        Some(url) => SourceUrls::new(url.trim()),
        None => SourceUrls::default(),
    };

    let overrides = [
        (CollectionKind::Creatures, file.sources.creatures),
        (CollectionKind::Moves, file.sources.moves),
        (CollectionKind::Abilities, file.sources.abilities),
        (CollectionKind::Items, file.sources.items),
        (CollectionKind::Maps, file.sources.maps),
        (CollectionKind::Objects, file.sources.objects),
    ];
    let mut sources = base_url;
    for (kind, url) in overrides {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            sources = sources.with_override(kind, url.trim());
        }
    }

    let mut regions = RegionTable::new();
    for (name, ids) in file.regions {
        let region: Region = name.parse().map_err(ConfigError::Invalid)?;
        regions = regions.with_ids(region, ids);
    }

    Ok(CatalogConfig {
        sources,
        per_page: file.pagination.per_page,
        http_timeout: file.http.timeout_secs.map(Duration::from_secs),
        regions,
        shops: ShopLists {
            casino: file.shops.casino,
            mile: file.shops.mile,
            book: file.shops.book,
            tm: file.shops.tm,
        },
        hidden_maps: file.maps.hidden.into_iter().collect(),
    })
}
