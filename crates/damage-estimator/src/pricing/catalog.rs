use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Highest accepted `max_cost`. Keeps rounded prices and report totals well
/// inside integer range.
pub const MAX_PART_COST: u32 = 100_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartCategory {
    Body,
    Glass,
    Light,
}

impl PartCategory {
    pub const fn ordered() -> [Self; 3] {
        [Self::Body, Self::Glass, Self::Light]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Body => "Body",
            Self::Glass => "Glass",
            Self::Light => "Lighting",
        }
    }
}

/// Coarse vertical region of the vehicle. Only body panels carry a real zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartZone {
    Top,
    Middle,
    Bottom,
    #[default]
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartCatalogEntry {
    pub name: String,
    pub min_cost: u32,
    pub max_cost: u32,
    pub category: PartCategory,
    pub zone: PartZone,
}

impl PartCatalogEntry {
    pub fn denotes_bumper(&self) -> bool {
        self.name.to_lowercase().contains("bumper")
    }
}

/// Immutable part price list grouped by category, in listing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartCatalog {
    body: Vec<PartCatalogEntry>,
    glass: Vec<PartCatalogEntry>,
    light: Vec<PartCatalogEntry>,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read part catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid part catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("part name '{0}' appears more than once in the catalog")]
    DuplicateName(String),
    #[error("part '{name}' has min_cost {min_cost} above max_cost {max_cost}")]
    InvalidBand {
        name: String,
        min_cost: u32,
        max_cost: u32,
    },
    #[error("part '{name}' has max_cost {max_cost} above the {ceiling} ceiling")]
    CostAboveCeiling {
        name: String,
        max_cost: u32,
        ceiling: u32,
    },
    #[error("catalog must list at least one body part")]
    EmptyBody,
}

/// On-disk layout: one array per category, category implied by the section.
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    body: Vec<EntryDocument>,
    #[serde(default)]
    glass: Vec<EntryDocument>,
    #[serde(default)]
    light: Vec<EntryDocument>,
}

#[derive(Debug, Deserialize)]
struct EntryDocument {
    name: String,
    min_cost: u32,
    max_cost: u32,
    #[serde(default)]
    zone: PartZone,
}

impl EntryDocument {
    fn into_entry(self, category: PartCategory) -> PartCatalogEntry {
        PartCatalogEntry {
            name: self.name,
            min_cost: self.min_cost,
            max_cost: self.max_cost,
            category,
            zone: self.zone,
        }
    }
}

impl PartCatalog {
    /// Built-in 2025 price list, constructed on first use and shared thereafter.
    pub fn standard() -> &'static PartCatalog {
        static STANDARD: OnceLock<PartCatalog> = OnceLock::new();
        STANDARD.get_or_init(standard_catalog)
    }

    pub fn new(entries: Vec<PartCatalogEntry>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.name.as_str()) {
                return Err(CatalogError::DuplicateName(entry.name.clone()));
            }
            if entry.min_cost > entry.max_cost {
                return Err(CatalogError::InvalidBand {
                    name: entry.name.clone(),
                    min_cost: entry.min_cost,
                    max_cost: entry.max_cost,
                });
            }
            if entry.max_cost > MAX_PART_COST {
                return Err(CatalogError::CostAboveCeiling {
                    name: entry.name.clone(),
                    max_cost: entry.max_cost,
                    ceiling: MAX_PART_COST,
                });
            }
        }

        let mut catalog = Self {
            body: Vec::new(),
            glass: Vec::new(),
            light: Vec::new(),
        };
        for entry in entries {
            match entry.category {
                PartCategory::Body => catalog.body.push(entry),
                PartCategory::Glass => catalog.glass.push(entry),
                PartCategory::Light => catalog.light.push(entry),
            }
        }

        if catalog.body.is_empty() {
            return Err(CatalogError::EmptyBody);
        }
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_reader(reader)?;
        Self::from_document(document)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_str(raw)?;
        Self::from_document(document)
    }

    fn from_document(document: CatalogDocument) -> Result<Self, CatalogError> {
        let CatalogDocument { body, glass, light } = document;
        let entries = body
            .into_iter()
            .map(|entry| entry.into_entry(PartCategory::Body))
            .chain(
                glass
                    .into_iter()
                    .map(|entry| entry.into_entry(PartCategory::Glass)),
            )
            .chain(
                light
                    .into_iter()
                    .map(|entry| entry.into_entry(PartCategory::Light)),
            )
            .collect();
        Self::new(entries)
    }

    pub fn entries(&self, category: PartCategory) -> &[PartCatalogEntry] {
        match category {
            PartCategory::Body => &self.body,
            PartCategory::Glass => &self.glass,
            PartCategory::Light => &self.light,
        }
    }

    pub fn body_in_zone(&self, zone: PartZone) -> impl Iterator<Item = &PartCatalogEntry> {
        self.body.iter().filter(move |entry| entry.zone == zone)
    }

    pub fn find(&self, name: &str) -> Option<&PartCatalogEntry> {
        PartCategory::ordered()
            .into_iter()
            .flat_map(|category| self.entries(category))
            .find(|entry| entry.name == name)
    }

    pub fn len(&self) -> usize {
        self.body.len() + self.glass.len() + self.light.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn entry(
    name: &str,
    min_cost: u32,
    max_cost: u32,
    category: PartCategory,
    zone: PartZone,
) -> PartCatalogEntry {
    PartCatalogEntry {
        name: name.to_string(),
        min_cost,
        max_cost,
        category,
        zone,
    }
}

fn standard_catalog() -> PartCatalog {
    use PartCategory::{Body, Glass, Light};
    use PartZone::{Bottom, Middle, Top};

    // Average 2025 insurance claim prices, in TL.
    let entries = vec![
        entry("Front Bumper", 12_000, 18_000, Body, Bottom),
        entry("Rear Bumper", 10_000, 15_000, Body, Bottom),
        entry("Hood", 15_000, 25_000, Body, Top),
        entry("Trunk Lid", 10_000, 18_000, Body, Top),
        entry("Roof", 8_000, 12_000, Body, Top),
        entry("Left Front Fender", 4_000, 6_000, Body, Middle),
        entry("Right Front Fender", 4_000, 6_000, Body, Middle),
        entry("Door", 8_000, 12_000, Body, Middle),
        entry("Windshield", 6_000, 10_000, Glass, Top),
        entry("Side Window", 2_000, 4_000, Glass, Middle),
        entry("Rear Window", 5_000, 9_000, Glass, Top),
        entry("Headlight", 8_000, 15_000, Light, Middle),
        entry("Tail Light", 4_000, 7_000, Light, Middle),
    ];

    PartCatalog {
        body: entries
            .iter()
            .filter(|entry| entry.category == Body)
            .cloned()
            .collect(),
        glass: entries
            .iter()
            .filter(|entry| entry.category == Glass)
            .cloned()
            .collect(),
        light: entries
            .into_iter()
            .filter(|entry| entry.category == Light)
            .collect(),
    }
}
