use super::catalog::{PartCatalog, PartCatalogEntry, PartCategory, PartZone};
use super::detection::DamageDetection;
use super::domain::RepairType;
use super::seeding::ReportRng;

/// Centers below this line are treated as roof, hood, trunk or glass damage.
pub const TOP_ZONE_LIMIT: f64 = 0.35;
/// Centers below this line (towards the ground) are treated as bumper damage.
pub const BOTTOM_ZONE_LIMIT: f64 = 0.65;

/// Candidate pool a label rule draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartPool {
    Category(PartCategory),
    Bumpers,
}

/// Keyword predicate paired with the pool and repair it selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelRule {
    pub keywords: &'static [&'static str],
    pub pool: PartPool,
    pub repair_type: RepairType,
}

impl LabelRule {
    /// `label` must already be lowercased.
    pub fn matches(&self, label: &str) -> bool {
        self.keywords.iter().any(|keyword| label.contains(keyword))
    }
}

/// Label rules in priority order; the first match wins.
pub static LABEL_RULES: [LabelRule; 3] = [
    LabelRule {
        keywords: &["glass", "window"],
        pool: PartPool::Category(PartCategory::Glass),
        repair_type: RepairType::Replace,
    },
    LabelRule {
        keywords: &["lamp", "light"],
        pool: PartPool::Category(PartCategory::Light),
        repair_type: RepairType::Replace,
    },
    LabelRule {
        keywords: &["bumper"],
        pool: PartPool::Bumpers,
        repair_type: RepairType::Replace,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Labelled(&'static LabelRule),
    Positional { repair_type: RepairType },
}

impl Classification {
    pub const fn repair_type(&self) -> RepairType {
        match self {
            Classification::Labelled(rule) => rule.repair_type,
            Classification::Positional { repair_type } => *repair_type,
        }
    }
}

pub fn classify(label: &str) -> Classification {
    let label = label.to_lowercase();
    match LABEL_RULES.iter().find(|rule| rule.matches(&label)) {
        Some(rule) => Classification::Labelled(rule),
        None => Classification::Positional {
            repair_type: if label.contains("scratch") {
                RepairType::Paint
            } else {
                RepairType::Correction
            },
        },
    }
}

pub fn pool_candidates(catalog: &PartCatalog, pool: PartPool) -> Vec<&PartCatalogEntry> {
    match pool {
        PartPool::Category(category) => catalog.entries(category).iter().collect(),
        PartPool::Bumpers => catalog
            .entries(PartCategory::Body)
            .iter()
            .filter(|entry| entry.denotes_bumper())
            .collect(),
    }
}

/// Zone candidates for a damage center. Horizontal position does not
/// influence zoning.
pub fn zone_candidates(
    catalog: &PartCatalog,
    y_center: f64,
    _x_center: f64,
) -> Vec<&PartCatalogEntry> {
    if y_center > BOTTOM_ZONE_LIMIT {
        let bottom: Vec<_> = catalog.body_in_zone(PartZone::Bottom).collect();
        if bottom.is_empty() {
            catalog.entries(PartCategory::Body).iter().collect()
        } else {
            bottom
        }
    } else if y_center < TOP_ZONE_LIMIT {
        catalog
            .body_in_zone(PartZone::Top)
            .chain(catalog.entries(PartCategory::Glass))
            .collect()
    } else {
        catalog
            .body_in_zone(PartZone::Middle)
            .chain(catalog.entries(PartCategory::Light))
            .collect()
    }
}

pub fn part_by_position<'c>(
    catalog: &'c PartCatalog,
    y_center: f64,
    x_center: f64,
    rng: &mut ReportRng,
) -> Option<&'c PartCatalogEntry> {
    let candidates = zone_candidates(catalog, y_center, x_center);
    rng.pick(&candidates).copied()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPart<'c> {
    pub part: &'c PartCatalogEntry,
    pub repair_type: RepairType,
}

/// Maps one detection to a catalog part, consuming exactly one draw when a
/// candidate exists. Returns `None` when the candidate pool is empty.
pub fn resolve_part<'c>(
    catalog: &'c PartCatalog,
    detection: &DamageDetection,
    rng: &mut ReportRng,
) -> Option<ResolvedPart<'c>> {
    let classification = classify(&detection.label);
    let part = match classification {
        Classification::Labelled(rule) => {
            let candidates = pool_candidates(catalog, rule.pool);
            rng.pick(&candidates).copied()
        }
        Classification::Positional { .. } => part_by_position(
            catalog,
            detection.bbox.y_center(),
            detection.bbox.x_center(),
            rng,
        ),
    }?;

    Some(ResolvedPart {
        part,
        repair_type: classification.repair_type(),
    })
}
