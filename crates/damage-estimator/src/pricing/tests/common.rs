use crate::pricing::catalog::{PartCatalog, PartCatalogEntry};
use crate::pricing::detection::{BoundingBox, DamageDetection};
use crate::pricing::domain::{DamageReport, LineItem};

pub(super) fn scratch_top_left() -> DamageDetection {
    DamageDetection::new("scratch", 0.9, BoundingBox::new(0.1, 0.1, 0.3, 0.3))
}

pub(super) fn broken_glass() -> DamageDetection {
    DamageDetection::new("broken glass", 0.8, BoundingBox::new(0.0, 0.0, 1.0, 1.0))
}

/// Mixed detections touching every rule and zone.
pub(super) fn mixed_detections() -> Vec<DamageDetection> {
    vec![
        scratch_top_left(),
        broken_glass(),
        DamageDetection::new("Headlamp", 0.7, BoundingBox::new(0.6, 0.4, 0.8, 0.55)),
        DamageDetection::new("bumper_dent", 0.66, BoundingBox::new(0.2, 0.7, 0.8, 0.95)),
        DamageDetection::new("dent", 0.55, BoundingBox::new(0.3, 0.45, 0.5, 0.6)),
        DamageDetection::new("damage", 0.51, BoundingBox::new(0.1, 0.8, 0.3, 0.99)),
    ]
}

/// Three detections that can only land on the single bottom-zone part.
pub(super) fn single_bottom_part_catalog() -> PartCatalog {
    PartCatalog::from_json_str(
        r#"{
            "body": [
                { "name": "Skid Plate", "min_cost": 3000, "max_cost": 5000, "zone": "bottom" },
                { "name": "Roof", "min_cost": 8000, "max_cost": 12000, "zone": "top" }
            ]
        }"#,
    )
    .expect("fixture catalog parses")
}

pub(super) fn lower_detections(count: usize) -> Vec<DamageDetection> {
    (0..count)
        .map(|index| {
            let label = if index % 2 == 0 { "dent" } else { "scratch" };
            DamageDetection::new(label, 0.9, BoundingBox::new(0.1, 0.7, 0.4, 0.9))
        })
        .collect()
}

pub(super) fn catalog_entry<'c>(catalog: &'c PartCatalog, item: &LineItem) -> &'c PartCatalogEntry {
    catalog
        .find(&item.part_name)
        .unwrap_or_else(|| panic!("{} missing from catalog", item.part_name))
}

pub(super) fn assert_rounding_invariants(report: &DamageReport) {
    for item in &report.line_items {
        assert_eq!(item.cost % 50, 0, "{} cost {} not a multiple of 50", item.part_name, item.cost);
    }
    assert_eq!(report.labor_cost % 10, 0, "labor {} not a multiple of 10", report.labor_cost);
    assert_eq!(report.total_cost, report.parts_subtotal() + report.labor_cost);
}
