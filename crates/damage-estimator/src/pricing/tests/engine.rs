use super::common::*;
use crate::pricing::catalog::{PartCatalog, PartCategory, PartZone};
use crate::pricing::detection::{BoundingBox, DamageDetection};
use crate::pricing::domain::{RepairType, FALLBACK_PART_NAME};
use crate::pricing::engine::{generate_report, PricingEngine};
use crate::pricing::ledger::{price_part, round_to_step, LABOR_RATE_MAX, LABOR_RATE_MIN};
use crate::pricing::seeding::ReportRng;
use std::collections::HashSet;

#[test]
fn same_key_and_detections_produce_identical_reports() {
    let detections = mixed_detections();
    let first = generate_report(&detections, Some("abc"));
    let second = generate_report(&detections, Some("abc"));

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_vec(&first).expect("serializes"),
        serde_json::to_vec(&second).expect("serializes")
    );
}

#[test]
fn different_keys_change_prices() {
    let detections = mixed_detections();
    let baseline = generate_report(&detections, Some("image-a"));
    let changed = ["image-b", "image-c", "image-d"]
        .into_iter()
        .map(|key| generate_report(&detections, Some(key)))
        .filter(|report| report != &baseline)
        .count();

    assert!(changed >= 2, "keys should perturb at least one cost");
}

#[test]
fn scratch_in_top_zone_is_painted() {
    let catalog = PartCatalog::standard();
    let report = generate_report(&[scratch_top_left()], Some("abc"));

    assert_eq!(report.line_items.len(), 1);
    let item = &report.line_items[0];
    assert_eq!(item.repair_type, RepairType::Paint);
    assert_eq!(item.damage_description, "AI detection: scratch (position: 20%)");

    let part = catalog_entry(catalog, item);
    let top_body = part.category == PartCategory::Body && part.zone == PartZone::Top;
    assert!(top_body || part.category == PartCategory::Glass);
    assert!(report.total_cost > 0);
    assert_rounding_invariants(&report);
}

#[test]
fn glass_label_short_circuits_position() {
    let catalog = PartCatalog::standard();
    for key in ["abc", "def", "ghi", "jkl", "mno"] {
        for bbox in [
            BoundingBox::new(0.0, 0.0, 1.0, 1.0),
            BoundingBox::new(0.0, 0.8, 0.2, 1.0),
            BoundingBox::new(0.4, 0.4, 0.6, 0.6),
        ] {
            let detection = DamageDetection::new("broken glass", 0.8, bbox);
            let report = generate_report(&[detection], Some(key));
            let item = &report.line_items[0];
            assert_eq!(item.repair_type, RepairType::Replace);
            assert_eq!(catalog_entry(catalog, item).category, PartCategory::Glass);
        }
    }
}

#[test]
fn repeated_part_yields_single_line_item() {
    let catalog = single_bottom_part_catalog();
    let engine = PricingEngine::new(&catalog);
    let report = engine.generate_report(&lower_detections(3), Some("dedup"));

    assert_eq!(report.line_items.len(), 1);
    let item = &report.line_items[0];
    assert_eq!(item.part_name, "Skid Plate");
    assert_eq!(item.repair_type, RepairType::Correction, "first detection wins");
    assert_rounding_invariants(&report);
}

#[test]
fn duplicates_do_not_consume_cost_draws() {
    let catalog = single_bottom_part_catalog();
    let engine = PricingEngine::new(&catalog);
    let mut rng = ReportRng::from_key(Some("draws"));
    engine.generate_with_rng(&lower_detections(4), &mut rng);

    // four picks, one cost draw, one labor draw
    assert_eq!(rng.draws(), 6);
}

#[test]
fn report_line_items_have_distinct_names() {
    for key in ["k1", "k2", "k3", "k4", "k5", "k6"] {
        let mut detections = mixed_detections();
        detections.extend(mixed_detections());
        let report = generate_report(&detections, Some(key));
        let names: HashSet<_> = report.line_items.iter().map(|item| &item.part_name).collect();
        assert_eq!(names.len(), report.line_items.len());
        assert_rounding_invariants(&report);
    }
}

#[test]
fn empty_detections_fall_back_to_general_bodywork() {
    for key in [Some("abc"), Some("xyz"), None] {
        let report = generate_report(&[], key);
        assert!(report.is_fallback());
        assert_eq!(report.line_items[0].part_name, FALLBACK_PART_NAME);
        assert_eq!(report.line_items[0].cost, 1_500);
        assert!(report.labor_cost >= 300 && report.labor_cost <= 450);
        assert_eq!(report.total_cost, 1_500 + report.labor_cost);
        assert_eq!(report.currency, "TL");
        assert_eq!(report.confidence, 0.85);
    }
}

#[test]
fn unresolvable_detections_fall_back() {
    let catalog = single_bottom_part_catalog();
    let engine = PricingEngine::new(&catalog);
    let detections = vec![
        DamageDetection::without_box("shattered window", 0.9),
        DamageDetection::without_box("tail light", 0.9),
    ];
    let report = engine.generate_report(&detections, Some("abc"));
    assert!(report.is_fallback());
}

#[test]
fn costs_respect_catalog_bands() {
    let catalog = PartCatalog::standard();
    for seed in 0..40 {
        let mut rng = ReportRng::seeded(seed);
        let report = PricingEngine::standard().generate_with_rng(&mixed_detections(), &mut rng);
        assert_rounding_invariants(&report);

        for item in &report.line_items {
            let part = catalog_entry(catalog, item);
            if item.repair_type.is_surface_work() {
                let low = price_part(part.min_cost, item.repair_type);
                let high = price_part(part.max_cost, item.repair_type);
                assert!(
                    (low..=high).contains(&item.cost),
                    "{} surface cost {} outside {low}..={high}",
                    item.part_name,
                    item.cost
                );
            } else {
                let low = round_to_step(part.min_cost, 50);
                let high = round_to_step(part.max_cost, 50);
                assert!((low..=high).contains(&item.cost));
            }
        }

        let subtotal = report.parts_subtotal() as f64;
        assert!(report.labor_cost as f64 >= subtotal * LABOR_RATE_MIN - 5.0);
        assert!(report.labor_cost as f64 <= subtotal * LABOR_RATE_MAX + 5.0);
    }
}

#[test]
fn missing_keys_still_produce_valid_reports() {
    let report = generate_report(&mixed_detections(), None);
    assert!(!report.line_items.is_empty());
    assert_rounding_invariants(&report);
}

#[test]
fn catalog_at_price_ceiling_prices_without_overflow() {
    let catalog = PartCatalog::from_json_str(
        r#"{
            "body": [{ "name": "Armored Door", "min_cost": 99999990, "max_cost": 100000000, "zone": "middle" }],
            "glass": [{ "name": "Armored Glass", "min_cost": 99999990, "max_cost": 100000000 }]
        }"#,
    )
    .expect("ceiling catalog parses");
    let engine = PricingEngine::new(&catalog);
    let detections = vec![
        broken_glass(),
        DamageDetection::new("dent", 0.9, BoundingBox::new(0.1, 0.4, 0.5, 0.6)),
    ];

    let report = engine.generate_report(&detections, Some("abc"));
    assert_eq!(report.line_items.len(), 2);
    assert_eq!(report.line_item("Armored Glass").map(|item| item.cost), Some(100_000_000));
    assert_rounding_invariants(&report);
}
