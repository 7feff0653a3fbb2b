use super::catalog::PartCatalogEntry;
use super::domain::{
    DamageReport, LineItem, RepairType, FALLBACK_COST, FALLBACK_DESCRIPTION, FALLBACK_PART_NAME,
    REPORT_CONFIDENCE, REPORT_CURRENCY,
};
use super::seeding::ReportRng;
use std::collections::HashSet;

pub const SURFACE_WORK_FACTOR: f64 = 0.35;
pub const PART_COST_STEP: u32 = 50;
pub const LABOR_COST_STEP: u64 = 10;
pub const LABOR_RATE_MIN: f64 = 0.20;
pub const LABOR_RATE_MAX: f64 = 0.30;

/// Nearest multiple of `step`, ties rounding up. Saturates at the largest
/// multiple of `step` that fits in `u32`.
pub fn round_to_step(value: u32, step: u32) -> u32 {
    let rounded = (u64::from(value) + u64::from(step / 2)) / u64::from(step) * u64::from(step);
    u32::try_from(rounded).unwrap_or(u32::MAX / step * step)
}

/// Final part cost for a raw draw from the catalog band.
pub fn price_part(draw: u32, repair_type: RepairType) -> u32 {
    let cost = if repair_type.is_surface_work() {
        (f64::from(draw) * SURFACE_WORK_FACTOR) as u32
    } else {
        draw
    };
    round_to_step(cost, PART_COST_STEP)
}

pub fn labor_cost(parts_subtotal: u64, rate: f64) -> u64 {
    let raw = parts_subtotal as f64 * rate;
    (raw / LABOR_COST_STEP as f64).round() as u64 * LABOR_COST_STEP
}

pub fn describe_damage(label: &str, y_center: f64) -> String {
    let position = (y_center * 100.0).round() as i64;
    format!("AI detection: {} (position: {position}%)", label.trim())
}

/// Accumulates priced line items for one report, at most one per part name.
#[derive(Debug, Default)]
pub struct CostLedger<'c> {
    priced: HashSet<&'c str>,
    line_items: Vec<LineItem>,
    parts_subtotal: u64,
}

impl<'c> CostLedger<'c> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prices `part` unless an earlier detection already claimed it. A repeat
    /// is a no-op and consumes no draw. Returns whether an item was added.
    pub fn add_line_item(
        &mut self,
        part: &'c PartCatalogEntry,
        repair_type: RepairType,
        label: &str,
        y_center: f64,
        rng: &mut ReportRng,
    ) -> bool {
        if !self.priced.insert(part.name.as_str()) {
            return false;
        }

        let draw = rng.integer_in(part.min_cost, part.max_cost);
        let cost = price_part(draw, repair_type);
        self.push(LineItem {
            part_name: part.name.clone(),
            damage_description: describe_damage(label, y_center),
            repair_type,
            cost,
        });
        true
    }

    pub fn add_fallback(&mut self) {
        self.push(LineItem {
            part_name: FALLBACK_PART_NAME.to_string(),
            damage_description: FALLBACK_DESCRIPTION.to_string(),
            repair_type: RepairType::InspectionRequired,
            cost: FALLBACK_COST,
        });
    }

    fn push(&mut self, item: LineItem) {
        self.parts_subtotal += u64::from(item.cost);
        self.line_items.push(item);
    }

    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }

    pub fn parts_subtotal(&self) -> u64 {
        self.parts_subtotal
    }

    pub fn into_report(self, labor_rate: f64) -> DamageReport {
        let labor_cost = labor_cost(self.parts_subtotal, labor_rate);
        DamageReport {
            line_items: self.line_items,
            labor_cost,
            total_cost: self.parts_subtotal + labor_cost,
            currency: REPORT_CURRENCY.to_string(),
            confidence: REPORT_CONFIDENCE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::catalog::{PartCategory, PartZone};

    fn door() -> PartCatalogEntry {
        PartCatalogEntry {
            name: "Door".to_string(),
            min_cost: 8_000,
            max_cost: 12_000,
            category: PartCategory::Body,
            zone: PartZone::Middle,
        }
    }

    #[test]
    fn rounds_half_up_to_fifty() {
        assert_eq!(round_to_step(1_024, 50), 1_000);
        assert_eq!(round_to_step(1_025, 50), 1_050);
        assert_eq!(round_to_step(1_049, 50), 1_050);
        assert_eq!(round_to_step(0, 50), 0);
        assert_eq!(round_to_step(24, 50), 0);
    }

    #[test]
    fn rounding_near_integer_limit_saturates() {
        assert_eq!(round_to_step(u32::MAX, 50), 4_294_967_250);
        assert_eq!(round_to_step(4_294_967_270, 50), 4_294_967_250);
        assert_eq!(price_part(u32::MAX, RepairType::Replace), 4_294_967_250);
    }

    #[test]
    fn surface_work_is_scaled_then_truncated() {
        assert_eq!(price_part(10_000, RepairType::Paint), 3_500);
        assert_eq!(price_part(10_000, RepairType::Correction), 3_500);
        assert_eq!(price_part(10_000, RepairType::Replace), 10_000);
        // 1075 * 0.35 = 376.25 -> 376 -> 400
        assert_eq!(price_part(1_075, RepairType::Paint), 400);
        // 1071 * 0.35 = 374.85 -> 374 -> 350
        assert_eq!(price_part(1_071, RepairType::Paint), 350);
        assert_eq!(price_part(12_030, RepairType::Replace), 12_050);
    }

    #[test]
    fn labor_rounds_to_tens() {
        assert_eq!(labor_cost(10_000, 0.25), 2_500);
        assert_eq!(labor_cost(1_500, 0.2033), 300);
        assert_eq!(labor_cost(1_234, 0.2), 250);
        assert_eq!(labor_cost(0, 0.3), 0);
    }

    #[test]
    fn description_carries_label_and_rounded_position() {
        assert_eq!(
            describe_damage("scratch", 0.2),
            "AI detection: scratch (position: 20%)"
        );
        assert_eq!(
            describe_damage(" dent ", 0.675),
            "AI detection: dent (position: 68%)"
        );
    }

    #[test]
    fn repeated_part_is_priced_once() {
        let part = door();
        let mut rng = ReportRng::seeded(5);
        let mut ledger = CostLedger::new();

        assert!(ledger.add_line_item(&part, RepairType::Correction, "dent", 0.5, &mut rng));
        let subtotal = ledger.parts_subtotal();
        assert!(!ledger.add_line_item(&part, RepairType::Replace, "dent", 0.5, &mut rng));

        assert_eq!(rng.draws(), 1);
        assert_eq!(ledger.parts_subtotal(), subtotal);
        let report = ledger.into_report(0.25);
        assert_eq!(report.line_items.len(), 1);
        assert_eq!(report.line_items[0].repair_type, RepairType::Correction);
    }

    #[test]
    fn fallback_item_costs_fifteen_hundred() {
        let mut ledger = CostLedger::new();
        ledger.add_fallback();
        let report = ledger.into_report(0.2);
        assert!(report.is_fallback());
        assert_eq!(report.parts_subtotal(), 1_500);
        assert_eq!(report.labor_cost, 300);
        assert_eq!(report.total_cost, 1_800);
        assert_eq!(report.currency, "TL");
    }
}
