use super::catalog::PartCatalog;
use super::detection::DamageDetection;
use super::domain::DamageReport;
use super::ledger::{CostLedger, LABOR_RATE_MAX, LABOR_RATE_MIN};
use super::resolution::resolve_part;
use super::seeding::ReportRng;
use tracing::{debug, info};

/// Stateless pricing engine over an immutable catalog.
///
/// Each report owns a freshly seeded [`ReportRng`]; engines can be shared
/// freely between threads without affecting reproducibility.
#[derive(Debug, Clone, Copy)]
pub struct PricingEngine<'c> {
    catalog: &'c PartCatalog,
}

impl PricingEngine<'static> {
    pub fn standard() -> Self {
        Self::new(PartCatalog::standard())
    }
}

impl<'c> PricingEngine<'c> {
    pub fn new(catalog: &'c PartCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'c PartCatalog {
        self.catalog
    }

    /// Prices `detections` with a stream seeded from `key` (or OS entropy
    /// when absent).
    pub fn generate_report(&self, detections: &[DamageDetection], key: Option<&str>) -> DamageReport {
        let mut rng = ReportRng::from_key(key);
        self.generate_with_rng(detections, &mut rng)
    }

    /// Draw order: one pick per detection, one cost draw per newly priced
    /// part (interleaved, in detection order), then one labor draw.
    pub fn generate_with_rng(
        &self,
        detections: &[DamageDetection],
        rng: &mut ReportRng,
    ) -> DamageReport {
        let mut ledger = CostLedger::new();

        for detection in detections {
            let Some(resolved) = resolve_part(self.catalog, detection, rng) else {
                debug!(label = %detection.label, "detection matched no catalog part");
                continue;
            };

            let y_center = detection.bbox.y_center();
            let added = ledger.add_line_item(
                resolved.part,
                resolved.repair_type,
                &detection.label,
                y_center,
                rng,
            );
            debug!(
                label = %detection.label,
                part = %resolved.part.name,
                repair = resolved.repair_type.label(),
                y_center,
                added,
                "detection resolved"
            );
        }

        if ledger.is_empty() {
            ledger.add_fallback();
        }

        let rate = rng.fraction_in(LABOR_RATE_MIN, LABOR_RATE_MAX);
        let report = ledger.into_report(rate);

        info!(
            detections = detections.len(),
            line_items = report.line_items.len(),
            total_cost = report.total_cost,
            fallback = report.is_fallback(),
            "damage report generated"
        );
        report
    }
}

/// Prices `detections` against the built-in catalog.
pub fn generate_report(detections: &[DamageDetection], key: Option<&str>) -> DamageReport {
    PricingEngine::standard().generate_report(detections, key)
}
