//! Deterministic damage-to-part allocation and repair pricing.
//!
//! Detections are resolved to catalog parts through an ordered rule chain,
//! priced inside each part's cost band with draws from a stream seeded by the
//! caller's reproducibility key, and assembled into a [`DamageReport`].

pub mod assessment;
pub mod catalog;
pub mod detection;
pub mod domain;
mod engine;
pub mod export;
pub mod ledger;
pub mod resolution;
pub mod seeding;

#[cfg(test)]
mod tests;

pub use assessment::{assess, AssessmentRequest, DamageAssessment, VehicleAssessment, VehicleSignal};
pub use catalog::{
    CatalogError, PartCatalog, PartCatalogEntry, PartCategory, PartZone, MAX_PART_COST,
};
pub use detection::{retain_confident, BoundingBox, DamageDetection, FULL_FRAME};
pub use domain::{
    DamageReport, LineItem, RepairType, FALLBACK_COST, FALLBACK_PART_NAME, REPORT_CONFIDENCE,
    REPORT_CURRENCY,
};
pub use engine::{generate_report, PricingEngine};
pub use export::write_report_csv;
pub use seeding::{image_key, seed_from_key, ReportRng};
