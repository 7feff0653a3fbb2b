use super::detection::{retain_confident, DamageDetection};
use super::domain::DamageReport;
use super::engine::PricingEngine;
use serde::{Deserialize, Serialize};

pub const VEHICLE_DETECTED: &str = "Vehicle detected.";
pub const VEHICLE_NOT_DETECTED: &str = "No vehicle detected in the image.";

/// Vehicle-presence signal produced by the vision collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleSignal {
    pub is_vehicle: bool,
    #[serde(default)]
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleAssessment {
    pub is_vehicle: bool,
    pub confidence: f64,
    pub message: &'static str,
}

impl From<VehicleSignal> for VehicleAssessment {
    fn from(signal: VehicleSignal) -> Self {
        Self {
            is_vehicle: signal.is_vehicle,
            confidence: signal.confidence,
            message: if signal.is_vehicle {
                VEHICLE_DETECTED
            } else {
                VEHICLE_NOT_DETECTED
            },
        }
    }
}

/// Vehicle gate outcome merged with the priced report, when one was produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DamageAssessment {
    #[serde(flatten)]
    pub vehicle: Option<VehicleAssessment>,
    #[serde(flatten)]
    pub report: Option<DamageReport>,
}

/// Input for one assessment. Without a vehicle signal the engine always runs.
#[derive(Debug, Clone, Copy)]
pub struct AssessmentRequest<'a> {
    pub vehicle: Option<VehicleSignal>,
    pub detections: &'a [DamageDetection],
    pub key: Option<&'a str>,
    pub min_confidence: f64,
}

pub fn assess(engine: &PricingEngine<'_>, request: AssessmentRequest<'_>) -> DamageAssessment {
    let vehicle = request.vehicle.map(VehicleAssessment::from);
    if matches!(vehicle, Some(VehicleAssessment { is_vehicle: false, .. })) {
        return DamageAssessment {
            vehicle,
            report: None,
        };
    }

    let detections = retain_confident(request.detections, request.min_confidence);
    let report = engine.generate_report(&detections, request.key);
    DamageAssessment {
        vehicle,
        report: Some(report),
    }
}
