use damage_estimator::config::PricingConfig;
use damage_estimator::pricing::{PartCatalog, PricingEngine};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) catalog: Arc<PartCatalog>,
    pub(crate) min_detection_confidence: f64,
}

impl AppState {
    pub(crate) fn new(
        readiness: Arc<AtomicBool>,
        metrics: PrometheusHandle,
        catalog: PartCatalog,
        pricing: &PricingConfig,
    ) -> Self {
        Self {
            readiness,
            metrics: Arc::new(metrics),
            catalog: Arc::new(catalog),
            min_detection_confidence: pricing.min_detection_confidence,
        }
    }

    pub(crate) fn engine(&self) -> PricingEngine<'_> {
        PricingEngine::new(&self.catalog)
    }
}

#[cfg(test)]
pub(crate) fn test_state(ready: bool) -> AppState {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let handle = PrometheusBuilder::new().build_recorder().handle();
    AppState::new(
        Arc::new(AtomicBool::new(ready)),
        handle,
        PartCatalog::standard().clone(),
        &PricingConfig::default(),
    )
}
