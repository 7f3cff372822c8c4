use loan_insight::config::ModelConfig;
use loan_insight::workflows::eligibility::{
    EligibilityService, ModelLoadError, PolicyThresholds, StumpEnsemble,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Fitted artifact when one is configured, otherwise the built-in baseline.
pub(crate) fn load_classifier(model_path: Option<&Path>) -> Result<StumpEnsemble, ModelLoadError> {
    match model_path {
        Some(path) => {
            let ensemble = StumpEnsemble::from_path(path)?;
            info!(
                model = %ensemble.name,
                version = %ensemble.version,
                path = %path.display(),
                stumps = ensemble.stumps.len(),
                "loaded classifier artifact"
            );
            Ok(ensemble)
        }
        None => {
            info!("no model artifact configured; using baseline stump ensemble");
            Ok(StumpEnsemble::baseline())
        }
    }
}

pub(crate) fn build_service(
    model: &ModelConfig,
) -> Result<EligibilityService<StumpEnsemble>, ModelLoadError> {
    let classifier = load_classifier(model.model_path.as_deref())?;
    Ok(EligibilityService::new(
        Arc::new(classifier),
        PolicyThresholds::default(),
    ))
}
