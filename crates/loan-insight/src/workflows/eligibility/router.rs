use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;

use super::classifier::RiskClassifier;
use super::intake::RawApplication;
use super::service::{EligibilityAssessment, EligibilityService};

/// Body returned to the browser form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionView {
    pub result: &'static str,
    pub intro: String,
    pub reasons: Vec<String>,
    pub improvements: Vec<String>,
}

impl From<EligibilityAssessment> for PredictionView {
    fn from(assessment: EligibilityAssessment) -> Self {
        let outcome = assessment.outcome;
        Self {
            result: outcome.headline(),
            intro: outcome.summary,
            reasons: outcome.reasons,
            improvements: outcome.improvements,
        }
    }
}

/// Router builder exposing the eligibility endpoints.
pub fn eligibility_router<C>(service: Arc<EligibilityService<C>>) -> Router
where
    C: RiskClassifier + 'static,
{
    Router::new()
        .route("/predict", post(predict_handler::<C>))
        .route("/api/v1/eligibility/assess", post(assess_handler::<C>))
        .with_state(service)
}

pub(crate) async fn predict_handler<C>(
    State(service): State<Arc<EligibilityService<C>>>,
    payload: Result<Json<RawApplication>, JsonRejection>,
) -> Response
where
    C: RiskClassifier + 'static,
{
    match assess_payload(&service, payload) {
        Ok(assessment) => {
            (StatusCode::OK, Json(PredictionView::from(assessment))).into_response()
        }
        Err(message) => bad_request(message),
    }
}

pub(crate) async fn assess_handler<C>(
    State(service): State<Arc<EligibilityService<C>>>,
    payload: Result<Json<RawApplication>, JsonRejection>,
) -> Response
where
    C: RiskClassifier + 'static,
{
    match assess_payload(&service, payload) {
        Ok(assessment) => (StatusCode::OK, Json(assessment)).into_response(),
        Err(message) => bad_request(message),
    }
}

fn assess_payload<C>(
    service: &EligibilityService<C>,
    payload: Result<Json<RawApplication>, JsonRejection>,
) -> Result<EligibilityAssessment, String>
where
    C: RiskClassifier + 'static,
{
    let Json(raw) = payload.map_err(|rejection| rejection.body_text())?;
    service.assess_raw(raw).map_err(|err| err.to_string())
}

fn bad_request(message: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}
