use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::workflows::eligibility::domain::ClassifierSignal;
use crate::workflows::eligibility::router::eligibility_router;
use crate::workflows::eligibility::service::EligibilityService;

fn form_payload() -> Value {
    json!({
        "ApplicantIncome": "50000",
        "CoapplicantIncome": "0",
        "LoanAmount": "500000",
        "Loan_Amount_Term": "360",
        "Interest_Rate": "8.5",
        "Credit_History": "1",
        "Years_of_Experience": "3",
        "Employment_Type": "salaried",
        "Property_Area": "urban"
    })
}

fn post_json(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .expect("request builds")
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("body is json")
}

#[tokio::test]
async fn predict_returns_the_form_contract() {
    let (service, _) = build_service(ClassifierSignal::Approve);
    let router = eligibility_router(Arc::new(service));

    let response = router
        .oneshot(post_json(
            "/predict",
            serde_json::to_vec(&form_payload()).expect("serializes"),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["result"], "✅ Loan Approved");
    assert_eq!(
        body["intro"],
        "Congratulations — your loan is likely to be approved."
    );
    assert_eq!(body["reasons"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["improvements"].as_array().map(Vec::len), Some(3));
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn predict_rejects_unconvertible_fields_with_bad_request() {
    let (service, classifier) = build_service(ClassifierSignal::Approve);
    let router = eligibility_router(Arc::new(service));
    let mut payload = form_payload();
    payload["Interest_Rate"] = json!("eight");

    let response = router
        .oneshot(post_json(
            "/predict",
            serde_json::to_vec(&payload).expect("serializes"),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"]
        .as_str()
        .is_some_and(|message| message.contains("Interest_Rate")));
    assert_eq!(classifier.calls(), 0);
}

#[tokio::test]
async fn predict_rejects_malformed_json_with_bad_request() {
    let (service, _) = build_service(ClassifierSignal::Approve);
    let router = eligibility_router(Arc::new(service));

    let response = router
        .oneshot(post_json("/predict", b"{not json".to_vec()))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn predict_rejects_overflowing_loan_terms_with_bad_request() {
    let (service, _) = build_service(ClassifierSignal::Approve);
    let router = eligibility_router(Arc::new(service));
    let mut payload = form_payload();
    payload["Interest_Rate"] = json!("1e308");

    let response = router
        .oneshot(post_json(
            "/predict",
            serde_json::to_vec(&payload).expect("serializes"),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"]
        .as_str()
        .is_some_and(|message| message.contains("finite monthly installment")));
}

#[tokio::test]
async fn predict_surfaces_classifier_failures_as_client_errors() {
    let service = EligibilityService::new(Arc::new(IncompatibleClassifier), thresholds());
    let router = eligibility_router(Arc::new(service));

    let response = router
        .oneshot(post_json(
            "/predict",
            serde_json::to_vec(&form_payload()).expect("serializes"),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"]
        .as_str()
        .is_some_and(|message| message.contains("Dependents")));
}

#[tokio::test]
async fn assess_route_exposes_the_full_assessment() {
    let (service, _) = build_service(ClassifierSignal::Approve);
    let router = eligibility_router(Arc::new(service));
    let mut payload = form_payload();
    payload["LoanAmount"] = json!(6_000_000);

    let response = router
        .oneshot(post_json(
            "/api/v1/eligibility/assess",
            serde_json::to_vec(&payload).expect("serializes"),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["classifier_signal"], "approve");
    assert_eq!(body["effective_signal"], "reject");
    assert_eq!(body["override_applied"], true);
    assert_eq!(body["verdict"], "rejected");
    assert_eq!(body["branch"], "affordability_override");
    assert_eq!(body["reason_codes"][0], "installment_burden");
    assert!(body["ratio_percent"].as_f64().is_some_and(|ratio| ratio > 80.0));
}
