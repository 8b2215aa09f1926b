use crate::{alert::SecurityAlert, csp, mailer::OutboundEmail, render, state::AppState};
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info, warn};

pub fn json_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({ "success": false, "error": message })),
    )
        .into_response()
}

fn subject_for(alert: &SecurityAlert) -> String {
    format!(
        "Security alert: {} on {}",
        alert.alert_type.label(),
        alert.app_name
    )
}

/// POST /alert and /security-alert.
///
/// Validation failures are 400 with a field-specific message and no
/// email is sent; an unparseable body is a generic 500.
pub async fn ingest_alert(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let value: Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            error!("alert body is not valid JSON: {e}");
            return json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
        }
    };

    let alert = match SecurityAlert::from_value(&value) {
        Ok(alert) => alert,
        Err(message) => {
            warn!("rejected alert: {message}");
            return json_error(StatusCode::BAD_REQUEST, &message);
        }
    };

    let Some(recipient) = state.registry.resolve(&alert.app_name) else {
        warn!(app = %alert.app_name, "alert for unknown app");
        return json_error(StatusCode::BAD_REQUEST, "Unknown app");
    };

    let email = OutboundEmail {
        to: recipient.to_string(),
        subject: subject_for(&alert),
        html: render::render_alert_email(&alert),
    };

    if state.mailer.send(&email).await {
        info!(app = %alert.app_name, kind = alert.alert_type.as_str(), "alert forwarded");
        (StatusCode::OK, Json(json!({ "success": true }))).into_response()
    } else {
        json_error(StatusCode::INTERNAL_SERVER_ERROR, "Email delivery failed")
    }
}

#[derive(Debug, Deserialize)]
pub struct CspQuery {
    #[serde(rename = "appName")]
    pub app_name: Option<String>,
}

/// POST /csp-report.
///
/// Browsers expect 204 from a report endpoint unconditionally, so every
/// branch ends in 204 - including an unparseable body - and failures
/// are only logged.
pub async fn ingest_csp_report(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CspQuery>,
    body: Bytes,
) -> Response {
    let report = match serde_json::from_slice::<csp::CspReportBody>(&body) {
        Ok(body) => body.csp_report,
        Err(e) => {
            warn!("discarding unparseable CSP report: {e}");
            return StatusCode::NO_CONTENT.into_response();
        }
    };

    let app_name = query
        .app_name
        .filter(|name| !name.trim().is_empty())
        .or_else(|| csp::infer_app_name(&report.document_uri).map(str::to_string));

    let Some(app_name) = app_name else {
        info!(document_uri = %report.document_uri, "CSP report with no attributable app");
        return StatusCode::NO_CONTENT.into_response();
    };

    let Some(recipient) = state.registry.resolve(&app_name) else {
        info!(app = %app_name, "CSP report for unregistered app");
        return StatusCode::NO_CONTENT.into_response();
    };
    let recipient = recipient.to_string();

    let alert = report.into_alert(app_name);
    let email = OutboundEmail {
        to: recipient,
        subject: subject_for(&alert),
        html: render::render_alert_email(&alert),
    };

    if !state.mailer.send(&email).await {
        warn!(app = %alert.app_name, "CSP alert email was not delivered");
    }

    StatusCode::NO_CONTENT.into_response()
}

/// Fallback for unmatched paths: POST to an unknown path is 404, any
/// other method anywhere is 405. OPTIONS never reaches the router.
pub async fn fallback(method: Method) -> StatusCode {
    if method == Method::POST {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::METHOD_NOT_ALLOWED
    }
}
