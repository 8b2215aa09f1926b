use crate::alert::{AlertType, SecurityAlert};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Map, Value};
use url::Url;

/// Hosted web app: any document host containing this marker.
const MAIL_BOX_HOST_MARKER: &str = "signic.email";
/// Packaged browser extension: documents served from the extension scheme.
const MAIL_GUARD_SCHEME: &str = "chrome-extension";

/// Wire shape sent by browsers to a `report-uri` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CspReportBody {
    #[serde(rename = "csp-report")]
    pub csp_report: CspReport,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CspReport {
    #[serde(rename = "document-uri")]
    pub document_uri: String,
    #[serde(rename = "violated-directive")]
    pub violated_directive: String,
    #[serde(rename = "blocked-uri")]
    pub blocked_uri: String,
    #[serde(rename = "original-policy")]
    pub original_policy: Option<String>,
    #[serde(rename = "source-file")]
    pub source_file: Option<String>,
    #[serde(rename = "line-number")]
    pub line_number: Option<i64>,
}

/// Derive an app name from the document URI when the reporter did not
/// pass one explicitly.
///
/// Fixed two-rule table; extending it means adding rules here, not
/// configuration. An unparseable URI means "no inference", not an error.
pub fn infer_app_name(document_uri: &str) -> Option<&'static str> {
    let parsed = Url::parse(document_uri).ok()?;

    if parsed
        .host_str()
        .map(|host| host.contains(MAIL_BOX_HOST_MARKER))
        .unwrap_or(false)
    {
        return Some("mail_box");
    }
    if parsed.scheme() == MAIL_GUARD_SCHEME {
        return Some("mail_guard");
    }

    None
}

impl CspReport {
    /// Convert into the common alert shape. The CSP fields travel in
    /// `metadata` so the rendered email preserves the original report.
    pub fn into_alert(self, app_name: String) -> SecurityAlert {
        let hostname = Url::parse(&self.blocked_uri)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_default();

        let mut metadata = Map::new();
        metadata.insert("document-uri".to_string(), Value::from(self.document_uri));
        metadata.insert(
            "violated-directive".to_string(),
            Value::from(self.violated_directive),
        );
        metadata.insert("blocked-uri".to_string(), Value::from(self.blocked_uri.clone()));
        if let Some(policy) = self.original_policy {
            metadata.insert("original-policy".to_string(), Value::from(policy));
        }
        if let Some(file) = self.source_file {
            metadata.insert("source-file".to_string(), Value::from(file));
        }
        if let Some(line) = self.line_number {
            metadata.insert("line-number".to_string(), Value::from(line));
        }

        SecurityAlert {
            app_name,
            alert_type: AlertType::CspViolation,
            url: self.blocked_uri,
            hostname,
            timestamp: Utc::now().timestamp_millis(),
            stack: None,
            app_version: None,
            user_agent: None,
            metadata: Some(metadata),
        }
    }
}
