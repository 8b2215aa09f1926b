use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    UnauthorizedFetch,
    UnauthorizedXhr,
    UnauthorizedWebsocket,
    CspViolation,
}

impl AlertType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "unauthorized_fetch" => Some(Self::UnauthorizedFetch),
            "unauthorized_xhr" => Some(Self::UnauthorizedXhr),
            "unauthorized_websocket" => Some(Self::UnauthorizedWebsocket),
            "csp_violation" => Some(Self::CspViolation),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnauthorizedFetch => "unauthorized_fetch",
            Self::UnauthorizedXhr => "unauthorized_xhr",
            Self::UnauthorizedWebsocket => "unauthorized_websocket",
            Self::CspViolation => "csp_violation",
        }
    }

    /// Human-readable form: underscores become spaces.
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

/// A validated inbound report. Lives only for the request that carried it.
#[derive(Debug, Clone)]
pub struct SecurityAlert {
    pub app_name: String,
    pub alert_type: AlertType,
    pub url: String,
    pub hostname: String,
    /// Epoch milliseconds as reported by the client.
    pub timestamp: i64,
    pub stack: Option<String>,
    pub app_version: Option<String>,
    pub user_agent: Option<String>,
    pub metadata: Option<Map<String, Value>>,
}

impl SecurityAlert {
    /// Field-by-field validation of an already-parsed JSON body.
    ///
    /// Returns the first failing field's message so the caller can hand
    /// it back verbatim in a 400 response. No partial alert is produced
    /// on failure.
    pub fn from_value(value: &Value) -> Result<Self, String> {
        let obj = value
            .as_object()
            .ok_or_else(|| "request body must be a JSON object".to_string())?;

        let app_name = match obj.get("appName").and_then(Value::as_str) {
            Some(s) if !s.trim().is_empty() => s.to_string(),
            _ => return Err("appName must be a non-empty string".to_string()),
        };

        let alert_type = obj
            .get("type")
            .and_then(Value::as_str)
            .and_then(AlertType::parse)
            .ok_or_else(|| {
                "type must be one of unauthorized_fetch, unauthorized_xhr, \
                 unauthorized_websocket, csp_violation"
                    .to_string()
            })?;

        let url = obj
            .get("url")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| "url must be a string".to_string())?;

        let hostname = obj
            .get("hostname")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| "hostname must be a string".to_string())?;

        let timestamp = obj
            .get("timestamp")
            .and_then(Value::as_f64)
            .ok_or_else(|| "timestamp must be a number".to_string())? as i64;

        Ok(Self {
            app_name,
            alert_type,
            url,
            hostname,
            timestamp,
            stack: optional_string(obj, "stack")?,
            app_version: optional_string(obj, "appVersion")?,
            user_agent: optional_string(obj, "userAgent")?,
            metadata: optional_object(obj, "metadata")?,
        })
    }
}

fn optional_string(obj: &Map<String, Value>, key: &str) -> Result<Option<String>, String> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(format!("{key} must be a string")),
    }
}

fn optional_object(
    obj: &Map<String, Value>,
    key: &str,
) -> Result<Option<Map<String, Value>>, String> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(m)) => Ok(Some(m.clone())),
        Some(_) => Err(format!("{key} must be an object")),
    }
}
