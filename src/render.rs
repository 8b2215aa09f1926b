use crate::alert::SecurityAlert;
use crate::escape::escape_html;
use chrono::{DateTime, SecondsFormat};

const STYLE: &str = "body{font-family:Arial,Helvetica,sans-serif;color:#1f2933;margin:0;padding:0}\
.header{background:#b91c1c;color:#ffffff;padding:16px 24px}\
.header h2{margin:0;font-size:20px;letter-spacing:1px}\
.content{padding:16px 24px}\
.content p{margin:6px 0}\
.content pre{background:#f3f4f6;padding:12px;border-radius:4px;overflow-x:auto;font-size:12px}";

/// Render a validated alert as a complete HTML document.
///
/// Pure function of its input; every user-supplied value passes through
/// `escape_html` before interpolation.
pub fn render_alert_email(alert: &SecurityAlert) -> String {
    let mut rows = String::new();
    push_row(&mut rows, "App", &alert.app_name);
    push_row(&mut rows, "Time", &format_timestamp(alert.timestamp));
    push_row(&mut rows, "Blocked URL", &alert.url);
    push_row(&mut rows, "Hostname", &alert.hostname);

    if let Some(version) = &alert.app_version {
        push_row(&mut rows, "App Version", version);
    }
    if let Some(agent) = &alert.user_agent {
        push_row(&mut rows, "User Agent", agent);
    }
    if let Some(stack) = &alert.stack {
        push_block(&mut rows, "Stack Trace", stack);
    }
    if let Some(metadata) = &alert.metadata {
        let pretty = serde_json::to_string_pretty(metadata).unwrap_or_default();
        push_block(&mut rows, "Metadata", &pretty);
    }

    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n<style>{STYLE}</style>\n</head>\n\
         <body>\n\
         <div class=\"header\"><h2>{heading}</h2></div>\n\
         <div class=\"content\">\n{rows}</div>\n\
         </body>\n\
         </html>\n",
        heading = alert.alert_type.label().to_uppercase(),
    )
}

/// Epoch milliseconds to ISO-8601 UTC. Out-of-range inputs fall back to
/// the raw number so the renderer stays infallible.
fn format_timestamp(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| millis.to_string())
}

fn push_row(rows: &mut String, label: &str, value: &str) {
    rows.push_str(&format!(
        "<p><strong>{label}:</strong> {}</p>\n",
        escape_html(value)
    ));
}

fn push_block(rows: &mut String, label: &str, value: &str) {
    rows.push_str(&format!(
        "<p><strong>{label}:</strong></p>\n<pre>{}</pre>\n",
        escape_html(value)
    ));
}
