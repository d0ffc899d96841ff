//! OTLP JSON span formatting.
//!
//! Each exported batch becomes one `resourceSpans` document, so a trace file
//! is newline-delimited OTLP that collectors can replay directly.

use opentelemetry::trace::{Event, Link, SpanId, SpanKind, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

/// Instrumentation scope written into every document.
pub const SCOPE_NAME: &str = "gourmet";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtlpDocument {
    pub resource_spans: Vec<ResourceSpans>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSpans {
    pub resource: OtlpResource,
    pub scope_spans: Vec<ScopeSpans>,
}

#[derive(Debug, Serialize)]
pub struct OtlpResource {
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Serialize)]
pub struct ScopeSpans {
    pub scope: Scope,
    pub spans: Vec<OtlpSpan>,
}

#[derive(Debug, Serialize)]
pub struct Scope {
    pub name: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtlpSpan {
    pub trace_id: String,
    pub span_id: String,
    /// Empty for root spans.
    pub parent_span_id: String,
    pub name: String,
    /// 1 internal, 2 server, 3 client, 4 producer, 5 consumer.
    pub kind: u8,
    pub start_time_unix_nano: String,
    pub end_time_unix_nano: String,
    pub attributes: Vec<Attribute>,
    pub events: Vec<OtlpEvent>,
    pub links: Vec<OtlpLink>,
    pub status: OtlpStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtlpEvent {
    pub time_unix_nano: String,
    pub name: String,
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtlpLink {
    pub trace_id: String,
    pub span_id: String,
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Serialize)]
pub struct OtlpStatus {
    /// 0 unset, 1 ok, 2 error.
    pub code: u8,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct Attribute {
    pub key: String,
    pub value: AnyValue,
}

/// OTLP value encoding. Integers travel as strings per the JSON mapping.
#[derive(Debug, Serialize, PartialEq)]
pub enum AnyValue {
    #[serde(rename = "boolValue")]
    Bool(bool),
    #[serde(rename = "intValue")]
    Int(String),
    #[serde(rename = "doubleValue")]
    Double(f64),
    #[serde(rename = "stringValue")]
    String(String),
}

impl From<&Value> for AnyValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Bool(b) => Self::Bool(*b),
            Value::I64(i) => Self::Int(i.to_string()),
            Value::F64(f) => Self::Double(*f),
            Value::String(s) => Self::String(s.to_string()),
            Value::Array(_) => Self::String(value.to_string()),
        }
    }
}

/// Builds OTLP documents for a fixed resource.
pub struct SpanFormatter {
    resource: Resource,
}

impl SpanFormatter {
    pub const fn new(resource: Resource) -> Self {
        Self { resource }
    }

    pub fn format_batch(&self, batch: &[SpanData]) -> OtlpDocument {
        let attributes = self
            .resource
            .iter()
            .map(|(key, value)| Attribute {
                key: key.to_string(),
                value: value.into(),
            })
            .collect();

        OtlpDocument {
            resource_spans: vec![ResourceSpans {
                resource: OtlpResource { attributes },
                scope_spans: vec![ScopeSpans {
                    scope: Scope { name: SCOPE_NAME },
                    spans: batch.iter().map(format_span).collect(),
                }],
            }],
        }
    }
}

impl std::fmt::Debug for SpanFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpanFormatter").finish_non_exhaustive()
    }
}

fn format_span(span: &SpanData) -> OtlpSpan {
    let parent_span_id = if span.parent_span_id == SpanId::INVALID {
        String::new()
    } else {
        format!("{:016x}", span.parent_span_id)
    };

    OtlpSpan {
        trace_id: format!("{:032x}", span.span_context.trace_id()),
        span_id: format!("{:016x}", span.span_context.span_id()),
        parent_span_id,
        name: span.name.to_string(),
        kind: span_kind_code(&span.span_kind),
        start_time_unix_nano: unix_nanos(span.start_time),
        end_time_unix_nano: unix_nanos(span.end_time),
        attributes: format_attributes(&span.attributes),
        events: span.events.iter().map(format_event).collect(),
        links: span.links.iter().map(format_link).collect(),
        status: format_status(&span.status),
    }
}

const fn span_kind_code(kind: &SpanKind) -> u8 {
    match kind {
        SpanKind::Internal => 1,
        SpanKind::Server => 2,
        SpanKind::Client => 3,
        SpanKind::Producer => 4,
        SpanKind::Consumer => 5,
    }
}

fn format_attributes(attributes: &[KeyValue]) -> Vec<Attribute> {
    attributes
        .iter()
        .map(|kv| Attribute {
            key: kv.key.to_string(),
            value: (&kv.value).into(),
        })
        .collect()
}

fn format_event(event: &Event) -> OtlpEvent {
    OtlpEvent {
        time_unix_nano: unix_nanos(event.timestamp),
        name: event.name.to_string(),
        attributes: format_attributes(&event.attributes),
    }
}

fn format_link(link: &Link) -> OtlpLink {
    OtlpLink {
        trace_id: format!("{:032x}", link.span_context.trace_id()),
        span_id: format!("{:016x}", link.span_context.span_id()),
        attributes: format_attributes(&link.attributes),
    }
}

fn format_status(status: &Status) -> OtlpStatus {
    let (code, message) = match status {
        Status::Unset => (0, String::new()),
        Status::Ok => (1, String::new()),
        Status::Error { description } => (2, description.to_string()),
    };
    OtlpStatus { code, message }
}

fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn attribute_values_use_otlp_keys() {
        let json = serde_json::to_value(AnyValue::from(&Value::I64(42))).unwrap();
        assert_eq!(json, serde_json::json!({ "intValue": "42" }));

        let json = serde_json::to_value(AnyValue::from(&Value::from("ramen"))).unwrap();
        assert_eq!(json, serde_json::json!({ "stringValue": "ramen" }));
    }

    #[test]
    fn empty_batch_carries_resource_and_scope() {
        let resource = Resource::new(vec![KeyValue::new("service.name", "gourmet")]);
        let doc = SpanFormatter::new(resource).format_batch(&[]);
        let json = serde_json::to_value(doc).unwrap();

        let group = &json["resourceSpans"][0];
        assert_eq!(group["scopeSpans"][0]["scope"]["name"], "gourmet");
        assert_eq!(group["scopeSpans"][0]["spans"], serde_json::json!([]));

        let attrs = group["resource"]["attributes"].as_array().unwrap();
        assert!(attrs.iter().any(|a| a["key"] == "service.name"
            && a["value"]["stringValue"] == "gourmet"));
    }

    #[test]
    fn error_status_keeps_description() {
        let status = format_status(&Status::error("timed out"));
        assert_eq!(status.code, 2);
        assert_eq!(status.message, "timed out");
    }

    #[test]
    fn timestamps_are_decimal_nanos() {
        let t = UNIX_EPOCH + Duration::from_millis(1500);
        assert_eq!(unix_nanos(t), "1500000000");
    }
}
