use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Response};
use axum::Json;
use engine::{classify, Catalog, Classification, FieldValue, Record};
use indexmap::IndexMap;
use serde_json::json;
use std::sync::Arc;

/// Classify a flat record against the stored templates.
///
/// The record can arrive three ways, checked in order:
/// 1. A JSON object body (`Content-Type: application/json`)
/// 2. A `key=value&...` form body
/// 3. Query parameters, when the body is empty
///
/// The template catalog is rebuilt from the store on every request, so
/// template edits take effect immediately.
///
/// # Responses
///
/// A template matched:
/// ```json
/// { "template": "EmailForm" }
/// ```
///
/// No template matched; one inferred label per field, in input order:
/// ```json
/// { "some_field": "TEXT", "count": "INT, данный тип данных не поддержан ни в одном из шаблонов" }
/// ```
///
/// A record with no fields at all is a 400 with code `NO_USABLE_FIELDS`.
pub async fn classify_record(
    State(state): State<Arc<ServerState>>,
    Query(query_pairs): Query<Vec<(String, String)>>,
    headers: HeaderMap,
    body: Bytes,
) -> ServerResult<Response> {
    let record = extract_record(&headers, &body, query_pairs)?;

    let templates = state.store.list()?;
    let catalog = Catalog::load(&templates);

    match classify(record, &catalog)? {
        Classification::Matched(name) => Ok(Json(json!({ "template": name })).into_response()),
        Classification::Inferred(labels) => Ok(Json(labels).into_response()),
    }
}

/// Pull the record out of whichever transport the client used.
fn extract_record(
    headers: &HeaderMap,
    body: &[u8],
    query_pairs: Vec<(String, String)>,
) -> Result<Record, ServerError> {
    if !body.is_empty() {
        if is_json(headers) {
            return record_from_json(body);
        }
        let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body)
            .map_err(|e| ServerError::BadRequest(format!("malformed form body: {e}")))?;
        return Ok(record_from_pairs(pairs));
    }

    // No body; the query string carries the record, possibly nothing at
    // all. An empty record is rejected downstream, not here.
    Ok(record_from_pairs(query_pairs))
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("application/json"))
        .unwrap_or(false)
}

/// Decode a JSON object body into a record, preserving key order.
///
/// Values must be scalars; arrays and nested objects are a 400 rather
/// than something to silently flatten.
fn record_from_json(body: &[u8]) -> Result<Record, ServerError> {
    let fields: IndexMap<String, serde_json::Value> = serde_json::from_slice(body)?;
    let mut record = Record::with_capacity(fields.len());
    for (key, value) in fields {
        let value = FieldValue::from_json(value)
            .map_err(|e| ServerError::BadRequest(format!("field '{key}': {e}")))?;
        record.insert(key, value);
    }
    Ok(record)
}

/// Build a record from decoded form or query pairs. Everything arrives
/// as a string; date strings become dates later in the pipeline.
fn record_from_pairs(pairs: Vec<(String, String)>) -> Record {
    let mut record = Record::with_capacity(pairs.len());
    for (key, value) in pairs {
        // A repeated key keeps its first position, last value wins.
        record.insert(key, FieldValue::Str(value));
    }
    record
}
