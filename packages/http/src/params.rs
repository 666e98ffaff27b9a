//! Query parameters from serializable structs.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::error::RequestError;
use crate::types::QueryValue;

/// Encode a flat serializable value (usually a struct) into query parameters.
///
/// Fields that serialize to `null` are left out. Nested arrays and objects
/// have no single query rendering and are rejected.
///
/// ```ignore
/// #[derive(Serialize)]
/// struct Search<'a> { q: &'a str, page: u32, cursor: Option<String> }
///
/// let params = to_query_params(&Search { q: "rust", page: 2, cursor: None })?;
/// let request = RequestRouter::<Json<Results>>::get("/search").with_query_params(params);
/// ```
pub fn to_query_params<T: Serialize + ?Sized>(
    value: &T,
) -> Result<BTreeMap<String, QueryValue>, RequestError> {
    let value = serde_json::to_value(value).map_err(|e| RequestError::Encoding(e.to_string()))?;

    let fields = match value {
        JsonValue::Object(fields) => fields,
        other => {
            return Err(RequestError::Encoding(format!(
                "query parameters must come from an object, got {}",
                json_kind(&other)
            )));
        }
    };

    let mut params = BTreeMap::new();
    for (name, field) in fields {
        let value = match field {
            JsonValue::Null => continue,
            JsonValue::Bool(b) => QueryValue::Bool(b),
            JsonValue::String(s) => QueryValue::String(s),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    QueryValue::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    QueryValue::Unsigned(u)
                } else if let Some(f) = n.as_f64() {
                    QueryValue::Float(f)
                } else {
                    return Err(RequestError::Encoding(format!(
                        "query parameter '{}' is not a representable number",
                        name
                    )));
                }
            }
            other => {
                return Err(RequestError::Encoding(format!(
                    "query parameter '{}' is {}, expected a scalar",
                    name,
                    json_kind(&other)
                )));
            }
        };
        params.insert(name, value);
    }

    Ok(params)
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
