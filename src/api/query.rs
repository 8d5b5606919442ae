//! Query-string building for list parameters.
//!
//! List endpoints accept typed parameter structs; this module flattens
//! them into the string map the transport layer appends to the URL.
//! `None` fields are omitted entirely and arrays are comma-joined, per
//! the API's query conventions.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

/// Serialises a params struct to a query parameter map.
///
/// # Errors
///
/// Returns the underlying `serde_json` error if the params struct fails
/// to serialise (not expected for the plain structs the SDK defines).
pub fn serialize_to_query<T: Serialize>(
    params: &T,
) -> Result<HashMap<String, String>, serde_json::Error> {
    let value = serde_json::to_value(params)?;

    let mut query = HashMap::new();

    if let Value::Object(map) = value {
        for (key, val) in map {
            match val {
                Value::Null => {} // Skip absent values
                Value::String(s) => {
                    query.insert(key, s);
                }
                Value::Number(n) => {
                    query.insert(key, n.to_string());
                }
                Value::Bool(b) => {
                    query.insert(key, b.to_string());
                }
                Value::Array(arr) => {
                    let values: Vec<String> = arr
                        .iter()
                        .filter_map(|v| match v {
                            Value::String(s) => Some(s.clone()),
                            Value::Number(n) => Some(n.to_string()),
                            _ => None,
                        })
                        .collect();
                    if !values.is_empty() {
                        query.insert(key, values.join(","));
                    }
                }
                Value::Object(_) => {
                    // Complex objects go over as JSON text
                    query.insert(key, val.to_string());
                }
            }
        }
    }

    Ok(query)
}
