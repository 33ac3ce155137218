//! Parameter shaping shared by the endpoint methods.
//!
//! Recipient and file lists become the indexed/list forms the vendor
//! expects, and free-form filter conditions become query parameters.

use crate::error::ApiError;
use crate::params::{FileRef, Params, Value};
use crate::types::{Files, Recipients};

/// `[r0, r1, ...]` → `{"0": r0, "1": r1, ...}` in input order.
pub fn recipients_param(recipients: impl Into<Recipients>) -> Value {
    let params: Params = recipients
        .into()
        .into_iter()
        .enumerate()
        .map(|(index, recipient)| (index.to_string(), Value::from(recipient)))
        .collect();
    Value::Map(params)
}

/// Read every path as a binary file reference, in input order.
pub fn files_param(files: impl Into<Files>) -> Result<Value, ApiError> {
    let refs = files
        .into()
        .into_iter()
        .map(|path| FileRef::open(&path).map(Value::File))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Value::List(refs))
}

/// Copy filter conditions into query parameters.
///
/// Keys pass through verbatim and in order, except:
/// - `ids`: a list of scalars, joined with commas; a nested list, map or
///   file inside it is rejected as `MissingParameter("ids")`
/// - `data`: a map of custom-data filters, re-emitted as `data.<key>`
pub fn extract_query_params(conditions: &Params) -> Result<Params, ApiError> {
    let mut params = Params::new();
    for (key, value) in conditions.iter() {
        match (key, value) {
            ("ids", Value::List(ids)) => {
                let joined = ids
                    .iter()
                    .map(|id| id.as_text().ok_or(ApiError::MissingParameter("ids")))
                    .collect::<Result<Vec<_>, _>>()?
                    .join(",");
                params.insert("ids", joined);
            }
            ("data", Value::Map(data)) => {
                for (data_key, data_value) in data.iter() {
                    params.insert(format!("data.{data_key}"), data_value.clone());
                }
            }
            _ => params.insert(key, value.clone()),
        }
    }
    Ok(params)
}
