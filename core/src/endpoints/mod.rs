//! One method per vendor endpoint, grouped by resource family.
//!
//! Every method is a fixed verb and path template, a parameter-shaping
//! step, and a call into `SignaturitClient::dispatch`. Only the download
//! endpoints skip JSON decoding.

mod account;
mod brandings;
mod contacts;
mod emails;
mod signatures;
mod sms;
mod subscriptions;
mod team;
mod templates;

use percent_encoding::{utf8_percent_encode, AsciiSet, PercentEncode, CONTROLS};

use crate::error::ApiError;
use crate::flatten::{extract_query_params, files_param, recipients_param};
use crate::params::Params;
use crate::types::{Files, Recipients};

/// Bytes that would end a path segment or start a query or fragment.
const SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// An id or name, escaped to stay a single path segment.
pub(crate) fn segment(value: &str) -> PercentEncode<'_> {
    utf8_percent_encode(value, SEGMENT_ENCODE_SET)
}

/// `limit`, `offset`, then the extracted conditions.
pub(crate) fn page_params(limit: u32, offset: u32, conditions: &Params) -> Result<Params, ApiError> {
    let mut params = Params::new().with("limit", limit).with("offset", offset);
    params.extend(extract_query_params(conditions)?);
    Ok(params)
}

/// Shape shared by email and SMS creation: recipients first, then
/// attachments when there are any.
pub(crate) fn attach(params: &mut Params, recipients: Recipients, files: Files) -> Result<(), ApiError> {
    if recipients.is_empty() {
        return Err(ApiError::MissingParameter("recipients"));
    }
    params.insert("recipients", recipients_param(recipients));
    if !files.is_empty() {
        params.insert("attachments", files_param(files)?);
    }
    Ok(())
}
