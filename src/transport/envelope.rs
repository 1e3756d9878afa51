use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

use crate::domain::{Envelope, KnownError};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown {field} value in response: {value}")]
    UnknownEnumValue { field: &'static str, value: i32 },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
/// The `{ Code, Error, Context }` wrapper every send API response uses.
pub(crate) struct WireEnvelope<T> {
    pub(crate) code: i32,
    // No serde(default) here: it would force `T: Default` onto the derived
    // Deserialize impl. Missing optional fields already map to None.
    pub(crate) error: Option<String>,
    pub(crate) context: Option<T>,
}

/// Map a wire envelope into the domain envelope.
///
/// An `Error` string wins over `Code`; a non-zero `Code` without an error
/// string gets a synthetic `CODE_<n>` catch-all so the failure stays
/// pattern-matchable instead of becoming a decode fault.
pub(crate) fn envelope_from_wire<T>(wire: WireEnvelope<T>) -> Envelope<T> {
    if let Some(error) = wire.error {
        return Envelope::failure(KnownError::from_remote(error));
    }
    if wire.code != 0 {
        return Envelope::failure(KnownError::Other(format!("CODE_{}", wire.code)));
    }
    match wire.context {
        Some(data) => Envelope::success(data),
        None => Envelope::success_empty(),
    }
}

pub(crate) fn decode_envelope<T: DeserializeOwned>(
    json: &str,
) -> Result<Envelope<T>, TransportError> {
    let wire: WireEnvelope<T> = serde_json::from_str(json)?;
    Ok(envelope_from_wire(wire))
}

/// Decode an envelope whose `Context` is irrelevant (write operations).
pub(crate) fn decode_unit_envelope(json: &str) -> Result<Envelope<()>, TransportError> {
    let wire: WireEnvelope<serde_json::Value> = serde_json::from_str(json)?;
    Ok(envelope_from_wire(wire).map(|_| ()))
}

/// Decode an envelope whose `Context` is a bare GUID string (create/update).
pub(crate) fn decode_id_envelope(json: &str) -> Result<Envelope<Uuid>, TransportError> {
    decode_envelope::<Uuid>(json)
}

/// Decode an envelope whose `Context` is a bare integer id (segments).
pub(crate) fn decode_int_id_envelope(json: &str) -> Result<Envelope<i64>, TransportError> {
    decode_envelope::<i64>(json)
}

/// Parse a .NET-style `/Date(1611234567000)/` timestamp, with or without a
/// trailing zone offset. The offset is ignored; the milliseconds are UTC.
pub(crate) fn parse_dotnet_date(raw: &str) -> Option<DateTime<Utc>> {
    let inner = raw.trim().strip_prefix("/Date(")?.strip_suffix(")/")?;
    if inner.is_empty() {
        return None;
    }
    // A leading '-' belongs to the milliseconds; later signs start an offset.
    let millis_end = inner
        .char_indices()
        .skip(1)
        .find(|&(_, c)| c == '+' || c == '-')
        .map_or(inner.len(), |(idx, _)| idx);
    let millis: i64 = inner[..millis_end].parse().ok()?;
    DateTime::<Utc>::from_timestamp_millis(millis)
}

/// Serde adapter for optional `/Date(ms)/` fields.
pub(crate) fn deserialize_dotnet_date<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(value) => parse_dotnet_date(&value)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid .NET date: {value}"))),
    }
}
