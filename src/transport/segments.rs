use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::domain::{
    Envelope, Segment, SegmentCriterion, SegmentCriterionRequest, SegmentMatchType, SegmentRequest,
};
use crate::transport::envelope::{
    TransportError, WireEnvelope, deserialize_dotnet_date, envelope_from_wire,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireSegment {
    #[serde(rename = "ID")]
    id: i64,
    name: String,
    #[serde(default)]
    match_type: i32,
    #[serde(default)]
    member_count: Option<u64>,
    #[serde(default)]
    criteria: Vec<WireSegmentCriterion>,
    #[serde(default, deserialize_with = "deserialize_dotnet_date")]
    created_on: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireSegmentCriterion {
    #[serde(rename = "ID")]
    id: i64,
    field: String,
    comparer: String,
    #[serde(default)]
    value: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireSegmentsContext {
    #[serde(default)]
    segments: Vec<WireSegment>,
}

fn segment_from_wire(wire: WireSegment) -> Result<Segment, TransportError> {
    let match_type = SegmentMatchType::from_wire_code(wire.match_type).ok_or(
        TransportError::UnknownEnumValue {
            field: "MatchType",
            value: wire.match_type,
        },
    )?;
    Ok(Segment {
        id: wire.id,
        name: wire.name,
        match_type,
        member_count: wire.member_count,
        criteria: wire
            .criteria
            .into_iter()
            .map(|criterion| SegmentCriterion {
                id: criterion.id,
                field: criterion.field,
                comparer: criterion.comparer,
                value: criterion.value,
            })
            .collect(),
        created_on: wire.created_on,
    })
}

pub(crate) fn encode_segment_request(request: &SegmentRequest) -> Value {
    json!({
        "Name": request.name,
        "MatchType": request.match_type.wire_code(),
    })
}

pub(crate) fn encode_criterion_request(request: &SegmentCriterionRequest) -> Value {
    json!({
        "Field": request.field,
        "Comparer": request.comparer,
        "Value": request.value,
    })
}

pub(crate) fn decode_segment_envelope(json: &str) -> Result<Envelope<Segment>, TransportError> {
    let wire: WireEnvelope<WireSegment> = serde_json::from_str(json)?;
    envelope_from_wire(wire).try_map(segment_from_wire)
}

pub(crate) fn decode_segments_envelope(
    json: &str,
) -> Result<Envelope<Vec<Segment>>, TransportError> {
    let wire: WireEnvelope<WireSegmentsContext> = serde_json::from_str(json)?;
    envelope_from_wire(wire).try_map(|context| {
        context
            .segments
            .into_iter()
            .map(segment_from_wire)
            .collect()
    })
}
