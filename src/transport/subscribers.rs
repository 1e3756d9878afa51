use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::domain::{
    EmailAddress, Envelope, Subscriber, SubscriberCustomField, SubscriberRequest, SubscribeType,
    SubscribersPage,
};
use crate::transport::envelope::{
    TransportError, WireEnvelope, deserialize_dotnet_date, envelope_from_wire,
};
use crate::transport::paging::{WirePaging, paging_from_wire};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireSubscriber {
    #[serde(rename = "ID")]
    id: Uuid,
    email: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    subscribe_type: i32,
    #[serde(default)]
    custom_fields: Vec<WireSubscriberCustomField>,
    #[serde(default, deserialize_with = "deserialize_dotnet_date")]
    created_on: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_dotnet_date")]
    unsubscribed_on: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireSubscriberCustomField {
    #[serde(rename = "CustomFieldID", default)]
    custom_field_id: Option<Uuid>,
    name: String,
    #[serde(default)]
    value: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireSubscribersContext {
    paging: WirePaging,
    #[serde(default)]
    subscribers: Vec<WireSubscriber>,
}

fn subscriber_from_wire(wire: WireSubscriber) -> Subscriber {
    Subscriber {
        id: wire.id,
        email: wire.email,
        name: wire.name,
        subscribe_type: SubscribeType::new(wire.subscribe_type),
        custom_fields: wire
            .custom_fields
            .into_iter()
            .map(|field| SubscriberCustomField {
                custom_field_id: field.custom_field_id,
                name: field.name,
                value: field.value,
            })
            .collect(),
        created_on: wire.created_on,
        unsubscribed_on: wire.unsubscribed_on,
    }
}

/// Custom-field values travel as `Name=Value` strings on the wire.
fn encode_custom_field_pairs(request: &SubscriberRequest) -> Vec<String> {
    request
        .custom_fields
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect()
}

pub(crate) fn encode_subscriber_request(request: &SubscriberRequest) -> Value {
    json!({
        "Email": request.email.as_str(),
        "Name": request.name,
        "CustomFields": encode_custom_field_pairs(request),
    })
}

pub(crate) fn encode_subscribers_request(requests: &[SubscriberRequest]) -> Value {
    json!({
        "Subscribers": requests
            .iter()
            .map(encode_subscriber_request)
            .collect::<Vec<_>>(),
    })
}

pub(crate) fn encode_email_request(email: &EmailAddress) -> Value {
    json!({ "Email": email.as_str() })
}

pub(crate) fn encode_emails_request(emails: &[EmailAddress]) -> Value {
    json!({
        "Emails": emails.iter().map(EmailAddress::as_str).collect::<Vec<_>>(),
    })
}

pub(crate) fn decode_subscriber_envelope(
    json: &str,
) -> Result<Envelope<Subscriber>, TransportError> {
    let wire: WireEnvelope<WireSubscriber> = serde_json::from_str(json)?;
    Ok(envelope_from_wire(wire).map(subscriber_from_wire))
}

pub(crate) fn decode_subscribers_envelope(
    json: &str,
) -> Result<Envelope<Vec<Subscriber>>, TransportError> {
    let wire: WireEnvelope<Vec<WireSubscriber>> = serde_json::from_str(json)?;
    Ok(envelope_from_wire(wire)
        .map(|subscribers| subscribers.into_iter().map(subscriber_from_wire).collect()))
}

pub(crate) fn decode_subscribers_page_envelope(
    json: &str,
) -> Result<Envelope<SubscribersPage>, TransportError> {
    let wire: WireEnvelope<WireSubscribersContext> = serde_json::from_str(json)?;
    Ok(envelope_from_wire(wire).map(|context| SubscribersPage {
        paging: paging_from_wire(context.paging),
        subscribers: context
            .subscribers
            .into_iter()
            .map(subscriber_from_wire)
            .collect(),
    }))
}
