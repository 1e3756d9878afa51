use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Value, json};
use url::Url;
use uuid::Uuid;

use crate::domain::{
    CustomFieldDefinition, CustomFieldDefinitionRequest, CustomFieldType, Envelope, MailingList,
    MailingListPreferences, MailingListRequest, PreferenceSelectType,
};
use crate::transport::envelope::{
    TransportError, WireEnvelope, deserialize_dotnet_date, envelope_from_wire,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireMailingList {
    #[serde(rename = "ID")]
    id: Uuid,
    name: String,
    #[serde(default)]
    active_member_count: Option<u64>,
    #[serde(default)]
    confirmation_page: Option<Url>,
    #[serde(default)]
    redirect_after_unsubscribe_page: Option<Url>,
    #[serde(default)]
    preferences: Option<WireMailingListPreferences>,
    #[serde(default)]
    custom_fields_definition: Vec<WireCustomFieldDefinition>,
    #[serde(default, deserialize_with = "deserialize_dotnet_date")]
    created_on: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_dotnet_date")]
    updated_on: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireMailingListPreferences {
    #[serde(default)]
    options: Vec<String>,
    select_type: i32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireCustomFieldDefinition {
    #[serde(rename = "ID")]
    id: Uuid,
    name: String,
    #[serde(rename = "Type")]
    field_type: i32,
    /// The remote service reuses `Context` for the comma-joined option list.
    #[serde(default)]
    context: Option<String>,
    #[serde(default)]
    is_required: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireMailingListsContext {
    #[serde(default)]
    mailing_lists: Vec<WireMailingList>,
}

fn mailing_list_from_wire(wire: WireMailingList) -> Result<MailingList, TransportError> {
    let preferences = wire.preferences.map(preferences_from_wire).transpose()?;
    let custom_fields_definition = wire
        .custom_fields_definition
        .into_iter()
        .map(custom_field_from_wire)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(MailingList {
        id: wire.id,
        name: wire.name,
        active_member_count: wire.active_member_count,
        confirmation_page: wire.confirmation_page,
        redirect_after_unsubscribe_page: wire.redirect_after_unsubscribe_page,
        preferences,
        custom_fields_definition,
        created_on: wire.created_on,
        updated_on: wire.updated_on,
    })
}

fn preferences_from_wire(
    wire: WireMailingListPreferences,
) -> Result<MailingListPreferences, TransportError> {
    let select_type = PreferenceSelectType::from_wire_code(wire.select_type).ok_or(
        TransportError::UnknownEnumValue {
            field: "SelectType",
            value: wire.select_type,
        },
    )?;
    Ok(MailingListPreferences {
        options: wire.options,
        select_type,
    })
}

fn custom_field_from_wire(
    wire: WireCustomFieldDefinition,
) -> Result<CustomFieldDefinition, TransportError> {
    let field_type = CustomFieldType::from_wire_code(wire.field_type).ok_or(
        TransportError::UnknownEnumValue {
            field: "Type",
            value: wire.field_type,
        },
    )?;
    Ok(CustomFieldDefinition {
        id: wire.id,
        name: wire.name,
        field_type,
        options: wire.context.as_deref().map(split_options).unwrap_or_default(),
        is_required: wire.is_required,
    })
}

/// Option lists travel as one comma-joined string on the wire.
fn split_options(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|option| !option.is_empty())
        .map(str::to_owned)
        .collect()
}

fn join_options(options: &[String]) -> String {
    options.join(",")
}

pub(crate) fn encode_mailing_list_request(request: &MailingListRequest) -> Value {
    json!({
        "Name": request.name,
        "ConfirmationPage": request.confirmation_page.as_ref().map(Url::as_str),
        "RedirectAfterUnsubscribePage": request
            .redirect_after_unsubscribe_page
            .as_ref()
            .map(Url::as_str),
        "Preferences": request.preferences.as_ref().map(|preferences| json!({
            "Options": preferences.options,
            "SelectType": preferences.select_type.wire_code(),
        })),
    })
}

pub(crate) fn encode_custom_field_request(request: &CustomFieldDefinitionRequest) -> Value {
    let options = if request.options.is_empty() {
        Value::Null
    } else {
        Value::String(join_options(&request.options))
    };
    json!({
        "Name": request.name,
        "CustomFieldType": request.field_type.wire_code(),
        "Options": options,
        "IsRequired": request.is_required,
    })
}

pub(crate) fn decode_mailing_list_envelope(
    json: &str,
) -> Result<Envelope<MailingList>, TransportError> {
    let wire: WireEnvelope<WireMailingList> = serde_json::from_str(json)?;
    envelope_from_wire(wire).try_map(mailing_list_from_wire)
}

pub(crate) fn decode_mailing_lists_envelope(
    json: &str,
) -> Result<Envelope<Vec<MailingList>>, TransportError> {
    let wire: WireEnvelope<WireMailingListsContext> = serde_json::from_str(json)?;
    envelope_from_wire(wire).try_map(|context| {
        context
            .mailing_lists
            .into_iter()
            .map(mailing_list_from_wire)
            .collect()
    })
}
