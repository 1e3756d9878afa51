use std::collections::BTreeMap;

use url::Url;
use uuid::Uuid;

use crate::domain::value::{
    CustomFieldType, EmailAddress, PreferenceSelectType, SegmentMatchType,
};

#[derive(Debug, Clone, Default)]
/// Payload for creating or updating a mailing list.
///
/// Field-level validation (name uniqueness, URL reachability) is performed by
/// the remote service; rejections come back as known errors in the envelope.
pub struct MailingListRequest {
    pub name: String,
    pub confirmation_page: Option<Url>,
    pub redirect_after_unsubscribe_page: Option<Url>,
    pub preferences: Option<MailingListPreferencesRequest>,
}

impl MailingListRequest {
    /// A request with just a name, the minimum the remote service accepts.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
/// Subscription preferences submitted with a mailing-list request.
pub struct MailingListPreferencesRequest {
    /// Preference options in the order they should be shown.
    pub options: Vec<String>,
    pub select_type: PreferenceSelectType,
}

#[derive(Debug, Clone, Default)]
/// Payload for creating or updating a custom-field definition.
pub struct CustomFieldDefinitionRequest {
    pub name: String,
    pub field_type: CustomFieldType,
    /// Selection options; only meaningful when `field_type.has_options()`.
    pub options: Vec<String>,
    pub is_required: bool,
}

impl CustomFieldDefinitionRequest {
    /// A plain text field.
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// A single-select dropdown with the given options, in order.
    pub fn single_select_dropdown(name: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            name: name.into(),
            field_type: CustomFieldType::SingleSelectDropdown,
            options,
            is_required: false,
        }
    }
}

#[derive(Debug, Clone)]
/// Payload for adding or updating a list member.
pub struct SubscriberRequest {
    pub email: EmailAddress,
    pub name: Option<String>,
    /// Custom-field values keyed by field name.
    pub custom_fields: BTreeMap<String, String>,
}

impl SubscriberRequest {
    /// A request for the given address with no name and no custom fields.
    pub fn new(email: EmailAddress) -> Self {
        Self {
            email,
            name: None,
            custom_fields: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone)]
/// Payload for creating or updating a campaign.
pub struct CampaignRequest {
    pub name: String,
    pub subject: String,
    pub sender_email: EmailAddress,
    pub reply_to_email: Option<EmailAddress>,
    pub html_content: Option<String>,
    pub plain_content: Option<String>,
    pub web_location: Option<Url>,
    /// Mailing lists (optionally narrowed to a segment) this campaign targets.
    pub mailing_lists: Vec<CampaignListTarget>,
}

impl CampaignRequest {
    /// A request with the fields the remote service requires on create.
    pub fn new(
        name: impl Into<String>,
        subject: impl Into<String>,
        sender_email: EmailAddress,
    ) -> Self {
        Self {
            name: name.into(),
            subject: subject.into(),
            sender_email,
            reply_to_email: None,
            html_content: None,
            plain_content: None,
            web_location: None,
            mailing_lists: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// One mailing-list target of a campaign.
pub struct CampaignListTarget {
    pub mailing_list_id: Uuid,
    pub segment_id: Option<i64>,
}

impl CampaignListTarget {
    /// Target a whole mailing list.
    pub fn list(mailing_list_id: Uuid) -> Self {
        Self {
            mailing_list_id,
            segment_id: None,
        }
    }

    /// Target one segment of a mailing list.
    pub fn segment(mailing_list_id: Uuid, segment_id: i64) -> Self {
        Self {
            mailing_list_id,
            segment_id: Some(segment_id),
        }
    }
}

#[derive(Debug, Clone, Default)]
/// Payload for creating or updating a segment.
pub struct SegmentRequest {
    pub name: String,
    pub match_type: SegmentMatchType,
}

impl SegmentRequest {
    /// A segment matching all of its criteria.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            match_type: SegmentMatchType::All,
        }
    }
}

#[derive(Debug, Clone, Default)]
/// One matching rule submitted with a segment.
pub struct SegmentCriterionRequest {
    pub field: String,
    pub comparer: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone)]
/// Payload for a transactional send based on an existing campaign template.
pub struct TransactionalMessage {
    pub campaign_id: Uuid,
    pub to: EmailAddress,
    /// Template merge values keyed by placeholder name.
    pub merge_fields: BTreeMap<String, String>,
}

impl TransactionalMessage {
    /// A message for one recipient with no merge values.
    pub fn new(campaign_id: Uuid, to: EmailAddress) -> Self {
        Self {
            campaign_id,
            to,
            merge_fields: BTreeMap::new(),
        }
    }
}
