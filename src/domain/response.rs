use chrono::{DateTime, Utc};
use url::Url;
use uuid::Uuid;

use crate::domain::value::{
    CampaignStatus, CustomFieldType, KnownError, PreferenceSelectType, SegmentMatchType,
    SubscribeType,
};

#[derive(Debug, Clone, PartialEq)]
/// Uniform result wrapper for every send API response.
///
/// Expected, domain-level failures (a deleted list, a duplicate field name)
/// come back as `success == false` with a [`KnownError`] and no payload; they
/// are part of the normal control flow and are never raised as faults.
///
/// Invariant: `success == false` implies `data == None` and `error == Some(_)`.
pub struct Envelope<T> {
    pub success: bool,
    pub error: Option<KnownError>,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// A successful envelope carrying a payload.
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    /// A successful envelope without a payload (write operations).
    pub fn success_empty() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    /// A failed envelope carrying a known error and no payload.
    pub fn failure(error: KnownError) -> Self {
        Self {
            success: false,
            error: Some(error),
            data: None,
        }
    }

    /// Whether the remote service accepted the request.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Borrow the payload, if any.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Consume the envelope and take the payload, if any.
    pub fn into_data(self) -> Option<T> {
        self.data
    }

    /// Transform the payload while keeping the success/error state.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        Envelope {
            success: self.success,
            error: self.error,
            data: self.data.map(f),
        }
    }

    /// Fallibly transform the payload while keeping the success/error state.
    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<Envelope<U>, E> {
        Ok(Envelope {
            success: self.success,
            error: self.error,
            data: self.data.map(f).transpose()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
/// A mailing list as returned by the send API.
pub struct MailingList {
    pub id: Uuid,
    pub name: String,
    pub active_member_count: Option<u64>,
    pub confirmation_page: Option<Url>,
    pub redirect_after_unsubscribe_page: Option<Url>,
    pub preferences: Option<MailingListPreferences>,
    /// Custom-field definitions in the order the remote service returns them.
    pub custom_fields_definition: Vec<CustomFieldDefinition>,
    pub created_on: Option<DateTime<Utc>>,
    pub updated_on: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Subscription preferences attached to a mailing list.
pub struct MailingListPreferences {
    /// Preference options in their configured order.
    pub options: Vec<String>,
    pub select_type: PreferenceSelectType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A custom-field definition scoped to one mailing list.
pub struct CustomFieldDefinition {
    pub id: Uuid,
    pub name: String,
    pub field_type: CustomFieldType,
    /// Selection options; only meaningful when `field_type.has_options()`.
    pub options: Vec<String>,
    pub is_required: bool,
}

#[derive(Debug, Clone, PartialEq)]
/// A list member as returned by the send API.
pub struct Subscriber {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub subscribe_type: SubscribeType,
    pub custom_fields: Vec<SubscriberCustomField>,
    pub created_on: Option<DateTime<Utc>>,
    pub unsubscribed_on: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A custom-field value attached to a subscriber.
pub struct SubscriberCustomField {
    pub custom_field_id: Option<Uuid>,
    pub name: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
/// One page of subscribers, with the remote paging block passed through.
pub struct SubscribersPage {
    pub paging: Paging,
    pub subscribers: Vec<Subscriber>,
}

#[derive(Debug, Clone, PartialEq)]
/// A campaign as returned by the send API.
pub struct Campaign {
    pub id: Uuid,
    pub name: String,
    pub subject: Option<String>,
    pub sender_email: Option<String>,
    pub reply_to_email: Option<String>,
    pub web_location: Option<Url>,
    pub status: CampaignStatus,
    pub created_on: Option<DateTime<Utc>>,
    pub delivered_on: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
/// One page of campaigns, with the remote paging block passed through.
pub struct CampaignsPage {
    pub paging: Paging,
    pub campaigns: Vec<Campaign>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Paging metadata exactly as the remote service reported it.
///
/// The crate does not walk pages on the caller's behalf.
pub struct Paging {
    pub page_size: u32,
    pub current_page: u32,
    pub total_results: u64,
    pub total_page_count: u32,
}

#[derive(Debug, Clone, PartialEq)]
/// A segment scoped to one mailing list.
///
/// Segment and criterion identifiers are integers on the remote side, unlike
/// the GUID identifiers used everywhere else.
pub struct Segment {
    pub id: i64,
    pub name: String,
    pub match_type: SegmentMatchType,
    pub member_count: Option<u64>,
    pub criteria: Vec<SegmentCriterion>,
    pub created_on: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single matching rule inside a segment.
pub struct SegmentCriterion {
    pub id: i64,
    pub field: String,
    pub comparer: String,
    pub value: Option<String>,
}
