use std::fmt;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sitecore Send account API key.
///
/// Invariant: non-empty after trimming. One key identifies one tenant; every
/// call made with it only sees that tenant's resources.
pub struct ApiKey(String);

impl ApiKey {
    /// Query parameter name used by the send API (`apikey`).
    pub const FIELD: &'static str = "apikey";

    /// Create a validated [`ApiKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Subscriber email address (`Email`).
///
/// Invariant: non-empty after trimming. No format validation is performed;
/// the remote service is the authority on what is deliverable.
pub struct EmailAddress(String);

impl EmailAddress {
    /// Field name used by the send API (`Email`).
    pub const FIELD: &'static str = "Email";

    /// Create a validated (non-empty) email address.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the trimmed address.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Known error codes returned by the send API inside the response envelope.
///
/// These are expected failure modes (the remote service completed the request
/// and said "no"), not faults. Codes this crate does not recognize land in
/// [`KnownError::Other`] with the raw remote code preserved, so matching on
/// this enum never loses information.
pub enum KnownError {
    ListNotFound,
    CustomFieldNotFound,
    DuplicateCustomFieldName,
    SubscriberNotFound,
    MemberAlreadyExists,
    InvalidEmail,
    CampaignNotFound,
    CampaignAlreadySent,
    NotEnoughCredits,
    SegmentNotFound,
    /// Any remote code without a dedicated variant.
    Other(String),
}

impl KnownError {
    /// Map a raw remote error code onto a known variant.
    ///
    /// Unrecognized codes are preserved verbatim in [`KnownError::Other`].
    pub fn from_remote(code: impl Into<String>) -> Self {
        let code = code.into();
        match code.trim() {
            "LIST_NOT_FOUND" => Self::ListNotFound,
            "CUSTOM_FIELD_NOT_FOUND" => Self::CustomFieldNotFound,
            "DUPLICATE_CUSTOM_FIELD_NAME" => Self::DuplicateCustomFieldName,
            "SUBSCRIBER_NOT_FOUND" => Self::SubscriberNotFound,
            "MEMBER_ALREADY_EXISTS" => Self::MemberAlreadyExists,
            "INVALID_EMAIL" => Self::InvalidEmail,
            "CAMPAIGN_NOT_FOUND" => Self::CampaignNotFound,
            "CAMPAIGN_ALREADY_SENT" => Self::CampaignAlreadySent,
            "NOT_ENOUGH_CREDITS" => Self::NotEnoughCredits,
            "SEGMENT_NOT_FOUND" => Self::SegmentNotFound,
            trimmed => Self::Other(trimmed.to_owned()),
        }
    }

    /// The remote code string for this error.
    pub fn as_remote(&self) -> &str {
        match self {
            Self::ListNotFound => "LIST_NOT_FOUND",
            Self::CustomFieldNotFound => "CUSTOM_FIELD_NOT_FOUND",
            Self::DuplicateCustomFieldName => "DUPLICATE_CUSTOM_FIELD_NAME",
            Self::SubscriberNotFound => "SUBSCRIBER_NOT_FOUND",
            Self::MemberAlreadyExists => "MEMBER_ALREADY_EXISTS",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::CampaignNotFound => "CAMPAIGN_NOT_FOUND",
            Self::CampaignAlreadySent => "CAMPAIGN_ALREADY_SENT",
            Self::NotEnoughCredits => "NOT_ENOUGH_CREDITS",
            Self::SegmentNotFound => "SEGMENT_NOT_FOUND",
            Self::Other(code) => code,
        }
    }

    /// Whether this error means the addressed resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ListNotFound
                | Self::CustomFieldNotFound
                | Self::SubscriberNotFound
                | Self::CampaignNotFound
                | Self::SegmentNotFound
        )
    }
}

impl fmt::Display for KnownError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_remote())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Data type of a mailing-list custom field (`Type` / `CustomFieldType`).
pub enum CustomFieldType {
    #[default]
    Text,
    Number,
    DateTime,
    SingleSelectDropdown,
    CheckBox,
}

impl CustomFieldType {
    /// Integer code used on the wire.
    pub fn wire_code(self) -> i32 {
        match self {
            Self::Text => 0,
            Self::Number => 1,
            Self::DateTime => 2,
            Self::SingleSelectDropdown => 3,
            Self::CheckBox => 4,
        }
    }

    /// Convert a wire integer code into a field type, if known.
    pub fn from_wire_code(code: i32) -> Option<Self> {
        Some(match code {
            0 => Self::Text,
            1 => Self::Number,
            2 => Self::DateTime,
            3 => Self::SingleSelectDropdown,
            4 => Self::CheckBox,
            _ => return None,
        })
    }

    /// Whether the `options` list is meaningful for this type.
    pub fn has_options(self) -> bool {
        matches!(self, Self::SingleSelectDropdown)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// How subscribers pick mailing-list preferences (`SelectType`).
pub enum PreferenceSelectType {
    #[default]
    SingleSelect,
    MultiSelect,
}

impl PreferenceSelectType {
    /// Integer code used on the wire.
    pub fn wire_code(self) -> i32 {
        match self {
            Self::SingleSelect => 0,
            Self::MultiSelect => 1,
        }
    }

    /// Convert a wire integer code into a select type, if known.
    pub fn from_wire_code(code: i32) -> Option<Self> {
        Some(match code {
            0 => Self::SingleSelect,
            1 => Self::MultiSelect,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Subscription state code (`SubscribeType`).
///
/// The raw integer is preserved as-is even when unknown to this crate.
pub struct SubscribeType(i32);

impl SubscribeType {
    /// Construct from the wire integer representation.
    pub fn new(code: i32) -> Self {
        Self(code)
    }

    /// The integer code as provided by the send API.
    pub fn as_i32(self) -> i32 {
        self.0
    }

    /// Map this code to a known subscription state, if one exists.
    pub fn known(self) -> Option<KnownSubscribeType> {
        KnownSubscribeType::from_code(self.0)
    }

    /// Returns `true` if this state still receives campaigns.
    pub fn is_active(self) -> bool {
        matches!(self.known(), Some(KnownSubscribeType::Subscribed))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Known subscription states.
pub enum KnownSubscribeType {
    Subscribed,
    Unsubscribed,
    Bounced,
    Removed,
}

impl KnownSubscribeType {
    /// Convert a raw integer code into a known state.
    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            1 => Self::Subscribed,
            2 => Self::Unsubscribed,
            3 => Self::Bounced,
            4 => Self::Removed,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Campaign lifecycle state code (`Status`).
///
/// The raw integer is preserved as-is even when unknown to this crate.
pub struct CampaignStatus(i32);

impl CampaignStatus {
    /// Construct from the wire integer representation.
    pub fn new(code: i32) -> Self {
        Self(code)
    }

    /// The integer code as provided by the send API.
    pub fn as_i32(self) -> i32 {
        self.0
    }

    /// Map this code to a known lifecycle state, if one exists.
    pub fn known(self) -> Option<KnownCampaignStatus> {
        KnownCampaignStatus::from_code(self.0)
    }

    /// Returns `true` once the campaign can no longer be edited or sent.
    pub fn is_final(self) -> bool {
        matches!(
            self.known(),
            Some(KnownCampaignStatus::Sent | KnownCampaignStatus::Failed)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Known campaign lifecycle states.
pub enum KnownCampaignStatus {
    Draft,
    Scheduled,
    Sending,
    Sent,
    Failed,
}

impl KnownCampaignStatus {
    /// Convert a raw integer code into a known state.
    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            0 => Self::Draft,
            1 => Self::Scheduled,
            2 => Self::Sending,
            3 => Self::Sent,
            4 => Self::Failed,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Whether a segment matches all or any of its criteria (`MatchType`).
pub enum SegmentMatchType {
    #[default]
    All,
    Any,
}

impl SegmentMatchType {
    /// Integer code used on the wire.
    pub fn wire_code(self) -> i32 {
        match self {
            Self::All => 0,
            Self::Any => 1,
        }
    }

    /// Convert a wire integer code into a match type, if known.
    pub fn from_wire_code(code: i32) -> Option<Self> {
        Some(match code {
            0 => Self::All,
            1 => Self::Any,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Subscription-state filter used when listing subscribers.
///
/// The send API encodes the filter as a URL path segment.
pub enum SubscriberFilter {
    #[default]
    Subscribed,
    Unsubscribed,
    Bounced,
    Removed,
}

impl SubscriberFilter {
    /// Path segment used by the send API.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Subscribed => "Subscribed",
            Self::Unsubscribed => "Unsubscribed",
            Self::Bounced => "Bounced",
            Self::Removed => "Removed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_trims_and_rejects_empty() {
        let key = ApiKey::new("  secret ").unwrap();
        assert_eq!(key.as_str(), "secret");
        assert!(matches!(
            ApiKey::new("   "),
            Err(ValidationError::Empty {
                field: ApiKey::FIELD
            })
        ));
    }

    #[test]
    fn email_address_trims_and_rejects_empty() {
        let email = EmailAddress::new(" user@example.com ").unwrap();
        assert_eq!(email.as_str(), "user@example.com");
        assert!(EmailAddress::new("").is_err());
    }

    #[test]
    fn known_error_maps_remote_codes() {
        assert_eq!(
            KnownError::from_remote("LIST_NOT_FOUND"),
            KnownError::ListNotFound
        );
        assert_eq!(
            KnownError::from_remote(" CAMPAIGN_NOT_FOUND "),
            KnownError::CampaignNotFound
        );
        assert_eq!(KnownError::ListNotFound.as_remote(), "LIST_NOT_FOUND");
    }

    #[test]
    fn known_error_preserves_unrecognized_codes() {
        let err = KnownError::from_remote("SOMETHING_NEW");
        assert_eq!(err, KnownError::Other("SOMETHING_NEW".to_owned()));
        assert_eq!(err.as_remote(), "SOMETHING_NEW");
        assert!(!err.is_not_found());
    }

    #[test]
    fn known_error_not_found_classification() {
        assert!(KnownError::ListNotFound.is_not_found());
        assert!(KnownError::SegmentNotFound.is_not_found());
        assert!(!KnownError::NotEnoughCredits.is_not_found());
    }

    #[test]
    fn custom_field_type_wire_codes_round_trip() {
        for field_type in [
            CustomFieldType::Text,
            CustomFieldType::Number,
            CustomFieldType::DateTime,
            CustomFieldType::SingleSelectDropdown,
            CustomFieldType::CheckBox,
        ] {
            assert_eq!(
                CustomFieldType::from_wire_code(field_type.wire_code()),
                Some(field_type)
            );
        }
        assert_eq!(CustomFieldType::from_wire_code(99), None);
        assert!(CustomFieldType::SingleSelectDropdown.has_options());
        assert!(!CustomFieldType::Text.has_options());
    }

    #[test]
    fn subscribe_type_known_mapping() {
        assert_eq!(
            SubscribeType::new(1).known(),
            Some(KnownSubscribeType::Subscribed)
        );
        assert!(SubscribeType::new(1).is_active());
        assert!(!SubscribeType::new(2).is_active());
        assert_eq!(SubscribeType::new(99).known(), None);
        assert_eq!(SubscribeType::new(99).as_i32(), 99);
    }

    #[test]
    fn campaign_status_known_mapping() {
        assert_eq!(
            CampaignStatus::new(3).known(),
            Some(KnownCampaignStatus::Sent)
        );
        assert!(CampaignStatus::new(3).is_final());
        assert!(!CampaignStatus::new(0).is_final());
        assert_eq!(CampaignStatus::new(77).known(), None);
    }

    #[test]
    fn subscriber_filter_path_segments() {
        assert_eq!(SubscriberFilter::Subscribed.as_str(), "Subscribed");
        assert_eq!(SubscriberFilter::Removed.as_str(), "Removed");
    }
}
