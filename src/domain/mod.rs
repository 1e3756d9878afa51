//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{
    CampaignListTarget, CampaignRequest, CustomFieldDefinitionRequest, MailingListPreferencesRequest,
    MailingListRequest, SegmentCriterionRequest, SegmentRequest, SubscriberRequest,
    TransactionalMessage,
};
pub use response::{
    Campaign, CampaignsPage, CustomFieldDefinition, Envelope, MailingList, MailingListPreferences,
    Paging, Segment, SegmentCriterion, Subscriber, SubscriberCustomField, SubscribersPage,
};
pub use validation::ValidationError;
pub use value::{
    ApiKey, CampaignStatus, CustomFieldType, EmailAddress, KnownCampaignStatus, KnownError,
    KnownSubscribeType, PreferenceSelectType, SegmentMatchType, SubscribeType, SubscriberFilter,
};
