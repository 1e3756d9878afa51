//! Transport layer: wire-format details of the send API (serialization/deserialization).

mod campaigns;
mod envelope;
mod lists;
mod paging;
mod segments;
mod subscribers;
mod transactional;

pub(crate) use campaigns::{
    decode_campaign_envelope, decode_campaigns_page_envelope, encode_campaign_request,
    encode_send_test_request,
};
pub(crate) use envelope::{
    decode_id_envelope, decode_int_id_envelope, decode_unit_envelope,
};
pub(crate) use lists::{
    decode_mailing_list_envelope, decode_mailing_lists_envelope, encode_custom_field_request,
    encode_mailing_list_request,
};
pub(crate) use segments::{
    decode_segment_envelope, decode_segments_envelope, encode_criterion_request,
    encode_segment_request,
};
pub(crate) use subscribers::{
    decode_subscriber_envelope, decode_subscribers_envelope, decode_subscribers_page_envelope,
    encode_email_request, encode_emails_request, encode_subscriber_request,
    encode_subscribers_request,
};
pub(crate) use transactional::encode_transactional_request;
