use std::sync::Arc;

use uuid::Uuid;

use crate::client::{Connection, SendError};
use crate::domain::{
    EmailAddress, Envelope, Subscriber, SubscriberFilter, SubscriberRequest, SubscribersPage,
};
use crate::transport;

#[derive(Clone)]
/// Subscriber operations, scoped under a mailing list.
pub struct SubscribersService {
    connection: Arc<Connection>,
}

impl SubscribersService {
    pub(crate) fn new(connection: Arc<Connection>) -> Self {
        Self { connection }
    }

    /// List members of a mailing list in one subscription state.
    ///
    /// The remote paging block is passed through verbatim; walking pages is
    /// left to the caller.
    pub async fn get_all(
        &self,
        list_id: Uuid,
        filter: SubscriberFilter,
    ) -> Result<Envelope<SubscribersPage>, SendError> {
        let response = self
            .connection
            .get(&format!("lists/{list_id}/subscribers/{}", filter.as_str()), &[])
            .await?;
        transport::decode_subscribers_page_envelope(&response).map_err(SendError::parse)
    }

    /// Look up one member by email address.
    pub async fn get_by_email(
        &self,
        list_id: Uuid,
        email: &EmailAddress,
    ) -> Result<Envelope<Subscriber>, SendError> {
        let query = [(EmailAddress::FIELD, email.as_str().to_owned())];
        let response = self
            .connection
            .get(&format!("lists/{list_id}/subscribers/view"), &query)
            .await?;
        transport::decode_subscriber_envelope(&response).map_err(SendError::parse)
    }

    /// Add a member to a mailing list and return the stored record.
    ///
    /// Re-subscribing an existing address is a domain error
    /// ([`crate::domain::KnownError::MemberAlreadyExists`]), not a fault.
    pub async fn subscribe(
        &self,
        list_id: Uuid,
        request: &SubscriberRequest,
    ) -> Result<Envelope<Subscriber>, SendError> {
        let body = transport::encode_subscriber_request(request);
        let response = self
            .connection
            .post(&format!("subscribers/{list_id}/subscribe"), body)
            .await?;
        transport::decode_subscriber_envelope(&response).map_err(SendError::parse)
    }

    /// Add several members in one call.
    pub async fn subscribe_many(
        &self,
        list_id: Uuid,
        requests: &[SubscriberRequest],
    ) -> Result<Envelope<Vec<Subscriber>>, SendError> {
        let body = transport::encode_subscribers_request(requests);
        let response = self
            .connection
            .post(&format!("subscribers/{list_id}/subscribe_many"), body)
            .await?;
        transport::decode_subscribers_envelope(&response).map_err(SendError::parse)
    }

    /// Update a member keyed by its identifier.
    pub async fn update(
        &self,
        list_id: Uuid,
        subscriber_id: Uuid,
        request: &SubscriberRequest,
    ) -> Result<Envelope<Subscriber>, SendError> {
        let body = transport::encode_subscriber_request(request);
        let response = self
            .connection
            .post(&format!("subscribers/{list_id}/update/{subscriber_id}"), body)
            .await?;
        transport::decode_subscriber_envelope(&response).map_err(SendError::parse)
    }

    /// Mark a member as unsubscribed; the record is kept for suppression.
    pub async fn unsubscribe(
        &self,
        list_id: Uuid,
        email: &EmailAddress,
    ) -> Result<Envelope<()>, SendError> {
        let body = transport::encode_email_request(email);
        let response = self
            .connection
            .post(&format!("subscribers/{list_id}/unsubscribe"), body)
            .await?;
        transport::decode_unit_envelope(&response).map_err(SendError::parse)
    }

    /// Remove a member entirely from a mailing list.
    pub async fn remove(
        &self,
        list_id: Uuid,
        email: &EmailAddress,
    ) -> Result<Envelope<()>, SendError> {
        let body = transport::encode_email_request(email);
        let response = self
            .connection
            .post(&format!("subscribers/{list_id}/remove"), body)
            .await?;
        transport::decode_unit_envelope(&response).map_err(SendError::parse)
    }

    /// Remove several members in one call.
    pub async fn remove_many(
        &self,
        list_id: Uuid,
        emails: &[EmailAddress],
    ) -> Result<Envelope<()>, SendError> {
        let body = transport::encode_emails_request(emails);
        let response = self
            .connection
            .post(&format!("subscribers/{list_id}/remove_bulk"), body)
            .await?;
        transport::decode_unit_envelope(&response).map_err(SendError::parse)
    }
}
