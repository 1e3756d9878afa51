use std::sync::Arc;

use uuid::Uuid;

use crate::client::{Connection, SendError};
use crate::domain::{Campaign, CampaignRequest, CampaignsPage, EmailAddress, Envelope};
use crate::transport;

#[derive(Clone)]
/// Campaign operations, including the actual send.
pub struct CampaignsService {
    connection: Arc<Connection>,
}

impl CampaignsService {
    pub(crate) fn new(connection: Arc<Connection>) -> Self {
        Self { connection }
    }

    /// List campaigns visible to the current API key, newest first.
    pub async fn get_all(&self) -> Result<Envelope<CampaignsPage>, SendError> {
        let response = self.connection.get("campaigns", &[]).await?;
        transport::decode_campaigns_page_envelope(&response).map_err(SendError::parse)
    }

    /// Fetch one campaign.
    pub async fn get(&self, id: Uuid) -> Result<Envelope<Campaign>, SendError> {
        let response = self
            .connection
            .get(&format!("campaigns/{id}/view"), &[])
            .await?;
        transport::decode_campaign_envelope(&response).map_err(SendError::parse)
    }

    /// Create a draft campaign and return its generated identifier.
    pub async fn create(&self, request: &CampaignRequest) -> Result<Envelope<Uuid>, SendError> {
        let body = transport::encode_campaign_request(request);
        let response = self.connection.post("campaigns/create", body).await?;
        transport::decode_id_envelope(&response).map_err(SendError::parse)
    }

    /// Update a draft campaign; the identifier is echoed back on success.
    ///
    /// Updating a campaign that already went out is a domain error
    /// ([`crate::domain::KnownError::CampaignAlreadySent`]).
    pub async fn update(
        &self,
        id: Uuid,
        request: &CampaignRequest,
    ) -> Result<Envelope<Uuid>, SendError> {
        let body = transport::encode_campaign_request(request);
        let response = self
            .connection
            .post(&format!("campaigns/{id}/update"), body)
            .await?;
        transport::decode_id_envelope(&response).map_err(SendError::parse)
    }

    /// Delete a campaign.
    pub async fn delete(&self, id: Uuid) -> Result<Envelope<()>, SendError> {
        let response = self
            .connection
            .delete(&format!("campaigns/{id}/delete"))
            .await?;
        transport::decode_unit_envelope(&response).map_err(SendError::parse)
    }

    /// Queue a campaign for delivery to its target lists.
    pub async fn send(&self, id: Uuid) -> Result<Envelope<()>, SendError> {
        let response = self
            .connection
            .post(&format!("campaigns/{id}/send"), serde_json::json!({}))
            .await?;
        transport::decode_unit_envelope(&response).map_err(SendError::parse)
    }

    /// Send a test rendering of the campaign to the given addresses.
    pub async fn send_test(
        &self,
        id: Uuid,
        emails: &[EmailAddress],
    ) -> Result<Envelope<()>, SendError> {
        let body = transport::encode_send_test_request(emails);
        let response = self
            .connection
            .post(&format!("campaigns/{id}/send_test"), body)
            .await?;
        transport::decode_unit_envelope(&response).map_err(SendError::parse)
    }
}
