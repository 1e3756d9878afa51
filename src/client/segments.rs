use std::sync::Arc;

use uuid::Uuid;

use crate::client::{Connection, SendError};
use crate::domain::{Envelope, Segment, SegmentCriterionRequest, SegmentRequest};
use crate::transport;

#[derive(Clone)]
/// Segment operations, scoped under a mailing list.
///
/// Segment identifiers are integers on the remote side, not GUIDs.
pub struct SegmentsService {
    connection: Arc<Connection>,
}

impl SegmentsService {
    pub(crate) fn new(connection: Arc<Connection>) -> Self {
        Self { connection }
    }

    /// List all segments of a mailing list.
    pub async fn get_all(&self, list_id: Uuid) -> Result<Envelope<Vec<Segment>>, SendError> {
        let response = self
            .connection
            .get(&format!("lists/{list_id}/segments"), &[])
            .await?;
        transport::decode_segments_envelope(&response).map_err(SendError::parse)
    }

    /// Fetch one segment, criteria included.
    pub async fn get(&self, list_id: Uuid, segment_id: i64) -> Result<Envelope<Segment>, SendError> {
        let response = self
            .connection
            .get(&format!("lists/{list_id}/segments/{segment_id}/details"), &[])
            .await?;
        transport::decode_segment_envelope(&response).map_err(SendError::parse)
    }

    /// Create a segment and return its generated identifier.
    pub async fn create(
        &self,
        list_id: Uuid,
        request: &SegmentRequest,
    ) -> Result<Envelope<i64>, SendError> {
        let body = transport::encode_segment_request(request);
        let response = self
            .connection
            .post(&format!("lists/{list_id}/segments/create"), body)
            .await?;
        transport::decode_int_id_envelope(&response).map_err(SendError::parse)
    }

    /// Update a segment's name or match type.
    pub async fn update(
        &self,
        list_id: Uuid,
        segment_id: i64,
        request: &SegmentRequest,
    ) -> Result<Envelope<()>, SendError> {
        let body = transport::encode_segment_request(request);
        let response = self
            .connection
            .post(&format!("lists/{list_id}/segments/{segment_id}/update"), body)
            .await?;
        transport::decode_unit_envelope(&response).map_err(SendError::parse)
    }

    /// Delete a segment. A subsequent [`SegmentsService::get`] reports
    /// not-found.
    pub async fn delete(&self, list_id: Uuid, segment_id: i64) -> Result<Envelope<()>, SendError> {
        let response = self
            .connection
            .delete(&format!("lists/{list_id}/segments/{segment_id}/delete"))
            .await?;
        transport::decode_unit_envelope(&response).map_err(SendError::parse)
    }

    /// Add a matching rule to a segment and return the rule's identifier.
    pub async fn add_criterion(
        &self,
        list_id: Uuid,
        segment_id: i64,
        request: &SegmentCriterionRequest,
    ) -> Result<Envelope<i64>, SendError> {
        let body = transport::encode_criterion_request(request);
        let response = self
            .connection
            .post(
                &format!("lists/{list_id}/segments/{segment_id}/criteria/add"),
                body,
            )
            .await?;
        transport::decode_int_id_envelope(&response).map_err(SendError::parse)
    }

    /// Update a matching rule.
    pub async fn update_criterion(
        &self,
        list_id: Uuid,
        segment_id: i64,
        criterion_id: i64,
        request: &SegmentCriterionRequest,
    ) -> Result<Envelope<()>, SendError> {
        let body = transport::encode_criterion_request(request);
        let response = self
            .connection
            .post(
                &format!("lists/{list_id}/segments/{segment_id}/criteria/{criterion_id}/update"),
                body,
            )
            .await?;
        transport::decode_unit_envelope(&response).map_err(SendError::parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::{FakeTransport, make_client};
    use crate::domain::{KnownError, SegmentMatchType};

    #[tokio::test]
    async fn create_returns_integer_id() {
        let transport = FakeTransport::new(200, r#"{"Code":0,"Error":null,"Context":42}"#);
        let client = make_client("test_key", transport.clone());
        let list_id: Uuid = "2f4c91f6-2a4c-4df1-8a34-3f8d2b7ad2ae".parse().unwrap();

        let envelope = client
            .segments()
            .create(list_id, &SegmentRequest::named("Active readers"))
            .await
            .unwrap();
        assert_eq!(envelope.into_data(), Some(42));

        let (_, url, body) = transport.last_request();
        assert!(url.unwrap().contains("/segments/create.json"));
        assert_eq!(body.unwrap()["MatchType"], SegmentMatchType::All.wire_code());
    }

    #[tokio::test]
    async fn get_reports_not_found_in_envelope() {
        let body = r#"{"Code":404,"Error":"SEGMENT_NOT_FOUND","Context":null}"#;
        let transport = FakeTransport::new(200, body);
        let client = make_client("test_key", transport);
        let list_id: Uuid = "2f4c91f6-2a4c-4df1-8a34-3f8d2b7ad2ae".parse().unwrap();

        let envelope = client.segments().get(list_id, 42).await.unwrap();
        assert!(!envelope.is_success());
        assert_eq!(envelope.error, Some(KnownError::SegmentNotFound));
    }

    #[tokio::test]
    async fn add_criterion_targets_nested_path() {
        let transport = FakeTransport::new(200, r#"{"Code":0,"Error":null,"Context":7}"#);
        let client = make_client("test_key", transport.clone());
        let list_id: Uuid = "2f4c91f6-2a4c-4df1-8a34-3f8d2b7ad2ae".parse().unwrap();

        let request = SegmentCriterionRequest {
            field: "DateAdded".to_owned(),
            comparer: "IsAfter".to_owned(),
            value: Some("2021-01-01".to_owned()),
        };
        let envelope = client
            .segments()
            .add_criterion(list_id, 42, &request)
            .await
            .unwrap();
        assert_eq!(envelope.into_data(), Some(7));

        let (_, url, body) = transport.last_request();
        assert!(url.unwrap().contains("/segments/42/criteria/add.json"));
        assert_eq!(body.unwrap()["Field"], "DateAdded");
    }
}
