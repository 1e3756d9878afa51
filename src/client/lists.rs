use std::sync::Arc;

use uuid::Uuid;

use crate::client::{Connection, SendError};
use crate::domain::{
    CustomFieldDefinitionRequest, Envelope, MailingList, MailingListRequest,
};
use crate::transport;

#[derive(Clone)]
/// Mailing-list operations, including custom-field management.
///
/// State lives entirely on the remote side; this service only carries the
/// shared connection.
pub struct ListsService {
    connection: Arc<Connection>,
}

impl ListsService {
    pub(crate) fn new(connection: Arc<Connection>) -> Self {
        Self { connection }
    }

    /// Create a mailing list and return its generated identifier.
    pub async fn create(
        &self,
        request: &MailingListRequest,
    ) -> Result<Envelope<Uuid>, SendError> {
        let body = transport::encode_mailing_list_request(request);
        let response = self.connection.post("lists/create", body).await?;
        transport::decode_id_envelope(&response).map_err(SendError::parse)
    }

    /// Fetch one mailing list, custom-field definitions included.
    ///
    /// A deleted or unknown id is not a fault: the envelope carries
    /// [`crate::domain::KnownError::ListNotFound`] and no payload.
    pub async fn get(&self, id: Uuid) -> Result<Envelope<MailingList>, SendError> {
        let response = self
            .connection
            .get(&format!("lists/{id}/details"), &[])
            .await?;
        transport::decode_mailing_list_envelope(&response).map_err(SendError::parse)
    }

    /// Update a mailing list; the identifier is echoed back on success.
    pub async fn update(
        &self,
        id: Uuid,
        request: &MailingListRequest,
    ) -> Result<Envelope<Uuid>, SendError> {
        let body = transport::encode_mailing_list_request(request);
        let response = self
            .connection
            .post(&format!("lists/{id}/update"), body)
            .await?;
        transport::decode_id_envelope(&response).map_err(SendError::parse)
    }

    /// Delete a mailing list. A subsequent [`ListsService::get`] reports
    /// not-found.
    pub async fn delete(&self, id: Uuid) -> Result<Envelope<()>, SendError> {
        let response = self
            .connection
            .delete(&format!("lists/{id}/delete"))
            .await?;
        transport::decode_unit_envelope(&response).map_err(SendError::parse)
    }

    /// List all mailing lists visible to the current API key.
    pub async fn get_all(&self) -> Result<Envelope<Vec<MailingList>>, SendError> {
        let response = self.connection.get("lists", &[]).await?;
        transport::decode_mailing_lists_envelope(&response).map_err(SendError::parse)
    }

    /// Add a custom-field definition to a mailing list.
    pub async fn create_custom_field(
        &self,
        list_id: Uuid,
        request: &CustomFieldDefinitionRequest,
    ) -> Result<Envelope<Uuid>, SendError> {
        let body = transport::encode_custom_field_request(request);
        let response = self
            .connection
            .post(&format!("lists/{list_id}/customfields/create"), body)
            .await?;
        transport::decode_id_envelope(&response).map_err(SendError::parse)
    }

    /// Update a custom-field definition.
    pub async fn update_custom_field(
        &self,
        list_id: Uuid,
        field_id: Uuid,
        request: &CustomFieldDefinitionRequest,
    ) -> Result<Envelope<()>, SendError> {
        let body = transport::encode_custom_field_request(request);
        let response = self
            .connection
            .post(
                &format!("lists/{list_id}/customfields/{field_id}/update"),
                body,
            )
            .await?;
        transport::decode_unit_envelope(&response).map_err(SendError::parse)
    }

    /// Remove a custom-field definition from a mailing list.
    pub async fn remove_custom_field(
        &self,
        list_id: Uuid,
        field_id: Uuid,
    ) -> Result<Envelope<()>, SendError> {
        let response = self
            .connection
            .delete(&format!("lists/{list_id}/customfields/{field_id}/delete"))
            .await?;
        transport::decode_unit_envelope(&response).map_err(SendError::parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::HttpMethod;
    use crate::client::test_support::{FakeTransport, make_client};
    use crate::domain::CustomFieldType;

    #[tokio::test]
    async fn get_targets_details_path() {
        let body = r#"
        {"Code":0,"Error":null,"Context":{"ID":"2f4c91f6-2a4c-4df1-8a34-3f8d2b7ad2ae","Name":"Test Name"}}
        "#;
        let transport = FakeTransport::new(200, body);
        let client = make_client("test_key", transport.clone());
        let id: Uuid = "2f4c91f6-2a4c-4df1-8a34-3f8d2b7ad2ae".parse().unwrap();

        let envelope = client.lists().get(id).await.unwrap();
        assert_eq!(envelope.into_data().unwrap().name, "Test Name");

        let (method, url, _) = transport.last_request();
        assert_eq!(method, Some(HttpMethod::Get));
        assert_eq!(
            url.as_deref(),
            Some(
                "https://example.invalid/v3/lists/2f4c91f6-2a4c-4df1-8a34-3f8d2b7ad2ae/details.json?apikey=test_key"
            )
        );
    }

    #[tokio::test]
    async fn delete_uses_http_delete() {
        let transport = FakeTransport::new(200, r#"{"Code":0,"Error":null,"Context":null}"#);
        let client = make_client("test_key", transport.clone());
        let id: Uuid = "2f4c91f6-2a4c-4df1-8a34-3f8d2b7ad2ae".parse().unwrap();

        let envelope = client.lists().delete(id).await.unwrap();
        assert!(envelope.is_success());

        let (method, url, body) = transport.last_request();
        assert_eq!(method, Some(HttpMethod::Delete));
        assert!(url.unwrap().ends_with("/delete.json?apikey=test_key"));
        assert!(body.is_none());
    }

    #[tokio::test]
    async fn create_custom_field_encodes_type_and_options() {
        let transport = FakeTransport::new(
            200,
            r#"{"Code":0,"Error":null,"Context":"5a4c91f6-2a4c-4df1-8a34-3f8d2b7ad2a1"}"#,
        );
        let client = make_client("test_key", transport.clone());
        let list_id: Uuid = "2f4c91f6-2a4c-4df1-8a34-3f8d2b7ad2ae".parse().unwrap();

        let request = CustomFieldDefinitionRequest::single_select_dropdown(
            "DropDownField",
            vec!["Option1".to_owned(), "Option2".to_owned()],
        );
        let envelope = client
            .lists()
            .create_custom_field(list_id, &request)
            .await
            .unwrap();
        assert!(envelope.is_success());

        let (_, url, body) = transport.last_request();
        assert!(url.unwrap().contains("/customfields/create.json"));
        let body = body.unwrap();
        assert_eq!(body["Name"], "DropDownField");
        assert_eq!(
            body["CustomFieldType"],
            CustomFieldType::SingleSelectDropdown.wire_code()
        );
        assert_eq!(body["Options"], "Option1,Option2");
    }

    #[tokio::test]
    async fn remove_custom_field_targets_nested_path() {
        let transport = FakeTransport::new(200, r#"{"Code":0,"Error":null,"Context":null}"#);
        let client = make_client("test_key", transport.clone());
        let list_id: Uuid = "2f4c91f6-2a4c-4df1-8a34-3f8d2b7ad2ae".parse().unwrap();
        let field_id: Uuid = "5a4c91f6-2a4c-4df1-8a34-3f8d2b7ad2a1".parse().unwrap();

        client
            .lists()
            .remove_custom_field(list_id, field_id)
            .await
            .unwrap();

        let (method, url, _) = transport.last_request();
        assert_eq!(method, Some(HttpMethod::Delete));
        assert!(url.unwrap().contains(
            "/lists/2f4c91f6-2a4c-4df1-8a34-3f8d2b7ad2ae/customfields/5a4c91f6-2a4c-4df1-8a34-3f8d2b7ad2a1/delete.json"
        ));
    }
}
