use std::sync::Arc;

use crate::client::{Connection, SendError};
use crate::domain::{Envelope, TransactionalMessage};
use crate::transport;

#[derive(Clone)]
/// One-off sends based on a transactional campaign template.
pub struct TransactionalService {
    connection: Arc<Connection>,
}

impl TransactionalService {
    pub(crate) fn new(connection: Arc<Connection>) -> Self {
        Self { connection }
    }

    /// Send one message to one recipient.
    ///
    /// A missing template campaign is a domain error
    /// ([`crate::domain::KnownError::CampaignNotFound`]), not a fault.
    pub async fn send(&self, message: &TransactionalMessage) -> Result<Envelope<()>, SendError> {
        let body = transport::encode_transactional_request(message);
        let response = self.connection.post("transactional/send", body).await?;
        transport::decode_unit_envelope(&response).map_err(SendError::parse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::HttpMethod;
    use crate::client::test_support::{FakeTransport, make_client};
    use crate::domain::{EmailAddress, KnownError};

    #[tokio::test]
    async fn send_posts_message_body() {
        let transport = FakeTransport::new(200, r#"{"Code":0,"Error":null,"Context":null}"#);
        let client = make_client("test_key", transport.clone());

        let mut message = TransactionalMessage::new(
            "9c4c91f6-2a4c-4df1-8a34-3f8d2b7ad2ae".parse().unwrap(),
            EmailAddress::new("user@example.com").unwrap(),
        );
        message
            .merge_fields
            .insert("order_id".to_owned(), "A-1001".to_owned());

        let envelope = client.transactional().send(&message).await.unwrap();
        assert!(envelope.is_success());

        let (method, url, body) = transport.last_request();
        assert_eq!(method, Some(HttpMethod::Post));
        assert!(url.unwrap().ends_with("/transactional/send.json?apikey=test_key"));
        let body = body.unwrap();
        assert_eq!(body["Email"], "user@example.com");
        assert_eq!(body["MergeFields"]["order_id"], "A-1001");
    }

    #[tokio::test]
    async fn missing_template_is_a_domain_error() {
        let body = r#"{"Code":404,"Error":"CAMPAIGN_NOT_FOUND","Context":null}"#;
        let transport = FakeTransport::new(200, body);
        let client = make_client("test_key", transport);

        let message = TransactionalMessage::new(
            "9c4c91f6-2a4c-4df1-8a34-3f8d2b7ad2ae".parse().unwrap(),
            EmailAddress::new("user@example.com").unwrap(),
        );
        let envelope = client.transactional().send(&message).await.unwrap();
        assert!(!envelope.is_success());
        assert_eq!(envelope.error, Some(KnownError::CampaignNotFound));
    }
}
