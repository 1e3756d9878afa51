use serde_json::{Value, json};

use crate::domain::TransactionalMessage;

pub(crate) fn encode_transactional_request(message: &TransactionalMessage) -> Value {
    json!({
        "CampaignID": message.campaign_id,
        "Email": message.to.as_str(),
        "MergeFields": message.merge_fields,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EmailAddress;

    #[test]
    fn encode_transactional_request_maps_fields() {
        let campaign_id = "9c4c91f6-2a4c-4df1-8a34-3f8d2b7ad2ae".parse().unwrap();
        let mut message = TransactionalMessage::new(
            campaign_id,
            EmailAddress::new("user@example.com").unwrap(),
        );
        message
            .merge_fields
            .insert("first_name".to_owned(), "Ada".to_owned());

        let body = encode_transactional_request(&message);
        assert_eq!(body["CampaignID"], campaign_id.to_string());
        assert_eq!(body["Email"], "user@example.com");
        assert_eq!(body["MergeFields"]["first_name"], "Ada");
    }
}
