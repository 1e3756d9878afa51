use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Value, json};
use url::Url;
use uuid::Uuid;

use crate::domain::{
    Campaign, CampaignRequest, CampaignStatus, CampaignsPage, EmailAddress, Envelope,
};
use crate::transport::envelope::{
    TransportError, WireEnvelope, deserialize_dotnet_date, envelope_from_wire,
};
use crate::transport::paging::{WirePaging, paging_from_wire};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireCampaign {
    #[serde(rename = "ID")]
    id: Uuid,
    name: String,
    #[serde(default)]
    subject: Option<String>,
    #[serde(default)]
    sender_email: Option<String>,
    #[serde(default)]
    reply_to_email: Option<String>,
    #[serde(default)]
    web_location: Option<Url>,
    #[serde(default)]
    status: i32,
    #[serde(default, deserialize_with = "deserialize_dotnet_date")]
    created_on: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_dotnet_date")]
    delivered_on: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireCampaignsContext {
    paging: WirePaging,
    #[serde(default)]
    campaigns: Vec<WireCampaign>,
}

fn campaign_from_wire(wire: WireCampaign) -> Campaign {
    Campaign {
        id: wire.id,
        name: wire.name,
        subject: wire.subject,
        sender_email: wire.sender_email,
        reply_to_email: wire.reply_to_email,
        web_location: wire.web_location,
        status: CampaignStatus::new(wire.status),
        created_on: wire.created_on,
        delivered_on: wire.delivered_on,
    }
}

pub(crate) fn encode_campaign_request(request: &CampaignRequest) -> Value {
    json!({
        "Name": request.name,
        "Subject": request.subject,
        "SenderEmail": request.sender_email.as_str(),
        "ReplyToEmail": request.reply_to_email.as_ref().map(EmailAddress::as_str),
        "HtmlContent": request.html_content,
        "PlainContent": request.plain_content,
        "WebLocation": request.web_location.as_ref().map(Url::as_str),
        "MailingLists": request
            .mailing_lists
            .iter()
            .map(|target| json!({
                "MailingListID": target.mailing_list_id,
                "SegmentID": target.segment_id,
            }))
            .collect::<Vec<_>>(),
    })
}

pub(crate) fn encode_send_test_request(emails: &[EmailAddress]) -> Value {
    json!({
        "TestEmails": emails.iter().map(EmailAddress::as_str).collect::<Vec<_>>(),
    })
}

pub(crate) fn decode_campaign_envelope(json: &str) -> Result<Envelope<Campaign>, TransportError> {
    let wire: WireEnvelope<WireCampaign> = serde_json::from_str(json)?;
    Ok(envelope_from_wire(wire).map(campaign_from_wire))
}

pub(crate) fn decode_campaigns_page_envelope(
    json: &str,
) -> Result<Envelope<CampaignsPage>, TransportError> {
    let wire: WireEnvelope<WireCampaignsContext> = serde_json::from_str(json)?;
    Ok(envelope_from_wire(wire).map(|context| CampaignsPage {
        paging: paging_from_wire(context.paging),
        campaigns: context.campaigns.into_iter().map(campaign_from_wire).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CampaignListTarget, KnownCampaignStatus, KnownError};

    #[test]
    fn decode_campaign_envelope_maps_payload() {
        let json = r#"
        {
          "Code": 0,
          "Error": null,
          "Context": {
            "ID": "9c4c91f6-2a4c-4df1-8a34-3f8d2b7ad2ae",
            "Name": "March Newsletter",
            "Subject": "News for March",
            "SenderEmail": "news@example.com",
            "Status": 3,
            "CreatedOn": "/Date(1611234567000)/",
            "DeliveredOn": "/Date(1611334567000)/"
          }
        }
        "#;
        let campaign = decode_campaign_envelope(json).unwrap().into_data().unwrap();
        assert_eq!(campaign.name, "March Newsletter");
        assert_eq!(campaign.subject.as_deref(), Some("News for March"));
        assert_eq!(campaign.status.known(), Some(KnownCampaignStatus::Sent));
        assert!(campaign.status.is_final());
        assert!(campaign.delivered_on.is_some());
    }

    #[test]
    fn decode_campaign_envelope_maps_not_found() {
        let json = r#"{"Code":404,"Error":"CAMPAIGN_NOT_FOUND","Context":null}"#;
        let envelope = decode_campaign_envelope(json).unwrap();
        assert_eq!(envelope.error, Some(KnownError::CampaignNotFound));
    }

    #[test]
    fn decode_campaigns_page_envelope_maps_paging_and_order() {
        let json = r#"
        {
          "Code": 0,
          "Error": null,
          "Context": {
            "Paging": {"PageSize": 10, "CurrentPage": 1, "TotalResults": 2, "TotalPageCount": 1},
            "Campaigns": [
              {"ID": "9c4c91f6-2a4c-4df1-8a34-3f8d2b7ad2a1", "Name": "First", "Status": 0},
              {"ID": "9c4c91f6-2a4c-4df1-8a34-3f8d2b7ad2a2", "Name": "Second", "Status": 1}
            ]
          }
        }
        "#;
        let page = decode_campaigns_page_envelope(json).unwrap().into_data().unwrap();
        assert_eq!(page.paging.total_results, 2);
        assert_eq!(page.campaigns[0].name, "First");
        assert_eq!(
            page.campaigns[1].status.known(),
            Some(KnownCampaignStatus::Scheduled)
        );
    }

    #[test]
    fn encode_campaign_request_maps_targets() {
        let list_id: Uuid = "2f4c91f6-2a4c-4df1-8a34-3f8d2b7ad2ae".parse().unwrap();
        let mut request = CampaignRequest::new(
            "March Newsletter",
            "News for March",
            EmailAddress::new("news@example.com").unwrap(),
        );
        request.mailing_lists = vec![
            CampaignListTarget::list(list_id),
            CampaignListTarget::segment(list_id, 42),
        ];

        let body = encode_campaign_request(&request);
        assert_eq!(body["Name"], "March Newsletter");
        assert_eq!(body["SenderEmail"], "news@example.com");
        assert!(body["ReplyToEmail"].is_null());
        assert_eq!(body["MailingLists"][0]["MailingListID"], list_id.to_string());
        assert!(body["MailingLists"][0]["SegmentID"].is_null());
        assert_eq!(body["MailingLists"][1]["SegmentID"], 42);
    }

    #[test]
    fn encode_send_test_request_lists_recipients() {
        let emails = vec![
            EmailAddress::new("a@example.com").unwrap(),
            EmailAddress::new("b@example.com").unwrap(),
        ];
        let body = encode_send_test_request(&emails);
        assert_eq!(body["TestEmails"][0], "a@example.com");
        assert_eq!(body["TestEmails"][1], "b@example.com");
    }
}
