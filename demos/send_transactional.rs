use std::io;

use moosend::domain::TransactionalMessage;
use moosend::{ApiKey, EmailAddress, SendClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_key = std::env::var("MOOSEND_API_KEY").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "MOOSEND_API_KEY environment variable is required",
        )
    })?;
    let campaign_id = std::env::var("MOOSEND_CAMPAIGN_ID").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "MOOSEND_CAMPAIGN_ID environment variable is required",
        )
    })?;
    let email = std::env::var("MOOSEND_EMAIL").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "MOOSEND_EMAIL environment variable is required",
        )
    })?;

    let client = SendClient::new(ApiKey::new(api_key)?);
    let mut message =
        TransactionalMessage::new(campaign_id.parse()?, EmailAddress::new(email)?);
    message
        .merge_fields
        .insert("first_name".to_owned(), "there".to_owned());

    let envelope = client.transactional().send(&message).await?;
    if envelope.is_success() {
        println!("message queued");
    } else {
        println!("rejected: {:?}", envelope.error);
    }

    Ok(())
}
