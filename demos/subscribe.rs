use std::io;

use moosend::domain::SubscriberRequest;
use moosend::{ApiKey, EmailAddress, SendClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_key = std::env::var("MOOSEND_API_KEY").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "MOOSEND_API_KEY environment variable is required",
        )
    })?;
    let list_id = std::env::var("MOOSEND_LIST_ID").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "MOOSEND_LIST_ID environment variable is required",
        )
    })?;
    let email = std::env::var("MOOSEND_EMAIL").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "MOOSEND_EMAIL environment variable is required",
        )
    })?;

    let client = SendClient::new(ApiKey::new(api_key)?);
    let request = SubscriberRequest::new(EmailAddress::new(email)?);
    let envelope = client
        .subscribers()
        .subscribe(list_id.parse()?, &request)
        .await?;

    match envelope.data {
        Some(subscriber) => println!("subscribed {} as {}", subscriber.email, subscriber.id),
        None => println!("rejected: {:?}", envelope.error),
    }

    Ok(())
}
