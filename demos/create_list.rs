use std::io;

use moosend::domain::MailingListRequest;
use moosend::{ApiKey, SendClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_key = std::env::var("MOOSEND_API_KEY").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "MOOSEND_API_KEY environment variable is required",
        )
    })?;
    let name =
        std::env::var("MOOSEND_LIST_NAME").unwrap_or_else(|_| "Newsletter".to_owned());

    let client = SendClient::new(ApiKey::new(api_key)?);
    let envelope = client.lists().create(&MailingListRequest::named(name)).await?;

    match envelope.data {
        Some(id) => println!("created mailing list {id}"),
        None => println!("rejected: {:?}", envelope.error),
    }

    Ok(())
}
