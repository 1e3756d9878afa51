use std::io;

use moosend::{ApiKey, SendClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_key = std::env::var("MOOSEND_API_KEY").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "MOOSEND_API_KEY environment variable is required",
        )
    })?;

    let client = SendClient::new(ApiKey::new(api_key)?);
    let envelope = client.lists().get_all().await?;

    match envelope.into_data() {
        Some(lists) => {
            for list in lists {
                let members = list.active_member_count.unwrap_or(0);
                println!("{}  {}  ({members} active members)", list.id, list.name);
            }
        }
        None => println!("no mailing lists"),
    }

    Ok(())
}
