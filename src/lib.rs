//! Typed async client for the Sitecore Send (Moosend) v3 REST API.
//!
//! The API wraps every response in a `{Code, Error, Context}` envelope and
//! reports expected domain failures (a missing list, a duplicate field name)
//! inside that envelope rather than through HTTP status codes. This crate
//! mirrors that split: every operation returns
//! `Result<Envelope<T>, SendError>`, where [`SendError`] covers faults
//! (transport, authentication, unparseable bodies) and
//! [`domain::Envelope`] carries the domain outcome.
//!
//! ```rust,no_run
//! use moosend::{ApiKey, SendClient};
//!
//! # async fn run() -> Result<(), moosend::SendError> {
//! let client = SendClient::new(ApiKey::new("your-api-key")?);
//!
//! let envelope = client.lists().get_all().await?;
//! for list in envelope.into_data().unwrap_or_default() {
//!     let members = list.active_member_count.unwrap_or(0);
//!     println!("{} ({members} active members)", list.name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! An account with several sub-accounts can derive a client per tenant while
//! sharing one HTTP connection pool:
//!
//! ```rust,no_run
//! # use moosend::{ApiKey, SendClient};
//! # fn run(client: &SendClient) -> Result<(), moosend::SendError> {
//! let tenant = client.with_api_key(ApiKey::new("tenant-key")?);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    CampaignsService, ListsService, SegmentsService, SendClient, SendClientBuilder, SendError,
    SubscribersService, TransactionalService,
};
pub use domain::{ApiKey, EmailAddress, Envelope, KnownError, ValidationError};
