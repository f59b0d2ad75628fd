//! HTTP access to the contacts API.

use contacts_types::{Contact, ErrorBody, NewContact};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ClientError;

/// Default API location, matching the server's default bind port.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Thin `reqwest` wrapper over `GET`/`POST /api/contacts`.
///
/// No retries and no request timeout: each call is a single attempt and
/// its failure is reported to the caller as-is.
#[derive(Debug, Clone)]
pub struct ContactsApi {
    base_url: String,
    client: Client,
}

impl ContactsApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = Client::builder()
            .user_agent(concat!("contacts-client/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn contacts_url(&self) -> String {
        format!("{}/api/contacts", self.base_url)
    }

    /// All contacts, newest first.
    pub async fn list(&self) -> Result<Vec<Contact>, ClientError> {
        let url = self.contacts_url();
        debug!(%url, "listing contacts");
        let resp = self.client.get(&url).send().await?;
        decode(resp).await
    }

    /// Submit a candidate contact; returns the stored record.
    pub async fn create(&self, contact: &NewContact) -> Result<Contact, ClientError> {
        let url = self.contacts_url();
        debug!(%url, "creating contact");
        let resp = self.client.post(&url).json(contact).send().await?;
        decode(resp).await
    }
}

async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp.json::<T>().await?);
    }
    let message = resp.json::<ErrorBody>().await.ok().map(|b| b.error);
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}
