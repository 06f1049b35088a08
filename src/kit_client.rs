use std::time::Duration;

use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::{config::KitCredentials, web::data::ValidSubscription};

#[derive(Debug)]
pub struct KitClient {
    pub http_client: Client,
    pub url: reqwest::Url,
}

/// Kit's verdict on a subscribe call: the raw status and the parsed JSON payload.
/// Interpreting the verdict is left to the caller.
#[derive(Debug)]
pub struct KitReply {
    pub status: StatusCode,
    pub body: Value,
}

impl KitClient {
    pub fn new<S: AsRef<str>>(url: S, timeout: Duration) -> Result<Self> {
        let url =
            reqwest::Url::parse(url.as_ref()).map_err(|e| Error::UrlParsing(e.to_string()))?;

        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(KitClient { http_client, url })
    }

    /// Posts a subscription to the form selected by `credentials` and returns
    /// Kit's raw reply. Transport failures and unparseable reply bodies are
    /// errors; a reply with an HTTP error status is not.
    pub async fn subscribe(
        &self,
        credentials: &KitCredentials,
        subscription: &ValidSubscription,
    ) -> Result<KitReply> {
        let url = self
            .url
            .join(&format!("v3/forms/{}/subscribe", credentials.form_id))
            .map_err(|e| Error::UrlParsing(e.to_string()))?;

        let form_subscription = FormSubscription {
            api_key: credentials.api_key.expose_secret(),
            email: &subscription.email,
            first_name: subscription.first_name.as_deref(),
        };

        let resp = self
            .http_client
            .post(url)
            .json(&form_subscription)
            .send()
            .await?;

        let status = resp.status();
        let body: Value = resp.json().await?;

        info!("{:<12} - Kit replied with status: {status}", "kit_client");
        debug!("{:<12} - Kit reply body: {body}", "kit_client");

        Ok(KitReply { status, body })
    }
}

#[derive(Serialize)]
struct FormSubscription<'a> {
    api_key: &'a str,
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_name: Option<&'a str>,
}

// ###################################
// ->   ERROR & RESULT
// ###################################
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("url parsing error: {0}")]
    UrlParsing(String),
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
}
