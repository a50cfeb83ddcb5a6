//! Profile source: fetches a scraped LinkedIn profile record.
//!
//! The production backend runs an Apify actor synchronously and takes the
//! first dataset item. Anything other than a non-empty JSON object counts as
//! "not found".

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::session::ProfileData;

const APIFY_API_URL: &str = "https://api.apify.com/v2";
pub const DEFAULT_ACTOR_ID: &str = "PEgClm7RgRD7YO94b";
/// Actor runs include deliberate 15–60s delays between page loads.
const REQUEST_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Apify error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("APIFY_API_TOKEN is not configured")]
    NotConfigured,
}

#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// `Ok(None)` when the URL yields no usable profile.
    async fn fetch(&self, profile_url: &str) -> Result<Option<ProfileData>, ScrapeError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ActorInput<'a> {
    urls: [&'a str; 1],
    find_contacts: bool,
    scrape_company: bool,
    min_delay: u32,
    max_delay: u32,
    proxy: ProxyInput,
    #[serde(skip_serializing_if = "Option::is_none")]
    cookie: Option<&'a Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProxyInput {
    use_apify_proxy: bool,
    apify_proxy_country: &'static str,
}

impl<'a> ActorInput<'a> {
    fn new(profile_url: &'a str, cookie: Option<&'a Value>) -> Self {
        Self {
            urls: [profile_url],
            find_contacts: false,
            scrape_company: false,
            min_delay: 15,
            max_delay: 60,
            proxy: ProxyInput {
                use_apify_proxy: true,
                apify_proxy_country: "US",
            },
            cookie,
        }
    }
}

/// Apify-backed profile scraper.
#[derive(Clone)]
pub struct ApifyProfileSource {
    client: Client,
    token: Option<String>,
    actor_id: String,
    cookies: Option<Value>,
}

impl ApifyProfileSource {
    pub fn new(
        token: Option<String>,
        actor_id: String,
        cookies: Option<Value>,
    ) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            token,
            actor_id,
            cookies,
        })
    }
}

#[async_trait]
impl ProfileSource for ApifyProfileSource {
    async fn fetch(&self, profile_url: &str) -> Result<Option<ProfileData>, ScrapeError> {
        let token = self.token.as_deref().ok_or(ScrapeError::NotConfigured)?;
        let url = format!(
            "{APIFY_API_URL}/acts/{}/run-sync-get-dataset-items",
            self.actor_id
        );

        info!("Scraping profile {profile_url}");
        let response = self
            .client
            .post(url)
            .query(&[("token", token)])
            .json(&ActorInput::new(profile_url, self.cookies.as_ref()))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ScrapeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let items: Vec<Value> = response.json().await?;
        let profile = first_profile(items);
        if profile.is_none() {
            warn!("Scraper returned no usable profile for {profile_url}");
        }
        Ok(profile)
    }
}

/// First dataset item, if it is a non-empty object.
fn first_profile(items: Vec<Value>) -> Option<ProfileData> {
    match items.into_iter().next()? {
        Value::Object(map) if !map.is_empty() => Some(map),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_actor_input_shape() {
        let input = ActorInput::new("https://www.linkedin.com/in/jane", None);
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value["urls"], json!(["https://www.linkedin.com/in/jane"]));
        assert_eq!(value["findContacts"], false);
        assert_eq!(value["scrapeCompany"], false);
        assert_eq!(value["minDelay"], 15);
        assert_eq!(value["maxDelay"], 60);
        assert_eq!(value["proxy"]["useApifyProxy"], true);
        assert_eq!(value["proxy"]["apifyProxyCountry"], "US");
        assert!(value.get("cookie").is_none());
    }

    #[test]
    fn test_actor_input_passes_cookies_through() {
        let cookies = json!([{"name": "li_at", "value": "abc"}]);
        let input = ActorInput::new("u", Some(&cookies));
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value["cookie"][0]["name"], "li_at");
    }

    #[test]
    fn test_first_profile_takes_first_object() {
        let items = vec![json!({"fullName": "Jane"}), json!({"fullName": "John"})];
        assert_eq!(first_profile(items).unwrap()["fullName"], "Jane");
    }

    #[test]
    fn test_empty_or_malformed_dataset_is_not_found() {
        assert!(first_profile(vec![]).is_none());
        assert!(first_profile(vec![json!({})]).is_none());
        assert!(first_profile(vec![json!("error page")]).is_none());
    }

    #[tokio::test]
    async fn test_missing_token_fails_before_network() {
        let source = ApifyProfileSource::new(None, DEFAULT_ACTOR_ID.to_string(), None).unwrap();
        let err = source.fetch("https://www.linkedin.com/in/jane").await.unwrap_err();
        assert!(matches!(err, ScrapeError::NotConfigured));
    }
}
