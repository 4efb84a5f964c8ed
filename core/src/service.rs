//! Plumbing shared by the clients of the Translator Text API (v3).
//!
//! API reference:
//! <https://learn.microsoft.com/en-us/azure/ai-services/translator/text-translation/reference/rest-api-guide>

use reqwest::Client;
use reqwest::RequestBuilder;
use reqwest::Response;

use crate::config::ServiceSettings;
use crate::credentials::Credentials;
use crate::error::Result;

pub(crate) const API_VERSION: &str = "3.0";

pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
pub const SUBSCRIPTION_REGION_HEADER: &str = "Ocp-Apim-Subscription-Region";

/// Build the HTTP client shared by every outbound call.
pub fn build_http_client(settings: &ServiceSettings) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(timeout) = settings.effective_timeout() {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// Join the configured endpoint and a route with exactly one `/`.
pub(crate) fn service_url(endpoint: &str, route: &str) -> String {
    format!("{}/{route}", endpoint.trim_end_matches('/'))
}

/// Attach the subscription headers every call needs.
pub(crate) fn with_subscription(
    request: RequestBuilder,
    credentials: &Credentials,
    region: &str,
) -> RequestBuilder {
    request
        .header(SUBSCRIPTION_KEY_HEADER, credentials.api_key())
        .header(SUBSCRIPTION_REGION_HEADER, region)
}

/// Read the body as text. The status is logged but not enforced: error bodies
/// fall through to response parsing.
pub(crate) async fn read_body(response: Response, context: &str) -> Result<String> {
    let status = response.status();
    if !status.is_success() {
        tracing::warn!("Translator {context} request returned {status}");
    }
    Ok(response.text().await?)
}
