#![allow(clippy::expect_used)]

//! Fixtures for tests that stand a wiremock server in for the translation
//! service.

use std::sync::Arc;

use serde_json::Value;
use serde_json::json;
use translator_core::TranslatorSettings;
use translator_core::service::SUBSCRIPTION_KEY_HEADER;
use translator_core::service::SUBSCRIPTION_REGION_HEADER;
use translator_secrets::ConfigCipher;
use translator_secrets::MasterKey;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::header;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::matchers::query_param;

pub const TEST_MASTER_KEY: &str =
    "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";
pub const TEST_API_KEY: &str = "test-subscription-key";
pub const TEST_REGION: &str = "westeurope";

pub fn test_cipher() -> ConfigCipher {
    let key = MasterKey::from_hex(TEST_MASTER_KEY).expect("valid test master key");
    ConfigCipher::new(&key).expect("cipher from test key")
}

/// Settings pointing at `server`, with the endpoint and subscription key
/// encrypted under [`TEST_MASTER_KEY`] the way an operator would store them.
pub fn settings_for(server: &MockServer) -> TranslatorSettings {
    let cipher = test_cipher();
    let mut settings = TranslatorSettings::default();
    settings.translator.text_api = Some(
        cipher
            .encrypt(&format!("{}/", server.uri()))
            .expect("encrypt endpoint"),
    );
    settings.translator.key_api = Some(cipher.encrypt(TEST_API_KEY).expect("encrypt key"));
    settings.secrets.master_key = Some(TEST_MASTER_KEY.to_string());
    settings
}

pub fn shared_settings_for(server: &MockServer) -> Arc<TranslatorSettings> {
    Arc::new(settings_for(server))
}

/// `languages` response body listing `codes`, each named after its code.
pub fn catalog_body(codes: &[&str]) -> Value {
    let translation: serde_json::Map<String, Value> = codes
        .iter()
        .map(|code| {
            (
                (*code).to_string(),
                json!({ "name": format!("Name of {code}"), "nativeName": *code, "dir": "ltr" }),
            )
        })
        .collect();
    json!({ "translation": translation })
}

/// `translate` response body with one element per input text, each holding
/// the given `(text, to)` pairs.
pub fn translations_body(items: &[&[(&str, &str)]]) -> Value {
    Value::Array(
        items
            .iter()
            .map(|entries| {
                let translations: Vec<Value> = entries
                    .iter()
                    .map(|(text, to)| json!({ "text": text, "to": to }))
                    .collect();
                json!({ "translations": translations })
            })
            .collect(),
    )
}

/// Serve `body` from the `languages` endpoint, only to correctly
/// authenticated catalog requests.
pub async fn mount_catalog(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path("/languages"))
        .and(query_param("api-version", "3.0"))
        .and(query_param("scope", "translation"))
        .and(header(SUBSCRIPTION_KEY_HEADER, TEST_API_KEY))
        .and(header(SUBSCRIPTION_REGION_HEADER, TEST_REGION))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Serve `body` from the `translate` endpoint, only to correctly
/// authenticated requests.
pub async fn mount_translations(server: &MockServer, body: Value) {
    Mock::given(method("POST"))
        .and(path("/translate"))
        .and(query_param("api-version", "3.0"))
        .and(header(SUBSCRIPTION_KEY_HEADER, TEST_API_KEY))
        .and(header(SUBSCRIPTION_REGION_HEADER, TEST_REGION))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Requests the server saw for `route_path`, in arrival order.
pub async fn requests_to(server: &MockServer, route_path: &str) -> Vec<wiremock::Request> {
    server
        .received_requests()
        .await
        .expect("request recording enabled")
        .into_iter()
        .filter(|request| request.url.path() == route_path)
        .collect()
}

/// Values of the repeated `to` query parameter, in order.
pub fn target_params(request: &wiremock::Request) -> Vec<String> {
    request
        .url
        .query_pairs()
        .filter(|(name, _)| name == "to")
        .map(|(_, value)| value.into_owned())
        .collect()
}
