//! HTTP surface of the translator.
//!
//! | method | route | result |
//! |---|---|---|
//! | GET | `/translator/languages` | `[{Code, Name}]` |
//! | POST | `/translator/{text}` | `[{Text, Language}]` with the configured `to`/`from` |
//! | POST | `/translator/{text}/{to}` | same, source autodetected |
//! | POST | `/translator/{text}/{to}/{from}` | same, explicit source |
//! | GET | `/health` | `OK` |
//!
//! Translation routes accept `?sortByLanguage=true` to order the results like
//! the requested targets.

#![deny(clippy::print_stdout, clippy::print_stderr)]

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::extract::rejection::PathRejection;
use axum::extract::rejection::QueryRejection;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use translator_core::TranslationOrchestrator;
use translator_core::TranslatorError;
use translator_core::TranslatorSettings;

mod error;
mod host_filter;
mod models;

pub use error::ApiError;
pub use error::INVALID_HOST_MESSAGE;
pub use error::UNEXPECTED_ERROR_MESSAGE;
pub use host_filter::AllowedHosts;
pub use models::ErrorResponse;
pub use models::SupportedLanguageApi;
pub use models::TranslateQuery;
pub use models::TranslationApi;

/// State shared by every request handler.
pub struct AppState {
    orchestrator: TranslationOrchestrator,
    settings: Arc<TranslatorSettings>,
    allowed_hosts: AllowedHosts,
}

impl AppState {
    pub fn new(orchestrator: TranslationOrchestrator, settings: Arc<TranslatorSettings>) -> Self {
        let allowed_hosts = AllowedHosts::parse(&settings.allowed_hosts);
        Self {
            orchestrator,
            settings,
            allowed_hosts,
        }
    }

    pub fn from_settings(settings: Arc<TranslatorSettings>) -> Result<Self, TranslatorError> {
        let orchestrator = TranslationOrchestrator::from_settings(Arc::clone(&settings))?;
        Ok(Self::new(orchestrator, settings))
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/translator/languages", get(languages))
        .route("/translator/{text}", post(translate_with_defaults))
        .route("/translator/{text}/{to}", post(translate_autodetect))
        .route("/translator/{text}/{to}/{from}", post(translate_from))
        .route("/health", get(health))
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            host_filter::filter_hosts,
        ))
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

async fn languages(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<SupportedLanguageApi>>, ApiError> {
    let languages = state.orchestrator.languages().await?;
    Ok(Json(languages.into_iter().map(Into::into).collect()))
}

async fn translate_with_defaults(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<TranslateQuery>, QueryRejection>,
) -> Result<Json<Vec<TranslationApi>>, ApiError> {
    let Path(text) = path?;
    let Query(query) = query?;
    let defaults = &state.settings.translator;

    let translations = state
        .orchestrator
        .translate(
            &[text],
            &defaults.to,
            defaults.effective_from(),
            query.sort_by_language,
        )
        .await?;
    Ok(into_wire(translations))
}

async fn translate_autodetect(
    State(state): State<Arc<AppState>>,
    path: Result<Path<(String, String)>, PathRejection>,
    query: Result<Query<TranslateQuery>, QueryRejection>,
) -> Result<Json<Vec<TranslationApi>>, ApiError> {
    let Path((text, to)) = path?;
    let Query(query) = query?;

    let translations = state
        .orchestrator
        .translate_autodetect(&[text], &to, query.sort_by_language)
        .await?;
    Ok(into_wire(translations))
}

async fn translate_from(
    State(state): State<Arc<AppState>>,
    path: Result<Path<(String, String, String)>, PathRejection>,
    query: Result<Query<TranslateQuery>, QueryRejection>,
) -> Result<Json<Vec<TranslationApi>>, ApiError> {
    let Path((text, to, from)) = path?;
    let Query(query) = query?;

    let translations = state
        .orchestrator
        .translate_from(&[text], &to, &from, query.sort_by_language)
        .await?;
    Ok(into_wire(translations))
}

fn into_wire(translations: Vec<translator_core::Translation>) -> Json<Vec<TranslationApi>> {
    Json(translations.into_iter().map(Into::into).collect())
}
