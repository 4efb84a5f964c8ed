//! Root of the `translator-core` library.

// Prevent accidental direct writes to stdout/stderr in library code. All
// user-visible output must go through the binary.
#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod catalog;
pub mod client;
pub mod config;
pub mod credentials;
mod error;
pub mod model;
pub mod orchestrator;
pub mod service;

pub use catalog::CatalogClient;
pub use catalog::LanguageCatalog;
pub use client::TextTranslator;
pub use client::TranslationClient;
pub use config::TranslatorSettings;
pub use credentials::CredentialProvider;
pub use credentials::Credentials;
pub use error::ConfigError;
pub use error::Result;
pub use error::TranslatorError;
pub use model::SupportedLanguage;
pub use model::Translation;
pub use orchestrator::TranslationOrchestrator;
