use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use clap::Subcommand;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use translator_api_server::AppState;
use translator_core::TranslatorSettings;
use translator_core::config::DEFAULT_CONFIG_FILE;
use translator_secrets::ConfigCipher;
use translator_secrets::MASTER_KEY_ENV_VAR;
use translator_secrets::MasterKey;

const DEFAULT_LOG_FILTER: &str = "translator_api_server=info,translator_core=info";

/// Web API in front of the Translator Text service.
#[derive(Debug, Parser)]
#[command(name = "translator-api", version)]
struct Cli {
    /// Settings file.
    #[arg(
        long,
        short = 'c',
        global = true,
        env = "TRANSLATOR_CONFIG",
        default_value = DEFAULT_CONFIG_FILE
    )]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default).
    Serve(ServeArgs),

    /// Encrypt a value for the settings file with the configured master key.
    Encrypt {
        plaintext: String,
    },

    /// Print a new random master key.
    GenerateKey,
}

#[derive(Debug, Default, clap::Args)]
struct ServeArgs {
    /// Address to listen on, overriding `[server].listen`.
    #[arg(long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command.unwrap_or(Command::Serve(ServeArgs::default())) {
        Command::Serve(args) => serve(&cli.config, args).await,
        Command::Encrypt { plaintext } => {
            let settings = TranslatorSettings::load(&cli.config)?;
            let encoded = settings.effective_master_key().with_context(|| {
                format!("no master key: set {MASTER_KEY_ENV_VAR} or [secrets].master_key")
            })?;
            let cipher = ConfigCipher::new(&MasterKey::from_hex(&encoded)?)?;
            println!("{}", cipher.encrypt(&plaintext)?);
            Ok(())
        }
        Command::GenerateKey => {
            println!("{}", MasterKey::generate().to_hex());
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn serve(config: &std::path::Path, args: ServeArgs) -> anyhow::Result<()> {
    let settings = Arc::new(TranslatorSettings::load(config)?);
    let listen = args.listen.unwrap_or_else(|| settings.server.listen.clone());

    let state = AppState::from_settings(Arc::clone(&settings))
        .context("failed to initialise the translator")?;
    let app = translator_api_server::router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(&listen)
        .await
        .with_context(|| format!("failed to bind {listen}"))?;
    tracing::info!("Translator API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    tracing::info!("Translator API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
}
