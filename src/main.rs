use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gauth_relay::auth::{OAuthClient, SessionStore};
use gauth_relay::config::RelayConfig;
use gauth_relay::server;

#[derive(Parser)]
#[command(name = "gauth")]
#[command(about = "Google OAuth2 authorization-code relay with a sample Drive call", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Run the server when set to "true", otherwise print the
    /// authorization URL (checked when no subcommand is given)
    #[arg(long, env = "START_SERVER")]
    start_server: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the relay server
    Serve {
        /// Port to listen on (overrides SERVER_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print the authorization URL and exit
    AuthUrl,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut config = RelayConfig::from_env()?;

    match cli.command {
        Some(Commands::Serve { port }) => {
            if let Some(port) = port {
                config.port = port;
            }
            serve(config).await
        }
        Some(Commands::AuthUrl) => print_auth_url(&config),
        None => {
            if cli.start_server.as_deref() == Some("true") {
                serve(config).await
            } else {
                print_auth_url(&config)
            }
        }
    }
}

async fn serve(config: RelayConfig) -> anyhow::Result<()> {
    println!("Go to http://localhost:{}", config.port);
    server::start_server(config).await
}

fn print_auth_url(config: &RelayConfig) -> anyhow::Result<()> {
    // Shaped exactly like a served redirect, state token included,
    // though nothing records the state
    let state = SessionStore::new().issue_state();
    let client = OAuthClient::new(config.clone(), reqwest::Client::new());

    println!("Authorization URL:\n{}", client.authorization_url(&state)?);
    Ok(())
}
