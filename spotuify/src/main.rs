use anyhow::Result;
use clap::{Parser, Subcommand};
use spotuify_auth::{Authenticator, Settings, TokenStore};

use spotuify::log_buffer::LogBuffer;
use spotuify::logging::init_logging_with_buffer;
use spotuify::App;

const LOG_BUFFER_SIZE: usize = 5000;

#[derive(Parser)]
#[command(name = "spotuify")]
#[command(about = "Control Spotify playback from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Default)]
enum Command {
    /// Start the terminal UI (default)
    #[default]
    Run,
    /// Authorize with Spotify without starting the UI
    Login,
    /// Delete the cached token
    Logout,
    /// Show whether a token is cached and when it expires
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_default();

    let log_buffer = LogBuffer::new(LOG_BUFFER_SIZE);
    let log_path = init_logging_with_buffer(log_buffer.clone())?;
    tracing::info!(path = %log_path.display(), "Logging initialized");

    match command {
        Command::Status => print_status()?,
        Command::Logout => {
            TokenStore::new()?.delete_token()?;
            println!("Logged out of Spotify");
        }
        Command::Login => {
            let settings = load_settings()?;
            let mut auth = Authenticator::from_settings(&settings)?;
            let token = spotuify_auth::authenticate(&mut auth).await?;
            println!(
                "Token valid until {}",
                token.expires_at.with_timezone(&chrono::Local)
            );
        }
        Command::Run => {
            let settings = load_settings()?;
            let mut auth = Authenticator::from_settings(&settings)?;
            let token = spotuify_auth::authenticate(&mut auth).await?;
            App::new(auth, token, settings, log_buffer).run().await?;
        }
    }

    Ok(())
}

/// Settings with usable client credentials, or exit with setup guidance
fn load_settings() -> Result<Settings> {
    let settings = Settings::new()?;

    if !settings.is_configured() {
        print_setup_guidance();
        std::process::exit(1);
    }
    if let Err(reason) = settings.validate() {
        eprintln!("Invalid configuration: {}", reason);
        std::process::exit(1);
    }

    Ok(settings)
}

fn print_status() -> Result<()> {
    let store = TokenStore::new()?;

    match store.load_token()? {
        Some(token) => {
            let expires_at = token.expires_at.with_timezone(&chrono::Local);
            if token.remaining() > chrono::Duration::zero() {
                println!("Logged in, access token valid until {}", expires_at);
            } else {
                println!(
                    "Logged in, access token expired at {} and will be refreshed on next start",
                    expires_at
                );
            }
        }
        None => println!("Not logged in"),
    }
    println!("Token cache: {}", store.path().display());

    Ok(())
}

fn print_setup_guidance() {
    eprintln!("Spotify client credentials are not configured.\n");
    eprintln!("Create an app at https://developer.spotify.com/dashboard, then either set");
    eprintln!("  SPOTUIFY_CLIENT_ID and SPOTUIFY_CLIENT_SECRET");
    eprintln!("or add client_id and client_secret to");
    eprintln!("  {}", Settings::default_config_path().display());
}
