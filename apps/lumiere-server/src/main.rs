mod auth;
mod authoring;
mod config;
mod error;
mod handlers;
mod metrics;
mod response;
mod server;
mod share;
mod uploads;

use clap::{Parser, Subcommand};
use lumiere_storage::{CreateUserParams, Role, Store};
use lumiere_store_sqlite::SqliteStore;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::ServerConfig;
use server::LumiereServer;
use uploads::{DiskUploadStore, UploadConfig};

const DEFAULT_DATABASE_URL: &str = "sqlite://lumiere.db?mode=rwc";

// ────────────────────────────────────── CLI Types ──────────────────────────────────────

#[derive(Parser)]
#[command(name = "lumiere-server")]
#[command(about = "Lumière invitations server and administration CLI")]
struct Cli {
    /// Database URL (sqlite://path/to/db.db)
    #[arg(long, global = true, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server
    Serve {
        /// Server address
        #[arg(long, env = "LUMIERE_ADDR", default_value = "0.0.0.0:4000")]
        addr: String,
    },
    /// User management commands
    User {
        #[command(subcommand)]
        user_cmd: UserCommand,
    },
}

#[derive(Subcommand)]
enum UserCommand {
    /// Create a user and print a session token for it
    Create {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        /// admin or client
        #[arg(long, default_value = "client")]
        role: Role,
        /// Output only the token (for scripts)
        #[arg(long)]
        plain: bool,
    },
    /// Issue another session token for an existing user
    Token {
        #[arg(long)]
        email: String,
        #[arg(long)]
        plain: bool,
    },
    /// List all users
    List,
}

// ────────────────────────────────────── CLI Commands ──────────────────────────────────────

async fn cmd_user_create(
    db_url: &str,
    email: &str,
    name: &str,
    role: Role,
    plain: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;
    let store = SqliteStore::open(db_url).await?;

    let user = store
        .create_user(&CreateUserParams {
            email: email.to_string(),
            name: name.to_string(),
            role,
        })
        .await?;
    let token = auth::issue_session(&store, &user, config.session_ttl_hours).await?;

    if plain {
        println!("{}", token);
    } else {
        println!("✓ User created!\n");
        println!("ID:    {}", user.id.0);
        println!("Email: {}", user.email);
        println!("Role:  {}", user.role);
        println!("Token: {}", token);
        println!(
            "\nSend it as `Authorization: Bearer <token>`; it expires in {} hours.",
            config.session_ttl_hours
        );
    }

    Ok(())
}

async fn cmd_user_token(
    db_url: &str,
    email: &str,
    plain: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;
    let store = SqliteStore::open(db_url).await?;

    let user = store.get_user_by_email(email).await?;
    if !user.is_active {
        return Err(format!("user {} is inactive", user.email).into());
    }
    let token = auth::issue_session(&store, &user, config.session_ttl_hours).await?;

    if plain {
        println!("{}", token);
    } else {
        println!("Token:   {}", token);
        println!("Expires: in {} hours", config.session_ttl_hours);
    }

    Ok(())
}

async fn cmd_user_list(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let store = SqliteStore::open(db_url).await?;
    let users = store.list_users().await?;

    if users.is_empty() {
        println!("No users found.");
    } else {
        for user in users {
            let status = if user.is_active { "" } else { " (inactive)" };
            println!("{}  {:<6}  {} <{}>{}", user.id.0, user.role, user.name, user.email, status);
        }
    }

    Ok(())
}

async fn cmd_serve(db_url: &str, addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let addr: std::net::SocketAddr = addr.parse()?;
    let config = ServerConfig::from_env()?;

    let store = SqliteStore::open(db_url).await?;
    let store = Arc::new(store);

    let uploads = DiskUploadStore::new(UploadConfig {
        dir: config.upload_dir.clone(),
        max_file_size: config.max_file_size,
    });
    uploads.init().await?;

    info!(upload_dir = %uploads.dir().display(), public_url = %config.public_url, "configuration loaded");

    let metrics_handle = metrics::init_metrics();
    let app = LumiereServer::new(store.clone(), Arc::new(uploads), config)
        .with_metrics(metrics_handle)
        .router();

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "lumiere-server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received SIGINT, shutting down gracefully"),
        _ = terminate => info!("received SIGTERM, shutting down gracefully"),
    }
}

// ────────────────────────────────────── Main ──────────────────────────────────────

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("lumiere_server=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { addr } => {
            cmd_serve(&cli.database_url, &addr).await?;
        }
        Command::User { user_cmd } => match user_cmd {
            UserCommand::Create {
                email,
                name,
                role,
                plain,
            } => {
                cmd_user_create(&cli.database_url, &email, &name, role, plain).await?;
            }
            UserCommand::Token { email, plain } => {
                cmd_user_token(&cli.database_url, &email, plain).await?;
            }
            UserCommand::List => {
                cmd_user_list(&cli.database_url).await?;
            }
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests;
