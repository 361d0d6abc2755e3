use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use confidios_link::api::types::{ApiError, UserCreateRequest};
use confidios_link::config::ConfidiosConfig;
use confidios_link::{HttpConfidiosApi, IntegrationError, IntegrationState, LogNotifier, SessionContext, services};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Integration(#[from] IntegrationError),
    #[error("operation failed")]
    Failed,
    #[error("--email (or CONFIDIOS_EMAIL) is required for login")]
    MissingEmail,
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "confidios-link", about = "Confidios account link via the application backend")]
struct Cli {
    /// Application API root; overrides `CONFIDIOS_API_BASE_URL`.
    #[arg(long)]
    base_url: Option<String>,

    #[arg(long, env = "CONFIDIOS_TOKEN", hide_env_values = true)]
    token: String,

    #[arg(long, env = "CONFIDIOS_EMAIL", default_value = "")]
    email: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log the user into Confidios.
    Login,
    /// Log the user out of Confidios.
    Logout,
    /// Check Confidios admin access.
    AdminLogin,
    /// Provision an application user on Confidios (admin only).
    CreateUser(CreateUserArgs),
    /// List files under a path.
    Ls { path: String },
    /// Read a file.
    Cat { path: String },
}

#[derive(Args, Debug)]
struct CreateUserArgs {
    #[arg(long)]
    user_id: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    user_email: String,
    #[arg(long, default_value = "user")]
    role: String,
    #[arg(long, default_value = "/user.png")]
    profile_image_url: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv = dotenvy::dotenv();
    tracing_subscriber::fmt::init();
    if let Err(e) = dotenv {
        if !e.not_found() {
            tracing::warn!(error = %e, "failed to load .env");
        }
    }

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "confidios-link failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = ConfidiosConfig::from_env()?;
    if let Some(url) = cli.base_url.as_deref() {
        config.base_url = ConfidiosConfig::with_base_url(url)?.base_url;
    }
    tracing::debug!(base_url = %config.base_url, "confidios config loaded");

    let api = HttpConfidiosApi::new(&config)?;
    let state = IntegrationState::new(Arc::new(api), Arc::new(LogNotifier));
    let ctx = SessionContext::new(cli.token, cli.email);

    let outcome = execute(&state, &ctx, cli.command).await;
    println!("{}", serde_json::to_string_pretty(&state.account.snapshot())?);
    outcome
}

async fn execute(state: &IntegrationState, ctx: &SessionContext, command: Command) -> Result<(), CliError> {
    match command {
        Command::Login => {
            if ctx.email.trim().is_empty() {
                return Err(CliError::MissingEmail);
            }
            ensure(services::login(state, ctx).await)
        }
        Command::Logout => ensure(services::logout(state, ctx).await),
        Command::AdminLogin => ensure(services::admin_login(state, ctx).await),
        Command::CreateUser(args) => {
            let user = UserCreateRequest {
                user_id: args.user_id,
                name: args.name,
                email: args.user_email,
                role: args.role,
                profile_image_url: args.profile_image_url,
            };
            let resp = services::create_user(state, ctx, &user).await?;
            println!("{}", serde_json::to_string_pretty(&resp.user)?);
            Ok(())
        }
        Command::Ls { path } => {
            let files = services::list_files(state, ctx, &path).await?;
            println!("{}", serde_json::to_string_pretty(&files)?);
            Ok(())
        }
        Command::Cat { path } => {
            let content = services::read_file(state, ctx, &path).await?;
            println!("{}", serde_json::to_string_pretty(&content)?);
            Ok(())
        }
    }
}

fn ensure(ok: bool) -> Result<(), CliError> {
    if ok { Ok(()) } else { Err(CliError::Failed) }
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
