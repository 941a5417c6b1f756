use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use roster_accounts::{CreateUserRequest, LoginRequest, MessageResponse};
use roster_config::load as load_config;
use roster_runtime::{cancel_on_shutdown, telemetry, AccountServices};
use serde_json::json;
use tokio::io::BufReader;
use tracing::info;

mod commands;

use commands::Lookup;

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Roster account administration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Create a user account
    CreateUser {
        #[arg(long)]
        name: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        age: u32,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// List all user accounts
    ListUsers,
    /// Fetch a single account
    GetUser(GetUserArgs),
    /// Check a username and password
    Login {
        #[arg(long)]
        username: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct GetUserArgs {
    #[arg(long)]
    username: Option<String>,
    #[arg(long)]
    id: Option<i64>,
}

impl GetUserArgs {
    fn lookup(self) -> Lookup {
        // clap guarantees exactly one of the two is present
        match self.username {
            Some(username) => Lookup::Username(username),
            None => Lookup::Id(self.id.unwrap_or_default()),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    telemetry::init_tracing().context("failed to initialise tracing")?;

    let config = load_config().context("failed to load configuration")?;
    let services = AccountServices::initialise(&config)
        .await
        .context("failed to initialise account services")?;
    let cancel = cancel_on_shutdown();
    let mut stdin = BufReader::new(tokio::io::stdin());
    let accounts = services.accounts.as_ref();

    let response = match cli.command {
        Commands::Migrate => {
            info!(url = %config.database.url, "migrations applied");
            MessageResponse::ok("database migrated", &json!({ "url": config.database.url }))
        }
        Commands::CreateUser {
            name,
            username,
            age,
            password,
        } => {
            let password = commands::resolve_password(password, &mut stdin)
                .await
                .context("failed to read password")?;
            let request = CreateUserRequest {
                name,
                username,
                age,
                password,
            };
            commands::create_user(accounts, &request, &cancel).await
        }
        Commands::ListUsers => commands::list_users(accounts, &cancel).await,
        Commands::GetUser(args) => commands::get_user(accounts, &args.lookup(), &cancel).await,
        Commands::Login { username, password } => {
            let password = commands::resolve_password(password, &mut stdin)
                .await
                .context("failed to read password")?;
            commands::login(accounts, &LoginRequest::new(username, password), &cancel).await
        }
    };

    let encoded =
        serde_json::to_string_pretty(&response).context("failed to encode response")?;
    println!("{encoded}");

    services.shutdown().await;

    Ok(if response.is_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
