//! Mangrove CLI - Database migrations and tenant provisioning tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations (schema + session store)
//! mangrove migrate
//!
//! # Provision a tenant
//! mangrove tenant create -s north-store -n "North Store" --subdomain north
//!
//! # Deactivate a tenant (stops host resolution; data is kept)
//! mangrove tenant deactivate -s north-store
//!
//! # Store a per-tenant credential
//! mangrove tenant set-credential -s north-store -n payment_gateway --secret-stdin
//!
//! # Create an actor and grant a role
//! mangrove actor create -e ops@example.com -n "Ops" --super-admin
//! mangrove actor grant -e alice@example.com -s north-store -r admin
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "mangrove")]
#[command(author, version, about = "Mangrove CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage tenants
    Tenant {
        #[command(subcommand)]
        action: TenantAction,
    },
    /// Manage actors
    Actor {
        #[command(subcommand)]
        action: ActorAction,
    },
}

#[derive(Subcommand)]
enum TenantAction {
    /// Provision a new tenant
    Create {
        /// Unique tenant slug (lowercase letters, digits, hyphens)
        #[arg(short, long)]
        slug: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Custom apex domain (e.g. `shop.example.net`)
        #[arg(long)]
        custom_domain: Option<String>,

        /// Subdomain label under the platform's parent domain
        #[arg(long)]
        subdomain: Option<String>,
    },
    /// Deactivate a tenant so its hosts stop resolving
    Deactivate {
        /// Tenant slug
        #[arg(short, long)]
        slug: String,
    },
    /// Store or replace a per-tenant credential
    SetCredential {
        /// Tenant slug
        #[arg(short, long)]
        slug: String,

        /// Credential name (e.g. `payment_gateway`)
        #[arg(short, long)]
        name: String,

        /// Read the secret value from stdin instead of an argument
        #[arg(long)]
        secret_stdin: bool,

        /// Secret value (prefer --secret-stdin to keep it out of shell history)
        #[arg(long)]
        secret: Option<String>,
    },
}

#[derive(Subcommand)]
enum ActorAction {
    /// Create a new actor
    Create {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Grant the cross-tenant super-admin capability
        #[arg(long)]
        super_admin: bool,
    },
    /// Grant an actor a role within a tenant
    Grant {
        /// Actor email address
        #[arg(short, long)]
        email: String,

        /// Tenant slug
        #[arg(short, long)]
        slug: String,

        /// Role (`admin` or `viewer`)
        #[arg(short, long, default_value = "admin")]
        role: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Tenant { action } => match action {
            TenantAction::Create {
                slug,
                name,
                custom_domain,
                subdomain,
            } => {
                commands::tenant::create(&slug, &name, custom_domain.as_deref(), subdomain.as_deref())
                    .await?;
            }
            TenantAction::Deactivate { slug } => {
                commands::tenant::deactivate(&slug).await?;
            }
            TenantAction::SetCredential {
                slug,
                name,
                secret_stdin,
                secret,
            } => {
                let value = commands::tenant::read_secret(secret_stdin, secret)?;
                commands::tenant::set_credential(&slug, &name, &value).await?;
            }
        },
        Commands::Actor { action } => match action {
            ActorAction::Create {
                email,
                name,
                super_admin,
            } => {
                commands::actor::create(&email, &name, super_admin).await?;
            }
            ActorAction::Grant { email, slug, role } => {
                commands::actor::grant(&email, &slug, &role).await?;
            }
        },
    }
    Ok(())
}
