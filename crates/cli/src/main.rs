//! Floret CLI - Exercise the flower shop client from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Add two of item 12 to the cart
//! floret cart add -i 12 -q 2
//!
//! # Show the rendered cart
//! floret cart show
//!
//! # Promote a user
//! floret admin role -u 3 -r ROLE_ADMIN
//!
//! # Export the audit log as CSV
//! floret audit export -o exports/
//! ```
//!
//! # Commands
//!
//! - `cart` - Add, remove, update, clear, count, show
//! - `admin` - User roles, deletes, restores, order status, pending count
//! - `audit` - Detail view, list URL, CSV export
//! - `theme` - Show, set, toggle the persisted theme

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "floret")]
#[command(author, version, about = "Floret flower shop client tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cart operations
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Admin user and order operations
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Audit log operations
    Audit {
        #[command(subcommand)]
        action: AuditAction,
    },
    /// Theme preference
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add an item to the cart
    Add {
        /// Item ID
        #[arg(short, long)]
        item: i64,

        /// Quantity (clamped to 1..=99)
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove an item from the cart
    Remove {
        /// Item ID
        #[arg(short, long)]
        item: i64,
    },
    /// Set an item's quantity (0 removes it)
    Update {
        /// Item ID
        #[arg(short, long)]
        item: i64,

        /// New quantity
        #[arg(short, long)]
        quantity: u32,
    },
    /// Empty the cart
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show the authoritative item count
    Count,
    /// Render the cart against the catalog
    Show,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Change a user's role
    Role {
        /// User ID
        #[arg(short, long)]
        user: i64,

        /// New role (`ROLE_USER`, `ROLE_ADMIN`)
        #[arg(short, long)]
        role: String,
    },
    /// Delete a user
    Delete {
        /// User ID
        #[arg(short, long)]
        user: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Delete several users
    BulkDelete {
        /// User IDs
        #[arg(short, long, value_delimiter = ',')]
        users: Vec<i64>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Restore a soft-deleted user
    Restore {
        /// User ID
        #[arg(short, long)]
        user: i64,
    },
    /// Move an order to a new status
    OrderStatus {
        /// Order ID
        #[arg(short, long)]
        order: i64,

        /// New status (`PENDING`, `CONFIRMED`, `IN_PROGRESS`, `COMPLETED`, `CANCELLED`)
        #[arg(short, long)]
        status: String,
    },
    /// Show the number of pending orders
    Pending,
}

#[derive(Subcommand)]
enum AuditAction {
    /// Show one audit entry
    Show {
        /// Audit entry ID
        #[arg(short, long)]
        id: i64,
    },
    /// Print the filtered list URL
    Url {
        /// Table name filter
        #[arg(short, long)]
        table: Option<String>,

        /// Action filter (`CREATE`, `UPDATE`, `DELETE`)
        #[arg(short, long)]
        action: Option<String>,

        /// Username filter
        #[arg(short, long)]
        username: Option<String>,
    },
    /// Export the audit log as CSV
    Export {
        /// Directory to write the file into
        #[arg(short, long, default_value = ".")]
        out: std::path::PathBuf,
    },
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Show the current theme
    Show,
    /// Set the theme (`light`, `dark`)
    Set {
        #[arg(short, long)]
        theme: String,
    },
    /// Flip between light and dark
    Toggle,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Add { item, quantity } => commands::cart::add(item, quantity).await?,
            CartAction::Remove { item } => commands::cart::remove(item).await?,
            CartAction::Update { item, quantity } => {
                commands::cart::update(item, quantity).await?;
            }
            CartAction::Clear { yes } => commands::cart::clear(yes).await?,
            CartAction::Count => commands::cart::count().await?,
            CartAction::Show => commands::cart::show().await?,
        },
        Commands::Admin { action } => match action {
            AdminAction::Role { user, role } => commands::admin::change_role(user, &role).await?,
            AdminAction::Delete { user, yes } => commands::admin::delete_user(user, yes).await?,
            AdminAction::BulkDelete { users, yes } => {
                commands::admin::bulk_delete(&users, yes).await?;
            }
            AdminAction::Restore { user } => commands::admin::restore_user(user).await?,
            AdminAction::OrderStatus { order, status } => {
                commands::admin::update_order_status(order, &status).await?;
            }
            AdminAction::Pending => commands::admin::pending().await?,
        },
        Commands::Audit { action } => match action {
            AuditAction::Show { id } => commands::audit::show(id).await?,
            AuditAction::Url {
                table,
                action,
                username,
            } => commands::audit::url(table, action.as_deref(), username)?,
            AuditAction::Export { out } => commands::audit::export(&out).await?,
        },
        Commands::Theme { action } => match action {
            ThemeAction::Show => commands::theme::show()?,
            ThemeAction::Set { theme } => commands::theme::set(&theme)?,
            ThemeAction::Toggle => commands::theme::toggle()?,
        },
    }
    Ok(())
}
