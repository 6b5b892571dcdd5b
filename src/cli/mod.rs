//! Command-line interface for the bloghub server.

mod commands;

use clap::{Parser, Subcommand};

/// Bloghub - blogging REST backend
#[derive(Parser)]
#[command(name = "bloghub")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server (default)
    #[command(alias = "s")]
    Serve,

    /// Apply pending database migrations and exit
    Migrate,

    /// Create an administrator, or promote an existing account
    CreateAdmin {
        #[arg(long)]
        username: String,

        #[arg(long)]
        email: String,

        /// Required when the account does not exist yet
        #[arg(long, env = "BLOGHUB_ADMIN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
}

pub use commands::*;
