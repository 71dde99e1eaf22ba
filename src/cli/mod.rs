//! CLI interface for schoolgate

pub mod commands;
mod output;

pub use output::*;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "schoolgate")]
#[command(version)]
#[command(about = "Role-gated edge server for the school management portal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default schoolgate.toml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Start the edge server
    Serve {
        /// Host to bind to (defaults to the configured host)
        #[arg(long, env = "SCHOOLGATE_HOST")]
        host: Option<String>,

        /// Port to listen on (defaults to the configured port)
        #[arg(short, long, env = "SCHOOLGATE_PORT")]
        port: Option<u16>,
    },

    /// Evaluate the route guard for a path and cookie state, offline
    Check {
        /// Requested path, e.g. /admin/users
        path: String,

        /// Pretend an access token cookie is present
        #[arg(short, long)]
        token: bool,

        /// Value of the role cookie
        #[arg(short, long)]
        role: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// List the guarded role areas and their menus
    Routes,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}
