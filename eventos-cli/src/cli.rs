//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "eventos", version, about = "Manage events on the eventos admin backend")]
pub struct Args {
    /// Backend base address (overrides EVENTOS_API_BASE).
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// Directory for the persisted session and image cache.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register a new administrator account.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Sign in and persist the session.
    Login {
        #[arg(long)]
        email: Option<String>,
        #[arg(long, env = "EVENTOS_PASSWORD")]
        password: String,
        /// Remember the email for the next sign-in.
        #[arg(long)]
        remember: bool,
    },

    /// Sign out and clear the persisted session.
    Logout,

    /// Show the signed-in administrator.
    Whoami,

    /// Event operations.
    #[command(subcommand)]
    Events(EventCommands),

    /// Resolve an event image reference and save it locally.
    Image {
        /// Image reference: absolute URL or backend-relative path.
        reference: String,
        /// Output file for fetched protected images.
        #[arg(long, default_value = "imagem.img")]
        out: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum EventCommands {
    /// List the administrator's events.
    List,

    /// Create an event.
    Create {
        #[arg(long)]
        name: String,
        /// Event date, e.g. 2026-09-01T19:30:00.
        #[arg(long)]
        date: String,
        #[arg(long)]
        location: String,
        /// Reference the image by URL.
        #[arg(long, conflicts_with = "image_file")]
        image_url: Option<String>,
        /// Upload a local image file.
        #[arg(long)]
        image_file: Option<PathBuf>,
    },

    /// Update an event's date and location.
    Update {
        id: i64,
        #[arg(long)]
        date: String,
        #[arg(long)]
        location: String,
    },

    /// Delete an event.
    Delete { id: i64 },
}
