use clap::Subcommand;
use std::path::PathBuf;

use super::common::ViewModeArgs;

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive terminal client
    Tui {
        /// Page to open first, e.g. /my-chat
        #[arg(long)]
        route: Option<String>,
    },

    Rooms {
        #[command(subcommand)]
        command: RoomsCommand,
    },

    Me {
        #[command(subcommand)]
        command: MeCommand,
    },

    /// List the pickup and drop-off landmarks
    Landmarks,

    /// Print the login URL, or store a credential obtained from it
    Login {
        /// JWT returned by the login page
        #[arg(long)]
        token: Option<String>,
    },

    /// End the server session and forget the stored credential
    Logout,
}

#[derive(Subcommand)]
pub enum RoomsCommand {
    /// Search open rooms (0 or omitted = any landmark)
    Search {
        #[arg(long = "from", default_value = "0")]
        departure: u32,

        #[arg(long = "to", default_value = "0")]
        destination: u32,

        #[arg(long, default_value = "0")]
        page: u32,

        /// Page size [default: from config.toml]
        #[arg(long)]
        size: Option<u32>,

        /// Follow pages until the last one
        #[arg(long)]
        all: bool,

        #[command(flatten)]
        view_mode: ViewModeArgs,
    },

    Join {
        room_id: u32,
    },

    Create {
        #[arg(long = "from")]
        departure: u32,

        #[arg(long = "to")]
        destination: u32,

        /// Departure time, RFC 3339 or local `YYYY-MM-DDTHH:MM`
        #[arg(long)]
        time: String,

        #[arg(long, default_value = "2")]
        min: u32,

        #[arg(long, default_value = "4")]
        max: u32,

        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        fee: i64,
    },

    Leave {
        room_id: u32,
    },
}

#[derive(Subcommand)]
pub enum MeCommand {
    /// Show the pot you are currently in
    Pot,

    /// Show the signed-in profile
    Show,

    /// Upload a profile picture
    Picture { file: PathBuf },
}
