use clap::{Parser, Subcommand};

/// Command-line interface definition for racetimer
/// Session countdowns for a racing venue, backed by SQLite
#[derive(Parser)]
#[command(
    name = "racetimer",
    version = env!("CARGO_PKG_VERSION"),
    about = "Venue session timers: per-lane and combo countdowns shared by every display",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Evaluate the command at this instant (RFC3339) instead of the system clock
    #[arg(global = true, long = "now", hide = true)]
    pub now: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        #[arg(long = "limit", help = "Only show the most recent N rows")]
        limit: Option<usize>,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f', help = "Overwrite an existing file without asking")]
        force: bool,
    },

    /// Inspect or maintain the lane catalog
    Track {
        #[command(subcommand)]
        action: TrackCommand,
    },

    /// Create a paused timer for a customer
    Create {
        /// Customer name shown on the boards
        customer: String,

        #[arg(long = "track", help = "Lane (track id) the session runs on")]
        track: Option<i64>,

        #[arg(long = "combo", help = "Cross-lane combo session (no single track)")]
        combo: bool,

        #[arg(long = "minutes", short = 'm', help = "Session package in minutes")]
        minutes: u32,
    },

    /// Start or resume a timer
    Start { id: i64 },

    /// Pause a running timer
    Pause { id: i64 },

    /// Put a timer back to its full package, paused
    Reset { id: i64 },

    /// Extend a timer
    AddTime {
        id: i64,

        #[arg(allow_negative_numbers = true)]
        minutes: i64,
    },

    /// Generic update: --action start|pause|reset|add_time [--minutes N]
    Update {
        id: i64,

        #[arg(long = "action")]
        action: String,

        #[arg(long = "minutes", allow_negative_numbers = true)]
        minutes: Option<i64>,
    },

    /// Delete a timer permanently
    Del {
        id: i64,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List all timers with their live remaining time
    List {
        #[arg(long = "json", help = "Print the projection as JSON")]
        json: bool,
    },

    /// Show timers grouped by lane, once
    Board {
        #[arg(long = "json", help = "Print the grouped view as JSON")]
        json: bool,
    },

    /// Run the polling display board
    Watch {
        #[arg(long = "polls", help = "Stop after N polls (default: run forever)")]
        polls: Option<u64>,

        #[arg(long = "interval", value_name = "MS", help = "Poll interval in milliseconds")]
        interval_ms: Option<u64>,

        #[arg(long = "no-bell", help = "Do not ring the terminal bell on expiry")]
        no_bell: bool,
    },
}

#[derive(Subcommand)]
pub enum TrackCommand {
    /// List lanes
    List {
        #[arg(long = "all", help = "Include inactive lanes")]
        all: bool,
    },

    /// Add a lane to the catalog
    Add {
        name: String,

        #[arg(long = "kind", help = "FAST, SAND, MUD, CRAWLER or DRIFT")]
        kind: String,
    },

    /// Stop offering a lane for new timers
    Disable { id: i64 },

    /// Offer a lane again
    Enable { id: i64 },
}
