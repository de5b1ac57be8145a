use clap::{Parser, Subcommand};

/// rsvp — event management from the terminal.
#[derive(Parser, Debug)]
#[command(name = "rsvp", version)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// Base URL of the events API (overrides RSVP_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// IANA timezone for displayed dates (defaults to the system zone)
    #[arg(long, global = true)]
    pub timezone: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List upcoming events
    Events,

    /// Show one event in detail
    Show(ShowArgs),

    /// Create a new event
    Create(CreateArgs),

    /// Update an existing event
    Update(UpdateArgs),

    /// Delete an event and its registrations
    Cancel(ShowArgs),

    /// List an event's attendees page by page
    Attendees(AttendeesArgs),

    /// Register an attendee for an event
    Register(RegisterArgs),

    /// Remove an attendee from an event
    Unregister(UnregisterArgs),

    /// List common timezones with their current offsets
    Timezones,

    /// Browse attendee rosters in an interactive view
    Roster(RosterArgs),
}

/// Arguments naming a single event.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Event ID
    pub event_id: i64,
}

/// Arguments for the `create` subcommand. Times are wall-clock values in
/// the selected timezone, e.g. "2026-09-01 18:00".
#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Event name
    #[arg(long)]
    pub name: String,

    /// Event location
    #[arg(long)]
    pub location: String,

    /// Start time (wall clock, "YYYY-MM-DD HH:MM")
    #[arg(long)]
    pub start: String,

    /// End time (wall clock, "YYYY-MM-DD HH:MM")
    #[arg(long)]
    pub end: String,

    /// Maximum number of attendees
    #[arg(long)]
    pub capacity: u32,
}

/// Arguments for the `update` subcommand; omitted fields keep their value.
#[derive(Parser, Debug)]
pub struct UpdateArgs {
    /// Event ID
    pub event_id: i64,

    /// New event name
    #[arg(long)]
    pub name: Option<String>,

    /// New location
    #[arg(long)]
    pub location: Option<String>,

    /// New start time (wall clock, "YYYY-MM-DD HH:MM")
    #[arg(long)]
    pub start: Option<String>,

    /// New end time (wall clock, "YYYY-MM-DD HH:MM")
    #[arg(long)]
    pub end: Option<String>,

    /// New maximum number of attendees
    #[arg(long)]
    pub capacity: Option<u32>,
}

/// Arguments for the `attendees` subcommand.
#[derive(Parser, Debug)]
pub struct AttendeesArgs {
    /// Event ID
    pub event_id: i64,

    /// Rows per page (1-100)
    #[arg(long, default_value = "10")]
    pub page_size: u32,

    /// Fetch every page instead of only the first
    #[arg(long)]
    pub all: bool,
}

/// Arguments for the `register` subcommand.
#[derive(Parser, Debug)]
pub struct RegisterArgs {
    /// Event ID
    pub event_id: i64,

    /// Attendee name
    #[arg(long)]
    pub name: String,

    /// Attendee email
    #[arg(long)]
    pub email: String,
}

/// Arguments for the `unregister` subcommand.
#[derive(Parser, Debug)]
pub struct UnregisterArgs {
    /// Event ID
    pub event_id: i64,

    /// Attendee ID
    pub attendee_id: i64,
}

/// Arguments for the `roster` subcommand.
#[derive(Parser, Debug)]
pub struct RosterArgs {
    /// Event to open first (defaults to the first listed event)
    pub event_id: Option<i64>,

    /// Rows fetched per page (1-100)
    #[arg(long, default_value = "25")]
    pub page_size: u32,

    /// Rows from the list bottom at which the next page loads
    #[arg(long, default_value = "3")]
    pub threshold: i64,
}
