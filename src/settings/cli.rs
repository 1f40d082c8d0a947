use super::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "watchtower", about = "Security-event database administration console")]
pub struct Cli {
    #[arg(long)]
    pub settings: Option<String>,

    /// Account the command runs as.
    #[arg(long, global = true)]
    pub user: Option<String>,

    #[arg(long, global = true)]
    pub password: Option<String>,

    /// Print results as JSON instead of text lines.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Verify the credentials and show the session.
    Login,
    Users,
    Roles,
    AddUser {
        name: String,
        role: String,
        /// Falls back to the configured default credential.
        #[arg(long)]
        credential: Option<String>,
    },
    Block {
        user_id: i64,
    },
    Unblock {
        user_id: i64,
    },
    Systems,
    RecordAccess {
        user_id: i64,
        system_id: i64,
        ip: String,
        #[arg(long)]
        failed: bool,
    },
    Accesses {
        #[arg(long)]
        limit: Option<u32>,
    },
    CreateEvent {
        user_id: i64,
        event_type: String,
        description: String,
    },
    Events {
        #[arg(long)]
        limit: Option<u32>,
    },
    CreateAlert {
        user_id: i64,
        message: String,
    },
    Alerts {
        #[arg(long)]
        limit: Option<u32>,
    },
    Audit {
        #[arg(long)]
        limit: Option<u32>,
    },
    MyAccesses {
        #[arg(long)]
        limit: Option<u32>,
    },
    MyAlerts {
        #[arg(long)]
        limit: Option<u32>,
    },
    RequestUnblock,
}
