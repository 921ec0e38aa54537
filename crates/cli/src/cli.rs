//! Command-line surface of the `warden` binary.

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "warden", about = "Administer users, roles and permissions")]
pub struct Cli {
    /// Backend base URL (overrides WARDEN_API_URL).
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in with email and password.
    Login {
        email: String,
        #[arg(long, short)]
        password: String,
    },
    /// Log in with a Google ID token.
    GoogleLogin { id_token: String },
    Logout,
    /// Show the dashboard for the current session.
    Whoami,
    /// Explain whether the current session holds a permission.
    Check { permission: String },
    #[command(subcommand)]
    Users(UsersCommand),
    #[command(subcommand)]
    Roles(RolesCommand),
    #[command(subcommand)]
    Permissions(PermissionsCommand),
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    List,
    Add {
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long, short)]
        password: String,
        #[arg(long)]
        role: String,
    },
    /// Update a user; omitted fields keep their current value and an
    /// omitted password is left unchanged.
    Edit {
        id: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, short)]
        password: Option<String>,
        #[arg(long)]
        role: Option<String>,
    },
    Delete { id: String },
    /// Create a role without leaving user management.
    AddRole {
        name: String,
        #[command(flatten)]
        selection: SelectionArgs,
    },
}

#[derive(Debug, Subcommand)]
pub enum RolesCommand {
    List,
    Show { id: u64 },
    Add {
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Update a role; grants apply before revokes.
    Edit {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[command(flatten)]
        selection: SelectionArgs,
        #[arg(long = "revoke", value_name = "PERMISSION")]
        revoke: Vec<String>,
        #[arg(long = "revoke-group", value_name = "GROUP")]
        revoke_groups: Vec<String>,
    },
    Delete { id: u64 },
}

#[derive(Debug, Subcommand)]
pub enum PermissionsCommand {
    List,
    /// Show the catalog grouped by entity.
    Groups,
    Add {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    Edit {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    Delete { id: u64 },
}

/// Checkbox-equivalent selection flags.
#[derive(Debug, Default, Args)]
pub struct SelectionArgs {
    #[arg(long = "grant", value_name = "PERMISSION")]
    pub grant: Vec<String>,
    /// Select every permission of a group, e.g. `reports`.
    #[arg(long = "grant-group", value_name = "GROUP")]
    pub grant_groups: Vec<String>,
    /// Select the whole catalog.
    #[arg(long)]
    pub all: bool,
}
