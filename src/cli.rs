use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::io;
use std::str::FromStr;

use crate::types::{
    TicketCategory, TicketPriority, TicketStatus, UserRole, VALID_PRIORITIES, VALID_ROLES,
    VALID_STATUSES,
};
use crate::view::QueueFilter;
use crate::view::filter::parse_optional;

/// A filter value where "all" parses to `None`.
type AnyOr<T> = Option<T>;

#[derive(Parser)]
#[command(name = "tickkk")]
#[command(about = "Helpdesk ticketing client")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in as a staff user
    Login {
        /// Username
        username: String,

        /// Password (read from stdin when omitted)
        #[arg(short, long)]
        password: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Forget the saved session
    Logout {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Verify the saved session and show who it belongs to
    Whoami {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that the API is reachable
    Health {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List tickets
    #[command(visible_alias = "l")]
    Ls {
        /// Staff queue: unassigned, mine, all, closed (requires login)
        #[arg(short, long, value_parser = parse_queue)]
        queue: Option<QueueFilter>,

        /// Only tickets with this status ("all" for any)
        #[arg(short, long, value_parser = parse_status_filter)]
        status: Option<AnyOr<TicketStatus>>,

        /// Only tickets with this priority ("all" for any)
        #[arg(short, long, value_parser = parse_priority_filter)]
        priority: Option<AnyOr<TicketPriority>>,

        /// Only tickets in this category ("all" for any)
        #[arg(short, long, value_parser = parse_category_filter)]
        category: Option<AnyOr<TicketCategory>>,

        /// Case-insensitive text matched against subject, client name and description
        #[arg(long)]
        search: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Display a ticket with its comments
    #[command(visible_alias = "s")]
    Show {
        /// Ticket ID
        id: u64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Open a new ticket
    #[command(visible_alias = "c")]
    Create {
        /// Ticket subject (at least 10 characters)
        #[arg(short, long)]
        subject: String,

        /// Client name
        #[arg(short, long)]
        name: String,

        /// Client email
        #[arg(short, long)]
        email: String,

        /// Problem description, at least 20 characters (read from stdin when omitted)
        #[arg(short, long)]
        description: Option<String>,

        /// Client phone
        #[arg(long)]
        phone: Option<String>,

        /// Priority: baja, media, alta, critica
        #[arg(short, long, default_value = "media", value_parser = parse_priority)]
        priority: TicketPriority,

        /// Category slug (e.g. tecnico, facturacion, red)
        #[arg(short, long, default_value = "tecnico", value_parser = parse_category)]
        category: TicketCategory,

        /// Client department
        #[arg(long)]
        department: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set a ticket's status
    Status {
        /// Ticket ID
        id: u64,

        /// New status: abierto, en_proceso, cerrado
        #[arg(value_parser = parse_status)]
        status: TicketStatus,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mark a ticket as en_proceso
    Start {
        /// Ticket ID
        id: u64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Close a ticket
    Close {
        /// Ticket ID
        id: u64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Reopen a closed ticket
    Reopen {
        /// Ticket ID
        id: u64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Assign a ticket to a user (omit the user to unassign)
    Assign {
        /// Ticket ID
        id: u64,

        /// User ID of the assignee
        user_id: Option<u64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change ticket fields (requires login)
    Update {
        /// Ticket ID
        id: u64,

        /// New subject
        #[arg(long)]
        subject: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// New priority
        #[arg(short, long, value_parser = parse_priority)]
        priority: Option<TicketPriority>,

        /// New category
        #[arg(short, long, value_parser = parse_category)]
        category: Option<TicketCategory>,

        /// New client phone
        #[arg(long)]
        phone: Option<String>,

        /// New department
        #[arg(long)]
        department: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a public comment to a ticket
    Comment {
        /// Ticket ID
        id: u64,

        /// Author name
        #[arg(short, long)]
        name: String,

        /// Author email
        #[arg(short, long)]
        email: String,

        /// Comment text (provide as argument or pipe from stdin)
        #[arg(trailing_var_arg = true)]
        text: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List a ticket's comments
    Comments {
        /// Ticket ID
        id: u64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List staff tickets can be assigned to
    Agents {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage staff users (admin only)
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },

    /// Tickets per category and status (admin only)
    Report {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum UsersAction {
    /// List all users
    Ls {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a user
    Create {
        /// Username
        username: String,

        /// Email
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,

        /// Full name
        #[arg(short = 'n', long)]
        full_name: String,

        /// Role: admin, agent
        #[arg(short, long, default_value = "agent", value_parser = parse_role)]
        role: UserRole,

        /// Create the user deactivated
        #[arg(long)]
        inactive: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change user fields
    Update {
        /// User ID
        id: u64,

        /// New username
        #[arg(long)]
        username: Option<String>,

        /// New email
        #[arg(short, long)]
        email: Option<String>,

        /// New password (leave unset to keep the current one)
        #[arg(short, long)]
        password: Option<String>,

        /// New full name
        #[arg(short = 'n', long)]
        full_name: Option<String>,

        /// New role
        #[arg(short, long, value_parser = parse_role)]
        role: Option<UserRole>,

        /// Set the active flag (true or false)
        #[arg(long, value_parser = parse_bool_strict)]
        active: Option<bool>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Activate or deactivate a user
    Toggle {
        /// User ID
        id: u64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set a configuration value
    Set {
        /// Configuration key (api_base_url, origin)
        key: String,
        /// Value to set
        value: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Get a configuration value
    Get {
        /// Configuration key (api_base_url, origin)
        key: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    /// Execute the command, dispatching to the appropriate handler.
    pub async fn run(self) -> crate::error::Result<()> {
        use crate::commands::{
            CreateOptions, LsOptions, UpdateOptions, UserCreateOptions, UserUpdateOptions,
            cmd_agents, cmd_assign, cmd_close, cmd_comment, cmd_comments, cmd_config_get,
            cmd_config_set, cmd_config_show, cmd_create, cmd_health, cmd_login, cmd_logout,
            cmd_ls, cmd_reopen, cmd_report, cmd_show, cmd_start, cmd_status, cmd_update,
            cmd_users_create, cmd_users_ls, cmd_users_toggle, cmd_users_update, cmd_whoami,
        };
        use crate::utils::{is_stdin_tty, read_stdin};

        /// Use the argument when given, otherwise whatever is piped in.
        fn text_or_stdin(text: Option<String>) -> crate::error::Result<String> {
            match text {
                Some(text) => Ok(text),
                None if !is_stdin_tty() => Ok(read_stdin()?),
                None => Ok(String::new()),
            }
        }

        match self {
            Commands::Login {
                username,
                password,
                json,
            } => cmd_login(&username, password.as_deref(), json).await,
            Commands::Logout { json } => cmd_logout(json),
            Commands::Whoami { json } => cmd_whoami(json).await,
            Commands::Health { json } => cmd_health(json).await,

            Commands::Ls {
                queue,
                status,
                priority,
                category,
                search,
                json,
            } => {
                cmd_ls(LsOptions {
                    queue,
                    status: status.flatten(),
                    priority: priority.flatten(),
                    category: category.flatten(),
                    search,
                    output_json: json,
                })
                .await
            }

            Commands::Show { id, json } => cmd_show(id, json).await,

            Commands::Create {
                subject,
                name,
                email,
                description,
                phone,
                priority,
                category,
                department,
                json,
            } => {
                let description = text_or_stdin(description)?;
                cmd_create(
                    CreateOptions {
                        name,
                        email,
                        phone,
                        subject,
                        description,
                        priority,
                        category,
                        department,
                    },
                    json,
                )
                .await
            }

            Commands::Status { id, status, json } => cmd_status(id, status, json).await,
            Commands::Start { id, json } => cmd_start(id, json).await,
            Commands::Close { id, json } => cmd_close(id, json).await,
            Commands::Reopen { id, json } => cmd_reopen(id, json).await,
            Commands::Assign { id, user_id, json } => cmd_assign(id, user_id, json).await,

            Commands::Update {
                id,
                subject,
                description,
                priority,
                category,
                phone,
                department,
                json,
            } => {
                cmd_update(
                    id,
                    UpdateOptions {
                        subject,
                        description,
                        priority,
                        category,
                        phone,
                        department,
                    },
                    json,
                )
                .await
            }

            Commands::Comment {
                id,
                name,
                email,
                text,
                json,
            } => {
                let text = if text.is_empty() {
                    text_or_stdin(None)?
                } else {
                    text.join(" ")
                };
                cmd_comment(id, &name, &email, &text, json).await
            }
            Commands::Comments { id, json } => cmd_comments(id, json).await,

            Commands::Agents { json } => cmd_agents(json).await,
            Commands::Users { action } => match action {
                UsersAction::Ls { json } => cmd_users_ls(json).await,
                UsersAction::Create {
                    username,
                    email,
                    password,
                    full_name,
                    role,
                    inactive,
                    json,
                } => {
                    cmd_users_create(
                        UserCreateOptions {
                            username,
                            email,
                            password,
                            full_name,
                            role,
                            inactive,
                        },
                        json,
                    )
                    .await
                }
                UsersAction::Update {
                    id,
                    username,
                    email,
                    password,
                    full_name,
                    role,
                    active,
                    json,
                } => {
                    cmd_users_update(
                        id,
                        UserUpdateOptions {
                            username,
                            email,
                            password,
                            full_name,
                            role,
                            active,
                        },
                        json,
                    )
                    .await
                }
                UsersAction::Toggle { id, json } => cmd_users_toggle(id, json).await,
            },

            Commands::Report { json } => cmd_report(json).await,

            Commands::Config { action } => match action {
                ConfigAction::Show { json } => cmd_config_show(json),
                ConfigAction::Set { key, value, json } => cmd_config_set(&key, &value, json),
                ConfigAction::Get { key, json } => cmd_config_get(&key, json),
            },

            Commands::Completions { shell } => {
                generate_completions(shell);
                Ok(())
            }
        }
    }
}

/// Generic validation helper for parsing values with a standard error message format.
fn parse_with_validation<T, F>(
    s: &str,
    parser: F,
    field_name: &str,
    valid_values: &[&str],
) -> Result<T, String>
where
    F: FnOnce(&str) -> Result<T, String>,
{
    parser(s).map_err(|_| {
        format!(
            "Invalid {}. Must be one of: {}",
            field_name,
            valid_values.join(", ")
        )
    })
}

fn category_slugs() -> Vec<&'static str> {
    TicketCategory::ALL.iter().map(|c| c.as_str()).collect()
}

fn with_all(values: &[&'static str]) -> Vec<&'static str> {
    let mut values = values.to_vec();
    values.push("all");
    values
}

fn parse_priority(s: &str) -> Result<TicketPriority, String> {
    parse_with_validation(
        s,
        |v| v.parse().map_err(|_| String::new()),
        "priority",
        VALID_PRIORITIES,
    )
}

fn parse_status(s: &str) -> Result<TicketStatus, String> {
    parse_with_validation(
        s,
        |v| TicketStatus::from_str(v).map_err(|_| String::new()),
        "status",
        VALID_STATUSES,
    )
}

fn parse_category(s: &str) -> Result<TicketCategory, String> {
    parse_with_validation(
        s,
        |v| v.parse().map_err(|_| String::new()),
        "category",
        &category_slugs(),
    )
}

fn parse_role(s: &str) -> Result<UserRole, String> {
    parse_with_validation(
        s,
        |v| v.parse().map_err(|_| String::new()),
        "role",
        VALID_ROLES,
    )
}

fn parse_queue(s: &str) -> Result<QueueFilter, String> {
    let valid: Vec<&str> = QueueFilter::ALL.iter().map(|q| q.as_str()).collect();
    parse_with_validation(
        s,
        |v| v.parse().map_err(|_| String::new()),
        "queue",
        &valid,
    )
}

fn parse_status_filter(s: &str) -> Result<AnyOr<TicketStatus>, String> {
    parse_with_validation(
        s,
        |v| parse_optional(v).map_err(|_| String::new()),
        "status",
        &with_all(VALID_STATUSES),
    )
}

fn parse_priority_filter(s: &str) -> Result<AnyOr<TicketPriority>, String> {
    parse_with_validation(
        s,
        |v| parse_optional(v).map_err(|_| String::new()),
        "priority",
        &with_all(VALID_PRIORITIES),
    )
}

fn parse_category_filter(s: &str) -> Result<AnyOr<TicketCategory>, String> {
    parse_with_validation(
        s,
        |v| parse_optional(v).map_err(|_| String::new()),
        "category",
        &with_all(&category_slugs()),
    )
}

fn parse_bool_strict(s: &str) -> Result<bool, String> {
    match s.to_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(format!(
            "Invalid boolean value '{s}'. Must be 'true' or 'false'"
        )),
    }
}

pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "tickkk", &mut io::stdout());
}
