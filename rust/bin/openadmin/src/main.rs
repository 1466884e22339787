//! `openadmin`: the admin-console CLI.
//!
//! Organization tree editing, role and permission catalogs, and the
//! role→permission assignment dialog. State lives in memory: one-shot
//! commands run against freshly seeded data, `openadmin shell` keeps one
//! session alive for a whole stdin script.

mod commands;
mod output;
mod session;

use clap::{Parser, Subcommand};

use openadmin_core::{ConsoleConfig, OutputFormat};

use crate::output::Output;
use crate::session::Session;

/// Admin console CLI.
#[derive(Parser, Debug)]
#[command(name = "openadmin", about = "Admin console: organizations, roles and permissions")]
pub struct Cli {
    /// Path to config file (default: ~/.openadmin/config.toml). Startup only.
    #[arg(long = "config", global = true)]
    config: Option<String>,

    /// Output format: table or json.
    #[arg(long = "output", short = 'o', global = true)]
    output: Option<OutputFormat>,

    /// Start with empty catalogs and an empty organization tree. Startup only.
    #[arg(long = "no-seed", global = true)]
    no_seed: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Organization tree.
    Org {
        #[command(subcommand)]
        action: OrgAction,
    },

    /// Role catalog.
    Role {
        #[command(subcommand)]
        action: RoleAction,
    },

    /// Permission catalog.
    Perm {
        #[command(subcommand)]
        action: PermAction,
    },

    /// Role→permission assignment.
    Assign {
        #[command(subcommand)]
        action: AssignAction,
    },

    /// Read commands from stdin, one per line, against a single session.
    Shell,

    /// Show version.
    Version,
}

#[derive(Subcommand, Debug)]
pub enum OrgAction {
    /// Show the tree with the current expansion, search and selection.
    Tree,
    /// Every unit in pre-order with its depth.
    List,
    /// Set the search query (no argument clears it).
    Search { query: Option<String> },
    /// Select a unit.
    Select { key: String },
    /// Clear the selection.
    Unselect,
    /// Add a unit under --parent, else under the selection, else at root level.
    Add {
        name: String,
        #[arg(long)]
        parent: Option<String>,
    },
    /// Rename --key, else the selected unit.
    Rename {
        name: String,
        #[arg(long)]
        key: Option<String>,
    },
    /// Delete --key (else the selected unit) and everything under it.
    Delete {
        #[arg(long)]
        key: Option<String>,
        /// Skip confirmation.
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },
    /// Details of one unit.
    Detail { key: String },
    /// Expand a unit.
    Expand { key: String },
    /// Collapse a unit.
    Collapse { key: String },
}

#[derive(Subcommand, Debug)]
pub enum RoleAction {
    /// List roles.
    List {
        /// Substring filter on name and description.
        #[arg(long)]
        q: Option<String>,
        /// Sort field: id, name, users_count, created_at (prefix - for descending).
        #[arg(long)]
        sort: Option<String>,
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        offset: Option<usize>,
    },
    /// Show one role.
    Get { key: String },
    /// Create a role.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Update a role with a JSON merge patch.
    Update {
        key: String,
        #[arg(long = "json")]
        json_body: String,
    },
    /// Delete a role and its grants.
    Delete { key: String },
}

#[derive(Subcommand, Debug)]
pub enum PermAction {
    /// List permissions.
    List {
        /// Only this type: 菜单/menu or 操作/action.
        #[arg(long = "type")]
        kind: Option<String>,
        /// Substring filter on name, code and description.
        #[arg(long)]
        q: Option<String>,
        /// Sort field: id, name, code, created_at (prefix - for descending).
        #[arg(long)]
        sort: Option<String>,
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        offset: Option<usize>,
    },
    /// Show one permission.
    Get { key: String },
    /// Create a permission.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        code: String,
        /// 菜单/menu or 操作/action.
        #[arg(long = "type")]
        kind: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Update a permission with a JSON merge patch.
    Update {
        key: String,
        #[arg(long = "json")]
        json_body: String,
    },
    /// Delete a permission and revoke its code from every role.
    Delete { key: String },
}

#[derive(Subcommand, Debug)]
pub enum AssignAction {
    /// Saved grants and effective permissions of a role.
    Show { role: String },
    /// Open the assignment dialog for a role.
    Open { role: String },
    /// Check a permission-tree node in the open dialog.
    Check { key: String },
    /// Uncheck a permission-tree node in the open dialog.
    Uncheck { key: String },
    /// Replace the dialog's checked list with exactly these keys.
    Report { keys: Vec<String> },
    /// Show the open dialog.
    View,
    /// Save the open dialog.
    Save,
    /// Close the open dialog without saving.
    Cancel,
    /// Replace a role's grants directly.
    Set { role: String, keys: Vec<String> },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .as_deref()
        .map(std::path::PathBuf::from)
        .unwrap_or_else(ConsoleConfig::default_path);
    let mut config = ConsoleConfig::load(&config_path)?;
    if cli.no_seed {
        config.apply_args(&["--seed=false".to_string()])?;
    }

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .init();

    let format = cli.output.unwrap_or(config.output);
    let mut session = Session::new(&config);
    let mut out = Output::new(format, std::io::stdout());

    match cli.command {
        Commands::Shell => {
            let stdin = std::io::stdin();
            commands::shell::run(&mut session, format, stdin.lock(), &mut std::io::stdout())
        }
        Commands::Version => {
            println!("openadmin v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        command => {
            if let Err(e) = session.dispatch(command, &commands::StdinConfirmer, &mut out) {
                out.error(&e)?;
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
