use crate::core::timer::TimerOp;
use crate::export::ExportFormat;
use clap::{Parser, Subcommand, ValueEnum};

/// Command-line interface definition for teamclock
#[derive(Parser)]
#[command(
    name = "teamclock",
    version = env!("CARGO_PKG_VERSION"),
    about = "Task timers and timesheet ledger for small teams, backed by SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Act as this user id (defaults to `default_user` from the config)
    #[arg(global = true, long = "user")]
    pub user: Option<i64>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum KindArg {
    Task,
    Timesheet,
}

#[derive(Subcommand)]
pub enum UserCmd {
    /// Add a user to a tenant
    Add {
        name: String,

        #[arg(long, help = "Tenant of the new user (default: config default_tenant)")]
        tenant: Option<String>,
    },

    /// List users
    List {
        #[arg(long, help = "Only users of this tenant")]
        tenant: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum TaskCmd {
    /// Create a task or timesheet row in the acting user's tenant
    Add {
        title: String,

        #[arg(long, value_enum, default_value = "task")]
        kind: KindArg,

        #[arg(long, help = "Owner user id (default: acting user)")]
        owner: Option<i64>,
    },

    /// List entities of the acting user's tenant with live elapsed time
    List {
        #[arg(long, help = "Only running timers")]
        running: bool,
    },
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

        #[arg(long = "editor", help = "Specify the editor to use")]
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

    /// Manage users
    User {
        #[command(subcommand)]
        action: UserCmd,
    },

    /// Manage tasks and timesheet rows
    Task {
        #[command(subcommand)]
        action: TaskCmd,
    },

    /// Drive the timer of a task or timesheet row
    Timer {
        #[arg(value_enum)]
        op: TimerOp,

        /// Entity id
        id: i64,

        #[arg(long, help = "Print the result as JSON")]
        json: bool,
    },

    /// Show worked intervals and breaks of one entity
    Report {
        /// Entity id
        id: i64,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Export the timesheet ledger
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "Only entries of this entity")]
        entity: Option<i64>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
