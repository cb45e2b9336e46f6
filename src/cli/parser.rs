use clap::{Parser, Subcommand};

/// Command-line interface definition for rubrohours
/// CLI admin tool to assign and track worker hours per rubro and year
#[derive(Parser)]
#[command(
    name = "rubrohours",
    version = env!("CARGO_PKG_VERSION"),
    about = "Assign and track worker hours per rubro and year",
    long_about = None
)]
pub struct Cli {
    /// Override data directory (useful for tests or custom setups)
    #[arg(global = true, long = "data-dir")]
    pub data_dir: Option<String>,

    /// Storage backend: json or sqlite
    #[arg(global = true, long = "backend")]
    pub backend: Option<String>,

    /// Acting username, stamped on audit entries
    #[arg(global = true, long = "user", default_value = "admin")]
    pub user: String,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration and collections
    Init {
        /// Seed sample workers, rubros and assignments
        #[arg(long = "demo")]
        demo: bool,
    },

    /// Manage workers
    Worker {
        #[command(subcommand)]
        action: WorkerAction,
    },

    /// Manage rubros (hour categories)
    Rubro {
        #[command(subcommand)]
        action: RubroAction,
    },

    /// Assign and inspect hours
    Hours {
        #[command(subcommand)]
        action: HoursAction,
    },

    /// Integrity sweep: report ledger rows whose worker or rubro is gone
    Sweep {
        /// Remove the orphaned rows instead of only reporting them
        #[arg(long = "purge")]
        purge: bool,

        /// Skip the confirmation prompt
        #[arg(long = "yes")]
        yes: bool,
    },

    /// Print recent audit log entries
    History {
        /// Maximum number of entries to print
        #[arg(long = "limit", default_value_t = 50)]
        limit: usize,
    },
}

#[derive(Subcommand)]
pub enum WorkerAction {
    /// Add a new worker (status starts as active)
    Add {
        name: String,
        email: String,

        #[arg(long = "phone")]
        phone: Option<String>,

        #[arg(long = "area")]
        area: Option<String>,

        /// Opaque photo reference, stored as-is
        #[arg(long = "photo")]
        photo: Option<String>,
    },

    /// List workers, optionally filtered by area
    List {
        #[arg(long = "area")]
        area: Option<String>,

        /// Show inactive workers instead of active ones
        #[arg(long = "inactive")]
        inactive: bool,
    },

    /// Update a worker; only the supplied fields change
    Update {
        id: i64,

        #[arg(long = "name")]
        name: Option<String>,

        #[arg(long = "email")]
        email: Option<String>,

        #[arg(long = "phone")]
        phone: Option<String>,

        #[arg(long = "area")]
        area: Option<String>,

        #[arg(long = "photo")]
        photo: Option<String>,

        /// New status: active or inactive
        #[arg(long = "status")]
        status: Option<String>,
    },

    /// Delete a worker (soft by default: status becomes inactive)
    Del {
        id: i64,

        /// Permanently remove the worker and all its hour assignments
        #[arg(long = "hard")]
        hard: bool,

        /// Skip the confirmation prompt
        #[arg(long = "yes")]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum RubroAction {
    /// Add a new rubro
    Add {
        name: String,

        #[arg(long = "desc")]
        desc: Option<String>,
    },

    /// List rubros (active only unless --all)
    List {
        #[arg(long = "all")]
        all: bool,
    },

    /// Update a rubro; only the supplied fields change
    Update {
        id: i64,

        #[arg(long = "name")]
        name: Option<String>,

        #[arg(long = "desc")]
        desc: Option<String>,

        #[arg(long = "active")]
        active: Option<bool>,
    },

    /// Deactivate a rubro (the only removal path)
    Del { id: i64 },
}

#[derive(Subcommand)]
pub enum HoursAction {
    /// Assign hours to (worker, rubro, year); re-assigning overwrites
    Assign {
        worker_id: i64,
        rubro_id: i64,
        hours: f64,

        /// Year of the assignment (defaults to the current year)
        #[arg(long = "year")]
        year: Option<i32>,
    },

    /// Show a worker's hours per rubro plus the total
    Show {
        worker_id: i64,

        #[arg(long = "year")]
        year: Option<i32>,
    },

    /// Roll up total hours and rubro count per worker in an area
    Area {
        area: String,

        #[arg(long = "year")]
        year: Option<i32>,
    },

    /// List active workers whose total exceeds a limit
    Overlimit {
        limit: f64,

        #[arg(long = "year")]
        year: Option<i32>,
    },
}
