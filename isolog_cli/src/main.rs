use clap::{Parser, Subcommand};
use isolog_core::view::{self, ViewEntry};
use isolog_core::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use uuid::Uuid;

/// Entries shown on the home screen
const HOME_RECENT: usize = 5;

#[derive(Parser)]
#[command(name = "isolog")]
#[command(about = "Personal workout log", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in (any non-empty email and password is accepted)
    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Sign out and forget the session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Log a workout
    Log {
        /// Gym or location name
        #[arg(long)]
        gym: Option<String>,

        /// Chest, Back, Legs, Shoulders, Arms, Core or Cardio (blank = Uncategorized)
        #[arg(long)]
        category: Option<String>,

        /// Exercise name
        #[arg(long)]
        name: Option<String>,

        /// freeweight or cable
        #[arg(long = "type", default_value = "freeweight")]
        exercise_type: String,

        /// Cable height (required for cable exercises)
        #[arg(long)]
        cable_height: Option<String>,

        /// Number of sets (values below 1 become 1)
        #[arg(long, default_value = "1")]
        sets: String,

        /// Weight; repeat once per set with --per-set-weights
        #[arg(long = "weight")]
        weights: Vec<String>,

        /// Reps; repeat once per set with --per-set-reps
        #[arg(long = "reps")]
        reps: Vec<String>,

        /// Give a separate weight for every set
        #[arg(long)]
        per_set_weights: bool,

        /// Give a separate rep count for every set
        #[arg(long)]
        per_set_reps: bool,

        /// lb or kg (defaults to the configured unit)
        #[arg(long)]
        unit: Option<String>,
    },

    /// Show workout history
    List {
        /// Filter by date (YYYY-MM-DD), category or gym
        #[arg(long, default_value = "")]
        search: String,

        /// newest or oldest
        #[arg(long)]
        sort: Option<SortOrder>,
    },

    /// Delete a workout by its position in `list` output, or by id
    Delete {
        /// 1-based position as shown by `list` with the same --search/--sort
        #[arg(required_unless_present = "id")]
        position: Option<usize>,

        #[arg(long, conflicts_with = "position")]
        id: Option<Uuid>,

        #[arg(long, default_value = "")]
        search: String,

        #[arg(long)]
        sort: Option<SortOrder>,
    },

    /// Export the history to CSV, one row per set
    Export {
        #[arg(long)]
        out: PathBuf,
    },

    /// List the workout categories
    Categories,
}

fn main() -> ExitCode {
    // Initialize logging
    isolog_core::logging::init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let storage = FileStorage::new(data_dir.join("storage"));
    tracing::debug!("Using storage at {:?}", storage.dir());

    match cli.command {
        Some(Commands::Login { email, password }) => cmd_login(storage, &config, &email, &password),
        Some(Commands::Logout) => cmd_logout(storage, &config),
        Some(Commands::Whoami) => cmd_whoami(storage, &config),
        Some(Commands::Log {
            gym,
            category,
            name,
            exercise_type,
            cable_height,
            sets,
            weights,
            reps,
            per_set_weights,
            per_set_reps,
            unit,
        }) => {
            let mut form = WorkoutForm::with_unit(config.workout.default_unit);
            form.gym_location = gym.unwrap_or_default();
            form.category = category.unwrap_or_default();
            form.name = name.unwrap_or_default();
            form.exercise_type = exercise_type;
            form.cable_height = cable_height.unwrap_or_default();
            if let Some(unit) = unit {
                form.weight_unit = unit;
            }
            form.set_same_weight(!per_set_weights);
            form.set_same_reps(!per_set_reps);
            form.set_set_count(&sets);
            form.weights = fill_slots(&weights, form.weights.len(), "weight")?;
            form.reps = fill_slots(&reps, form.reps.len(), "reps")?;

            cmd_log(storage, &config, form)
        }
        Some(Commands::List { search, sort }) => {
            let query = ViewQuery::new(search, sort.unwrap_or(config.view.default_sort));
            cmd_list(storage, &config, &query)
        }
        Some(Commands::Delete {
            position,
            id,
            search,
            sort,
        }) => {
            let query = ViewQuery::new(search, sort.unwrap_or(config.view.default_sort));
            cmd_delete(storage, &config, position, id, &query)
        }
        Some(Commands::Export { out }) => cmd_export(storage, &config, &out),
        Some(Commands::Categories) => {
            for category in Category::SELECTABLE {
                println!("{}", category);
            }
            Ok(())
        }
        // No command: home screen
        None => cmd_home(storage, &config),
    }
}

fn sessions(storage: FileStorage, config: &Config) -> SessionStore<FileStorage> {
    SessionStore::new(storage, config.auth.latency())
}

/// Gate for commands that touch workout data
fn open_store(storage: FileStorage, config: &Config) -> Result<(Session, WorkoutStore<FileStorage>)> {
    let session = sessions(storage.clone(), config).require()?;
    Ok((session, WorkoutStore::load(storage)))
}

fn cmd_login(storage: FileStorage, config: &Config, email: &str, password: &str) -> Result<()> {
    println!("Logging in...");
    let session = sessions(storage, config).sign_in(email, password)?;
    println!("✓ Logged in as {}", session.email);
    Ok(())
}

fn cmd_logout(storage: FileStorage, config: &Config) -> Result<()> {
    sessions(storage, config).sign_out()?;
    println!("✓ Logged out");
    Ok(())
}

fn cmd_whoami(storage: FileStorage, config: &Config) -> Result<()> {
    let session = sessions(storage, config).require()?;
    println!("Logged in as: {}", session.email);
    Ok(())
}

fn cmd_home(storage: FileStorage, config: &Config) -> Result<()> {
    println!("Welcome to IsoLog");

    let Some(session) = sessions(storage.clone(), config).current()? else {
        println!("Not logged in. Run `isolog login --email <EMAIL> --password <PASSWORD>`.");
        return Ok(());
    };
    println!("Logged in as: {}", session.email);

    let store = WorkoutStore::load(storage);
    let query = ViewQuery::new("", config.view.default_sort);
    let entries = view::compute(store.records(), &query);
    if entries.is_empty() {
        println!("\nNo workouts logged yet. Track one with `isolog log`.");
        return Ok(());
    }

    println!("\nRecent workouts:");
    for (position, entry) in entries.iter().take(HOME_RECENT).enumerate() {
        display_entry(position, entry, false);
    }
    if entries.len() > HOME_RECENT {
        println!("\n  ... {} more (see `isolog list`)", entries.len() - HOME_RECENT);
    }
    Ok(())
}

fn cmd_log(storage: FileStorage, config: &Config, form: WorkoutForm) -> Result<()> {
    let (_, mut store) = open_store(storage, config)?;

    let record = form.build_now()?;
    let summary = format!("{}: {}", record.category, record.name);
    let sets = record.set_count;
    store.append(record)?;

    println!("✓ Workout logged! {} ({} sets)", summary, sets);
    Ok(())
}

fn cmd_list(storage: FileStorage, config: &Config, query: &ViewQuery) -> Result<()> {
    let (_, store) = open_store(storage, config)?;
    let entries = view::compute(store.records(), query);

    if entries.is_empty() {
        if query.search.is_empty() {
            println!("No workouts logged yet.");
        } else {
            println!("No workouts match '{}'.", query.search);
        }
        return Ok(());
    }

    println!("Workout History ({} shown, {})", entries.len(), query.order);
    for (position, entry) in entries.iter().enumerate() {
        display_entry(position, entry, true);
    }
    Ok(())
}

fn cmd_delete(
    storage: FileStorage,
    config: &Config,
    position: Option<usize>,
    id: Option<Uuid>,
    query: &ViewQuery,
) -> Result<()> {
    let (_, mut store) = open_store(storage, config)?;

    let removed = match (id, position) {
        (Some(id), _) => store.remove(id)?,
        (None, Some(position)) => {
            // Positions are shown 1-based
            let index = position.checked_sub(1).ok_or_else(|| Error::IndexOutOfRange {
                index: position,
                len: view::compute(store.records(), query).len(),
            })?;
            store.remove_at(query, index).map_err(|e| match e {
                Error::IndexOutOfRange { len, .. } => Error::IndexOutOfRange {
                    index: position,
                    len,
                },
                other => other,
            })?
        }
        (None, None) => return Err(Error::Other("Give a position or --id".into())),
    };

    println!(
        "✓ Deleted {}: {} from {}",
        removed.category,
        removed.name,
        removed.date_key()
    );
    Ok(())
}

fn cmd_export(storage: FileStorage, config: &Config, out: &Path) -> Result<()> {
    let (_, store) = open_store(storage, config)?;
    let rows = export_csv(store.records(), out)?;
    println!(
        "✓ Exported {} workouts ({} sets) to {}",
        store.len(),
        rows,
        out.display()
    );
    Ok(())
}

fn display_entry(position: usize, entry: &ViewEntry<'_>, detailed: bool) {
    let record = entry.record;
    println!();
    println!(
        "  #{}  {}  {}: {}  @ {}",
        position + 1,
        record.date_key(),
        record.category,
        record.name,
        record.gym_location
    );

    match &record.cable_height {
        Some(height) => println!("      Type: {} ({})", record.exercise_type, height),
        None => println!("      Type: {}", record.exercise_type),
    }

    if detailed {
        for line in view::expand_sets(record) {
            println!(
                "      Set {}: {} reps × {} {}",
                line.set, line.reps, line.weight, line.unit
            );
        }
        println!("      id: {}", entry.id());
    } else {
        println!("      {} sets", record.set_count);
    }
}
