use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use gravida_core::*;
use gravida_core::sync::IdentityProvider;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gravida")]
#[command(about = "Pregnancy weight and calorie tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the dashboard (default)
    Dashboard,

    /// Manage weight entries
    Weight {
        #[command(subcommand)]
        action: WeightAction,
    },

    /// Manage meal entries
    Meal {
        #[command(subcommand)]
        action: MealAction,
    },

    /// Show or edit the profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Export chart series for an external renderer
    Chart {
        /// Output format (json, csv)
        #[arg(long, default_value = "json")]
        format: String,

        /// Write to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Reconcile local state with the remote document store
    Sync {
        /// User id; when omitted, logs in via the configured identity provider
        #[arg(long)]
        user: Option<String>,

        /// Override the configured sync endpoint
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// Delete all recorded data
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,

        /// Also clear this user's remote document
        #[arg(long)]
        user: Option<String>,

        /// Override the configured sync endpoint
        #[arg(long)]
        endpoint: Option<String>,
    },
}

#[derive(Subcommand)]
enum WeightAction {
    /// Record a weight measurement
    Add {
        /// Weight in kg
        #[arg(long)]
        value: f64,

        /// Measurement date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Measurement source (home, clinic)
        #[arg(long, default_value = "home")]
        source: String,

        /// Free-form note
        #[arg(long)]
        note: Option<String>,
    },

    /// List weight entries, newest first
    List,

    /// Remove a weight entry by id
    Rm { id: i64 },
}

#[derive(Subcommand)]
enum MealAction {
    /// Record a meal
    Add {
        /// Meal slot (breakfast, lunch, dinner, snack)
        #[arg(long)]
        slot: String,

        /// What was eaten
        #[arg(long)]
        name: String,

        /// Calories (kcal)
        #[arg(long)]
        calories: u32,

        /// Meal date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// List meals for a day with the daily total
    List {
        /// Day to list (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Remove a meal entry by id
    Rm { id: i64 },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Show the current profile
    Show,

    /// Update profile fields
    Set {
        /// Height in cm
        #[arg(long)]
        height: Option<f64>,

        /// Pre-pregnancy weight in kg
        #[arg(long)]
        start_weight: Option<f64>,

        /// Last-menstrual-period date (YYYY-MM-DD)
        #[arg(long, conflicts_with = "due_date")]
        lmp: Option<String>,

        /// Due date; the LMP is derived as due date - 280 days
        #[arg(long)]
        due_date: Option<String>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    gravida_core::logging::init();

    let cli = Cli::parse();

    // Determine data directory
    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let state_path = data_dir.join(STATE_FILE);

    let today = chrono::Local::now().date_naive();
    let now_ms = chrono::Utc::now().timestamp_millis();

    match cli.command {
        Some(Commands::Dashboard) | None => cmd_dashboard(&state_path, today),
        Some(Commands::Weight { action }) => cmd_weight(&state_path, action, today, now_ms),
        Some(Commands::Meal { action }) => cmd_meal(&state_path, action, today, now_ms),
        Some(Commands::Profile { action }) => cmd_profile(&state_path, action),
        Some(Commands::Chart { format, out }) => cmd_chart(&state_path, &format, out),
        Some(Commands::Sync { user, endpoint }) => cmd_sync(&state_path, &config, user, endpoint),
        Some(Commands::Reset {
            yes,
            user,
            endpoint,
        }) => cmd_reset(&state_path, &config, yes, user, endpoint),
    }
}

fn cmd_dashboard(state_path: &std::path::Path, today: NaiveDate) -> Result<()> {
    let state = TrackerState::load(state_path)?;
    display_dashboard(&Dashboard::build(&state, today));
    Ok(())
}

fn cmd_weight(
    state_path: &std::path::Path,
    action: WeightAction,
    today: NaiveDate,
    now_ms: i64,
) -> Result<()> {
    match action {
        WeightAction::Add {
            value,
            date,
            source,
            note,
        } => {
            let date = parse_date_or(date, today)?;
            let source = parse_source(&source)?;

            let state = TrackerState::update(state_path, |state| {
                let entry = WeightEntry {
                    id: state.next_entry_id(now_ms),
                    date,
                    weight_kg: value,
                    source,
                    note: note.clone().filter(|n| !n.is_empty()),
                };
                state.add_weight(entry);
                Ok(())
            })?;

            println!("✓ Weight entry saved");
            println!();
            display_dashboard(&Dashboard::build(&state, today));
        }

        WeightAction::List => {
            let state = TrackerState::load(state_path)?;
            if state.weights.is_empty() {
                println!("No weight entries yet.");
                return Ok(());
            }

            // Newest first for reading; storage stays date-ascending
            for w in state.weights.iter().rev() {
                let week = clock::weeks_elapsed(state.profile.lmp_date, w.date);
                println!(
                    "  [{}] {} (week {:>2}) {:6} {:>6} kg  {}",
                    w.id,
                    w.date,
                    week,
                    source_label(w.source),
                    w.weight_kg,
                    w.note.as_deref().unwrap_or("")
                );
            }
        }

        WeightAction::Rm { id } => {
            let mut removed = false;
            TrackerState::update(state_path, |state| {
                removed = state.remove_weight(id);
                Ok(())
            })?;
            if removed {
                println!("✓ Removed weight entry {}", id);
            } else {
                println!("No weight entry with id {}", id);
            }
        }
    }
    Ok(())
}

fn cmd_meal(
    state_path: &std::path::Path,
    action: MealAction,
    today: NaiveDate,
    now_ms: i64,
) -> Result<()> {
    match action {
        MealAction::Add {
            slot,
            name,
            calories,
            date,
        } => {
            let date = parse_date_or(date, today)?;
            let slot = parse_slot(&slot)?;

            let state = TrackerState::update(state_path, |state| {
                let entry = MealEntry {
                    id: state.next_entry_id(now_ms),
                    date,
                    slot,
                    name: name.clone(),
                    calories,
                };
                state.add_meal(entry);
                Ok(())
            })?;

            let total = summary::calories_on(&state.meals, date);
            println!("✓ Meal saved ({} kcal on {})", total, date);
        }

        MealAction::List { date } => {
            let date = parse_date_or(date, today)?;
            let state = TrackerState::load(state_path)?;

            let meals: Vec<_> = state.meals.iter().filter(|m| m.date == date).collect();
            println!("Meals on {}:", date);
            for m in &meals {
                println!(
                    "  [{}] {:9} {:>5} kcal  {}",
                    m.id,
                    slot_label(m.slot),
                    m.calories,
                    m.name
                );
            }
            if meals.is_empty() {
                println!("  (none)");
            }
            println!("  Total: {} kcal", summary::calories_on(&state.meals, date));
        }

        MealAction::Rm { id } => {
            let mut removed = false;
            TrackerState::update(state_path, |state| {
                removed = state.remove_meal(id);
                Ok(())
            })?;
            if removed {
                println!("✓ Removed meal entry {}", id);
            } else {
                println!("No meal entry with id {}", id);
            }
        }
    }
    Ok(())
}

fn cmd_profile(state_path: &std::path::Path, action: ProfileAction) -> Result<()> {
    match action {
        ProfileAction::Show => {
            let state = TrackerState::load(state_path)?;
            let p = &state.profile;
            println!("Height:       {} cm", p.height_cm);
            println!("Start weight: {} kg", p.start_weight_kg);
            match p.lmp_date {
                Some(lmp) => {
                    println!("LMP date:     {}", lmp);
                    println!("Due date:     {}", clock::due_date_from_lmp(lmp));
                }
                None => println!("LMP date:     not set"),
            }
        }

        ProfileAction::Set {
            height,
            start_weight,
            lmp,
            due_date,
        } => {
            TrackerState::update(state_path, |state| {
                if let Some(h) = height {
                    state.profile.height_cm = h;
                }
                if let Some(w) = start_weight {
                    state.profile.start_weight_kg = w;
                }
                if let Some(ref s) = lmp {
                    state.profile.lmp_date = Some(parse_date(s)?);
                }
                if let Some(ref s) = due_date {
                    // Work backwards from the due date
                    let due = parse_date(s)?;
                    state.profile.lmp_date = Some(clock::lmp_from_due_date(due));
                    state.profile.due_date = Some(due);
                }
                Ok(())
            })?;
            println!("✓ Profile updated");
        }
    }
    Ok(())
}

fn cmd_chart(
    state_path: &std::path::Path,
    format: &str,
    out: Option<PathBuf>,
) -> Result<()> {
    let state = TrackerState::load(state_path)?;
    let bundle = build_chart(&state);

    let mut writer: Box<dyn Write> = match &out {
        Some(path) => Box::new(std::fs::File::create(path)?),
        None => Box::new(std::io::stdout()),
    };

    match format {
        "json" => {
            let json = serde_json::to_string_pretty(&bundle)
                .map_err(gravida_core::Error::from)?;
            writeln!(writer, "{}", json)?;
        }
        "csv" => chart::write_csv(&bundle, writer)?,
        other => {
            return Err(Error::Config(format!(
                "Unknown chart format: {} (expected json or csv)",
                other
            )))
        }
    }

    if let Some(path) = out {
        println!("✓ Chart series written to {}", path.display());
    }
    Ok(())
}

fn cmd_sync(
    state_path: &std::path::Path,
    config: &Config,
    user: Option<String>,
    endpoint: Option<String>,
) -> Result<()> {
    let endpoint = match endpoint.or_else(|| config.sync.endpoint.clone()) {
        Some(e) => e,
        None => {
            return Err(Error::Config(
                "No sync endpoint configured (set [sync] endpoint or pass --endpoint)".into(),
            ))
        }
    };

    // Resolve the user id, logging in when none was given
    let user_id = match user {
        Some(id) => id,
        None => {
            let token = config.sync.token.clone().unwrap_or_default();
            let provider = HttpIdentityProvider::new(endpoint.as_str(), token);
            match provider.login() {
                Ok(identity) => {
                    println!("Signed in as {}", identity.display_name);
                    identity.user_id
                }
                Err(e) => {
                    // Login failure changes nothing locally
                    eprintln!("Login failed: {}. Local data is unchanged.", e);
                    return Ok(());
                }
            }
        }
    };

    let local_existed = state_path.exists();
    let local = TrackerState::load(state_path)?;
    let store = HttpRemoteStore::new(endpoint.as_str());

    match reconcile(local, local_existed, &user_id, &store) {
        Ok((merged, outcome)) => {
            merged.save(state_path)?;
            match outcome {
                SyncOutcome::RemoteApplied => println!("✓ Cloud data downloaded and applied"),
                SyncOutcome::LocalUploaded => println!("✓ Local data backed up to the cloud"),
                SyncOutcome::CreatedEmpty => println!("✓ New cloud document created"),
            }
        }
        Err(e) => {
            // Local state stays authoritative; no retry
            eprintln!("Sync failed: {}. Local data is unchanged.", e);
        }
    }
    Ok(())
}

fn cmd_reset(
    state_path: &std::path::Path,
    config: &Config,
    yes: bool,
    user: Option<String>,
    endpoint: Option<String>,
) -> Result<()> {
    if !yes {
        println!("This deletes every recorded entry. Re-run with --yes to confirm.");
        return Ok(());
    }

    TrackerState::default().save(state_path)?;
    println!("✓ All local data cleared");

    if let Some(user_id) = user {
        match endpoint.or_else(|| config.sync.endpoint.clone()) {
            Some(endpoint) => {
                let store = HttpRemoteStore::new(endpoint.as_str());
                match store.replace(&user_id, &TrackerState::default()) {
                    Ok(()) => println!("✓ Cloud data cleared"),
                    Err(e) => eprintln!("Failed to clear cloud data: {}", e),
                }
            }
            None => eprintln!("No sync endpoint configured; cloud data untouched."),
        }
    }
    Ok(())
}

fn display_dashboard(dash: &Dashboard) {
    println!("╭─────────────────────────────────────────╮");
    println!("│  PREGNANCY DASHBOARD");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!(
        "  Week {} + {} days ({} days total)",
        dash.age.week, dash.age.day_of_week, dash.age.days
    );
    println!(
        "  Pre-pregnancy BMI {} ({:?})",
        bmi::display_bmi(dash.bmi),
        dash.category
    );
    println!(
        "  Recommended total gain: {}-{} kg",
        dash.guideline.total_gain_kg[0], dash.guideline.total_gain_kg[1]
    );
    println!();
    match dash.last_weigh_date {
        Some(date) => println!("  Current weight: {} kg ({})", dash.current_weight_kg, date),
        None => println!("  Current weight: {} kg (start weight)", dash.current_weight_kg),
    }
    println!(
        "  Total gain:     {} kg",
        summary::format_gain(dash.total_gain_kg)
    );
    println!();
    println!("  Today's intake: {} kcal", dash.todays_calories);
    println!("  Daily target:   {} kcal", dash.calorie_target);

    if let Some(ref analysis) = dash.analysis {
        println!();
        println!("  {}", analysis);
    }
    println!();
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| Error::InvalidDate(format!("{} (expected YYYY-MM-DD)", s)))
}

fn parse_date_or(s: Option<String>, default: NaiveDate) -> Result<NaiveDate> {
    match s {
        Some(s) => parse_date(&s),
        None => Ok(default),
    }
}

fn parse_source(s: &str) -> Result<WeightSource> {
    match s.to_lowercase().as_str() {
        "home" => Ok(WeightSource::Home),
        "clinic" => Ok(WeightSource::Clinic),
        other => Err(Error::Config(format!(
            "Unknown weight source: {} (expected home or clinic)",
            other
        ))),
    }
}

fn parse_slot(s: &str) -> Result<MealSlot> {
    match s.to_lowercase().as_str() {
        "breakfast" => Ok(MealSlot::Breakfast),
        "lunch" => Ok(MealSlot::Lunch),
        "dinner" => Ok(MealSlot::Dinner),
        "snack" => Ok(MealSlot::Snack),
        other => Err(Error::Config(format!(
            "Unknown meal slot: {} (expected breakfast, lunch, dinner or snack)",
            other
        ))),
    }
}

fn source_label(source: WeightSource) -> &'static str {
    match source {
        WeightSource::Home => "home",
        WeightSource::Clinic => "clinic",
    }
}

fn slot_label(slot: MealSlot) -> &'static str {
    match slot {
        MealSlot::Breakfast => "breakfast",
        MealSlot::Lunch => "lunch",
        MealSlot::Dinner => "dinner",
        MealSlot::Snack => "snack",
    }
}
