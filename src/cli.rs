use clap::{Parser, Subcommand};
use std::io::{self, Write};
use thiserror::Error;

use crate::analytics;
use crate::chat;
use crate::config::Config;
use crate::models::{
    AppTheme, AppetiteEntry, Importance, JournalEntry, MealEntry, MealType, MoodEntry, PetType,
    SleepEntry, StressEntry, TodoTask, find_emotion,
};
use crate::store::{ProfileStore, StoreError};
use crate::utils;

#[derive(Parser)]
#[command(name = "moodgarden")]
#[command(about = "Personal wellness tracking: mood, stress, sleep, appetite, journal and to-dos")]
#[command(version)]
pub struct Cli {
    /// Custom storage file path, overriding the configured one
    #[arg(short, long)]
    pub storage: Option<String>,

    /// Use development mode (uses separate dev config/storage)
    #[arg(long)]
    pub dev: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Choose your companion (drives the storage namespace)
    Setup {
        /// Companion species
        #[arg(value_enum)]
        species: PetType,
        /// Companion name
        name: String,
        /// Skip the confirmation prompt when switching companions
        #[arg(long)]
        yes: bool,
    },
    /// Show the active companion profile
    Profile,
    /// Switch the color theme
    Theme {
        #[arg(value_enum)]
        theme: AppTheme,
    },
    /// Log today's mood (one or two emotions, or the plain 1-5 scale)
    Mood {
        /// Emotion label from the catalog, repeatable up to twice
        #[arg(short, long = "emotion")]
        emotions: Vec<String>,
        /// Plain 1-5 mood level instead of emotions
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=5))]
        level: Option<u8>,
        /// Entry date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// List the emotions available for mood logging
    Emotions,
    /// Log today's stress level
    Stress {
        /// Stress level, 1 (calm) to 5 (overwhelmed)
        #[arg(value_parser = clap::value_parser!(u8).range(1..=5))]
        level: u8,
        /// Comma-separated stress triggers
        #[arg(short, long, value_delimiter = ',')]
        triggers: Vec<String>,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Log last night's sleep
    Sleep {
        /// Hours slept
        hours: f32,
        /// Sleep quality, 1-5
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=5))]
        quality: u8,
        /// Bedtime (HH:MM)
        #[arg(short, long)]
        bedtime: Option<String>,
        /// Wake time (HH:MM)
        #[arg(short, long)]
        wake: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Log water intake for the day
    Water {
        /// Glasses of water
        glasses: u32,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Add a meal to the day's appetite entry
    Meal {
        #[arg(value_enum)]
        meal_type: MealType,
        /// What you ate
        description: String,
        /// Time of the meal (HH:MM, defaults to now)
        #[arg(short, long)]
        time: Option<String>,
        /// How it sat with you, 1-5
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: Option<u8>,
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Journal entries
    #[command(subcommand)]
    Journal(JournalCommands),
    /// To-do tasks
    #[command(subcommand)]
    Todo(TodoCommands),
    /// Trends and aggregates across all trackers
    Insights,
    /// Today's entries at a glance (default when no command is given)
    Today,
    /// Suggestions based on today's entries
    Tips,
    /// Month grid of days with entries
    Calendar {
        /// Month to show (YYYY-MM, defaults to the current month)
        month: Option<String>,
    },
    /// Talk to the support assistant
    Chat {
        /// A single message; omit it to start an interactive conversation
        message: Option<String>,
    },
    /// Manage the chat API credential
    #[command(subcommand)]
    ApiKey(ApiKeyCommands),
    /// Wipe all tracker data (preferences are kept)
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum JournalCommands {
    /// Write a new journal entry
    Add {
        title: String,
        content: String,
        /// Mood while writing, 1-5
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=5))]
        mood: Option<u8>,
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List journal entries, newest first
    List,
    /// Delete a journal entry by id (a unique prefix is enough)
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum TodoCommands {
    /// Add a task
    Add {
        title: String,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long, value_enum, default_value = "medium")]
        importance: Importance,
    },
    /// List tasks
    List,
    /// Mark a task completed
    Done { id: String },
    /// Reopen a completed task
    Reopen { id: String },
    /// Delete a task by id (a unique prefix is enough)
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum ApiKeyCommands {
    /// Store the API key (kept in cleartext in local storage)
    Set { key: String },
    /// Remove the stored key
    Clear,
    /// Show whether a key is configured
    Status,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Storage error: {0}")]
    StoreError(#[from] StoreError),
    #[error("Failed to parse date: {0}")]
    DateParseError(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("Failed to read input: {0}")]
    IoError(#[from] io::Error),
}

/// Dispatch a parsed command against the profile store
pub fn run(command: Commands, store: &mut ProfileStore, config: &Config) -> Result<(), CliError> {
    match command {
        Commands::Setup { species, name, yes } => handle_setup(species, name, yes, store),
        Commands::Profile => handle_profile(store),
        Commands::Theme { theme } => handle_theme(theme, store),
        Commands::Mood {
            emotions,
            level,
            date,
            notes,
        } => handle_mood(emotions, level, date, notes, store),
        Commands::Emotions => handle_emotions(),
        Commands::Stress {
            level,
            triggers,
            date,
            notes,
        } => handle_stress(level, triggers, date, notes, store),
        Commands::Sleep {
            hours,
            quality,
            bedtime,
            wake,
            date,
            notes,
        } => handle_sleep(hours, quality, bedtime, wake, date, notes, store),
        Commands::Water {
            glasses,
            date,
            notes,
        } => handle_water(glasses, date, notes, store),
        Commands::Meal {
            meal_type,
            description,
            time,
            rating,
            date,
        } => handle_meal(meal_type, description, time, rating, date, store),
        Commands::Journal(cmd) => handle_journal(cmd, store),
        Commands::Todo(cmd) => handle_todo(cmd, store),
        Commands::Insights => handle_insights(store),
        Commands::Today => handle_today(store),
        Commands::Tips => handle_tips(store),
        Commands::Calendar { month } => handle_calendar(month, store),
        Commands::Chat { message } => handle_chat(message, store, config),
        Commands::ApiKey(cmd) => handle_api_key(cmd, store),
        Commands::Reset { yes } => handle_reset(yes, store),
    }
}

/// Validate an optional YYYY-MM-DD argument, defaulting to today
fn entry_date(date: Option<String>) -> Result<String, CliError> {
    match date {
        Some(date_str) => {
            utils::parse_date(&date_str).map_err(|e| {
                CliError::DateParseError(format!("Invalid date format '{}': {}", date_str, e))
            })?;
            Ok(date_str)
        }
        None => Ok(utils::today_string()),
    }
}

/// Require a selected companion before touching tracker data
fn require_profile(store: &ProfileStore) -> Result<(), CliError> {
    if store.has_profile() {
        return Ok(());
    }
    Err(CliError::InvalidInput(
        "No companion selected yet. Run `moodgarden setup <cat|dog> <name>` first.".to_string(),
    ))
}

fn confirm(prompt: &str, assume_yes: bool) -> Result<bool, CliError> {
    if assume_yes {
        return Ok(true);
    }
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes"
    ))
}

/// Leading id characters shown in listings; enough to disambiguate uuids
fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

/// Resolve a (possibly abbreviated) id against the ids in a collection
fn resolve_id<'a>(
    ids: impl Iterator<Item = &'a str>,
    needle: &str,
) -> Result<String, CliError> {
    let matches: Vec<&str> = ids.filter(|id| id.starts_with(needle)).collect();
    match matches.as_slice() {
        [id] => Ok((*id).to_string()),
        [] => Err(CliError::InvalidInput(format!(
            "No entry matches id '{}'",
            needle
        ))),
        _ => Err(CliError::InvalidInput(format!(
            "Id '{}' is ambiguous, give more characters",
            needle
        ))),
    }
}

fn handle_setup(
    species: PetType,
    name: String,
    assume_yes: bool,
    store: &mut ProfileStore,
) -> Result<(), CliError> {
    if name.trim().is_empty() {
        return Err(CliError::InvalidInput(
            "Companion name cannot be empty".to_string(),
        ));
    }

    let prefs = store.preferences();
    let switching = prefs.has_selected_pet()
        && (prefs.pet_type != Some(species) || prefs.pet_name != name);
    if switching {
        let prompt = format!(
            "Switch companion from {} to {}? Data logged so far stays with the old companion.",
            prefs.pet_name, name
        );
        if !confirm(&prompt, assume_yes)? {
            println!("Keeping current companion.");
            return Ok(());
        }
    }

    store.set_profile(species, name.clone())?;
    println!("Your {} companion {} is ready to grow with you 🌱", species.as_str(), name);
    Ok(())
}

fn handle_profile(store: &ProfileStore) -> Result<(), CliError> {
    let prefs = store.preferences();
    match (&prefs.pet_type, prefs.has_selected_pet()) {
        (Some(species), true) => {
            println!("Companion: {} ({})", prefs.pet_name, species.as_str());
            println!(
                "Theme: {}",
                match prefs.theme {
                    AppTheme::Light => "light",
                    AppTheme::Dark => "dark",
                }
            );
        }
        _ => println!("No companion selected yet. Run `moodgarden setup <cat|dog> <name>`."),
    }
    Ok(())
}

fn handle_theme(theme: AppTheme, store: &mut ProfileStore) -> Result<(), CliError> {
    store.set_theme(theme)?;
    println!(
        "Theme set to {}",
        match theme {
            AppTheme::Light => "light",
            AppTheme::Dark => "dark",
        }
    );
    Ok(())
}

fn handle_mood(
    emotion_labels: Vec<String>,
    level: Option<u8>,
    date: Option<String>,
    notes: Option<String>,
    store: &ProfileStore,
) -> Result<(), CliError> {
    require_profile(store)?;

    if emotion_labels.is_empty() && level.is_none() {
        return Err(CliError::InvalidInput(
            "Give at least one --emotion or a --level. See `moodgarden emotions`.".to_string(),
        ));
    }
    if emotion_labels.len() > MoodEntry::MAX_EMOTIONS {
        return Err(CliError::InvalidInput(format!(
            "At most {} emotions per entry",
            MoodEntry::MAX_EMOTIONS
        )));
    }

    let mut emotions = Vec::new();
    for label in &emotion_labels {
        let emotion = find_emotion(label).ok_or_else(|| {
            CliError::InvalidInput(format!(
                "Unknown emotion '{}'. See `moodgarden emotions` for the catalog.",
                label
            ))
        })?;
        emotions.push(emotion);
    }

    let date = entry_date(date)?;
    let mut entry = MoodEntry::new(date.clone(), emotions, notes);
    entry.mood = level;
    store.upsert_entry(entry)?;

    println!("Mood saved for {}", date);
    Ok(())
}

fn handle_emotions() -> Result<(), CliError> {
    use crate::models::{EmotionColor, emotion_catalog};
    let groups = [
        (EmotionColor::Yellow, "High energy, pleasant"),
        (EmotionColor::Red, "High energy, unpleasant"),
        (EmotionColor::Green, "Low energy, pleasant"),
        (EmotionColor::Blue, "Low energy, unpleasant"),
        (EmotionColor::Gray, "Neutral"),
    ];
    let catalog = emotion_catalog();
    for (color, heading) in groups {
        println!("{}:", heading);
        for e in catalog.iter().filter(|e| e.color == color) {
            println!("  {} {}", e.emoji, e.label);
        }
    }
    Ok(())
}

fn handle_stress(
    level: u8,
    triggers: Vec<String>,
    date: Option<String>,
    notes: Option<String>,
    store: &ProfileStore,
) -> Result<(), CliError> {
    require_profile(store)?;
    let date = entry_date(date)?;
    let triggers = triggers
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    store.upsert_entry(StressEntry::new(date.clone(), level, triggers, notes))?;
    println!("Stress level {} saved for {}", level, date);
    Ok(())
}

fn handle_sleep(
    hours: f32,
    quality: u8,
    bedtime: Option<String>,
    wake: Option<String>,
    date: Option<String>,
    notes: Option<String>,
    store: &ProfileStore,
) -> Result<(), CliError> {
    require_profile(store)?;
    if hours < 0.0 || hours.is_nan() {
        return Err(CliError::InvalidInput(
            "Hours slept must be a non-negative number".to_string(),
        ));
    }
    for time in [&bedtime, &wake].into_iter().flatten() {
        if !utils::is_valid_time(time) {
            return Err(CliError::InvalidInput(format!(
                "'{}' is not a valid HH:MM time",
                time
            )));
        }
    }

    let date = entry_date(date)?;
    let mut entry = SleepEntry::new(date.clone(), hours, quality);
    entry.bedtime = bedtime;
    entry.wake_time = wake;
    entry.notes = notes;
    store.upsert_entry(entry)?;
    println!("Sleep ({}h, quality {}) saved for {}", hours, quality, date);
    Ok(())
}

fn handle_water(
    glasses: u32,
    date: Option<String>,
    notes: Option<String>,
    store: &ProfileStore,
) -> Result<(), CliError> {
    require_profile(store)?;
    let date = entry_date(date)?;

    // Carry existing meals over; the new water count replaces the old one
    let existing = store.load_collection::<AppetiteEntry>()?;
    let (meals, carried_notes) = match existing.iter().find(|e| e.date == date) {
        Some(entry) => (entry.meals.clone(), entry.notes.clone()),
        None => (Vec::new(), None),
    };
    let entry = AppetiteEntry::new(date.clone(), glasses, meals, notes.or(carried_notes));
    store.upsert_entry(entry)?;
    println!(
        "{} {} of water saved for {}",
        glasses,
        if glasses == 1 { "glass" } else { "glasses" },
        date
    );
    Ok(())
}

fn handle_meal(
    meal_type: MealType,
    description: String,
    time: Option<String>,
    rating: Option<u8>,
    date: Option<String>,
    store: &ProfileStore,
) -> Result<(), CliError> {
    require_profile(store)?;
    let date = entry_date(date)?;
    let time = match time {
        Some(time) => {
            if !utils::is_valid_time(&time) {
                return Err(CliError::InvalidInput(format!(
                    "'{}' is not a valid HH:MM time",
                    time
                )));
            }
            time
        }
        None => chrono::Local::now().format("%H:%M").to_string(),
    };

    // Append to the day's entry, carrying its water count and other meals
    let existing = store.load_collection::<AppetiteEntry>()?;
    let (water, mut meals, notes) = match existing.iter().find(|e| e.date == date) {
        Some(entry) => (entry.water_intake, entry.meals.clone(), entry.notes.clone()),
        None => (0, Vec::new(), None),
    };
    meals.push(MealEntry::new(time, meal_type, description, rating));
    let meal_count = meals.len();
    store.upsert_entry(AppetiteEntry::new(date.clone(), water, meals, notes))?;
    println!("Meal saved, {} logged for {}", meal_count, date);
    Ok(())
}

fn handle_journal(command: JournalCommands, store: &ProfileStore) -> Result<(), CliError> {
    require_profile(store)?;
    match command {
        JournalCommands::Add {
            title,
            content,
            mood,
            date,
        } => {
            let date = entry_date(date)?;
            let entry = JournalEntry::new(date, title, content, mood);
            let id = entry.id.clone();
            store.add_journal(entry)?;
            println!("Journal entry created (id: {})", short_id(&id));
        }
        JournalCommands::List => {
            let mut entries = store.load_collection::<JournalEntry>()?;
            if entries.is_empty() {
                println!("No journal entries yet.");
                return Ok(());
            }
            entries.sort_by(|a, b| b.date.cmp(&a.date));
            for entry in &entries {
                let mood = entry
                    .mood
                    .map(|m| format!(" (mood {})", m))
                    .unwrap_or_default();
                println!("{}  {}  {}{}", short_id(&entry.id), entry.date, entry.title, mood);
            }
        }
        JournalCommands::Delete { id } => {
            let entries = store.load_collection::<JournalEntry>()?;
            let full_id = resolve_id(entries.iter().map(|e| e.id.as_str()), &id)?;
            store.delete_journal(&full_id)?;
            println!("Journal entry deleted");
        }
    }
    Ok(())
}

fn handle_todo(command: TodoCommands, store: &ProfileStore) -> Result<(), CliError> {
    require_profile(store)?;
    match command {
        TodoCommands::Add {
            title,
            description,
            importance,
        } => {
            let task = TodoTask::new(title, description, importance);
            let id = task.id.clone();
            store.add_todo(task)?;
            println!("Task created (id: {})", short_id(&id));
        }
        TodoCommands::List => {
            let tasks = store.load_collection::<TodoTask>()?;
            if tasks.is_empty() {
                println!("No tasks yet.");
                return Ok(());
            }
            for task in &tasks {
                let marker = if task.completed { "x" } else { " " };
                let importance = match task.importance {
                    Importance::Low => "low",
                    Importance::Medium => "medium",
                    Importance::High => "high",
                };
                println!(
                    "[{}] {}  {}  ({})",
                    marker,
                    short_id(&task.id),
                    task.title,
                    importance
                );
            }
        }
        TodoCommands::Done { id } => {
            let tasks = store.load_collection::<TodoTask>()?;
            let full_id = resolve_id(tasks.iter().map(|t| t.id.as_str()), &id)?;
            if let Some(task) = store.set_todo_completed(&full_id, true)? {
                println!(
                    "Completed '{}' on {}",
                    task.title,
                    task.completed_at.as_deref().unwrap_or("?")
                );
            }
        }
        TodoCommands::Reopen { id } => {
            let tasks = store.load_collection::<TodoTask>()?;
            let full_id = resolve_id(tasks.iter().map(|t| t.id.as_str()), &id)?;
            if let Some(task) = store.set_todo_completed(&full_id, false)? {
                println!("Reopened '{}'", task.title);
            }
        }
        TodoCommands::Delete { id } => {
            let tasks = store.load_collection::<TodoTask>()?;
            let full_id = resolve_id(tasks.iter().map(|t| t.id.as_str()), &id)?;
            store.delete_todo(&full_id)?;
            println!("Task deleted");
        }
    }
    Ok(())
}

fn format_average(value: f64) -> String {
    if value > 0.0 {
        format!("{:.1}", value)
    } else {
        "—".to_string()
    }
}

fn handle_insights(store: &ProfileStore) -> Result<(), CliError> {
    require_profile(store)?;
    let today = utils::today();
    let moods = store.load_collection::<MoodEntry>()?;
    let stresses = store.load_collection::<StressEntry>()?;
    let sleeps = store.load_collection::<SleepEntry>()?;
    let journals = store.load_collection::<JournalEntry>()?;

    if moods.is_empty() && stresses.is_empty() && sleeps.is_empty() && journals.is_empty() {
        println!("No data yet. Start tracking to see insights.");
        return Ok(());
    }

    println!("Average mood:    {}", format_average(analytics::average_mood(&moods)));
    println!("Average stress:  {}", format_average(analytics::average_stress(&stresses)));
    println!(
        "Average sleep:   {}",
        format_average(analytics::average_sleep_hours(&sleeps))
    );
    println!("Day streak:      {}", analytics::tracking_streak(&moods, today));
    println!("Journal entries: {}", journals.len());

    let dist = analytics::mood_distribution(&moods);
    let total: u32 = dist.iter().sum();
    if total > 0 {
        println!("\nMood distribution:");
        let labels = ["Poor", "Not Great", "Okay", "Good", "Excellent"];
        for (i, (count, label)) in dist.iter().zip(labels).enumerate() {
            let bar = "#".repeat((*count * 20 / total.max(1)) as usize);
            println!("  {} {:9}  {:3}  {}", i + 1, label, count, bar);
        }
    }

    let month = analytics::thirty_day_series(&moods, today);
    if month.iter().any(|d| d.mood.is_some()) {
        println!("\n30-day trend (1-5, · = no entry):");
        let line: String = month
            .iter()
            .map(|d| match d.mood {
                Some(level) => char::from_digit(level as u32, 10).unwrap_or('·'),
                None => '·',
            })
            .collect();
        println!("  {}", line);
    }

    let week = analytics::weekly_series(&moods, today);
    if week.iter().any(|d| d.mood.is_some()) {
        println!("\nThis week:");
        for day in &week {
            let mood = day
                .mood
                .map(|m| m.to_string())
                .unwrap_or_else(|| "—".to_string());
            println!("  {}  {}", day.date.format("%a"), mood);
        }
    }

    let points = analytics::scatter_points(&moods);
    if !points.is_empty() {
        use analytics::Quadrant;
        let count = |q: Quadrant| points.iter().filter(|p| p.quadrant == q).count();
        println!("\nEmotion quadrants:");
        println!("  High energy, pleasant:    {}", count(Quadrant::HighEnergyPleasant));
        println!("  High energy, unpleasant:  {}", count(Quadrant::HighEnergyUnpleasant));
        println!("  Low energy, pleasant:     {}", count(Quadrant::LowEnergyPleasant));
        println!("  Low energy, unpleasant:   {}", count(Quadrant::LowEnergyUnpleasant));
        println!("  Neutral:                  {}", count(Quadrant::Neutral));
    }

    Ok(())
}

fn handle_today(store: &ProfileStore) -> Result<(), CliError> {
    require_profile(store)?;
    let today = utils::today();
    let moods = store.load_collection::<MoodEntry>()?;
    let stresses = store.load_collection::<StressEntry>()?;
    let sleeps = store.load_collection::<SleepEntry>()?;
    let appetites = store.load_collection::<AppetiteEntry>()?;
    let todos = store.load_collection::<TodoTask>()?;

    let summary = analytics::today_summary(&moods, &stresses, &sleeps, &appetites, &todos, today);

    println!("Today, {}:", today.format("%Y-%m-%d"));
    match &summary.mood {
        Some(entry) => {
            let emotions: Vec<String> = entry
                .emotions
                .iter()
                .map(|e| format!("{} {}", e.emoji, e.label))
                .collect();
            if emotions.is_empty() {
                let level = analytics::mood_level(entry)
                    .map(|l| l.to_string())
                    .unwrap_or_else(|| "—".to_string());
                println!("  Mood:     level {}", level);
            } else {
                println!("  Mood:     {}", emotions.join(", "));
            }
        }
        None => println!("  Mood:     not logged"),
    }
    match &summary.stress {
        Some(entry) => println!("  Stress:   level {}", entry.stress_level),
        None => println!("  Stress:   not logged"),
    }
    match &summary.sleep {
        Some(entry) => println!("  Sleep:    {}h, quality {}", entry.hours, entry.quality),
        None => println!("  Sleep:    not logged"),
    }
    match &summary.appetite {
        Some(entry) => println!(
            "  Appetite: {} glasses of water, {} meals",
            entry.water_intake,
            entry.meals.len()
        ),
        None => println!("  Appetite: not logged"),
    }
    println!("  To-dos:   {} open", summary.open_todos);
    Ok(())
}

fn handle_tips(store: &ProfileStore) -> Result<(), CliError> {
    require_profile(store)?;
    let today = utils::today();
    let today_str = utils::today_string();
    let moods = store.load_collection::<MoodEntry>()?;
    let stresses = store.load_collection::<StressEntry>()?;
    let sleeps = store.load_collection::<SleepEntry>()?;
    let appetites = store.load_collection::<AppetiteEntry>()?;
    let journals = store.load_collection::<JournalEntry>()?;

    let tips = analytics::mindful_tips(
        analytics::entry_on(&moods, today),
        analytics::entry_on(&stresses, today),
        analytics::entry_on(&sleeps, today),
        analytics::entry_on(&appetites, today),
        journals.iter().any(|j| j.date == today_str),
        today,
    );

    println!("Suggestions based on today's entries:");
    for tip in &tips {
        println!("  {}", tip);
    }
    println!();
    println!("General guidance only. For professional support: https://www2.hse.ie/mental-health/");
    Ok(())
}

fn handle_calendar(month: Option<String>, store: &ProfileStore) -> Result<(), CliError> {
    use chrono::Datelike;

    require_profile(store)?;
    let today = utils::today();
    let first = match &month {
        Some(raw) => utils::parse_date(&format!("{}-01", raw)).map_err(|e| {
            CliError::DateParseError(format!("Invalid month '{}' (expected YYYY-MM): {}", raw, e))
        })?,
        None => today.with_day(1).unwrap_or(today),
    };

    let moods = store.load_collection::<MoodEntry>()?;
    let stresses = store.load_collection::<StressEntry>()?;
    let sleeps = store.load_collection::<SleepEntry>()?;
    let appetites = store.load_collection::<AppetiteEntry>()?;
    let logged: std::collections::HashSet<&str> = moods
        .iter()
        .map(|e| e.date.as_str())
        .chain(stresses.iter().map(|e| e.date.as_str()))
        .chain(sleeps.iter().map(|e| e.date.as_str()))
        .chain(appetites.iter().map(|e| e.date.as_str()))
        .collect();

    println!("{}", first.format("%B %Y"));
    println!(" Mo  Tu  We  Th  Fr  Sa  Su");
    for week in analytics::month_weeks(first.year(), first.month()) {
        let row: String = week
            .iter()
            .map(|cell| match cell {
                Some(day) => {
                    let key = day.format("%Y-%m-%d").to_string();
                    let marker = if logged.contains(key.as_str()) { '*' } else { ' ' };
                    format!("{:>3}{}", day.day(), marker)
                }
                None => "    ".to_string(),
            })
            .collect();
        println!("{}", row);
    }
    println!();
    println!("  * day with entries");
    Ok(())
}

fn handle_chat(
    message: Option<String>,
    store: &ProfileStore,
    config: &Config,
) -> Result<(), CliError> {
    let api_key = store.api_key()?;
    let mut session = chat::ChatSession::new(config.chat.clone(), api_key);

    if let Some(message) = message {
        println!("{}", session.send(&message));
        return Ok(());
    }

    println!("{}", chat::GREETING);
    println!("(type 'exit' or press Ctrl-D to end the conversation)");
    loop {
        print!("\n> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            break;
        }
        println!("\n{}", session.send(input));
    }
    Ok(())
}

fn handle_api_key(command: ApiKeyCommands, store: &ProfileStore) -> Result<(), CliError> {
    match command {
        ApiKeyCommands::Set { key } => {
            if key.trim().is_empty() {
                return Err(CliError::InvalidInput("API key cannot be empty".to_string()));
            }
            store.set_api_key(&key)?;
            println!("API key stored. Note: it is kept in cleartext in local storage.");
        }
        ApiKeyCommands::Clear => {
            store.clear_api_key()?;
            println!("API key removed. Chat will use the built-in replies.");
        }
        ApiKeyCommands::Status => match store.api_key()? {
            Some(_) => println!("An API key is configured."),
            None => println!("No API key configured; chat uses the built-in replies."),
        },
    }
    Ok(())
}

fn handle_reset(assume_yes: bool, store: &ProfileStore) -> Result<(), CliError> {
    let prompt = "This wipes all tracked data for every companion. Continue?";
    if !confirm(prompt, assume_yes)? {
        println!("Nothing was deleted.");
        return Ok(());
    }
    let removed = store.reset_data()?;
    println!("Done, {} storage entries removed.", removed);
    Ok(())
}
