pub mod analytics;
pub mod chat;
pub mod cli;
pub mod config;
pub mod models;
pub mod store;
pub mod utils;

pub use config::Config;
pub use models::{
    AppetiteEntry, JournalEntry, MoodEntry, SleepEntry, StressEntry, TodoTask, UserPreferences,
};
pub use store::{KvStore, ProfileStore};
pub use utils::Profile;
