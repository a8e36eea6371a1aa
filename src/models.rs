use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils;

/// A record keyed by calendar date, eligible for upsert-by-date storage.
pub trait DatedRecord {
    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
    fn date(&self) -> &str;
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Companion species, part of the storage namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PetType {
    Cat,
    Dog,
}

impl PetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PetType::Cat => "cat",
            PetType::Dog => "dog",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AppTheme {
    Light,
    Dark,
}

impl Default for AppTheme {
    fn default() -> Self {
        AppTheme::Light
    }
}

/// Global user preferences, persisted under the `moodGarden_preferences` key
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub pet_type: Option<PetType>,
    #[serde(default)]
    pub pet_name: String,
    #[serde(default)]
    pub theme: AppTheme,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            pet_type: None,
            pet_name: String::new(),
            theme: AppTheme::Light,
        }
    }
}

impl UserPreferences {
    /// A companion profile counts as selected only when both the species
    /// and a non-blank name are set
    pub fn has_selected_pet(&self) -> bool {
        self.pet_type.is_some() && !self.pet_name.trim().is_empty()
    }
}

/// Color quadrant an emotion belongs to on the valence/arousal grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionColor {
    Yellow,
    Red,
    Green,
    Blue,
    Gray,
}

/// A single emotion on the two-axis model: valence (pleasantness, -2..=2)
/// and arousal (activation, 1..=5)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emotion {
    pub valence: i8,
    pub arousal: u8,
    pub label: String,
    pub emoji: String,
    pub color: EmotionColor,
}

fn emotion(valence: i8, arousal: u8, label: &str, emoji: &str, color: EmotionColor) -> Emotion {
    Emotion {
        valence,
        arousal,
        label: label.to_string(),
        emoji: emoji.to_string(),
        color,
    }
}

/// The fixed catalog of selectable emotions, grouped by color quadrant
pub fn emotion_catalog() -> Vec<Emotion> {
    use EmotionColor::*;
    vec![
        // High energy positive
        emotion(2, 5, "Elated", "🤩", Yellow),
        emotion(2, 4, "Excited", "😆", Yellow),
        emotion(1, 5, "Energetic", "⚡", Yellow),
        emotion(1, 4, "Happy", "😊", Yellow),
        emotion(2, 3, "Joyful", "😄", Yellow),
        emotion(1, 3, "Cheerful", "😃", Yellow),
        // High energy negative
        emotion(-2, 5, "Panicked", "😱", Red),
        emotion(-2, 4, "Angry", "😠", Red),
        emotion(-1, 5, "Anxious", "😰", Red),
        emotion(-1, 4, "Stressed", "😓", Red),
        emotion(-2, 3, "Frustrated", "😤", Red),
        emotion(-1, 3, "Worried", "😟", Red),
        emotion(-2, 2, "Irritated", "😒", Red),
        // Low energy positive
        emotion(2, 2, "Peaceful", "😌", Green),
        emotion(2, 1, "Serene", "🧘", Green),
        emotion(1, 2, "Content", "🙂", Green),
        emotion(1, 1, "Calm", "😇", Green),
        emotion(2, 3, "Relaxed", "😎", Green),
        emotion(1, 3, "Satisfied", "😊", Green),
        // Low energy negative
        emotion(-2, 2, "Depressed", "😔", Blue),
        emotion(-2, 1, "Empty", "😑", Blue),
        emotion(-1, 2, "Sad", "😢", Blue),
        emotion(-1, 1, "Tired", "😴", Blue),
        emotion(-2, 3, "Melancholy", "😞", Blue),
        emotion(-1, 3, "Lonely", "😕", Blue),
        emotion(-1, 1, "Exhausted", "😫", Blue),
        // Neutral
        emotion(0, 3, "Neutral", "😐", Gray),
        emotion(0, 2, "Indifferent", "😶", Gray),
        emotion(0, 4, "Alert", "👀", Gray),
        emotion(0, 1, "Bored", "🥱", Gray),
    ]
}

/// Look up a catalog emotion by label, case-insensitively
pub fn find_emotion(label: &str) -> Option<Emotion> {
    emotion_catalog()
        .into_iter()
        .find(|e| e.label.eq_ignore_ascii_case(label))
}

/// One mood record per calendar day. New entries carry one or two emotions;
/// entries written by older versions carry only the 1-5 `mood` scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub id: String,
    pub date: String, // YYYY-MM-DD
    #[serde(default)]
    pub emotions: Vec<Emotion>,
    /// Legacy single-scale mood (1-5), kept as written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl MoodEntry {
    /// At most two emotions are kept per entry
    pub const MAX_EMOTIONS: usize = 2;

    pub fn new(date: String, mut emotions: Vec<Emotion>, notes: Option<String>) -> Self {
        emotions.truncate(Self::MAX_EMOTIONS);
        Self {
            id: new_id(),
            date,
            emotions,
            mood: None,
            notes,
        }
    }
}

impl DatedRecord for MoodEntry {
    fn id(&self) -> &str {
        &self.id
    }
    fn set_id(&mut self, id: String) {
        self.id = id;
    }
    fn date(&self) -> &str {
        &self.date
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StressEntry {
    pub id: String,
    pub date: String,
    pub stress_level: u8, // 1-5
    #[serde(default)]
    pub triggers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl StressEntry {
    pub fn new(date: String, stress_level: u8, triggers: Vec<String>, notes: Option<String>) -> Self {
        Self {
            id: new_id(),
            date,
            stress_level,
            triggers,
            notes,
        }
    }
}

impl DatedRecord for StressEntry {
    fn id(&self) -> &str {
        &self.id
    }
    fn set_id(&mut self, id: String) {
        self.id = id;
    }
    fn date(&self) -> &str {
        &self.date
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepEntry {
    pub id: String,
    pub date: String,
    pub hours: f32,
    pub quality: u8, // 1-5
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedtime: Option<String>, // HH:MM
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wake_time: Option<String>, // HH:MM
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl SleepEntry {
    pub fn new(date: String, hours: f32, quality: u8) -> Self {
        Self {
            id: new_id(),
            date,
            hours,
            quality,
            bedtime: None,
            wake_time: None,
            notes: None,
        }
    }
}

impl DatedRecord for SleepEntry {
    fn id(&self) -> &str {
        &self.id
    }
    fn set_id(&mut self, id: String) {
        self.id = id;
    }
    fn date(&self) -> &str {
        &self.date
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealEntry {
    pub id: String,
    pub time: String, // HH:MM
    #[serde(rename = "type")]
    pub meal_type: MealType,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>, // 1-5
}

impl MealEntry {
    pub fn new(time: String, meal_type: MealType, description: String, rating: Option<u8>) -> Self {
        Self {
            id: new_id(),
            time,
            meal_type,
            description,
            rating,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppetiteEntry {
    pub id: String,
    pub date: String,
    pub water_intake: u32, // glasses
    #[serde(default)]
    pub meals: Vec<MealEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl AppetiteEntry {
    pub fn new(date: String, water_intake: u32, meals: Vec<MealEntry>, notes: Option<String>) -> Self {
        Self {
            id: new_id(),
            date,
            water_intake,
            meals,
            notes,
        }
    }
}

impl DatedRecord for AppetiteEntry {
    fn id(&self) -> &str {
        &self.id
    }
    fn set_id(&mut self, id: String) {
        self.id = id;
    }
    fn date(&self) -> &str {
        &self.date
    }
}

/// Free-form journal entry; unlike the per-day trackers, any number of
/// entries may share a date
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: String,
    pub date: String,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<u8>, // 1-5
}

impl JournalEntry {
    pub fn new(date: String, title: String, content: String, mood: Option<u8>) -> Self {
        Self {
            id: new_id(),
            date,
            title,
            content,
            mood,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoTask {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub importance: Importance,
    pub completed: bool,
    pub created_at: String, // YYYY-MM-DD
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

impl TodoTask {
    pub fn new(title: String, description: Option<String>, importance: Importance) -> Self {
        Self {
            id: new_id(),
            title,
            description,
            importance,
            completed: false,
            created_at: utils::today_string(),
            completed_at: None,
        }
    }

    /// Flip the completion flag, stamping or clearing the completion date
    /// so that `completed_at` is set exactly when `completed` is true
    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
        self.completed_at = completed.then(utils::today_string);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mood_entry_serializes_with_camel_case_wire_names() {
        let entry = StressEntry::new("2024-01-01".into(), 4, vec!["work".into()], None);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["stressLevel"], 4);
        assert_eq!(json["triggers"][0], "work");
        assert!(json.get("notes").is_none());
    }

    #[test]
    fn legacy_mood_entries_deserialize_without_emotions() {
        let json = r#"{"id":"a","date":"2024-01-01","mood":4}"#;
        let entry: MoodEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.mood, Some(4));
        assert!(entry.emotions.is_empty());
    }

    #[test]
    fn mood_entry_keeps_at_most_two_emotions() {
        let catalog = emotion_catalog();
        let entry = MoodEntry::new("2024-01-01".into(), catalog[..3].to_vec(), None);
        assert_eq!(entry.emotions.len(), 2);
    }

    #[test]
    fn todo_completion_stamps_and_clears_date() {
        let mut task = TodoTask::new("water plants".into(), None, Importance::Low);
        assert!(task.completed_at.is_none());

        task.set_completed(true);
        assert_eq!(task.completed_at.as_deref(), Some(utils::today_string().as_str()));

        task.set_completed(false);
        assert!(!task.completed);
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn meal_type_uses_lowercase_type_field() {
        let meal = MealEntry::new("08:00".into(), MealType::Breakfast, "oats".into(), Some(4));
        let json = serde_json::to_value(&meal).unwrap();
        assert_eq!(json["type"], "breakfast");
    }

    #[test]
    fn emotion_lookup_is_case_insensitive() {
        let e = find_emotion("anxious").unwrap();
        assert_eq!(e.valence, -1);
        assert_eq!(e.arousal, 5);
        assert_eq!(e.color, EmotionColor::Red);
        assert!(find_emotion("jubilant").is_none());
    }

    #[test]
    fn profile_selection_requires_species_and_name() {
        let mut prefs = UserPreferences::default();
        assert!(!prefs.has_selected_pet());
        prefs.pet_type = Some(PetType::Cat);
        assert!(!prefs.has_selected_pet());
        prefs.pet_name = "   ".into();
        assert!(!prefs.has_selected_pet());
        prefs.pet_name = "Tom".into();
        assert!(prefs.has_selected_pet());
    }
}
