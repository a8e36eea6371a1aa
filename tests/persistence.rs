use tempfile::tempdir;

use moodgarden::models::{Importance, MoodEntry, PetType, TodoTask};
use moodgarden::{KvStore, ProfileStore};

fn open_store(path: &std::path::Path) -> ProfileStore {
    let kv = KvStore::new(path.to_str().unwrap()).unwrap();
    ProfileStore::new(kv).unwrap()
}

#[test]
fn data_survives_closing_and_reopening_the_store() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("garden.db");

    {
        let mut store = open_store(&db_path);
        store.set_profile(PetType::Cat, "Tom".into()).unwrap();
        store
            .upsert_entry(MoodEntry::new("2024-01-01".into(), vec![], None))
            .unwrap();
        store
            .add_todo(TodoTask::new("repot the fern".into(), None, Importance::Low))
            .unwrap();
    }

    let store = open_store(&db_path);
    assert_eq!(store.preferences().pet_name, "Tom");
    assert_eq!(store.load_collection::<MoodEntry>().unwrap().len(), 1);
    assert_eq!(store.load_collection::<TodoTask>().unwrap().len(), 1);
}

#[test]
fn reopened_store_keeps_profiles_isolated() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("garden.db");

    {
        let mut store = open_store(&db_path);
        store.set_profile(PetType::Cat, "Tom".into()).unwrap();
        store
            .upsert_entry(MoodEntry::new("2024-01-01".into(), vec![], None))
            .unwrap();
        store.set_profile(PetType::Dog, "Rex".into()).unwrap();
    }

    // Reopening picks up the last active profile, whose namespace is empty
    let store = open_store(&db_path);
    assert_eq!(store.preferences().pet_name, "Rex");
    assert!(store.load_collection::<MoodEntry>().unwrap().is_empty());
}

#[test]
fn missing_parent_directories_are_created() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("nested").join("deep").join("garden.db");
    let store = open_store(&db_path);
    assert!(!store.has_profile());
    assert!(db_path.exists());
}
