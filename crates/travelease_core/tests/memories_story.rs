use std::io::Write;
use travelease_core::forms::{MemoryForm, TripForm};
use travelease_core::{
    MemoryStateRepository, PhotoRegistry, StoreError, TravelStore, ValidationError,
};

fn memory(date: &str, title: &str) -> MemoryForm {
    MemoryForm {
        date: date.to_string(),
        title: title.to_string(),
        content: format!("{title} was wonderful."),
        photo: None,
    }
}

fn trip() -> TripForm {
    TripForm {
        name: "Porto weekend".to_string(),
        destination: "Porto".to_string(),
        start_date: "2024-06-01".to_string(),
        end_date: "2024-06-03".to_string(),
        travelers: String::new(),
        traveler_names: "Ana, Rui".to_string(),
    }
}

#[test]
fn story_without_trip_fails_without_mutation() {
    let mut store = TravelStore::open(MemoryStateRepository::new()).unwrap();
    let mut photos = PhotoRegistry::new();
    store
        .save_memory(&memory("2024-06-02", "Ribeira"), &mut photos)
        .unwrap();
    let before = store.state().clone();

    let err = store.story().unwrap_err();
    assert!(matches!(err, StoreError::Validation(ValidationError::NoTrip)));
    assert_eq!(store.state(), &before);
}

#[test]
fn story_requires_at_least_one_memory() {
    let mut store = TravelStore::open(MemoryStateRepository::new()).unwrap();
    store.generate_itinerary(&trip()).unwrap();
    let err = store.story().unwrap_err();
    assert_eq!(err.as_validation(), Some(&ValidationError::NoMemories));
}

#[test]
fn story_orders_memories_by_date_stably() {
    let mut store = TravelStore::open(MemoryStateRepository::new()).unwrap();
    let mut photos = PhotoRegistry::new();
    store.generate_itinerary(&trip()).unwrap();
    for (date, title) in [
        ("2024-06-03", "Farewell dinner"),
        ("2024-06-01", "Arrival"),
        ("2024-06-03", "Last walk"),
    ] {
        store.save_memory(&memory(date, title), &mut photos).unwrap();
    }

    let story = store.story().unwrap();
    let titles: Vec<_> = story.memories.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["Arrival", "Farewell dinner", "Last walk"]);
    assert_eq!(story.trip.name, "Porto weekend");
    assert_eq!(store.state().memories[0].title, "Farewell dinner");
}

#[test]
fn incomplete_memory_is_rejected() {
    let mut store = TravelStore::open(MemoryStateRepository::new()).unwrap();
    let mut photos = PhotoRegistry::new();
    let mut form = memory("", "No date");
    let err = store.save_memory(&form, &mut photos).unwrap_err();
    assert_eq!(err.as_validation(), Some(&ValidationError::IncompleteMemory));

    form.date = "2024-06-01".to_string();
    form.content = "\n".to_string();
    assert!(store.save_memory(&form, &mut photos).is_err());
    assert!(store.state().memories.is_empty());
}

#[test]
fn photo_handle_lives_until_memory_is_deleted() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"\xFF\xD8\xFF").unwrap();

    let mut store = TravelStore::open(MemoryStateRepository::new()).unwrap();
    let mut photos = PhotoRegistry::new();
    let mut form = memory("2024-06-02", "Azulejos");
    form.photo = Some(file.path().to_path_buf());

    let id = store.save_memory(&form, &mut photos).unwrap();
    let photo = store.state().memories[0].photo.clone().unwrap();
    assert!(photo.as_str().starts_with("blob:travelease/"));
    assert_eq!(photos.resolve(&photo), Some(file.path()));

    assert!(store.delete_memory(id, &mut photos).unwrap());
    assert_eq!(photos.live_count(), 0);
    assert!(!store.delete_memory(id, &mut photos).unwrap());
}

#[test]
fn unreadable_photo_rejects_the_whole_memory() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = TravelStore::open(MemoryStateRepository::new()).unwrap();
    let mut photos = PhotoRegistry::new();
    let mut form = memory("2024-06-02", "Lost picture");
    form.photo = Some(dir.path().join("missing.jpg"));

    let err = store.save_memory(&form, &mut photos).unwrap_err();
    assert!(matches!(err, StoreError::Photo(_)));
    assert!(err.is_user_error());
    assert!(store.state().memories.is_empty());
    assert_eq!(photos.live_count(), 0);
}
