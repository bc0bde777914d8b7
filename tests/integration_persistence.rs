use indoc::indoc;
use tempfile::tempdir;

use wiw::constants::WORKSPACE_STORAGE_KEY;
use wiw::persistence::{export_json, import_workspace};
use wiw::{
    FileStorage, KeyValueStore, MemoryStorage, PersistError, Store, Theme, WindowId,
    WindowOptions, WorkspaceStorage,
};

fn storage_with(record: &str) -> WorkspaceStorage<MemoryStorage> {
    let mut backend = MemoryStorage::new();
    backend
        .set(WORKSPACE_STORAGE_KEY, record)
        .expect("memory storage accepts any value without a quota");
    WorkspaceStorage::new(backend)
}

#[test]
fn stored_zoom_is_clamped_on_load() {
    let storage = storage_with(r#"{"zoom": 99, "windows": []}"#);
    let mut store = Store::new();
    assert!(store.initialize(&storage));
    assert_eq!(store.zoom(), 1.5);
}

#[test]
fn stored_zoom_inside_range_is_not_snapped() {
    let storage = storage_with(r#"{"zoom": 0.73}"#);
    let mut store = Store::new();
    store.load(&storage);
    assert_eq!(store.zoom(), 0.73);
}

#[test]
fn missing_fields_take_defaults() {
    let storage = storage_with("{}");
    let mut store = Store::new();
    assert!(store.load(&storage));
    let ws = store.workspace();
    assert_eq!(ws.workspace_id, "default");
    assert_eq!(ws.name, "Default Workspace");
    assert_eq!(ws.zoom, 1.0);
    assert_eq!(ws.theme, Theme::Light);
    assert!(ws.windows.is_empty());
}

#[test]
fn load_rebuilds_the_stacking_counter() {
    let storage = storage_with(indoc! {r#"
        {
          "workspaceId": "default",
          "name": "Phones",
          "zoom": 0.8,
          "theme": "dark",
          "windows": [
            {"id": "win_a", "title": "A", "url": "https://a.example",
             "x": 10, "y": 20, "w": 360, "h": 640, "z": 7},
            {"id": "win_b", "title": "B", "url": "https://b.example",
             "x": 30, "y": 40, "w": 390, "h": 844, "z": 3}
          ]
        }
    "#});
    let mut store = Store::new();
    assert!(store.initialize(&storage));
    assert_eq!(store.max_z(), 7);
    assert_eq!(store.theme(), Theme::Dark);
    assert_eq!(store.take_theme_change(), Some(Theme::Dark));

    let b = WindowId::from("win_b");
    assert!(store.bring_to_front(&b));
    assert_eq!(store.window(&b).map(|w| w.z), Some(8));

    let id = store
        .add_window("c.example", WindowOptions::default())
        .expect("opened");
    assert_eq!(store.window(&id).map(|w| w.z), Some(9));
}

#[test]
fn unreadable_record_keeps_defaults() {
    let storage = storage_with("[1, 2, 3]");
    assert!(matches!(storage.try_load(), Err(PersistError::NotAnObject)));
    let mut store = Store::new();
    assert!(!store.initialize(&storage));
    assert_eq!(store.workspace(), &wiw::Workspace::default());
}

#[test]
fn save_then_load_restores_the_workspace() {
    let mut storage = WorkspaceStorage::new(MemoryStorage::new());
    let mut store = Store::new();
    let id = store
        .add_window("a.example", WindowOptions::default().with_title("A"))
        .expect("opened");
    store.set_zoom(1.25);
    store.set_theme(Theme::Dark);
    assert!(store.save(&mut storage));

    let mut restored = Store::new();
    assert!(restored.initialize(&storage));
    assert_eq!(restored.workspace(), store.workspace());
    assert_eq!(restored.max_z(), store.max_z());
    // selection is session state
    assert_eq!(restored.selected_window_id(), None);
    assert!(restored.window(&id).is_some());
}

#[test]
fn file_storage_round_trips_through_disk() {
    let dir = tempdir().expect("create temp dir");
    let data_dir = dir.path().join("nested").join("data");
    let mut storage = WorkspaceStorage::new(FileStorage::new(&data_dir));

    let mut store = Store::new();
    store
        .add_window("https://disk.example/page", WindowOptions::default())
        .expect("opened");
    assert!(store.save(&mut storage));
    assert!(storage.backend().path_for(storage.key()).exists());

    let mut again = Store::new();
    assert!(again.initialize(&storage));
    assert_eq!(again.windows().len(), 1);
    assert_eq!(again.windows()[0].url, "https://disk.example/page");

    assert!(storage.clear());
    assert!(storage.clear());
    assert!(storage.load().is_none());
}

#[test]
fn failed_save_keeps_previous_record_and_memory_state() {
    let mut storage = WorkspaceStorage::new(MemoryStorage::with_quota(600));
    let mut store = Store::new();
    assert!(store.save(&mut storage));
    let stored = storage
        .backend()
        .raw(WORKSPACE_STORAGE_KEY)
        .map(str::to_string);

    for i in 0..8 {
        store
            .add_window(&format!("https://w{i}.example"), WindowOptions::default())
            .expect("opened");
    }
    assert!(!store.save(&mut storage));
    assert_eq!(
        storage.backend().raw(WORKSPACE_STORAGE_KEY).map(str::to_string),
        stored
    );
    assert_eq!(store.windows().len(), 8);
}

#[test]
fn export_is_importable_and_import_does_not_apply() {
    let mut store = Store::new();
    store
        .add_window("a.example", WindowOptions::default())
        .expect("opened");
    let json = export_json(store.workspace()).expect("serializes");
    assert!(json.contains("\n  \"workspaceId\""));

    let parsed = import_workspace(&json).expect("own export parses");
    assert_eq!(&parsed, store.workspace());

    let mut applied = Store::new();
    applied.replace_workspace(parsed);
    assert_eq!(applied.windows().len(), 1);
}

#[test]
fn fractional_refresh_interval_survives_load() {
    let storage = storage_with(indoc! {r#"
        {
          "windows": [
            {"id": "a", "url": "https://a.example",
             "x": 5, "y": 6, "w": 360, "h": 640, "z": 1, "refreshSec": 2.5}
          ]
        }
    "#});
    let mut store = Store::new();
    assert!(store.load(&storage));
    assert_eq!(store.windows().len(), 1);
    let w = &store.windows()[0];
    assert_eq!(w.refresh_sec, Some(Some(2.5)));
    assert_eq!((w.x, w.y, w.z), (5.0, 6.0, 1));
}

#[test]
fn raising_after_loading_a_huge_z_still_puts_the_window_on_top() {
    let storage = storage_with(indoc! {r#"
        {
          "windows": [
            {"id": "a", "url": "https://a.example",
             "x": 0, "y": 0, "w": 360, "h": 640, "z": 9223372036854775807},
            {"id": "b", "url": "https://b.example",
             "x": 0, "y": 0, "w": 360, "h": 640, "z": 1}
          ]
        }
    "#});
    let mut store = Store::new();
    assert!(store.initialize(&storage));
    let (a, b) = (WindowId::from("a"), WindowId::from("b"));
    assert!(store.bring_to_front(&b));
    let za = store.window(&a).map(|w| w.z).expect("a loaded");
    let zb = store.window(&b).map(|w| w.z).expect("b loaded");
    assert!(zb > za, "za={za} zb={zb}");

    let c = store
        .add_window("c.example", WindowOptions::default())
        .expect("opened");
    let zc = store.window(&c).map(|w| w.z).expect("c opened");
    assert!(zc > zb);
}
