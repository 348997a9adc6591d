//! Shared file blob: independent store instances over one path.

use std::sync::Arc;
use std::time::Duration;

use impostor_backend::adapters::{FileRoomStorage, RoomStorage};
use impostor_backend::repos::rooms;
use impostor_backend::ErrorCode;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

fn pair() -> (TempDir, FileRoomStorage, FileRoomStorage) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("shared").join("rooms.json");
    let a = FileRoomStorage::open(&path).expect("open a");
    let b = FileRoomStorage::open(&path).expect("open b");
    (dir, a, b)
}

#[test]
fn test_rooms_round_trip_across_instances() {
    let (_dir, a, b) = pair();

    let room = rooms::create_room(&a, "Alice", 16).unwrap();
    assert_eq!(rooms::require_room(&b, &room.code).unwrap(), room);

    let joined = rooms::join_room(&b, &room.code, "Bob").unwrap();
    let seen_by_a = rooms::require_room(&a, &room.code).unwrap();
    assert_eq!(seen_by_a, joined.room);
    assert_eq!(seen_by_a.players.len(), 2);

    // Name checks see the other instance's writes
    assert_error_code_name_taken(&a, &room.code);
}

fn assert_error_code_name_taken(store: &FileRoomStorage, code: &str) {
    let err = rooms::join_room(store, code, "Bob").unwrap_err();
    assert_eq!(err.code(), ErrorCode::NameTaken);
}

#[test]
fn test_blob_layout_is_versioned_json() {
    let (dir, a, _b) = pair();
    let room = rooms::create_room_with(&a, "Alice", 1, || "QX7Z".into()).unwrap();

    let raw = std::fs::read_to_string(dir.path().join("shared").join("rooms.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["schemaVersion"], 1);
    assert_eq!(json["revision"], 1);
    assert_eq!(json["rooms"]["QX7Z"]["hostPlayerId"], room.host_player_id.as_str());
    assert_eq!(json["rooms"]["QX7Z"]["phase"], "lobby");
    assert_eq!(json["rooms"]["QX7Z"]["settings"]["impostorCount"], 1);
}

#[test]
fn test_corrupt_blob_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rooms.json");
    std::fs::write(&path, b"{ not json").unwrap();

    let err = FileRoomStorage::open(&path).err().expect("corrupt blob must fail");
    assert_eq!(err.code(), ErrorCode::DataCorruption);
}

#[test]
fn test_poll_reports_external_changes_once() {
    let (_dir, a, b) = pair();
    let mut changes = a.subscribe();

    let room = rooms::create_room(&b, "Alice", 16).unwrap();
    assert!(changes.try_recv().is_err(), "a does not see b's write yet");

    assert_eq!(a.poll_external_changes().unwrap(), vec![room.code.clone()]);
    assert_eq!(changes.try_recv().unwrap().code, room.code);

    // Nothing new
    assert!(a.poll_external_changes().unwrap().is_empty());

    // Own writes are not reported again by polling
    rooms::join_room(&a, &room.code, "Bob").unwrap();
    assert_eq!(changes.try_recv().unwrap().code, room.code);
    assert!(a.poll_external_changes().unwrap().is_empty());
}

#[tokio::test]
async fn test_watcher_notifies_until_cancelled() {
    let (_dir, a, b) = pair();
    let a = Arc::new(a);
    let mut changes = a.subscribe();
    let cancel = CancellationToken::new();
    let watcher = Arc::clone(&a).spawn_watcher(Duration::from_millis(10), cancel.clone());

    let room = rooms::create_room(&b, "Alice", 16).unwrap();
    let event = tokio::time::timeout(Duration::from_secs(5), changes.recv())
        .await
        .expect("watcher saw the change in time")
        .unwrap();
    assert_eq!(event.code, room.code);

    cancel.cancel();
    tokio::time::timeout(Duration::from_secs(5), watcher)
        .await
        .expect("watcher stops after cancel")
        .unwrap();
}

#[test]
fn test_own_write_still_reports_rooms_the_other_instance_changed() {
    let (_dir, a, b) = pair();
    let x = rooms::create_room_with(&a, "Alice", 1, || "XXXX".into()).unwrap();
    let y = rooms::create_room_with(&a, "Yara", 1, || "YYYY".into()).unwrap();
    let mut changes = a.subscribe();

    // a has not polled since b's join; its own write picks the join up
    rooms::join_room(&b, &x.code, "Bob").unwrap();
    rooms::join_room(&a, &y.code, "Zed").unwrap();

    let mut codes = Vec::new();
    while let Ok(event) = changes.try_recv() {
        codes.push(event.code);
    }
    assert_eq!(codes, vec!["XXXX".to_string(), "YYYY".to_string()]);
    assert!(a.poll_external_changes().unwrap().is_empty());
    assert_eq!(rooms::require_room(&a, "XXXX").unwrap().players.len(), 2);
}

#[test]
fn test_unchanged_room_keeps_the_blob_revision() {
    let (dir, a, b) = pair();
    let room = rooms::create_room(&a, "Alice", 16).unwrap();
    let revision = || {
        let raw = std::fs::read_to_string(dir.path().join("shared").join("rooms.json")).unwrap();
        serde_json::from_str::<serde_json::Value>(&raw).unwrap()["revision"].clone()
    };
    assert_eq!(revision(), 1);

    rooms::mutate_room(&a, &room.code, &mut |_: &mut impostor_backend::Room| Ok(())).unwrap();
    assert_eq!(revision(), 1);
    assert_eq!(b.poll_external_changes().unwrap(), vec![room.code.clone()]);

    rooms::join_room(&a, &room.code, "Bob").unwrap();
    assert_eq!(revision(), 2);
}
