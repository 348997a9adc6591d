//! Property tests for joins.

use impostor_backend::adapters::MemoryRoomStorage;
use impostor_backend::repos::rooms;
use proptest::prelude::*;

use crate::proptest_prelude::proptest_prelude_config;

fn names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[A-Za-z]{1,12}", 1..12)
}

proptest! {
    #![proptest_config(proptest_prelude_config())]

    /// Each join adds exactly one player unless the name is taken, and never
    /// reorders or alters earlier players.
    #[test]
    fn prop_join_appends_or_conflicts(names in names()) {
        let store = MemoryRoomStorage::new();
        let room = rooms::create_room(&store, "Host", 16).unwrap();
        let mut before = room.players.clone();

        for name in names {
            let taken = before.iter().any(|p| p.name == name);
            match rooms::join_room(&store, &room.code, &name) {
                Ok(joined) => {
                    prop_assert!(!taken);
                    prop_assert_eq!(joined.room.players.len(), before.len() + 1);
                    prop_assert_eq!(&joined.room.players[..before.len()], &before[..]);
                    before = joined.room.players;
                }
                Err(err) => {
                    prop_assert!(taken);
                    prop_assert_eq!(err.code(), impostor_backend::ErrorCode::NameTaken);
                    let stored = rooms::require_room(&store, &room.code).unwrap();
                    prop_assert_eq!(&stored.players, &before);
                }
            }
        }
    }
}
