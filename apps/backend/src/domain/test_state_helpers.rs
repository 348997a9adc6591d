//! Builders for rooms in a known state.

use time::macros::datetime;
use time::OffsetDateTime;

use crate::domain::state::{GamePhase, Player, Role, Room, Vote};

pub const T0: OffsetDateTime = datetime!(2025-01-01 12:00 UTC);

/// Player ids are `p0`, `p1`, ... and names are the given names.
pub fn roster(names: &[&str]) -> Vec<Player> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| Player::new(format!("p{i}"), *name, i == 0, T0))
        .collect()
}

/// A room with the given players (first is host) and roles applied by name.
pub fn room_with_roles(names: &[&str], impostors: &[&str]) -> Room {
    let mut players = roster(names);
    let host = players.remove(0);
    let mut room = Room::new("TEST".to_string(), host, T0);
    room.players.extend(players);
    for p in &mut room.players {
        p.role = if impostors.contains(&p.name.as_str()) {
            Role::Impostor
        } else {
            Role::Crew
        };
    }
    room.settings.impostor_count = impostors.len().max(1);
    room.secret_word = Some("Pizza".to_string());
    room.hint_word = Some("Käse".to_string());
    room.phase = GamePhase::Voting;
    room
}

pub fn id_of(room: &Room, name: &str) -> String {
    room.player_by_name(name)
        .map(|p| p.id.clone())
        .unwrap_or_else(|| panic!("no player named {name}"))
}

/// Votes given as (voter name, target name) pairs, recorded in order.
pub fn cast(room: &mut Room, votes: &[(&str, &str)]) {
    for (voter, target) in votes {
        let vote = Vote {
            voter: id_of(room, voter),
            target: id_of(room, target),
        };
        room.votes.push(vote);
    }
}
