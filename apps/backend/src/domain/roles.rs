//! Role assignment: split a roster into impostors and crew.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::rules::valid_impostor_count;
use crate::domain::state::{Player, Role};
use crate::errors::domain::{DomainError, ValidationKind};

/// Assign `impostor_count` impostors uniformly at random; everyone else is crew.
///
/// The shuffle runs over indices, so `players` keeps its join order and only
/// each player's `role` changes. On error nothing is mutated.
pub fn assign_roles<R: Rng + ?Sized>(
    players: &mut [Player],
    impostor_count: usize,
    rng: &mut R,
) -> Result<(), DomainError> {
    if !valid_impostor_count(impostor_count, players.len()) {
        return Err(DomainError::validation(
            ValidationKind::InvalidImpostorCount,
            format!(
                "impostor count must be in 1..{}, got {impostor_count}",
                players.len()
            ),
        ));
    }

    let mut order: Vec<usize> = (0..players.len()).collect();
    order.shuffle(rng);

    for (rank, idx) in order.into_iter().enumerate() {
        players[idx].role = if rank < impostor_count {
            Role::Impostor
        } else {
            Role::Crew
        };
    }
    Ok(())
}

/// Put every player back to `Unassigned`.
pub fn clear_roles(players: &mut [Player]) {
    for player in players {
        player.role = Role::Unassigned;
    }
}
