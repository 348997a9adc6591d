//! Pure validation predicates and game constants.

use lazy_regex::regex_is_match;

use crate::errors::domain::{DomainError, ValidationKind};

/// Minimum roster size to start a round.
pub const MIN_PLAYERS: usize = 3;

/// Maximum player name length, in characters, after trimming.
pub const MAX_NAME_LEN: usize = 20;

/// True iff the trimmed name has 1..=20 characters.
pub fn valid_name(name: &str) -> bool {
    let len = name.trim().chars().count();
    (1..=MAX_NAME_LEN).contains(&len)
}

/// True iff the code, once uppercased, is exactly 4 characters of `[A-Z0-9]`.
pub fn valid_room_code(code: &str) -> bool {
    regex_is_match!(r"^[A-Z0-9]{4}$", &code.to_uppercase())
}

/// Canonical storage key for a room code.
pub fn normalize_room_code(code: &str) -> String {
    code.trim().to_uppercase()
}

pub fn validate_name(name: &str) -> Result<String, DomainError> {
    if !valid_name(name) {
        return Err(DomainError::validation(
            ValidationKind::InvalidName,
            format!("name must be 1..={MAX_NAME_LEN} characters after trimming"),
        ));
    }
    Ok(name.trim().to_string())
}

pub fn validate_room_code(code: &str) -> Result<String, DomainError> {
    let normalized = normalize_room_code(code);
    if !valid_room_code(&normalized) {
        return Err(DomainError::validation(
            ValidationKind::InvalidRoomCode,
            format!("room code {code:?} must be 4 characters of A-Z or 0-9"),
        ));
    }
    Ok(normalized)
}

/// An impostor count a round can be started with: `1 <= count < players`.
pub fn valid_impostor_count(count: usize, players: usize) -> bool {
    count >= 1 && count < players
}
