//! Room code and player id generation.
//!
//! Room codes are 4-character strings over `[A-Z0-9]`. They are short enough
//! to read out loud, so they are not unique by construction; the room store
//! regenerates on collision. Player ids are ULID-based and process-unique.

use rand::Rng;
use ulid::Ulid;

pub const ROOM_CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
pub const ROOM_CODE_LEN: usize = 4;

/// Generate a room code using the thread-local CSPRNG.
///
/// # Example
/// ```
/// use impostor_backend::utils::ids::generate_room_code;
///
/// let code = generate_room_code();
/// assert_eq!(code.len(), 4);
/// assert!(code.bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()));
/// ```
pub fn generate_room_code() -> String {
    generate_room_code_with(&mut rand::rng())
}

/// Generate a room code from the given RNG; every character is drawn
/// uniformly from [`ROOM_CODE_ALPHABET`].
pub fn generate_room_code_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut s = String::with_capacity(ROOM_CODE_LEN);
    for _ in 0..ROOM_CODE_LEN {
        let idx = rng.random_range(0..ROOM_CODE_ALPHABET.len());
        s.push(ROOM_CODE_ALPHABET[idx] as char);
    }
    s
}

/// Generate an opaque player id (`player_` + lowercase ULID, 80 random bits).
pub fn generate_player_id() -> String {
    format!("player_{}", Ulid::new().to_string().to_lowercase())
}
