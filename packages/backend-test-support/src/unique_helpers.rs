//! Unique test data, so tests sharing a store never collide.

use ulid::Ulid;

/// Longest prefix kept by [`unique_name`]; leaves room for the suffix
/// within the 20-character name limit.
const NAME_PREFIX_LEN: usize = 11;

/// Generate a unique string with the given prefix
///
/// ```
/// use impostor_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("room");
/// assert_ne!(a, unique_str("room"));
/// assert!(a.starts_with("room-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// A player name that is unique per call and still a valid name
/// (at most 20 characters).
///
/// ```
/// use impostor_test_support::unique_helpers::unique_name;
///
/// let name = unique_name("Alice");
/// assert!(name.starts_with("Alice-"));
/// assert!(name.chars().count() <= 20);
/// assert_ne!(name, unique_name("Alice"));
/// ```
pub fn unique_name(prefix: &str) -> String {
    let prefix: String = prefix.chars().take(NAME_PREFIX_LEN).collect();
    let id = Ulid::new().to_string().to_lowercase();
    // The trailing characters of a ULID are its random part.
    let suffix = &id[id.len() - 8..];
    format!("{prefix}-{suffix}")
}

/// `count` distinct names built from `prefix`.
pub fn unique_names(prefix: &str, count: usize) -> Vec<String> {
    (0..count).map(|_| unique_name(prefix)).collect()
}
