//! Static catalog of secret words and their hint words.

use rand::seq::IndexedRandom;
use rand::Rng;

/// One catalog entry: crew members see `word`, impostors may get `hint`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordEntry {
    pub word: &'static str,
    pub hint: &'static str,
}

const fn entry(word: &'static str, hint: &'static str) -> WordEntry {
    WordEntry { word, hint }
}

pub const WORDS: &[WordEntry] = &[
    entry("Strand", "Sand"),
    entry("Pizza", "Käse"),
    entry("Krankenhaus", "Arzt"),
    entry("Schule", "Lernen"),
    entry("Berg", "Stein"),
    entry("Regen", "Wasser"),
    entry("Buch", "Lesen"),
    entry("Hund", "Tier"),
    entry("Auto", "Fahren"),
    entry("Baum", "Blätter"),
    entry("Haus", "Wohnen"),
    entry("Kuchen", "Süß"),
    entry("Flugzeug", "Fliegen"),
    entry("Computer", "Technik"),
    entry("Musik", "Klang"),
    entry("Fußball", "Sport"),
    entry("Garten", "Blumen"),
    entry("Kaffee", "Getränk"),
    entry("Film", "Kino"),
    entry("Telefon", "Anrufen"),
    entry("Bahnhof", "Zug"),
    entry("Winter", "Schnee"),
    entry("Bäckerei", "Brot"),
    entry("Zirkus", "Clown"),
];

/// Uniformly pick an entry.
pub fn random_entry<R: Rng + ?Sized>(rng: &mut R) -> WordEntry {
    // WORDS is a non-empty constant
    *WORDS.choose(rng).unwrap_or(&WORDS[0])
}
