//! Per-round records and the run summary.

use std::collections::BTreeMap;

use impostor_backend::{Role, Room, RoundResult, Winner};
use serde::Serialize;

use crate::simulator::SimulationSetup;

#[derive(Debug, Clone, Serialize)]
pub struct RoundMetrics {
    pub round: u32,
    pub secret_word: String,
    pub impostors: Vec<String>,
    pub voted_out: String,
    pub voted_out_was_impostor: bool,
    pub votes_against: u32,
    pub winner: Winner,
    pub reason: String,
}

impl RoundMetrics {
    /// `started` is the room right after roles were dealt.
    pub fn new(round: u32, started: &Room, result: &RoundResult) -> Self {
        Self {
            round,
            secret_word: started.secret_word.clone().unwrap_or_default(),
            impostors: started.impostors().map(|p| p.name.clone()).collect(),
            voted_out: result.voted_out_name.clone(),
            voted_out_was_impostor: result.voted_out_role == Role::Impostor,
            votes_against: result.votes_against,
            winner: result.winner,
            reason: format!("{:?}", result.reason),
        }
    }
}

/// Flat CSV row for spreadsheet analysis.
#[derive(Debug, Serialize)]
pub struct CsvRoundRow<'a> {
    pub round: u32,
    pub secret_word: &'a str,
    pub impostors: String,
    pub voted_out: &'a str,
    pub voted_out_was_impostor: bool,
    pub votes_against: u32,
    pub winner: &'static str,
    pub reason: &'a str,
}

impl<'a> From<&'a RoundMetrics> for CsvRoundRow<'a> {
    fn from(m: &'a RoundMetrics) -> Self {
        Self {
            round: m.round,
            secret_word: &m.secret_word,
            impostors: m.impostors.join(";"),
            voted_out: &m.voted_out,
            voted_out_was_impostor: m.voted_out_was_impostor,
            votes_against: m.votes_against,
            winner: winner_label(m.winner),
            reason: &m.reason,
        }
    }
}

fn winner_label(winner: Winner) -> &'static str {
    match winner {
        Winner::Crew => "crew",
        Winner::Impostors => "impostors",
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub players: usize,
    pub impostors: usize,
    pub hints: bool,
    pub guess_probability: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub rounds: u32,
    pub crew_wins: u32,
    pub impostor_wins: u32,
    pub impostor_caught: u32,
    pub reasons: BTreeMap<String, u32>,
    pub elapsed_ms: u64,
}

impl Summary {
    pub fn new(setup: &SimulationSetup) -> Self {
        Self {
            players: setup.players,
            impostors: setup.impostors,
            hints: setup.hints,
            guess_probability: setup.guess_probability,
            seed: setup.seed,
            rounds: 0,
            crew_wins: 0,
            impostor_wins: 0,
            impostor_caught: 0,
            reasons: BTreeMap::new(),
            elapsed_ms: 0,
        }
    }

    pub fn record(&mut self, round: &RoundMetrics) {
        self.rounds += 1;
        match round.winner {
            Winner::Crew => self.crew_wins += 1,
            Winner::Impostors => self.impostor_wins += 1,
        }
        if round.voted_out_was_impostor {
            self.impostor_caught += 1;
        }
        *self.reasons.entry(round.reason.clone()).or_default() += 1;
    }
}
