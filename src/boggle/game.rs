use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use super::board::Board;
use super::error::Result;
use super::lexicon::Lexicon;
use super::scoring;
use super::search;

/// What happened to a word typed in by the player
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Empty input, the player is done
    Stop,
    TooShort { min_length: usize },
    NotInDictionary,
    AlreadyFound,
    NotOnBoard,
    Accepted { word: String, points: u32 },
}

/// Words the player has found so far along with their running score
#[derive(Debug, Clone)]
pub struct HumanTurn {
    min_guess_length: usize,
    words: BTreeSet<String>,
    score: u32,
}

impl HumanTurn {
    pub fn new(min_guess_length: usize) -> Self {
        Self {
            min_guess_length,
            words: BTreeSet::new(),
            score: 0,
        }
    }

    /// Checks a guess against the dictionary and the board. Accepted words are
    /// recorded and scored.
    pub fn guess<L: Lexicon + ?Sized>(
        &mut self,
        board: &mut Board,
        lexicon: &L,
        raw: &str,
    ) -> Result<GuessOutcome> {
        let word = raw.trim().to_uppercase();
        let outcome = if word.is_empty() {
            GuessOutcome::Stop
        } else if word.chars().count() < self.min_guess_length {
            GuessOutcome::TooShort {
                min_length: self.min_guess_length,
            }
        } else if !lexicon.contains(&word) {
            GuessOutcome::NotInDictionary
        } else if self.words.contains(&word) {
            GuessOutcome::AlreadyFound
        } else if !search::verify_word_on_board(board, &word)? {
            GuessOutcome::NotOnBoard
        } else {
            let points = scoring::points(&word);
            self.score += points;
            self.words.insert(word.clone());
            GuessOutcome::Accepted { word, points }
        };
        debug!(guess = raw, ?outcome, "judged guess");
        Ok(outcome)
    }

    pub fn words(&self) -> &BTreeSet<String> {
        &self.words
    }

    pub fn score(&self) -> u32 {
        self.score
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputerTurn {
    pub words: BTreeSet<String>,
    pub score: u32,
}

/// The computer collects every word left on the board that the player missed
pub fn computer_turn<L: Lexicon + ?Sized>(
    board: &mut Board,
    lexicon: &L,
    min_length: usize,
    human_words: &BTreeSet<String>,
) -> ComputerTurn {
    let words = search::find_all_words(board, lexicon, min_length, human_words);
    let score = scoring::total_points(&words);
    ComputerTurn { words, score }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Verdict {
    HumanWins,
    ComputerWins,
    Draw,
}

impl Verdict {
    pub fn decide(human_score: u32, computer_score: u32) -> Self {
        match human_score.cmp(&computer_score) {
            std::cmp::Ordering::Greater => Self::HumanWins,
            std::cmp::Ordering::Less => Self::ComputerWins,
            std::cmp::Ordering::Equal => Self::Draw,
        }
    }
}
