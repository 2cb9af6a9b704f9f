use std::collections::BTreeSet;

use tracing::{debug, trace};

use super::board::Board;
use super::error::{BoggleError, Result};
use super::lexicon::Lexicon;
use super::util::Position;

/// Watches a path search enter and leave cells. Observers only see the search,
/// they have no say in where it goes next.
pub trait SearchObserver {
    fn on_enter(&mut self, _pos: Position) {}
    fn on_leave(&mut self, _pos: Position) {}
}

pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// Emits a trace event each time a cell joins or leaves the current path
pub struct TraceObserver;

impl SearchObserver for TraceObserver {
    fn on_enter(&mut self, pos: Position) {
        trace!(row = pos.row, col = pos.col, "highlight");
    }

    fn on_leave(&mut self, pos: Position) {
        trace!(row = pos.row, col = pos.col, "unhighlight");
    }
}

/// Checks whether `word` can be traced on the board through adjacent cells, using
/// each cell at most once. Case does not matter.
pub fn verify_word_on_board(board: &mut Board, word: &str) -> Result<bool> {
    Ok(find_word_path(board, word)?.is_some())
}

/// Same search as `verify_word_on_board` but returns the first path found
pub fn find_word_path(board: &mut Board, word: &str) -> Result<Option<Vec<Position>>> {
    find_word_path_observed(board, word, &mut NoopObserver)
}

pub fn find_word_path_observed<O: SearchObserver>(
    board: &mut Board,
    word: &str,
    observer: &mut O,
) -> Result<Option<Vec<Position>>> {
    if word.is_empty() {
        return Err(BoggleError::EmptyWord);
    }
    let target = word.to_uppercase().chars().collect::<Vec<_>>();

    // A path never repeats a cell so it can't be longer than the board
    if target.len() > board.size() * board.size() {
        debug!(word, "word is longer than the board has cells");
        return Ok(None);
    }

    let mut path = Vec::with_capacity(target.len());
    let starts = board
        .positions()
        .filter(|&p| board.letter_at(p) == target[0])
        .collect::<Vec<_>>();
    for start in starts {
        if trace_word(board, &target, start, &mut path, observer) {
            debug!(word, path_len = path.len(), "found word on board");
            return Ok(Some(path));
        }
    }
    debug!(word, "word not on board");
    Ok(None)
}

/// Extends `path` through `pos`. The path so far, plus `pos`, always spells a prefix
/// of `target`. On success `path` holds the full path, otherwise it is left as it was.
/// The cell is released before returning either way.
fn trace_word<O: SearchObserver>(
    board: &mut Board,
    target: &[char],
    pos: Position,
    path: &mut Vec<Position>,
    observer: &mut O,
) -> bool {
    board.set_in_use(pos);
    observer.on_enter(pos);
    path.push(pos);

    let found = path.len() == target.len() || {
        let next = target[path.len()];
        board.neighbors(pos).any(|n| {
            !board.is_in_use(n)
                && board.letter_at(n) == next
                && trace_word(board, target, n, path, observer)
        })
    };

    if !found {
        path.pop();
    }
    observer.on_leave(pos);
    board.clear_in_use(pos);
    found
}

/// State shared by every branch of an exhaustive search
struct WordHunt<'a, L: ?Sized> {
    lexicon: &'a L,
    min_length: usize,
    exclude: BTreeSet<String>,
    found: BTreeSet<String>,
    /// Letters along the current path
    candidate: String,
}

impl<'a, L: Lexicon + ?Sized> WordHunt<'a, L> {
    fn explore(&mut self, board: &mut Board, pos: Position) {
        board.set_in_use(pos);
        self.candidate.push(board.letter_at(pos));

        if self.candidate.len() >= self.min_length
            && self.lexicon.contains(&self.candidate)
            && !self.exclude.contains(&self.candidate)
        {
            self.found.insert(self.candidate.clone());
        }

        // Nothing in the dictionary starts this way, so no longer path can be a word
        if self.lexicon.contains_prefix(&self.candidate) {
            for n in board.neighbors(pos) {
                if !board.is_in_use(n) {
                    self.explore(board, n);
                }
            }
        }

        self.candidate.pop();
        board.clear_in_use(pos);
    }
}

/// Finds every word of the lexicon, at least `min_length` letters long, that can be
/// traced on the board. Words in `exclude` are left out. Each word is reported once
/// however many paths spell it.
pub fn find_all_words<L: Lexicon + ?Sized>(
    board: &mut Board,
    lexicon: &L,
    min_length: usize,
    exclude: &BTreeSet<String>,
) -> BTreeSet<String> {
    let mut hunt = WordHunt {
        lexicon,
        min_length,
        exclude: exclude.iter().map(|w| w.to_uppercase()).collect(),
        found: BTreeSet::new(),
        candidate: String::with_capacity(board.size() * board.size()),
    };

    let starts = board.positions().collect::<Vec<_>>();
    for start in starts {
        hunt.explore(board, start);
    }

    debug!(
        board = %board.letters(),
        min_length,
        found = hunt.found.len(),
        "exhaustive search finished"
    );
    hunt.found
}
