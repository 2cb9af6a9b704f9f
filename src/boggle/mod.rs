pub mod board;
pub mod cubes;
pub mod error;
pub mod game;
pub mod lexicon;
pub mod scoring;
pub mod search;
pub mod util;

/// Rows and columns of a standard board
pub const BOARD_SIZE: usize = 4;
/// Shortest word that counts towards a score
pub const MIN_WORD_LENGTH: usize = 4;

pub use self::board::Board;
pub use self::error::{BoggleError, Result};
pub use self::lexicon::{FstLexicon, Lexicon};
pub use self::search::{find_all_words, verify_word_on_board};
