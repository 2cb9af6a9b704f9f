use thiserror::Error;

pub type Result<T> = std::result::Result<T, BoggleError>;

#[derive(Debug, Error)]
pub enum BoggleError {
    #[error("cannot search for an empty word")]
    EmptyWord,
    #[error("board has no cells")]
    EmptyBoard,
    #[error("board row {row} has {found} cells, expected {expected}")]
    RaggedBoard {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("invalid letter {letter:?} at ({row}, {col})")]
    InvalidLetter { letter: char, row: usize, col: usize },
    #[error("board string has {found} letters, expected {expected}")]
    WrongLetterCount { expected: usize, found: usize },
    #[error("no cube set for a {0}x{0} board")]
    UnsupportedCubeSet(usize),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("dictionary build failed: {0}")]
    Fst(#[from] fst::Error),
}
