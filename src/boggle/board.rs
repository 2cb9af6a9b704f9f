use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use super::error::{BoggleError, Result};
use super::util::{self, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub letter: char,
    /// Set while the cell is part of the path currently being searched
    pub in_use: bool,
}

/// Layouts accepted in a board file: either one string per row
/// or one single-letter string per cell
#[derive(Deserialize)]
#[serde(untagged)]
enum RawBoard {
    Rows(Vec<String>),
    Cells(Vec<Vec<String>>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    /// Letters on the board along with their search markers
    state: Vec<Vec<Cell>>,
}

impl Board {
    /// Builds a board from its rows. Every row must have as many letters as there are
    /// rows and each letter must be alphabetic. Letters are stored uppercase.
    pub fn from_rows(rows: Vec<Vec<char>>) -> Result<Self> {
        let size = rows.len();
        if size == 0 {
            return Err(BoggleError::EmptyBoard);
        }

        let mut state = Vec::with_capacity(size);
        for (row, letters) in rows.into_iter().enumerate() {
            if letters.len() != size {
                return Err(BoggleError::RaggedBoard {
                    row,
                    expected: size,
                    found: letters.len(),
                });
            }
            let mut cells = Vec::with_capacity(size);
            for (col, letter) in letters.into_iter().enumerate() {
                if !letter.is_ascii_alphabetic() {
                    return Err(BoggleError::InvalidLetter { letter, row, col });
                }
                cells.push(Cell {
                    letter: letter.to_ascii_uppercase(),
                    in_use: false,
                });
            }
            state.push(cells);
        }

        Ok(Self { size, state })
    }

    /// Builds a board from a run of letters read row by row (e.g. "ETARSNIO...").
    /// Whitespace is ignored and the number of letters must be a perfect square.
    pub fn from_letters(letters: &str) -> Result<Self> {
        let count = letters.chars().filter(|c| !c.is_whitespace()).count();
        let size = (1..=count)
            .take_while(|n| n * n <= count)
            .last()
            .unwrap_or(0);
        if size == 0 {
            return Err(BoggleError::EmptyBoard);
        }
        if size * size != count {
            return Err(BoggleError::WrongLetterCount {
                expected: size * size,
                found: count,
            });
        }
        Self::from_letters_sized(letters, size)
    }

    /// Same as `from_letters` but requires exactly `size * size` letters
    pub fn from_letters_sized(letters: &str, size: usize) -> Result<Self> {
        if size == 0 {
            return Err(BoggleError::EmptyBoard);
        }
        let letters = letters
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<Vec<_>>();
        if letters.len() != size * size {
            return Err(BoggleError::WrongLetterCount {
                expected: size * size,
                found: letters.len(),
            });
        }
        Self::from_rows(letters.chunks(size).map(|r| r.to_vec()).collect())
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let raw: RawBoard = serde_json::from_reader(reader)?;
        let rows = match raw {
            RawBoard::Rows(rows) => rows.iter().map(|r| r.chars().collect()).collect(),
            RawBoard::Cells(rows) => rows
                .iter()
                .map(|r| r.iter().flat_map(|c| c.chars()).collect())
                .collect(),
        };
        Self::from_rows(rows)
    }

    /// Number of rows (and columns) on the board
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn letter_at(&self, pos: Position) -> char {
        self.state[pos.row][pos.col].letter
    }

    pub fn set_in_use(&mut self, pos: Position) {
        self.state[pos.row][pos.col].in_use = true;
    }

    pub fn clear_in_use(&mut self, pos: Position) {
        self.state[pos.row][pos.col].in_use = false;
    }

    pub fn is_in_use(&self, pos: Position) -> bool {
        self.state[pos.row][pos.col].in_use
    }

    /// True when no cell is marked as part of a search path
    pub fn all_free(&self) -> bool {
        self.state.iter().flatten().all(|c| !c.in_use)
    }

    /// All cells touching `pos` that lie on the board, in row-major order
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> {
        pos.adjacent(self.size)
    }

    /// Every position on the board in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        util::positions(self.size)
    }

    /// The board letters read row by row
    pub fn letters(&self) -> String {
        self.state.iter().flatten().map(|c| c.letter).collect()
    }

    /// Reads the letters along a path
    pub fn spell(&self, path: &[Position]) -> String {
        path.iter().map(|&p| self.letter_at(p)).collect()
    }
}

impl std::ops::Index<Position> for Board {
    type Output = Cell;

    fn index(&self, index: Position) -> &Self::Output {
        &self.state[index.row][index.col]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.state.iter() {
            for cell in row.iter() {
                write!(f, "{}", cell.letter)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_from_letters() {
        let board = Board::from_letters("etar snio dlpe ysgu").unwrap();
        assert_eq!(board.size(), 4);
        assert_eq!(board.letter_at(Position::new(0, 0)), 'E');
        assert_eq!(board.letter_at(Position::new(1, 2)), 'I');
        assert_eq!(board.letter_at(Position::new(3, 3)), 'U');
        assert_eq!(board.letters(), "ETARSNIODLPEYSGU");
        assert!(board.all_free());
    }

    #[test]
    fn test_from_letters_not_square() {
        match Board::from_letters("ABCDE") {
            Err(BoggleError::WrongLetterCount { expected, found }) => {
                assert_eq!(expected, 4);
                assert_eq!(found, 5);
            }
            other => panic!("unexpected result {:?}", other),
        }
        assert!(matches!(Board::from_letters("  "), Err(BoggleError::EmptyBoard)));
    }

    #[test]
    fn test_from_letters_sized() {
        assert!(Board::from_letters_sized("ABCD", 2).is_ok());
        assert!(matches!(
            Board::from_letters_sized("ABCD", 3),
            Err(BoggleError::WrongLetterCount { expected: 9, found: 4 })
        ));
    }

    #[test]
    fn test_rejects_bad_cells() {
        let ragged = vec![vec!['A', 'B'], vec!['C']];
        assert!(matches!(
            Board::from_rows(ragged),
            Err(BoggleError::RaggedBoard { row: 1, expected: 2, found: 1 })
        ));

        let digit = vec![vec!['A', 'B'], vec!['C', '4']];
        assert!(matches!(
            Board::from_rows(digit),
            Err(BoggleError::InvalidLetter { letter: '4', row: 1, col: 1 })
        ));

        assert!(matches!(Board::from_rows(vec![]), Err(BoggleError::EmptyBoard)));
    }

    #[test]
    fn test_in_use_flags() {
        let mut board = Board::from_letters("ABCD").unwrap();
        let pos = Position::new(1, 0);
        board.set_in_use(pos);
        assert!(board.is_in_use(pos));
        assert!(board[pos].in_use);
        assert!(!board.all_free());
        board.clear_in_use(pos);
        assert!(!board.is_in_use(pos));
        assert!(board.all_free());
    }

    #[test]
    fn test_neighbors_bounds() {
        let board = Board::from_letters("ABCDEFGHI").unwrap();
        assert_eq!(board.neighbors(Position::new(0, 0)).count(), 3);
        assert_eq!(board.neighbors(Position::new(0, 1)).count(), 5);
        assert_eq!(board.neighbors(Position::new(1, 1)).count(), 8);
        assert_eq!(board.neighbors(Position::new(2, 2)).count(), 3);
    }

    #[test]
    fn test_display() {
        let board = Board::from_letters("abcd").unwrap();
        assert_eq!(board.to_string(), "AB\nCD\n");
    }

    #[test]
    fn test_from_file_layouts() {
        let dir = std::env::temp_dir();

        let rows_path = dir.join(format!("boggle_rows_{}.json", std::process::id()));
        let mut file = File::create(&rows_path).unwrap();
        write!(file, r#"["AB", "cd"]"#).unwrap();
        let board = Board::from_file(&rows_path).unwrap();
        assert_eq!(board.letters(), "ABCD");
        std::fs::remove_file(&rows_path).unwrap();

        let cells_path = dir.join(format!("boggle_cells_{}.json", std::process::id()));
        let mut file = File::create(&cells_path).unwrap();
        write!(file, r#"[["A", "B"], ["C", "D"]]"#).unwrap();
        let board = Board::from_file(&cells_path).unwrap();
        assert_eq!(board.letters(), "ABCD");
        std::fs::remove_file(&cells_path).unwrap();
    }
}
