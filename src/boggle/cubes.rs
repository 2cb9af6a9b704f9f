use rand::prelude::SliceRandom;
use rand::Rng;

use super::board::Board;
use super::error::{BoggleError, Result};

/// Faces of the sixteen cubes of a standard 4x4 game
pub const STANDARD_CUBES: [&str; 16] = [
    "AAEEGN", "ABBJOO", "ACHOPS", "AFFKPS", "AOOTTW", "CIMOTU", "DEILRX", "DELRVY", "DISTTY",
    "EEGHNW", "EEINSU", "EHRTVW", "EIOSST", "ELRTTY", "HIMNQU", "HLNNRZ",
];

/// Faces of the twenty-five cubes of a 5x5 game
pub const BIG_BOGGLE_CUBES: [&str; 25] = [
    "AAAFRS", "AAEEEE", "AAFIRS", "ADENNN", "AEEEEM", "AEEGMU", "AEGMNN", "AFIRSY", "BJKQXZ",
    "CCNSTW", "CEIILT", "CEILPT", "CEIPST", "DDLNOR", "DDHNOT", "DHHLOR", "DHLNOR", "EIIITT",
    "EMOTTT", "ENSSSU", "FIPRSY", "GORRVW", "HIPRRY", "NOOTUW", "OOOTTU",
];

/// Returns the cube set used for a board of the given size
pub fn cubes_for(size: usize) -> Result<&'static [&'static str]> {
    match size {
        4 => Ok(&STANDARD_CUBES),
        5 => Ok(&BIG_BOGGLE_CUBES),
        _ => Err(BoggleError::UnsupportedCubeSet(size)),
    }
}

/// Shakes the cubes: the cubes are shuffled into the grid and each one
/// shows a random face
pub fn shake<R: Rng>(size: usize, rng: &mut R) -> Result<Board> {
    let mut cubes = cubes_for(size)?.to_vec();
    cubes.shuffle(rng);

    let letters = cubes
        .iter()
        .map(|cube| {
            let faces = cube.as_bytes();
            faces[rng.gen_range(0..faces.len())] as char
        })
        .collect::<String>();

    Board::from_letters_sized(&letters, size)
}

impl Board {
    pub fn random<R: Rng>(size: usize, rng: &mut R) -> Result<Self> {
        shake(size, rng)
    }
}
