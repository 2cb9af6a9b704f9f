use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::boggle::cubes;
use crate::boggle::error::{BoggleError, Result};
use crate::boggle::{BOARD_SIZE, MIN_WORD_LENGTH};

/// Game settings. Every field can be left out of the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    /// Size of randomly generated boards
    pub board_size: usize,
    /// Shortest word the computer reports
    pub min_word_length: usize,
    /// Shortest guess accepted from the player
    pub min_guess_length: usize,
    /// Word list, one word per line
    pub dictionary: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: BOARD_SIZE,
            min_word_length: MIN_WORD_LENGTH,
            min_guess_length: MIN_WORD_LENGTH,
            dictionary: PathBuf::from("dictionary.txt"),
        }
    }
}

impl GameConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let config: GameConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Random boards are rolled from a cube set, so the size must have one
    pub fn validate(&self) -> Result<()> {
        if cubes::cubes_for(self.board_size).is_err() {
            return Err(BoggleError::InvalidConfig(format!(
                "no cube set for boardSize {}, use 4 or 5",
                self.board_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.board_size, 4);
        assert_eq!(config.min_word_length, 4);
        assert_eq!(config.min_guess_length, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file() {
        let path = std::env::temp_dir().join(format!("boggle_config_{}.json", std::process::id()));
        let mut file = File::create(&path).unwrap();
        write!(file, r#"{{"boardSize": 5, "minWordLength": 3}}"#).unwrap();

        let config = GameConfig::from_file(&path).unwrap();
        assert_eq!(config.board_size, 5);
        assert_eq!(config.min_word_length, 3);
        assert_eq!(config.min_guess_length, 4);
        assert_eq!(config.dictionary, PathBuf::from("dictionary.txt"));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_rejects_sizes_without_cubes() {
        for board_size in [0, 3, 6] {
            let config = GameConfig {
                board_size,
                ..GameConfig::default()
            };
            assert!(matches!(config.validate(), Err(BoggleError::InvalidConfig(_))));
        }

        let path = std::env::temp_dir().join(format!("boggle_config_bad_{}.json", std::process::id()));
        let mut file = File::create(&path).unwrap();
        write!(file, r#"{{"boardSize": 6}}"#).unwrap();
        assert!(matches!(
            GameConfig::from_file(&path),
            Err(BoggleError::InvalidConfig(_))
        ));
        std::fs::remove_file(&path).unwrap();
    }
}
