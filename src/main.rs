use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use boggle::boggle::game::{computer_turn, GuessOutcome, HumanTurn, Verdict};
use boggle::boggle::search::{self, TraceObserver};
use boggle::boggle::util::Position;
use boggle::boggle::{scoring, Board, FstLexicon};
use boggle::config::GameConfig;

#[macro_use]
extern crate text_io;

#[derive(Parser)]
#[command(name = "boggle")]
#[command(about = "Find words hidden in a grid of letters")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CommonArgs {
    /// Game config file (JSON)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Word list, one word per line
    #[arg(long, value_name = "FILE")]
    dictionary: Option<PathBuf>,

    /// Shortest word the computer reports
    #[arg(long)]
    min_length: Option<usize>,
}

#[derive(Args)]
struct BoardArgs {
    /// Letters of the board row by row
    #[arg(required_unless_present = "board_file")]
    letters: Option<String>,

    /// JSON board file, either one string per row or one letter per cell
    #[arg(long, value_name = "FILE", conflicts_with = "letters")]
    board_file: Option<PathBuf>,
}

impl BoardArgs {
    fn board(&self) -> Result<Board> {
        read_board(self.letters.as_deref(), self.board_file.as_deref())?
            .context("either board letters or --board-file is required")
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the computer
    Play {
        #[command(flatten)]
        common: CommonArgs,

        /// Letters of the board row by row instead of a random board
        #[arg(long)]
        board: Option<String>,

        /// JSON board file instead of a random board
        #[arg(long, value_name = "FILE", conflicts_with = "board")]
        board_file: Option<PathBuf>,
    },
    /// List every word on a board
    Solve {
        #[command(flatten)]
        common: CommonArgs,

        #[command(flatten)]
        board: BoardArgs,

        /// Words to leave out of the results
        #[arg(long)]
        exclude: Vec<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check whether a word can be traced on a board
    Check {
        word: String,

        #[command(flatten)]
        board: BoardArgs,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Solve every board in a file, one board per line
    Batch {
        #[command(flatten)]
        common: CommonArgs,

        file: PathBuf,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WordEntry {
    word: String,
    points: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput {
    board: String,
    words: Vec<WordEntry>,
    total_points: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckOutput {
    word: String,
    found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<Vec<[usize; 2]>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchEntry {
    line: usize,
    board: String,
    words: usize,
    total_points: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn load_config(common: &CommonArgs) -> Result<GameConfig> {
    let mut config = match &common.config {
        Some(path) => GameConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(dictionary) = &common.dictionary {
        config.dictionary = dictionary.clone();
    }
    if let Some(min_length) = common.min_length {
        config.min_word_length = min_length;
    }
    Ok(config)
}

/// Board given on the command line, either as letters or as a JSON board file
fn read_board(letters: Option<&str>, board_file: Option<&Path>) -> Result<Option<Board>> {
    match (letters, board_file) {
        (_, Some(path)) => Board::from_file(path)
            .map(Some)
            .with_context(|| format!("failed to load board {}", path.display())),
        (Some(letters), None) => Board::from_letters(letters)
            .map(Some)
            .context("invalid board letters"),
        (None, None) => Ok(None),
    }
}

fn load_lexicon(config: &GameConfig) -> Result<FstLexicon> {
    FstLexicon::from_file(&config.dictionary)
        .with_context(|| format!("failed to load dictionary {}", config.dictionary.display()))
}

/// Reads one line from stdin. End of input reads as an empty line.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout().flush()?;
    let line: std::result::Result<String, _> = try_read!("{}\n");
    Ok(line.map(|l| l.trim().to_string()).unwrap_or_default())
}

fn prompt_yes_no(message: &str) -> Result<bool> {
    loop {
        let answer = prompt(message)?.to_lowercase();
        match answer.as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" | "" => return Ok(false),
            _ => println!("Please type a word that begins with 'y' or 'n'."),
        }
    }
}

fn intro() {
    println!("Welcome to Boggle!");
    println!("Find words by linking neighbouring letters, diagonals included.");
    println!("Each letter cube can be used once per word.");
    println!("When you are done, the computer will find every word you missed.");
    println!();
}

fn human_turn(board: &mut Board, lexicon: &FstLexicon, config: &GameConfig) -> Result<HumanTurn> {
    let mut turn = HumanTurn::new(config.min_guess_length);
    println!("It's your turn!");
    loop {
        println!("Your words: {:?}", turn.words());
        println!("Your score: {}", turn.score());
        let guess = prompt("Type a word (or Enter to stop): ")?;
        match turn.guess(board, lexicon, &guess)? {
            GuessOutcome::Stop => break,
            GuessOutcome::TooShort { min_length } => {
                println!("The word must have at least {} letters.", min_length)
            }
            GuessOutcome::NotInDictionary => println!("That word is not found in the dictionary."),
            GuessOutcome::AlreadyFound => println!("You have already found that word."),
            GuessOutcome::NotOnBoard => println!("That word can't be formed on this board."),
            GuessOutcome::Accepted { word, points } => {
                println!("You found a new word! \"{}\" (+{})", word, points)
            }
        }
        println!();
    }
    println!();
    Ok(turn)
}

fn play(common: CommonArgs, letters: Option<String>, board_file: Option<PathBuf>) -> Result<()> {
    let config = load_config(&common)?;
    let lexicon = load_lexicon(&config)?;
    let given = read_board(letters.as_deref(), board_file.as_deref())?;
    intro();

    loop {
        let mut board = match &given {
            Some(board) => board.clone(),
            None => Board::random(config.board_size, &mut rand::thread_rng())
                .context("failed to generate a board")?,
        };
        println!("{}", board);

        let human = human_turn(&mut board, &lexicon, &config)?;

        println!("It's my turn!");
        let computer = computer_turn(&mut board, &lexicon, config.min_word_length, human.words());
        println!("My words: {:?}", computer.words);
        println!("My score: {}", computer.score);
        match Verdict::decide(human.score(), computer.score) {
            Verdict::ComputerWins => {
                println!("Ha ha ha, I destroyed you. Better luck next time, puny human!")
            }
            Verdict::HumanWins => println!("WOW, you defeated me! Congratulations!"),
            Verdict::Draw => println!("It's a draw. You should play again!"),
        }
        println!();

        if !prompt_yes_no("Play again? ")? {
            break;
        }
    }
    println!("Have a nice day.");
    Ok(())
}

fn solve(common: CommonArgs, board: BoardArgs, exclude: Vec<String>, json: bool) -> Result<()> {
    let config = load_config(&common)?;
    let lexicon = load_lexicon(&config)?;
    let mut board = board.board()?;
    let exclude = exclude.into_iter().collect::<BTreeSet<_>>();

    let words = search::find_all_words(&mut board, &lexicon, config.min_word_length, &exclude);
    let output = SolveOutput {
        board: board.letters(),
        total_points: scoring::total_points(&words),
        words: words
            .into_iter()
            .map(|word| WordEntry {
                points: scoring::points(&word),
                word,
            })
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", board);
        for entry in output.words.iter() {
            println!("{:<16} {:>2}", entry.word, entry.points);
        }
        println!("{} words, {} points", output.words.len(), output.total_points);
    }
    Ok(())
}

fn format_path(path: &[Position]) -> String {
    path.iter()
        .map(|pos| pos.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn check(word: String, board: BoardArgs, json: bool) -> Result<()> {
    let mut board = board.board()?;
    let path = search::find_word_path_observed(&mut board, &word, &mut TraceObserver)?;
    let word = word.to_uppercase();

    if json {
        let output = CheckOutput {
            word,
            found: path.is_some(),
            path: path.map(|p| p.iter().map(|pos| [pos.row, pos.col]).collect()),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        match path {
            Some(path) => println!("{} is on the board: {}", word, format_path(&path)),
            None => println!("{} can't be formed on this board.", word),
        }
    }
    Ok(())
}

fn batch(common: CommonArgs, file: PathBuf, json: bool) -> Result<()> {
    let config = load_config(&common)?;
    let lexicon = load_lexicon(&config)?;
    let reader = BufReader::new(
        File::open(&file).with_context(|| format!("failed to open {}", file.display()))?,
    );

    let mut boards = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let letters = line.trim();
        if letters.is_empty() || letters.starts_with('#') {
            continue;
        }
        boards.push((i + 1, letters.to_string()));
    }
    info!(boards = boards.len(), "solving batch");

    // Every worker owns its board, only the lexicon is shared
    let none = BTreeSet::new();
    let entries = boards
        .into_par_iter()
        .map(|(line, letters)| match Board::from_letters(&letters) {
            Ok(mut board) => {
                let words =
                    search::find_all_words(&mut board, &lexicon, config.min_word_length, &none);
                BatchEntry {
                    line,
                    board: board.letters(),
                    words: words.len(),
                    total_points: scoring::total_points(&words),
                    error: None,
                }
            }
            Err(err) => BatchEntry {
                line,
                board: letters,
                words: 0,
                total_points: 0,
                error: Some(err.to_string()),
            },
        })
        .collect::<Vec<_>>();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for entry in entries.iter() {
            match &entry.error {
                Some(err) => println!("line {}: {} ({})", entry.line, entry.board, err),
                None => println!(
                    "line {}: {} {} words, {} points",
                    entry.line, entry.board, entry.words, entry.total_points
                ),
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    // Default to `info` when `RUST_LOG` is unset or invalid
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Play {
            common,
            board,
            board_file,
        } => play(common, board, board_file),
        Commands::Solve {
            common,
            board,
            exclude,
            json,
        } => solve(common, board, exclude, json),
        Commands::Check { word, board, json } => check(word, board, json),
        Commands::Batch { common, file, json } => batch(common, file, json),
    }
}
