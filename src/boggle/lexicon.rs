use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::ops::Bound;
use std::path::Path;

use fst::raw::Node;
use fst::{Set, SetBuilder};
use tracing::{debug, info, warn};

use super::error::Result;

/// Word lookups needed by the board searches. Both queries are case-insensitive.
pub trait Lexicon {
    /// True if `word` is a dictionary entry
    fn contains(&self, word: &str) -> bool;
    /// True if some dictionary entry starts with `prefix` (an entry equal to it counts)
    fn contains_prefix(&self, prefix: &str) -> bool;
}

fn normalize(word: &str) -> Cow<str> {
    if word.bytes().any(|b| b.is_ascii_lowercase()) {
        Cow::Owned(word.to_ascii_uppercase())
    } else {
        Cow::Borrowed(word)
    }
}

/// Reads a word list with one word per line. Words are uppercased, sorted and
/// deduplicated; blank lines and entries with non-alphabetic characters are skipped.
pub fn read_word_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    let mut skipped = 0;
    for line in reader.lines() {
        let line = line?;
        let word = line.trim();
        if word.is_empty() {
            continue;
        }
        if !word.chars().all(|c| c.is_ascii_alphabetic()) {
            skipped += 1;
            continue;
        }
        words.push(word.to_ascii_uppercase());
    }
    if skipped > 0 {
        warn!(skipped, path = %path.as_ref().display(), "skipped non-alphabetic entries in word list");
    }

    words.sort_unstable();
    words.dedup();
    Ok(words)
}

/// Dictionary compiled into a finite state transducer. Membership and prefix
/// queries walk the automaton one byte at a time.
pub struct FstLexicon {
    words: Set<Vec<u8>>,
}

impl FstLexicon {
    /// Builds the lexicon from any list of words. Input does not need to be sorted.
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_ascii_uppercase())
            .filter(|w| !w.is_empty())
            .collect::<Vec<_>>();
        words.sort_unstable();
        words.dedup();

        let mut build = SetBuilder::memory();
        build.extend_iter(words)?;
        let words = build.into_set();
        debug!(entries = words.len(), "built lexicon");
        Ok(Self { words })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let words = read_word_file(path.as_ref())?;
        let lexicon = Self::from_words(words)?;
        info!(
            entries = lexicon.len(),
            path = %path.as_ref().display(),
            "loaded dictionary"
        );
        Ok(lexicon)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Follows `key` from the root of the automaton. Returns the node reached,
    /// or None if no entry continues with this key.
    fn walk(&self, key: &[u8]) -> Option<Node<'_>> {
        let fst = self.words.as_fst();
        let mut node = fst.root();
        for &b in key {
            let i = node.find_input(b)?;
            node = fst.node(node.transition(i).addr);
        }
        Some(node)
    }
}

impl Lexicon for FstLexicon {
    fn contains(&self, word: &str) -> bool {
        self.words.contains(normalize(word).as_bytes())
    }

    fn contains_prefix(&self, prefix: &str) -> bool {
        // The automaton is minimal, so every reachable node leads to at least one entry
        !self.is_empty() && self.walk(normalize(prefix).as_bytes()).is_some()
    }
}

/// Plain ordered set of words, uppercased on the way in. Handy for small word lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordSet {
    words: BTreeSet<String>,
}

impl WordSet {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_ascii_uppercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Lexicon for WordSet {
    fn contains(&self, word: &str) -> bool {
        self.words.contains(&*normalize(word))
    }

    fn contains_prefix(&self, prefix: &str) -> bool {
        let prefix = normalize(prefix);
        self.words
            .range::<str, _>((Bound::Included(&*prefix), Bound::Unbounded))
            .next()
            .map_or(false, |w| w.starts_with(&*prefix))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn lexicon() -> FstLexicon {
        FstLexicon::from_words(["cat", "CATS", "dog", "dot", "catalog", "cat"]).unwrap()
    }

    #[test]
    fn test_contains() {
        let lex = lexicon();
        assert_eq!(lex.len(), 5);
        assert!(lex.contains("CAT"));
        assert!(lex.contains("cat"));
        assert!(lex.contains("Catalog"));
        assert!(!lex.contains("CA"));
        assert!(!lex.contains("CATA"));
        assert!(!lex.contains(""));
    }

    #[test]
    fn test_contains_prefix() {
        let lex = lexicon();
        assert!(lex.contains_prefix("C"));
        assert!(lex.contains_prefix("ca"));
        assert!(lex.contains_prefix("CAT"));
        assert!(lex.contains_prefix("CATAL"));
        assert!(lex.contains_prefix("DO"));
        assert!(lex.contains_prefix(""));
        assert!(!lex.contains_prefix("CATZ"));
        assert!(!lex.contains_prefix("X"));
        assert!(!lex.contains_prefix("CATALOGS"));
    }

    #[test]
    fn test_empty_lexicon() {
        let lex = FstLexicon::from_words(Vec::<String>::new()).unwrap();
        assert!(lex.is_empty());
        assert!(!lex.contains_prefix(""));
        assert!(!lex.contains_prefix("A"));
        assert!(!lex.contains("A"));
    }

    #[test]
    fn test_word_set() {
        let lex = WordSet::from_words(["CAT", "CATS", "DOG", "CAT"]);
        assert_eq!(lex.len(), 3);
        assert!(lex.contains("cats"));
        assert!(!lex.contains("CA"));
        assert!(lex.contains_prefix("CA"));
        assert!(lex.contains_prefix("dog"));
        assert!(!lex.contains_prefix("DOGS"));
        assert!(!lex.contains_prefix("E"));
    }

    #[test]
    fn test_word_set_lowercase_entries() {
        let lex = WordSet::from_words(["cat", " Dog "]);
        assert!(lex.contains("cat"));
        assert!(lex.contains("CAT"));
        assert!(lex.contains("dog"));
        assert!(lex.contains_prefix("ca"));
        assert!(lex.contains_prefix("DO"));
        assert!(!lex.contains_prefix("cats"));

        let empty = WordSet::default();
        assert!(empty.is_empty());
        assert!(!empty.contains_prefix(""));
    }

    #[test]
    fn test_read_word_file() {
        let path = std::env::temp_dir().join(format!("boggle_words_{}.txt", std::process::id()));
        let mut file = File::create(&path).unwrap();
        writeln!(file, "zebra\napple\n\n  Banana \ndon't\napple").unwrap();

        let words = read_word_file(&path).unwrap();
        assert_eq!(words, vec!["APPLE", "BANANA", "ZEBRA"]);

        let lex = FstLexicon::from_file(&path).unwrap();
        assert!(lex.contains("banana"));
        assert!(!lex.contains("DONT"));
        std::fs::remove_file(&path).unwrap();
    }
}
