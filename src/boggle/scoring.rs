/// Points awarded for a word, based only on its length
pub fn points(word: &str) -> u32 {
    match word.chars().count() {
        0..=3 => 0,
        4 => 1,
        5 => 2,
        6 => 3,
        7 => 5,
        _ => 11,
    }
}

pub fn total_points<I, S>(words: I) -> u32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    words.into_iter().map(|w| points(w.as_ref())).sum()
}
