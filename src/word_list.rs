//! Word lists: loading, case-insensitive deduplication and sampling.

use std::collections::HashSet;
use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::{EtymonError, Result};

/// Parse a word list with one word per line.
///
/// Lines are trimmed, blank lines and `#` comments skipped, and repeated
/// words dropped case-insensitively keeping the first spelling seen.
pub fn parse_word_list(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter(|word| seen.insert(word.to_lowercase()))
        .map(str::to_owned)
        .collect()
}

/// Load and parse the word list at `path`.
///
/// # Errors
///
/// Returns [`EtymonError::Dataset`] if the file cannot be read.
pub fn load_word_list(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| EtymonError::Dataset(format!("cannot read {}: {e}", path.display())))?;
    let words = parse_word_list(&text);
    tracing::info!(path = %path.display(), count = words.len(), "loaded word list");
    Ok(words)
}

/// Pick `n` words at random, reproducibly for a given `seed`.
///
/// The sample keeps the words in list order. Asking for at least as many
/// words as the list holds returns the whole list.
pub fn sample_words(words: &[String], n: usize, seed: u64) -> Vec<String> {
    if n >= words.len() {
        return words.to_vec();
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let mut picked = rand::seq::index::sample(&mut rng, words.len(), n).into_vec();
    picked.sort_unstable();
    picked.into_iter().map(|i| words[i].clone()).collect()
}
