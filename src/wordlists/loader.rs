//! Word list loading
//!
//! A bank directory holds `targets.txt` and, optionally,
//! `common_guesses.txt` and `uncommon_guesses.txt`. Each file is a list of
//! whitespace-separated words. Targets come first in the resulting bank,
//! followed by whichever guess lists were asked for.

use crate::bank::{Bank, BankConfig, BankError};
use clap::ValueEnum;
use rustc_hash::FxHashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const TARGETS_FILE: &str = "targets.txt";
pub const COMMON_GUESSES_FILE: &str = "common_guesses.txt";
pub const UNCOMMON_GUESSES_FILE: &str = "uncommon_guesses.txt";

/// Which guess-only lists to append after the targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum GuessInclusion {
    /// Only targets may be guessed
    Targets,
    /// Targets and common guesses
    Common,
    /// Targets, common and uncommon guesses
    #[default]
    All,
}

/// Errors from reading word lists
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} contains no words", path.display())]
    NoTargets { path: PathBuf },
}

/// Targets followed by guess-only words, ready to build a bank from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordLists {
    words: Vec<String>,
    num_targets: usize,
}

impl WordLists {
    /// Combine in-memory lists
    ///
    /// Words are lowercased. Guesses repeating an earlier word are dropped
    /// with a warning; repeated targets are kept so the bank can reject them.
    #[must_use]
    pub fn from_lists<T, G>(targets: T, guesses: G) -> Self
    where
        T: IntoIterator,
        T::Item: AsRef<str>,
        G: IntoIterator,
        G::Item: AsRef<str>,
    {
        let mut words: Vec<String> = targets
            .into_iter()
            .map(|w| w.as_ref().trim().to_ascii_lowercase())
            .collect();
        let num_targets = words.len();

        let mut seen: FxHashSet<String> = words.iter().cloned().collect();
        let mut dropped = 0usize;
        for guess in guesses {
            let guess = guess.as_ref().trim().to_ascii_lowercase();
            if seen.insert(guess.clone()) {
                words.push(guess);
            } else {
                dropped += 1;
            }
        }
        if dropped > 0 {
            log::warn!("Dropped {dropped} guess words already in the list");
        }

        Self { words, num_targets }
    }

    /// Load a bank directory
    ///
    /// # Errors
    /// Returns `LoadError` if `targets.txt` is missing, unreadable or empty,
    /// or an included guess list exists but cannot be read.
    pub fn load_dir<P: AsRef<Path>>(dir: P, inclusion: GuessInclusion) -> Result<Self, LoadError> {
        let dir = dir.as_ref();
        let targets_path = dir.join(TARGETS_FILE);
        let targets = read_words(&targets_path)?;
        if targets.is_empty() {
            return Err(LoadError::NoTargets { path: targets_path });
        }

        let guess_files: &[&str] = match inclusion {
            GuessInclusion::Targets => &[],
            GuessInclusion::Common => &[COMMON_GUESSES_FILE],
            GuessInclusion::All => &[COMMON_GUESSES_FILE, UNCOMMON_GUESSES_FILE],
        };
        let mut guesses = Vec::new();
        for name in guess_files {
            let path = dir.join(name);
            if path.exists() {
                guesses.extend(read_words(&path)?);
            } else {
                log::debug!("{} not found, skipping", path.display());
            }
        }

        let lists = Self::from_lists(targets, guesses);
        log::debug!(
            "Loaded {} words ({} targets) from {}",
            lists.words.len(),
            lists.num_targets,
            dir.display()
        );
        Ok(lists)
    }

    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    #[must_use]
    pub const fn num_targets(&self) -> usize {
        self.num_targets
    }

    /// Build the bank for these lists
    ///
    /// # Errors
    /// Returns `BankError` if the words do not form a valid bank.
    pub fn to_bank(&self, config: BankConfig) -> Result<Bank, BankError> {
        Bank::new(&self.words, self.num_targets, config)
    }
}

/// Read whitespace-separated words from a file
///
/// # Errors
/// Returns `LoadError::Io` with the path if the file cannot be read.
pub fn read_words<P: AsRef<Path>>(path: P) -> Result<Vec<String>, LoadError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(content.split_whitespace().map(str::to_string).collect())
}
