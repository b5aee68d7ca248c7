//! Word representation
//!
//! A Word stores a validated, lowercase, fixed-length ASCII word. The length is
//! not baked in: every word of one bank shares the bank's length, and lengths up
//! to [`Word::MAX_LEN`] are supported.

use std::fmt;
use thiserror::Error;

/// A validated game word
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Word {
    text: String,
}

/// Error type for invalid words
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("word is empty")]
    Empty,
    #[error("word '{word}' has {len} letters, at most {} are supported", Word::MAX_LEN)]
    TooLong { word: String, len: usize },
    #[error("word '{word}' must have exactly {expected} letters, got {found}")]
    WrongLength {
        word: String,
        expected: usize,
        found: usize,
    },
    #[error("word '{0}' must contain only ASCII letters")]
    InvalidCharacters(String),
}

impl Word {
    /// Longest supported word. `3^MAX_LEN` verdicts must fit a `u16`.
    pub const MAX_LEN: usize = 8;

    /// Create a new Word from a string, normalizing to lowercase
    ///
    /// # Errors
    /// Returns `WordError` if the word is empty, longer than [`Word::MAX_LEN`],
    /// or contains anything but ASCII letters.
    ///
    /// # Examples
    /// ```
    /// use wordle_strategist::core::Word;
    ///
    /// let word = Word::new("CRANE").unwrap();
    /// assert_eq!(word.text(), "crane");
    ///
    /// assert!(Word::new("sh0rt").is_err());
    /// ```
    pub fn new(text: impl Into<String>) -> Result<Self, WordError> {
        let text: String = text.into().trim().to_ascii_lowercase();

        if text.is_empty() {
            return Err(WordError::Empty);
        }

        if !text.bytes().all(|b| b.is_ascii_lowercase()) {
            return Err(WordError::InvalidCharacters(text));
        }

        if text.len() > Self::MAX_LEN {
            let len = text.len();
            return Err(WordError::TooLong { word: text, len });
        }

        Ok(Self { text })
    }

    /// Create a new Word that must have exactly `len` letters
    ///
    /// # Errors
    /// Same as [`Word::new`], plus `WrongLength` on a length mismatch.
    pub fn with_len(text: impl Into<String>, len: usize) -> Result<Self, WordError> {
        let word = Self::new(text)?;
        if word.len() != len {
            return Err(WordError::WrongLength {
                found: word.len(),
                word: word.text,
                expected: len,
            });
        }
        Ok(word)
    }

    /// Get the word as a string slice
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the word as bytes
    #[inline]
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Number of letters
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Always false for a constructed word
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
