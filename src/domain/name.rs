//! Name validation against the query language's reserved vocabulary
//!
//! Tag and value names end up as words in queries (`year ge 2015 and not
//! holiday`) and as directory names in filesystem views, so they must never
//! collide with an operator, the path literals, or the characters the query
//! tokenizer splits on.
//!
//! # Examples
//!
//! ```
//! use tagshelf::domain::name::{validate_name, NameError, ReservedVocabulary};
//!
//! let vocabulary = ReservedVocabulary::query_grammar();
//! assert!(validate_name("summer", &vocabulary).is_ok());
//! assert_eq!(
//!     validate_name("NOT", &vocabulary),
//!     Err(NameError::ReservedWord("NOT".to_string()))
//! );
//! ```

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Reasons a tag or value name is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("name cannot be empty")]
    Empty,

    #[error("name cannot be '.' or '..'")]
    DotLiteral,

    #[error("name cannot be the query operator '{0}'")]
    ReservedWord(String),

    #[error("name cannot contain '{}'", escape(.0))]
    ReservedChar(char),

    #[error("name cannot contain '{}'", .0.escape_unicode())]
    DisallowedChar(char),
}

fn escape(ch: &char) -> String {
    match *ch {
        '\t' => "\\t".to_string(),
        ' ' => "space".to_string(),
        _ => ch.to_string(),
    }
}

/// Words and characters owned by the query grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedVocabulary {
    words: Vec<String>,
    chars: Vec<char>,
}

impl ReservedVocabulary {
    /// Words are matched case-insensitively.
    pub fn new<W, S>(words: W, chars: &[char]) -> Self
    where
        W: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ReservedVocabulary {
            words: words
                .into_iter()
                .map(|word| word.as_ref().to_lowercase())
                .collect(),
            chars: chars.to_vec(),
        }
    }

    /// The logical and comparison operators plus the tokenizer's delimiters.
    pub fn query_grammar() -> Self {
        Self::new(
            ["and", "or", "not", "eq", "ne", "lt", "gt", "le", "ge"],
            &['(', ')', ',', '=', '!', '<', '>', ' ', '\t', '/'],
        )
    }

    pub fn is_reserved_word(&self, name: &str) -> bool {
        let lowered = name.to_lowercase();
        self.words.iter().any(|word| *word == lowered)
    }

    pub fn is_reserved_char(&self, ch: char) -> bool {
        self.chars.contains(&ch)
    }
}

/// Letters, numbers, punctuation and symbols only.
fn printable_char_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[\p{L}\p{N}\p{P}\p{S}]$").unwrap())
}

/// Check `name` against `vocabulary`. Pure: touches no storage.
pub fn validate_name(name: &str, vocabulary: &ReservedVocabulary) -> Result<(), NameError> {
    match name {
        "" => return Err(NameError::Empty),
        "." | ".." => return Err(NameError::DotLiteral),
        _ => {}
    }

    if vocabulary.is_reserved_word(name) {
        return Err(NameError::ReservedWord(name.to_string()));
    }

    let mut buf = [0u8; 4];
    for ch in name.chars() {
        if vocabulary.is_reserved_char(ch) {
            return Err(NameError::ReservedChar(ch));
        }
        if !printable_char_regex().is_match(ch.encode_utf8(&mut buf)) {
            return Err(NameError::DisallowedChar(ch));
        }
    }

    Ok(())
}
