//! Term names.
//!
//! A name is stored as its sequence of words so that `"make new"` and
//! `"make   new"` are the same name. Words break on whitespace and on
//! punctuation other than the characters in
//! [`NON_BREAKING_PUNCTUATION`]; each breaking punctuation character is a
//! word of its own.

use std::fmt;

use smol_str::SmolStr;

use crate::base::constants::NON_BREAKING_PUNCTUATION;

/// The user-facing name of a term.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TermName {
    words: Vec<SmolStr>,
}

impl TermName {
    pub fn new(text: &str) -> Self {
        Self {
            words: split_words(text),
        }
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    pub fn words(&self) -> &[SmolStr] {
        &self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words joined by single spaces.
    pub fn normalized(&self) -> String {
        self.words.join(" ")
    }
}

fn is_breaking_punctuation(c: char) -> bool {
    !c.is_alphanumeric() && !c.is_whitespace() && !NON_BREAKING_PUNCTUATION.contains(&c)
}

fn split_words(text: &str) -> Vec<SmolStr> {
    let mut words = Vec::new();
    let mut current = String::new();
    for c in text.chars() {
        if c.is_whitespace() || is_breaking_punctuation(c) {
            if !current.is_empty() {
                words.push(SmolStr::new(&current));
                current.clear();
            }
            if !c.is_whitespace() {
                words.push(SmolStr::new(c.encode_utf8(&mut [0; 4])));
            }
        } else {
            current.push(c);
        }
    }
    if !current.is_empty() {
        words.push(SmolStr::new(&current));
    }
    words
}

impl From<&str> for TermName {
    fn from(text: &str) -> Self {
        TermName::new(text)
    }
}

impl fmt::Display for TermName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for TermName {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.normalized())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for TermName {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(TermName::new(&text))
    }
}
