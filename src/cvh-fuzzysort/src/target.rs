//! Candidate model
//!
//! Everything is indexed by code point. Folding maps each character to
//! exactly one character so positions in the folded form line up with
//! positions in the original text.

use std::borrow::Cow;

use crate::error::{Error, Result};

/// Lowercase a single character without changing the character count
pub fn fold(c: char) -> char {
    if c.is_ascii() {
        return c.to_ascii_lowercase();
    }
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

/// Fold a whole string into code points
pub fn fold_str(s: &str) -> Vec<char> {
    s.chars().map(fold).collect()
}

/// Something that can be searched
///
/// Plain strings fold themselves on every query. Implementors holding a
/// stable corpus can override [`Target::folded`] and [`Target::code_points`] to
/// hand out cached data instead, as [`Prepared`] does.
pub trait Target {
    /// Original, case-preserved text
    fn text(&self) -> &str;

    /// Folded projection, one entry per code point of [`Target::text`]
    fn folded(&self) -> Cow<'_, [char]> {
        Cow::Owned(fold_str(self.text()))
    }

    /// Code points of the original text
    fn code_points(&self) -> Cow<'_, [char]> {
        Cow::Owned(self.text().chars().collect())
    }
}

impl Target for str {
    fn text(&self) -> &str {
        self
    }
}

impl Target for String {
    fn text(&self) -> &str {
        self
    }
}

impl<T: Target + ?Sized> Target for &T {
    fn text(&self) -> &str {
        (**self).text()
    }

    fn folded(&self) -> Cow<'_, [char]> {
        (**self).folded()
    }

    fn code_points(&self) -> Cow<'_, [char]> {
        (**self).code_points()
    }
}

/// A candidate with its folded form computed once up front
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prepared {
    text: String,
    chars: Box<[char]>,
    lower: Box<[char]>,
}

impl Prepared {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let chars: Box<[char]> = text.as_str().chars().collect();
        let lower = chars.iter().copied().map(fold).collect();
        Self { text, chars, lower }
    }

    /// Build from a caller-supplied lowercase projection
    ///
    /// The projection must fold the original character for character.
    pub fn with_lower(text: impl Into<String>, lower: &str) -> Result<Self> {
        let text = text.into();
        let chars: Box<[char]> = text.as_str().chars().collect();
        let lower: Box<[char]> = lower.chars().collect();

        if chars.len() != lower.len() {
            return Err(Error::ProjectionLength {
                target: chars.len(),
                lower: lower.len(),
            });
        }
        if let Some(index) = chars
            .iter()
            .zip(lower.iter())
            .position(|(&c, &l)| fold(c) != l)
        {
            return Err(Error::ProjectionMismatch { index });
        }

        Ok(Self { text, chars, lower })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in code points
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

impl Target for Prepared {
    fn text(&self) -> &str {
        &self.text
    }

    fn folded(&self) -> Cow<'_, [char]> {
        Cow::Borrowed(&self.lower[..])
    }

    fn code_points(&self) -> Cow<'_, [char]> {
        Cow::Borrowed(&self.chars[..])
    }
}

impl From<&str> for Prepared {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Prepared {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// Word and case class of a character, used for boundary detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct CharClass {
    pub upper: bool,
    pub word: bool,
}

impl CharClass {
    /// Class assumed before the first character of a target
    pub const START: Self = Self {
        upper: false,
        word: false,
    };

    pub fn of(c: char) -> Self {
        Self {
            upper: c.is_uppercase(),
            word: c.is_alphanumeric(),
        }
    }

    /// Whether `self` starts a new word after `prev`
    pub fn begins_after(self, prev: Self) -> bool {
        (self.upper && !prev.upper) || !prev.word || !self.word
    }
}
