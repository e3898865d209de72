//! CVH Fuzzysort - Sublime-style fuzzy search and ranking
//!
//! A search string matches a candidate when all of its characters occur in
//! the candidate in order. Each match gets a score where lower is better
//! and 0 means the search equals the candidate. Matches that start on word
//! boundaries (`fs` in `Fuzzy Search`) and form consecutive runs score far
//! better than incidental ones (`fs` in `offset`).
//!
//! ```
//! let result = cvh_fuzzysort::match_one("fs", "Fuzzy Search").unwrap();
//! assert_eq!(result.highlighted.as_deref(), Some("<b>F</b>uzzy <b>S</b>earch"));
//!
//! assert_eq!(cvh_fuzzysort::match_one("test", "test").unwrap().score, 0);
//! assert!(cvh_fuzzysort::match_one("doesnt exist", "target").is_none());
//! ```
//!
//! Matching stops scanning a candidate after
//! [`Options::no_match_limit`] characters in a row without a match. Such a
//! candidate is reported as not matching, exactly like one that truly does
//! not contain the search; recall is traded for bounded cost per candidate.
//!
//! All positions and lengths count Unicode code points.

pub mod batch;
pub mod config;
pub mod error;
pub mod highlight;
pub mod matcher;
pub mod score;
pub mod strict;
pub mod target;
pub mod worker;

pub use batch::{Ranked, Results};
pub use config::Options;
pub use error::{Error, Result};
pub use target::{Prepared, Target};
pub use worker::{AsyncSearch, CancelHandle, Step, Worker};

use target::fold_str;

/// Outcome of matching one candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// Lower is better; 0 is an exact match
    pub score: u64,
    /// Matched code point indices, one per search character
    pub positions: Vec<usize>,
    /// Whether `positions` came from the boundary-preferring pass
    pub strict: bool,
    /// Candidate text with markers around matched runs, when enabled
    pub highlighted: Option<String>,
}

/// Matching engine holding validated options
#[derive(Debug, Clone, Default)]
pub struct Fuzzysort {
    options: Options,
}

impl Fuzzysort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: Options) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Match a single candidate
    ///
    /// An empty search trivially matches every candidate with no positions
    /// and a score equal to the candidate length.
    pub fn match_one<T: Target + ?Sized>(&self, search: &str, target: &T) -> Option<MatchResult> {
        let query = fold_str(search);

        let mut result = if query.is_empty() {
            MatchResult {
                score: target.text().chars().count() as u64,
                positions: Vec::new(),
                strict: true,
                highlighted: None,
            }
        } else {
            self.evaluate(&query, target)?
        };

        self.render(&mut result, target);
        Some(result)
    }

    /// Run both passes and score one candidate, without highlighting
    pub(crate) fn evaluate<T: Target + ?Sized>(&self, query: &[char], target: &T) -> Option<MatchResult> {
        let no_match_limit = self.options.no_match_limit;
        let folded = target.folded();
        let loose = matcher::loose_match(query, &folded, no_match_limit)?;

        let original = target.code_points();
        if original.len() != folded.len() {
            tracing::warn!(
                target_text = target.text(),
                chars = original.len(),
                folded = folded.len(),
                "folded projection does not line up with target, skipping"
            );
            return None;
        }

        let (positions, strict) =
            match strict::strict_match(query, &original, &folded, &loose, no_match_limit) {
                Some(positions) => (positions, true),
                None => {
                    tracing::trace!(target_text = target.text(), "no boundary match, using loose positions");
                    (loose, false)
                }
            };

        let score = score::score(
            &positions,
            strict,
            folded.len(),
            query.len(),
            self.options.loose_penalty,
        );

        Some(MatchResult {
            score,
            positions,
            strict,
            highlighted: None,
        })
    }

    /// Fill in the highlighted rendering if enabled
    pub(crate) fn render<T: Target + ?Sized>(&self, result: &mut MatchResult, target: &T) {
        if self.options.highlight {
            result.highlighted = Some(highlight::highlight(
                target.text(),
                &result.positions,
                &self.options.highlight_open,
                &self.options.highlight_close,
            ));
        }
    }
}

/// Match a single candidate with default options
pub fn match_one<T: Target + ?Sized>(search: &str, target: &T) -> Option<MatchResult> {
    Fuzzysort::new().match_one(search, target)
}

/// Match and rank a collection with default options
pub fn match_all<'a, T: Target>(search: &str, targets: &'a [T]) -> Results<'a, T> {
    Fuzzysort::new().match_all(search, targets)
}
