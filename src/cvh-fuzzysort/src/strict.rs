//! Quality pass
//!
//! Re-derives match positions so that every run of matched characters
//! starts on a word boundary: the start of the target, a character after a
//! non-alphanumeric one, a non-alphanumeric character itself, or an
//! upper-case letter after a non-upper-case one. Inside a run the boundary
//! rule is suspended.
//!
//! The walk moves forward and backtracks one accepted position at a time
//! when it runs off the end of the target. The loose positions bound every
//! search character from below, so the walk jumps straight to them instead
//! of scanning positions that can never match.
//!
//! What follows an accepted position depends only on which search character
//! it took and where, so a (search index, position) pair whose continuation
//! was already backtracked out of is never accepted again. That keeps the
//! walk polynomial on targets dense with word starts.

use crate::target::CharClass;

/// State carried through one strict walk
struct StrictWalk<'a> {
    search: &'a [char],
    original: &'a [char],
    folded: &'a [char],
    loose: &'a [usize],
    no_match_limit: usize,

    /// Next target position to inspect
    cursor: usize,
    /// `cursor` directly follows the last accepted position
    consecutive: bool,
    /// Class of the character before `cursor`
    prev: CharClass,
    misses: usize,
    /// Accepted positions; its length is the search cursor
    accepted: Vec<usize>,
    /// Dead (search index, position) pairs, row-major; empty until the first backtrack
    failed: Vec<bool>,
}

impl<'a> StrictWalk<'a> {
    fn new(
        search: &'a [char],
        original: &'a [char],
        folded: &'a [char],
        loose: &'a [usize],
        no_match_limit: usize,
    ) -> Self {
        let mut walk = Self {
            search,
            original,
            folded,
            loose,
            no_match_limit,
            cursor: 0,
            consecutive: false,
            prev: CharClass::START,
            misses: 0,
            accepted: Vec::with_capacity(search.len()),
            failed: Vec::new(),
        };
        walk.seek(loose[0]);
        walk
    }

    /// Move the cursor to `pos`, rebuilding the class history behind it
    fn seek(&mut self, pos: usize) {
        self.cursor = pos;
        self.consecutive = false;
        self.prev = match pos {
            0 => CharClass::START,
            _ => CharClass::of(self.original[pos - 1]),
        };
    }

    fn slot(&self, pos: usize) -> usize {
        self.accepted.len() * self.folded.len() + pos
    }

    fn has_failed(&self, pos: usize) -> bool {
        self.failed.get(self.slot(pos)).copied().unwrap_or(false)
    }

    fn mark_failed(&mut self, pos: usize) {
        if self.failed.is_empty() {
            self.failed = vec![false; self.search.len() * self.folded.len()];
        }
        let slot = self.slot(pos);
        self.failed[slot] = true;
    }

    fn run(mut self) -> Option<Vec<usize>> {
        loop {
            if self.cursor >= self.folded.len() {
                // No spot left for this search char: force the previous one forward
                let last = self.accepted.pop()?;
                self.mark_failed(last);
                self.seek(last + 1);
                continue;
            }

            let class = CharClass::of(self.original[self.cursor]);
            let eligible = self.consecutive || class.begins_after(self.prev);
            self.prev = class;

            if !eligible {
                self.cursor += 1;
                continue;
            }

            if self.has_failed(self.cursor) {
                self.consecutive = false;
                self.cursor += 1;
                continue;
            }

            if self.folded[self.cursor] == self.search[self.accepted.len()] {
                self.accepted.push(self.cursor);
                if self.accepted.len() == self.search.len() {
                    return Some(self.accepted);
                }
                self.misses = 0;
                self.cursor += 1;
                self.consecutive = true;

                let hint = self.loose[self.accepted.len()];
                if hint > self.cursor {
                    self.seek(hint);
                }
            } else {
                self.misses += 1;
                if self.misses >= self.no_match_limit {
                    return None;
                }
                self.consecutive = false;
                self.cursor += 1;
            }
        }
    }
}

/// Boundary-preferring positions, or `None` when no such assignment exists
///
/// `loose` must be the output of [`crate::matcher::loose_match`] for the
/// same search and target.
pub fn strict_match(
    search: &[char],
    original: &[char],
    folded: &[char],
    loose: &[usize],
    no_match_limit: usize,
) -> Option<Vec<usize>> {
    debug_assert_eq!(search.len(), loose.len());
    debug_assert_eq!(original.len(), folded.len());

    StrictWalk::new(search, original, folded, loose, no_match_limit).run()
}
