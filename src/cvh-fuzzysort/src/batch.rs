//! Batch matching over a collection of candidates
//!
//! Every batch entry point collects matches in input order, then shares
//! one finishing step: stable sort by score, record the total, truncate to
//! the configured limit, and highlight what is left.

use std::ops::Deref;
use std::time::Instant;

use rayon::prelude::*;
use tracing::debug;

use crate::target::{fold_str, Target};
use crate::{Fuzzysort, MatchResult};

/// A matched candidate together with its place in the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranked<'a, T> {
    pub target: &'a T,
    /// Index of `target` in the searched slice
    pub index: usize,
    pub result: MatchResult,
}

impl<'a, T> Ranked<'a, T> {
    pub fn score(&self) -> u64 {
        self.result.score
    }
}

/// Ranked matches, best first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Results<'a, T> {
    matches: Vec<Ranked<'a, T>>,
    total: usize,
}

impl<'a, T> Results<'a, T> {
    pub(crate) fn empty() -> Self {
        Self {
            matches: Vec::new(),
            total: 0,
        }
    }

    /// Number of matches before the limit was applied
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn into_vec(self) -> Vec<Ranked<'a, T>> {
        self.matches
    }
}

impl<'a, T> Deref for Results<'a, T> {
    type Target = [Ranked<'a, T>];

    fn deref(&self) -> &Self::Target {
        &self.matches
    }
}

impl<'a, T> IntoIterator for Results<'a, T> {
    type Item = Ranked<'a, T>;
    type IntoIter = std::vec::IntoIter<Ranked<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.into_iter()
    }
}

impl<'r, 'a, T> IntoIterator for &'r Results<'a, T> {
    type Item = &'r Ranked<'a, T>;
    type IntoIter = std::slice::Iter<'r, Ranked<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.iter()
    }
}

impl Fuzzysort {
    /// Match every candidate and rank the matches
    ///
    /// An empty search yields no results and a total of 0.
    pub fn match_all<'a, T: Target>(&self, search: &str, targets: &'a [T]) -> Results<'a, T> {
        let query = fold_str(search);
        if query.is_empty() {
            return Results::empty();
        }

        let started = Instant::now();
        let found: Vec<_> = targets
            .iter()
            .enumerate()
            .filter_map(|(index, target)| self.rank(&query, index, target))
            .collect();

        debug!(
            candidates = targets.len(),
            matched = found.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "matched batch"
        );
        self.finish(found)
    }

    /// Same results as [`Fuzzysort::match_all`], matched on the rayon pool
    pub fn match_all_parallel<'a, T: Target + Sync>(
        &self,
        search: &str,
        targets: &'a [T],
    ) -> Results<'a, T> {
        let query = fold_str(search);
        if query.is_empty() {
            return Results::empty();
        }

        let started = Instant::now();
        let found: Vec<_> = targets
            .par_iter()
            .enumerate()
            .filter_map(|(index, target)| self.rank(&query, index, target))
            .collect();

        debug!(
            candidates = targets.len(),
            matched = found.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "matched batch in parallel"
        );
        self.finish(found)
    }

    pub(crate) fn rank<'a, T: Target>(
        &self,
        query: &[char],
        index: usize,
        target: &'a T,
    ) -> Option<Ranked<'a, T>> {
        self.evaluate(query, target).map(|result| Ranked {
            target,
            index,
            result,
        })
    }

    /// Sort, truncate and highlight collected matches
    pub(crate) fn finish<'a, T: Target>(&self, mut found: Vec<Ranked<'a, T>>) -> Results<'a, T> {
        found.sort_by_key(|ranked| ranked.result.score);

        let total = found.len();
        if let Some(limit) = self.options.limit {
            found.truncate(limit);
        }

        for ranked in &mut found {
            self.render(&mut ranked.result, ranked.target);
        }

        debug!(total, kept = found.len(), "ranked results");
        Results {
            matches: found,
            total,
        }
    }
}
