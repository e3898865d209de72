//! Existence pass
//!
//! A cheap first-fit walk that tells whether every search character occurs
//! in the target in order. Most candidates are rejected here.

/// First-fit positions of `search` in `folded`, or `None`
///
/// Gives up once `no_match_limit` characters in a row fail to match, so a
/// very sparse match in a long target can be missed. `search` must not be
/// empty.
pub fn loose_match(search: &[char], folded: &[char], no_match_limit: usize) -> Option<Vec<usize>> {
    debug_assert!(!search.is_empty());

    let mut positions = Vec::with_capacity(search.len());
    let mut misses = 0;

    for (i, &c) in folded.iter().enumerate() {
        if c == search[positions.len()] {
            positions.push(i);
            if positions.len() == search.len() {
                return Some(positions);
            }
            misses = 0;
        } else {
            misses += 1;
            if misses >= no_match_limit {
                return None;
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::fold_str;

    fn loose(search: &str, target: &str) -> Option<Vec<usize>> {
        loose_match(&fold_str(search), &fold_str(target), 100)
    }

    #[test]
    fn test_exact_match() {
        assert_eq!(loose("firefox", "Firefox"), Some(vec![0, 1, 2, 3, 4, 5, 6]));
    }

    #[test]
    fn test_fuzzy_match() {
        assert_eq!(loose("ff", "Firefox"), Some(vec![0, 4]));
        assert_eq!(loose("frfx", "Firefox"), Some(vec![0, 2, 4, 6]));
    }

    #[test]
    fn test_first_fit() {
        assert_eq!(loose("fs", "offset Fast Search"), Some(vec![1, 3]));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(loose("xyz", "Firefox"), None);
        assert_eq!(loose("doesnt exist", "target"), None);
    }

    #[test]
    fn test_order_matters() {
        assert_eq!(loose("of", "Firefox"), None);
    }

    #[test]
    fn test_empty_target() {
        assert_eq!(loose("a", ""), None);
    }

    #[test]
    fn test_search_longer_than_target() {
        assert_eq!(loose("abcd", "abc"), None);
    }

    #[test]
    fn test_abandons_after_limit() {
        let target = format!("a{}b", "x".repeat(10));
        let search = fold_str("ab");
        let folded = fold_str(&target);

        assert_eq!(loose_match(&search, &folded, 11), Some(vec![0, 11]));
        assert_eq!(loose_match(&search, &folded, 10), None);
    }

    #[test]
    fn test_limit_resets_on_match() {
        let target = format!("{}a{}b", "x".repeat(8), "x".repeat(8));
        let search = fold_str("ab");

        assert_eq!(loose_match(&search, &fold_str(&target), 9), Some(vec![8, 17]));
    }
}
