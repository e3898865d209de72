//! Scoring: lower is better, 0 is an exact match

/// Score a position sequence
///
/// Every position that does not directly follow the previous one adds its
/// index, so early and clustered matches win. Sequences that are only
/// loose are multiplied by `loose_penalty`. The length difference breaks
/// ties toward shorter targets.
pub fn score(
    positions: &[usize],
    strict: bool,
    target_len: usize,
    search_len: usize,
    loose_penalty: u64,
) -> u64 {
    let mut gaps: u64 = 0;
    let mut last: Option<usize> = None;

    for &pos in positions {
        if last.map_or(true, |l| l + 1 != pos) {
            gaps = gaps.saturating_add(pos as u64);
        }
        last = Some(pos);
    }

    if !strict {
        gaps = gaps.saturating_mul(loose_penalty);
    }

    gaps.saturating_add(target_len.saturating_sub(search_len) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_is_zero() {
        assert_eq!(score(&[0, 1, 2, 3], true, 4, 4, 1000), 0);
    }

    #[test]
    fn test_runs_count_once() {
        // run at 6..9 contributes only its first index
        assert_eq!(score(&[6, 7, 8], true, 12, 3, 1000), 6 + 9);
    }

    #[test]
    fn test_scattered() {
        assert_eq!(score(&[0, 6], true, 12, 2, 1000), 6 + 10);
    }

    #[test]
    fn test_loose_penalty() {
        assert_eq!(score(&[1, 2], false, 3, 2, 1000), 1000 + 1);
        assert_eq!(score(&[1, 2], false, 3, 2, 10), 10 + 1);
    }

    #[test]
    fn test_start_at_zero_costs_nothing() {
        assert_eq!(score(&[0], false, 5, 1, 1000), 4);
    }

    #[test]
    fn test_saturates() {
        assert_eq!(score(&[usize::MAX], false, 1, 1, u64::MAX), u64::MAX);
    }
}
