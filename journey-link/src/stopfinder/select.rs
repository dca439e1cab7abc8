//! Best-stop selection among stop-finder candidates.

use std::cmp::Ordering;

use crate::domain::Stop;

/// Pick the single best stop from a non-empty candidate list.
///
/// Candidates are ranked by:
/// 1. The service's own `is_best` flag (flagged first)
/// 2. Match quality (higher is better, missing counts as lowest)
/// 3. Position in the service's ordering (earlier is better)
///
/// The result depends only on the order and contents of `candidates`, so
/// the same lookup always resolves to the same stop.
///
/// # Panics
///
/// Panics if `candidates` is empty. Callers check for matches first.
pub fn select_best_stop(candidates: &[Stop]) -> &Stop {
    assert!(
        !candidates.is_empty(),
        "select_best_stop requires at least one candidate"
    );

    let mut best = &candidates[0];
    for candidate in &candidates[1..] {
        // Strictly better only, so ties keep the earlier candidate
        if compare(candidate, best) == Ordering::Greater {
            best = candidate;
        }
    }
    best
}

/// Compare two stops by ranking hints, greater is better.
fn compare(a: &Stop, b: &Stop) -> Ordering {
    let best_cmp = a.is_best.cmp(&b.is_best);
    if best_cmp != Ordering::Equal {
        return best_cmp;
    }

    a.match_quality.cmp(&b.match_quality)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coord, StopId};

    fn stop(id: &str) -> Stop {
        Stop::new(StopId::new(id).unwrap(), id, Coord::new(51.5, 7.4))
    }

    #[test]
    fn single_candidate_is_selected() {
        let candidates = vec![stop("A")];
        assert_eq!(select_best_stop(&candidates).id.as_str(), "A");
    }

    #[test]
    fn without_hints_first_wins() {
        let candidates = vec![stop("A"), stop("B"), stop("C")];
        assert_eq!(select_best_stop(&candidates).id.as_str(), "A");
    }

    #[test]
    fn best_flag_beats_quality() {
        let candidates = vec![
            stop("A").with_match_quality(1000),
            stop("B").with_match_quality(500).with_best(true),
        ];
        assert_eq!(select_best_stop(&candidates).id.as_str(), "B");
    }

    #[test]
    fn first_flagged_wins_among_flagged() {
        let candidates = vec![
            stop("A"),
            stop("B").with_best(true).with_match_quality(700),
            stop("C").with_best(true).with_match_quality(700),
        ];
        assert_eq!(select_best_stop(&candidates).id.as_str(), "B");
    }

    #[test]
    fn higher_quality_wins() {
        let candidates = vec![
            stop("A").with_match_quality(700),
            stop("B").with_match_quality(950),
            stop("C"),
        ];
        assert_eq!(select_best_stop(&candidates).id.as_str(), "B");
    }

    #[test]
    fn quality_ties_keep_upstream_order() {
        let candidates = vec![
            stop("A").with_match_quality(800),
            stop("B").with_match_quality(900),
            stop("C").with_match_quality(900),
        ];
        assert_eq!(select_best_stop(&candidates).id.as_str(), "B");
    }

    #[test]
    fn same_input_same_output() {
        let candidates = vec![
            stop("A").with_match_quality(900),
            stop("B").with_match_quality(900),
            stop("C").with_best(true),
        ];
        let first = select_best_stop(&candidates).clone();
        let second = select_best_stop(&candidates).clone();
        assert_eq!(first, second);
    }

    #[test]
    #[should_panic(expected = "at least one candidate")]
    fn empty_candidates_panic() {
        select_best_stop(&[]);
    }
}
