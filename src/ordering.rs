//! # Ordering
//! Score-descending sort with an epsilon tie-break on recency.
//!
//! Scores are quantized onto an epsilon-wide grid; entities landing in the
//! same cell count as tied and the fresher one (higher recency tier) wins,
//! with exact score as the final key. Comparing cells instead of raw
//! pairwise distances keeps the comparator a strict weak ordering, which
//! `slice::sort_by` requires: a raw `|a−b| ≤ ε` tie rule is not transitive
//! over chains of near-tied scores and trips the sort's total-order check.
//!
//! Epsilon is scale-dependent: callers sorting `[0,1]` scores pass
//! `profile.tie_epsilon`, callers sorting the 0–100 projections pass
//! `profile.tie_epsilon_rank()`.

use std::cmp::Ordering;

use crate::entity::ModelEntity;

/// Leaderboard comparator. `Less` means "ranks higher" so that a plain
/// ascending sort yields best-first output.
///
/// Keys, in order: epsilon cell descending, recency tier descending,
/// exact score descending. Two scores in the same cell always differ by
/// less than epsilon.
pub fn compare(
    a: &ModelEntity,
    score_a: f64,
    b: &ModelEntity,
    score_b: f64,
    epsilon: f64,
) -> Ordering {
    let cell_a = (score_a / epsilon).floor();
    let cell_b = (score_b / epsilon).floor();
    // NaN never arises from the projection formulas.
    cell_b
        .partial_cmp(&cell_a)
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.recency_tier.cmp(&a.recency_tier))
        .then_with(|| score_b.partial_cmp(&score_a).unwrap_or(Ordering::Equal))
}

/// Sort entities best-first by the given projection.
pub fn sort_by_score<F>(entities: &mut [ModelEntity], epsilon: f64, score: F)
where
    F: Fn(&ModelEntity) -> f64,
{
    entities.sort_by(|a, b| compare(a, score(a), b, score(b), epsilon));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(name: &str, tier: u8) -> ModelEntity {
        let mut e = ModelEntity::new(name, "o");
        e.recency_tier = tier;
        e
    }

    #[test]
    fn clear_gap_sorts_by_score() {
        let a = entity("a", 0);
        let b = entity("b", 3);
        assert_eq!(compare(&a, 90.0, &b, 80.0, 0.5), Ordering::Less);
        assert_eq!(compare(&b, 80.0, &a, 90.0, 0.5), Ordering::Greater);
    }

    #[test]
    fn same_cell_fresher_wins() {
        let stale = entity("stale", 1);
        let fresh = entity("fresh", 3);
        // 85.1 and 85.4 share the [85.0, 85.5) cell.
        assert_eq!(compare(&fresh, 85.1, &stale, 85.4, 0.5), Ordering::Less);
        assert_eq!(compare(&stale, 85.4, &fresh, 85.1, 0.5), Ordering::Greater);
    }

    #[test]
    fn cell_boundary_separates_nearby_scores() {
        // 84.9 and 85.1 are 0.2 apart but land in different cells, so the
        // higher score wins regardless of tiers.
        let stale = entity("stale", 0);
        let fresh = entity("fresh", 3);
        assert_eq!(compare(&stale, 85.1, &fresh, 84.9, 0.5), Ordering::Less);
    }

    #[test]
    fn equal_tier_ties_fall_back_to_exact_score() {
        let a = entity("a", 2);
        let b = entity("b", 2);
        assert_eq!(compare(&b, 85.1, &a, 85.0, 0.5), Ordering::Less);
        assert_eq!(compare(&a, 85.0, &b, 85.0, 0.5), Ordering::Equal);
    }

    #[test]
    fn sort_produces_best_first_with_tie_break() {
        let mut v = vec![
            entity("mid-stale", 0),
            entity("top", 1),
            entity("mid-fresh", 3),
        ];
        let score = |e: &ModelEntity| match e.name.as_str() {
            "top" => 92.0,
            "mid-fresh" => 85.0,
            _ => 85.3,
        };
        sort_by_score(&mut v, 0.5, score);
        let names: Vec<&str> = v.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["top", "mid-fresh", "mid-stale"]);
    }

    #[test]
    fn tie_break_is_transitive_over_near_tied_chains() {
        // Three entities in one epsilon cell: ordering reduces to recency
        // tiers and stays transitive.
        let a = entity("a", 3);
        let b = entity("b", 2);
        let c = entity("c", 1);
        let scores = [(&a, 85.0), (&b, 85.2), (&c, 85.4)];
        for (x, sx) in &scores {
            for (y, sy) in &scores {
                for (z, sz) in &scores {
                    if compare(x, *sx, y, *sy, 0.5) == Ordering::Less
                        && compare(y, *sy, z, *sz, 0.5) == Ordering::Less
                    {
                        assert_eq!(compare(x, *sx, z, *sz, 0.5), Ordering::Less);
                    }
                }
            }
        }
    }

    #[test]
    fn overlapping_tie_chain_stays_consistent() {
        // 85.0~85.4 and 85.4~85.8 overlap pairwise while 85.0 and 85.8 do
        // not; a raw pairwise rule calls both pairs Equal and breaks
        // transitivity of equivalence. Cells resolve the chain: 85.8 sits
        // in the next cell and outranks both, 85.0 and 85.4 tie on tier.
        let a = entity("a", 3);
        let b = entity("b", 0);
        let c = entity("c", 0);
        assert_eq!(compare(&a, 85.0, &b, 85.4, 0.5), Ordering::Less);
        assert_eq!(compare(&c, 85.8, &a, 85.0, 0.5), Ordering::Less);
        assert_eq!(compare(&c, 85.8, &b, 85.4, 0.5), Ordering::Less);
    }

    #[test]
    fn sort_survives_densely_clustered_scores() {
        // A big board with every score packed into a 3-point band and mixed
        // tiers; the sort must complete and honor cell-then-tier order.
        let mut v: Vec<ModelEntity> = (0..264)
            .map(|i| {
                let mut e = entity(&format!("m{i}"), (i % 4) as u8);
                e.final_score = 80.0 + ((i * 37) % 300) as f64 / 100.0;
                e
            })
            .collect();
        sort_by_score(&mut v, 0.5, |e| e.final_score);

        for w in v.windows(2) {
            let (hi, lo) = (&w[0], &w[1]);
            let cell_hi = (hi.final_score / 0.5).floor();
            let cell_lo = (lo.final_score / 0.5).floor();
            assert!(cell_hi >= cell_lo, "{} before {}", hi.name, lo.name);
            if cell_hi == cell_lo {
                assert!(hi.recency_tier >= lo.recency_tier);
            }
        }
    }

    #[test]
    fn unit_scale_epsilon_behaves_like_rank_scale() {
        let stale = entity("stale", 1);
        let fresh = entity("fresh", 3);
        // 0.846 and 0.849 share the [0.845, 0.850) cell.
        assert_eq!(compare(&fresh, 0.846, &stale, 0.849, 0.005), Ordering::Less);
        assert_eq!(compare(&fresh, 0.80, &stale, 0.849, 0.005), Ordering::Greater);
    }
}
