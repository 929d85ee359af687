//! Axis picker: higher score wins, ties go to the configured policy.

use crate::models::{Axis, Side};
use crate::policy::{AxisScores, TieBreakPolicy};
use rand::RngCore;
use std::cmp::Ordering;

/// Pick the substantive side of a non-apathetic axis.
pub fn pick_side(
    axis: Axis,
    scores: &AxisScores,
    tie_break: &TieBreakPolicy,
    rng: &mut dyn RngCore,
) -> Side {
    match scores.left.cmp(&scores.right) {
        Ordering::Greater => Side::Left,
        Ordering::Less => Side::Right,
        Ordering::Equal => {
            let side = tie_break.resolve(axis, rng);
            log::debug!(
                "[Picker] {} tied at {}; tie-break -> {}",
                axis,
                scores.left,
                axis.symbol(side.into())
            );
            side
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::TieBreakTable;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn scores(left: u32, right: u32) -> AxisScores {
        AxisScores { left, right, apathy: 0 }
    }

    #[test]
    fn test_higher_score_wins() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let policy = TieBreakPolicy::default();
        assert_eq!(pick_side(Axis::Tq, &scores(2, 1), &policy, &mut rng), Side::Left);
        assert_eq!(pick_side(Axis::Tq, &scores(0, 1), &policy, &mut rng), Side::Right);
    }

    #[test]
    fn test_tie_uses_table() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let policy = TieBreakPolicy::default();
        assert_eq!(pick_side(Axis::Tq, &scores(1, 1), &policy, &mut rng), Side::Right);
        assert_eq!(pick_side(Axis::Sn, &scores(0, 0), &policy, &mut rng), Side::Left);
        assert_eq!(pick_side(Axis::Pg, &scores(2, 2), &policy, &mut rng), Side::Right);
        assert_eq!(pick_side(Axis::Jp, &scores(2, 2), &policy, &mut rng), Side::Left);
    }

    #[test]
    fn test_tie_overrides() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut table = TieBreakTable::default();
        table.set(Axis::Tq, Side::Left);
        let policy = TieBreakPolicy::Table(table);
        assert_eq!(pick_side(Axis::Tq, &scores(1, 1), &policy, &mut rng), Side::Left);

        assert_eq!(
            pick_side(Axis::Sn, &scores(1, 1), &TieBreakPolicy::Right, &mut rng),
            Side::Right
        );
        assert_eq!(
            pick_side(Axis::Pg, &scores(1, 1), &TieBreakPolicy::Left, &mut rng),
            Side::Left
        );
    }

    #[test]
    fn test_random_tie_break_is_seed_reproducible() {
        let draw = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            (0..32)
                .map(|_| pick_side(Axis::Jp, &scores(1, 1), &TieBreakPolicy::Random, &mut rng))
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(11), draw(11));
        let picks = draw(11);
        assert!(picks.contains(&Side::Left) && picks.contains(&Side::Right));
    }
}
