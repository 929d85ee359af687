//! Property-based checks of the scoring invariants.

use cvti_scorer::policy::{ApathyRule, AxisScores, ProbabilisticApathy, TieBreakPolicy, TieBreakTable};
use cvti_scorer::scoring::{assembler::assemble, picker::pick_side};
use cvti_scorer::{
    category_for_code, AnswerImpact, Axis, AxisPicks, AxisResolution, AxisTally, CvtiCode,
    CvtiScorer, ScamCategory, Side,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn impact_strategy() -> impl Strategy<Value = AnswerImpact> {
    prop::array::uniform12(0u32..4).prop_map(|w| AnswerImpact {
        t: w[0],
        q: w[1],
        s: w[2],
        n: w[3],
        p: w[4],
        g: w[5],
        j: w[6],
        p2: w[7],
        otq: w[8],
        osn: w[9],
        opg: w[10],
        ojp: w[11],
    })
}

fn resolution_strategy() -> impl Strategy<Value = AxisResolution> {
    prop_oneof![
        Just(AxisResolution::Left),
        Just(AxisResolution::Right),
        Just(AxisResolution::Apathy),
    ]
}

fn axis_strategy() -> impl Strategy<Value = Axis> {
    prop_oneof![Just(Axis::Tq), Just(Axis::Sn), Just(Axis::Pg), Just(Axis::Jp)]
}

proptest! {
    #[test]
    fn prop_tally_is_order_independent(
        answers in prop::collection::vec(prop::option::of(impact_strategy()), 0..24)
    ) {
        let forward = AxisTally::from_answers(answers.iter().map(Option::as_ref));
        let backward = AxisTally::from_answers(answers.iter().rev().map(Option::as_ref));
        prop_assert_eq!(forward, backward);

        let expected_t: u32 = answers.iter().flatten().map(|a| a.t).sum();
        prop_assert_eq!(forward.t, expected_t);
    }

    #[test]
    fn prop_certain_count_always_apathetic(apathy in 3u32..50, left in 0u32..50, right in 0u32..50, seed: u64) {
        let rule = ProbabilisticApathy::default();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let scores = AxisScores { left, right, apathy };
        prop_assert!(rule.is_apathetic(&scores, &mut rng));
    }

    #[test]
    fn prop_low_count_never_apathetic(apathy in 0u32..2, left in 0u32..50, right in 0u32..50, seed: u64) {
        let rule = ProbabilisticApathy::default();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let scores = AxisScores { left, right, apathy };
        prop_assert!(!rule.is_apathetic(&scores, &mut rng));
    }

    #[test]
    fn prop_boundary_draw_is_reproducible(seed: u64) {
        let rule = ProbabilisticApathy::default();
        let scores = AxisScores { left: 0, right: 0, apathy: 2 };
        let mut a = ChaCha8Rng::seed_from_u64(seed);
        let mut b = ChaCha8Rng::seed_from_u64(seed);
        for _ in 0..16 {
            prop_assert_eq!(rule.is_apathetic(&scores, &mut a), rule.is_apathetic(&scores, &mut b));
        }
    }

    #[test]
    fn prop_picker_prefers_higher_score(axis in axis_strategy(), left in 0u32..100, right in 0u32..100, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let policy = TieBreakPolicy::default();
        let side = pick_side(axis, &AxisScores { left, right, apathy: 0 }, &policy, &mut rng);

        if left > right {
            prop_assert_eq!(side, Side::Left);
        } else if right > left {
            prop_assert_eq!(side, Side::Right);
        } else {
            prop_assert_eq!(side, TieBreakTable::default().get(axis));
        }
    }

    #[test]
    fn prop_assembled_code_is_legal(
        tq in resolution_strategy(),
        sn in resolution_strategy(),
        pg in resolution_strategy(),
        jp in resolution_strategy(),
    ) {
        let picks = AxisPicks { tq, sn, pg, jp };
        let (code, apathy) = assemble(&picks);
        let text = code.to_string();

        prop_assert_eq!(text.chars().count(), 4);
        for (axis, symbol) in Axis::ALL.iter().zip(text.chars()) {
            prop_assert!(axis.allowed_symbols().contains(symbol), "{} on {}", symbol, axis);
        }
        prop_assert_eq!(apathy, picks.apathy_count());
        prop_assert_eq!(text.parse::<CvtiCode>().unwrap(), code);
    }

    #[test]
    fn prop_scoring_never_panics_and_is_consistent(
        answers in prop::collection::vec(prop::option::of(impact_strategy()), 0..20),
        seed: u64,
    ) {
        let result = CvtiScorer::seeded(seed).score(&answers);
        prop_assert_eq!(result.o_axes_count, result.cvti.apathy_count());
        prop_assert_eq!(result.scam_type, category_for_code(&result.cvti.to_string(), None));
        if result.o_axes_count >= 2 {
            prop_assert_eq!(result.scam_type, ScamCategory::Indifferent);
        }
    }

    #[test]
    fn prop_mapper_total_over_strings(code in "[A-Za-z]{0,6}") {
        // any string maps to some category without panicking
        let category = category_for_code(&code, None);
        prop_assert!(ScamCategory::ALL.contains(&category));
    }
}

#[test]
fn boundary_rate_converges_to_half() {
    let rule = ProbabilisticApathy::default();
    let scores = AxisScores { left: 1, right: 0, apathy: 2 };
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);

    let draws = 20_000;
    let hits = (0..draws).filter(|_| rule.is_apathetic(&scores, &mut rng)).count();
    let rate = hits as f64 / draws as f64;
    assert!((rate - 0.5).abs() < 0.02, "rate {}", rate);
}
