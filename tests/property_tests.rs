//! Property-based tests using proptest
//!
//! These tests verify the invariants of the FROC curve, the sampler and the
//! IoU computation for arbitrary corpora.

use froc_eval::froc::build_froc;
use froc_eval::metrics::calculate_iou;
use froc_eval::sampler::sample;
use froc_eval::types::{BoundingBox, ScoredBox};
use proptest::prelude::*;

fn bbox_strategy() -> impl Strategy<Value = BoundingBox> {
    (0u32..200, 0u32..200, 0u32..60, 0u32..60).prop_map(|(x, y, w, h)| {
        let (x, y) = (f64::from(x), f64::from(y));
        BoundingBox::new(x, y, x + f64::from(w), y + f64::from(h))
    })
}

fn scored_box_strategy() -> impl Strategy<Value = ScoredBox> {
    // Coarse scores so that ties are common.
    (bbox_strategy(), 0u8..=10).prop_map(|(bbox, s)| ScoredBox {
        bbox,
        score: f64::from(s) / 10.0,
    })
}

type Corpus = (Vec<Vec<ScoredBox>>, Vec<Vec<BoundingBox>>);

fn corpus_strategy() -> impl Strategy<Value = Corpus> {
    prop::collection::vec(
        (
            prop::collection::vec(scored_box_strategy(), 0..8),
            prop::collection::vec(bbox_strategy(), 0..5),
        ),
        1..6,
    )
    .prop_filter("corpus needs at least one ground truth", |images| {
        images.iter().any(|(_, gts)| !gts.is_empty())
    })
    .prop_map(|images| -> Corpus { images.into_iter().unzip() })
}

// Property: both curve sequences are non-decreasing and within range
proptest! {
    #[test]
    fn prop_curve_monotonic_and_bounded(
        (predictions, ground_truths) in corpus_strategy(),
        iou_threshold in 0.0f64..=1.0
    ) {
        let curve = build_froc(&predictions, &ground_truths, iou_threshold).unwrap();

        let total_predictions: usize = predictions.iter().map(Vec::len).sum();
        let max_fp = total_predictions as f64 / predictions.len() as f64;

        prop_assert_eq!(curve.len(), total_predictions);
        prop_assert_eq!(curve.fp_per_image.len(), total_predictions);

        for w in curve.sensitivities.windows(2) {
            prop_assert!(w[0] <= w[1], "sensitivity decreased: {:?}", w);
        }
        for w in curve.fp_per_image.windows(2) {
            prop_assert!(w[0] <= w[1], "fp per image decreased: {:?}", w);
        }
        for &s in &curve.sensitivities {
            prop_assert!((0.0..=1.0).contains(&s), "sensitivity out of range: {}", s);
        }
        for &fp in &curve.fp_per_image {
            prop_assert!(fp >= 0.0 && fp <= max_fp, "fp per image out of range: {}", fp);
        }
    }

    #[test]
    fn prop_each_prediction_adds_at_most_one_miss(
        (predictions, ground_truths) in corpus_strategy()
    ) {
        let curve = build_froc(&predictions, &ground_truths, 0.5).unwrap();

        let mut prev_misses = 0;
        for (i, &misses) in curve.misses.iter().enumerate() {
            prop_assert!(misses <= i + 1);
            prop_assert!(misses - prev_misses <= 1);
            prev_misses = misses;
        }
        if let Some(&hits) = curve.hits.last() {
            prop_assert!(hits <= curve.total_ground_truths);
        }
    }
}

// Property: identical input gives a bit-identical curve
proptest! {
    #[test]
    fn prop_curve_deterministic(
        (predictions, ground_truths) in corpus_strategy(),
        iou_threshold in 0.1f64..0.9
    ) {
        let first = build_froc(&predictions, &ground_truths, iou_threshold).unwrap();
        let second = build_froc(&predictions, &ground_truths, iou_threshold).unwrap();

        let bits = |v: &[f64]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
        prop_assert_eq!(bits(&first.sensitivities), bits(&second.sensitivities));
        prop_assert_eq!(bits(&first.fp_per_image), bits(&second.fp_per_image));
        prop_assert_eq!(first.hits, second.hits);
        prop_assert_eq!(first.misses, second.misses);
    }
}

// Property: IoU is symmetric and a box fully overlaps itself
proptest! {
    #[test]
    fn prop_iou_symmetric(a in bbox_strategy(), b in bbox_strategy()) {
        let ab = calculate_iou(&a, &[b]);
        let ba = calculate_iou(&b, &[a]);
        prop_assert_eq!(ab, ba);
    }

    #[test]
    fn prop_iou_self_overlap(a in bbox_strategy()) {
        prop_assert_eq!(calculate_iou(&a, &[a]), vec![1.0]);
    }

    #[test]
    fn prop_iou_range(a in bbox_strategy(), gts in prop::collection::vec(bbox_strategy(), 0..10)) {
        let overlaps = calculate_iou(&a, &gts);
        prop_assert_eq!(overlaps.len(), gts.len());
        for o in overlaps {
            prop_assert!((0.0..=1.0).contains(&o), "IoU out of range: {}", o);
        }
    }
}

// Property: budgets beyond the curve saturate at the final sensitivity
proptest! {
    #[test]
    fn prop_sampler_saturates(
        (predictions, ground_truths) in corpus_strategy(),
        excess in 0.001f64..100.0
    ) {
        let curve = build_froc(&predictions, &ground_truths, 0.5).unwrap();
        prop_assume!(!curve.is_empty());

        let max_fp = curve.max_fp_per_image().unwrap();
        let table = sample(&curve, &[max_fp + excess]).unwrap();

        prop_assert_eq!(table.points[0].sensitivity, curve.final_sensitivity().unwrap());
        prop_assert!(table.points[0].saturated);
    }

    #[test]
    fn prop_sampled_sensitivity_is_bounded_and_monotonic(
        (predictions, ground_truths) in corpus_strategy(),
        mut budgets in prop::collection::vec(0.0f64..4.0, 1..8)
    ) {
        let curve = build_froc(&predictions, &ground_truths, 0.5).unwrap();
        let distinct = curve.fp_per_image.first() < curve.fp_per_image.last();
        prop_assume!(distinct);

        budgets.sort_by(f64::total_cmp);
        let table = sample(&curve, &budgets).unwrap();
        let sens = table.sensitivities();

        for &s in &sens {
            prop_assert!((0.0..=1.0 + 1e-12).contains(&s), "sampled value out of range: {}", s);
        }
        for w in sens.windows(2) {
            prop_assert!(w[0] <= w[1] + 1e-12, "sampled sensitivity decreased: {:?}", w);
        }
    }
}
