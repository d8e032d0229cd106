//! Larger corpora: invariants must hold and results must stay exact.

use std::collections::BTreeMap;

use froc_eval::config::FrocConfig;
use froc_eval::evaluator::evaluate;
use froc_eval::froc::build_froc;
use froc_eval::types::{BoundingBox, ImageRecord, ScoredBox};

/// Deterministic corpus: every image has `gts_per_image` lesions on a grid,
/// one exact hit per lesion and `fps_per_image` far-away false positives.
fn synthetic_corpus(
    images: usize,
    gts_per_image: usize,
    fps_per_image: usize,
) -> (Vec<Vec<ScoredBox>>, Vec<Vec<BoundingBox>>) {
    let mut predictions = Vec::with_capacity(images);
    let mut ground_truths = Vec::with_capacity(images);

    for img in 0..images {
        let mut preds = Vec::new();
        let mut gts = Vec::new();

        for g in 0..gts_per_image {
            let offset = g as f64 * 40.0;
            gts.push(BoundingBox::new(offset, offset, offset + 19.0, offset + 19.0));
            // Hits score in (0.5, 1.0]
            let score = 1.0 - ((img * gts_per_image + g) % 50) as f64 / 100.0;
            preds.push(ScoredBox::new(offset, offset, offset + 19.0, offset + 19.0, score));
        }

        for f in 0..fps_per_image {
            let offset = 5000.0 + f as f64 * 40.0;
            // False positives score in [0.0, 0.5)
            let score = ((img + f) % 50) as f64 / 100.0;
            preds.push(ScoredBox::new(offset, offset, offset + 19.0, offset + 19.0, score));
        }

        predictions.push(preds);
        ground_truths.push(gts);
    }

    (predictions, ground_truths)
}

#[test]
fn test_large_corpus_all_hits_before_misses() {
    let (predictions, ground_truths) = synthetic_corpus(200, 5, 10);

    let curve = build_froc(&predictions, &ground_truths, 0.5).unwrap();
    assert_eq!(curve.len(), 200 * 15);
    assert_eq!(curve.total_ground_truths, 1000);

    // Every hit outranks every false positive.
    assert_eq!(curve.hits[999], 1000);
    assert_eq!(curve.misses[999], 0);
    assert_eq!(curve.final_sensitivity(), Some(1.0));
    assert_eq!(curve.max_fp_per_image(), Some(10.0));
}

#[test]
fn test_large_corpus_report() {
    let (predictions, ground_truths) = synthetic_corpus(100, 3, 4);

    let records: BTreeMap<String, ImageRecord> = predictions
        .into_iter()
        .zip(ground_truths)
        .enumerate()
        .map(|(i, (preds, gts))| (format!("img_{:05}", i), ImageRecord::new(preds, gts)))
        .collect();

    let report = evaluate(&records, &FrocConfig::default()).unwrap();
    assert_eq!(report.stats.images, 100);
    assert_eq!(report.stats.predictions, 700);
    assert_eq!(report.stats.ground_truths, 300);
    assert_eq!(report.operating_points.sensitivities(), vec![1.0; 5]);
    assert_eq!(report.mean_sensitivity, Some(1.0));
}

#[test]
fn test_many_tied_scores_are_reproducible() {
    let gt = BoundingBox::new(0.0, 0.0, 9.0, 9.0);
    let predictions: Vec<Vec<ScoredBox>> = (0..500)
        .map(|i| {
            if i % 3 == 0 {
                vec![ScoredBox::new(0.0, 0.0, 9.0, 9.0, 0.5)]
            } else {
                vec![ScoredBox::new(90.0, 90.0, 99.0, 99.0, 0.5)]
            }
        })
        .collect();
    let ground_truths = vec![vec![gt]; 500];

    let first = build_froc(&predictions, &ground_truths, 0.5).unwrap();
    let second = build_froc(&predictions, &ground_truths, 0.5).unwrap();
    assert_eq!(first, second);

    // Ties resolve in image order: image 0 hits, images 1 and 2 miss, ...
    assert_eq!(&first.hits[..4], &[1, 1, 1, 2]);
    assert_eq!(&first.misses[..4], &[0, 1, 2, 2]);
}
