//! Basic FROC evaluation example demonstrating core functionality.
//!
//! Run with `RUST_LOG=debug` to also see the corpus statistics.

use std::collections::BTreeMap;
use std::env;

use froc_eval::{
    build_froc, evaluate, metrics::calculate_iou, sample, BoundingBox, FrocConfig, ImageRecord,
    ScoredBox,
};
use tracing_subscriber::{filter::LevelFilter, prelude::*, EnvFilter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // setup tracing
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true).compact();
    let filter_layer = {
        let filter = EnvFilter::from_default_env();
        if env::var("RUST_LOG").is_err() {
            filter.add_directive(LevelFilter::INFO.into())
        } else {
            filter
        }
    };
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    println!("=== FROC Evaluation Example ===\n");

    // Example 1: IoU against the ground truths of one image
    println!("1. IoU Calculation");
    let prediction = BoundingBox::new(10.0, 10.0, 59.0, 59.0);
    let ground_truths = vec![
        BoundingBox::new(15.0, 15.0, 64.0, 64.0),
        BoundingBox::new(200.0, 200.0, 249.0, 249.0),
    ];
    let overlaps = calculate_iou(&prediction, &ground_truths);
    println!("   Overlaps: {:?}", overlaps);
    println!();

    // Example 2: Curve and operating points from per-image slices
    println!("2. FROC Curve");
    let predictions = vec![
        vec![
            ScoredBox::new(10.0, 10.0, 59.0, 59.0, 0.92),
            ScoredBox::new(300.0, 300.0, 339.0, 339.0, 0.40),
        ],
        vec![
            ScoredBox::new(120.0, 80.0, 169.0, 129.0, 0.75),
            ScoredBox::new(20.0, 20.0, 49.0, 49.0, 0.55),
        ],
    ];
    let gts = vec![
        vec![BoundingBox::new(12.0, 12.0, 60.0, 60.0)],
        vec![
            BoundingBox::new(20.0, 20.0, 49.0, 49.0),
            BoundingBox::new(400.0, 400.0, 439.0, 439.0),
        ],
    ];
    let curve = build_froc(&predictions, &gts, 0.5)?;
    for (i, (fp, sens)) in curve.points().enumerate() {
        println!("   #{}: fp/img = {:.2}, sensitivity = {:.4}", i + 1, fp, sens);
    }
    let table = sample(&curve, &[0.25, 0.5, 1.0, 2.0])?;
    for point in &table.points {
        println!(
            "   @ {:>5} FP/img: {:.4}{}",
            point.fp_per_image,
            point.sensitivity,
            if point.saturated { " (saturated)" } else { "" }
        );
    }
    println!();

    // Example 3: Keyed records through the reporter
    println!("3. Report");
    let records: BTreeMap<String, ImageRecord> = predictions
        .into_iter()
        .zip(gts)
        .enumerate()
        .map(|(i, (preds, gts))| (format!("scan_{:03}", i), ImageRecord::new(preds, gts)))
        .collect();

    let config = FrocConfig::from_json_str(
        r#"{ "fp_budgets": [0.25, 0.5, 1.0, 2.0], "mean_leading": 3 }"#,
    )?;
    let report = evaluate(&records, &config)?;
    println!("{}", report);

    Ok(())
}
