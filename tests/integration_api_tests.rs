use approx::assert_relative_eq;

use resample_rs::prelude::*;

fn two_features() -> ObservationTable<f64> {
    ObservationTable::from_rows(
        vec!["A".to_string(), "B".to_string()],
        vec![0.0, 3.0, 8.0, 15.0],
        vec![vec![10.0, 15.0, 30.0, 50.0], vec![100.0, 80.0, 40.0, 20.0]],
    )
    .unwrap()
}

// ============================================================================
// Builder
// ============================================================================

#[test]
fn test_builder_defaults() {
    let model = Resampler::<f64>::new().adapter(Batch).build().unwrap();
    let config = model.config();

    assert_eq!(config.step, 7.0);
    assert_eq!(config.neighbors, 5);
    assert_eq!(config.tolerance, None);
    assert_eq!(config.kernel.weight_function, Epanechnikov);
    assert_eq!(config.kernel.zero_weight_fallback, ReturnZero);
}

#[test]
fn test_builder_duplicate_parameter() {
    let result = Resampler::new()
        .step(7.0)
        .neighbors(2)
        .step(3.0)
        .adapter(Batch)
        .build();

    assert!(matches!(
        result,
        Err(ResampleError::DuplicateParameter { parameter: "step" })
    ));
}

#[test]
fn test_builder_rejects_invalid_parameters() {
    assert!(matches!(
        Resampler::<f64>::new().neighbors(0).adapter(Batch).build(),
        Err(ResampleError::InvalidInput(_))
    ));
    assert!(Resampler::new().step(-1.0).adapter(Batch).build().is_err());
    assert!(Resampler::new().tolerance(-1e-3).adapter(Batch).build().is_err());
    assert!(
        Resampler::new()
            .step(7.0)
            .tolerance(3.5)
            .adapter(Batch)
            .build()
            .is_err()
    );
    assert!(
        Resampler::new()
            .missing_values(MissingValues::Fill(f64::NAN))
            .adapter(Batch)
            .build()
            .is_err()
    );
    assert!(
        Resampler::new()
            .step(1.0)
            .neighbors(0)
            .adapter(Directory)
            .build()
            .is_err()
    );
}

// ============================================================================
// Batch
// ============================================================================

#[test]
fn test_batch_estimate_and_regularize() {
    let table = two_features();
    let model = Resampler::new()
        .step(7.0)
        .neighbors(2)
        .adapter(Batch)
        .build()
        .unwrap();

    let values = model.estimate(&table, 5.0).unwrap();
    assert_relative_eq!(values[0], 23.85 / 1.11, epsilon = 1e-9);
    assert_relative_eq!(values[1], 69.6 / 1.11, epsilon = 1e-9);

    let detailed = model.estimate_detailed(&table, 5.0).unwrap();
    assert_eq!(detailed.bandwidth, 5.0);
    assert_eq!(detailed.kind, EstimateKind::Weighted);

    let grid = model.grid(&table).unwrap();
    assert_eq!(grid.points(), &[0.0, 7.0, 14.0, 21.0]);

    let result = model.regularize(&table).unwrap();
    assert_eq!(result.table.times(), grid.points());
    assert_eq!(result.table.column(0), &[10.0, 100.0]);
    assert_eq!(result.table.column(1), model.estimate(&table, 7.0).unwrap().as_slice());
}

#[test]
fn test_batch_zero_weight_policies() {
    let table = ObservationTable::from_rows(
        vec!["A".to_string()],
        vec![0.0, 10.0],
        vec![vec![4.0, 8.0]],
    )
    .unwrap();

    let zeros = Resampler::new().neighbors(1).adapter(Batch).build().unwrap();
    assert_eq!(zeros.estimate(&table, 5.0).unwrap(), vec![0.0]);

    let mean = Resampler::new()
        .neighbors(1)
        .zero_weight_fallback(UseWindowMean)
        .adapter(Batch)
        .build()
        .unwrap();
    assert_eq!(mean.estimate(&table, 5.0).unwrap(), vec![6.0]);
}

#[test]
fn test_batch_kernel_choice() {
    let table = two_features();
    let epan = Resampler::new().neighbors(2).adapter(Batch).build().unwrap();
    let tri = Resampler::new()
        .neighbors(2)
        .weight_function(Triangle)
        .adapter(Batch)
        .build()
        .unwrap();

    let a = epan.estimate(&table, 5.0).unwrap();
    let b = tri.estimate(&table, 5.0).unwrap();

    // Triangle: weights 0.6 (t3) and 0.4 (t8)
    assert_relative_eq!(b[0], 15.0 * 0.6 + 30.0 * 0.4, epsilon = 1e-9);
    assert!((a[0] - b[0]).abs() > 1e-6);
}

#[test]
fn test_batch_regularize_labeled() {
    let labeled = LabeledTable::new(
        "gene",
        vec!["A".to_string(), "B".to_string()],
        vec![
            "0".to_string(),
            "3".to_string(),
            "notanumber".to_string(),
            "8".to_string(),
            "15".to_string(),
        ],
        vec![
            vec![Some(10.0), Some(15.0), Some(1.0), Some(30.0), Some(50.0)],
            vec![Some(100.0), Some(80.0), None, Some(40.0), Some(20.0)],
        ],
    )
    .unwrap();

    let model = Resampler::new()
        .step(7.0)
        .neighbors(2)
        .adapter(Batch)
        .build()
        .unwrap();
    let result = model.regularize_labeled(&labeled).unwrap();

    assert_eq!(result.table, model.regularize(&two_features()).unwrap().table);
    let report = result.cleaning.unwrap();
    assert_eq!(report.non_numeric, vec!["notanumber".to_string()]);
    assert!(report.incomplete.is_empty());
}

#[test]
fn test_batch_missing_value_policies() {
    let labeled = LabeledTable::new(
        "",
        vec!["A".to_string()],
        vec!["0".to_string(), "7".to_string(), "14".to_string()],
        vec![vec![Some(1.0), None, Some(3.0)]],
    )
    .unwrap();

    let reject = Resampler::new().neighbors(1).adapter(Batch).build().unwrap();
    assert!(matches!(
        reject.regularize_labeled(&labeled),
        Err(ResampleError::InvalidNumericValue(_))
    ));

    let fill = Resampler::new()
        .neighbors(1)
        .missing_values(MissingValues::Fill(2.0))
        .adapter(Batch)
        .build()
        .unwrap();
    let filled = fill.regularize_labeled(&labeled).unwrap();
    assert_eq!(filled.table.row(0), vec![1.0, 2.0, 3.0]);

    let drop = Resampler::new()
        .neighbors(1)
        .missing_values(MissingValues::DropColumn)
        .adapter(Batch)
        .build()
        .unwrap();
    let dropped = drop.regularize_labeled(&labeled).unwrap();
    assert_eq!(dropped.table.times(), &[0.0, 7.0, 14.0]);
    assert_eq!(dropped.estimated_count(), 1);
    assert_eq!(dropped.cleaning.unwrap().incomplete, vec!["7".to_string()]);
}

#[test]
fn test_batch_serial_matches_parallel() {
    let times: Vec<f64> = (0..80).map(|i| (i as f64).powf(1.3)).collect();
    let row: Vec<f64> = times.iter().map(|t| (t * 0.1).cos()).collect();
    let table = ObservationTable::from_rows(vec!["s".to_string()], times, vec![row]).unwrap();

    let serial = Resampler::new()
        .step(2.0)
        .neighbors(4)
        .parallel(false)
        .adapter(Batch)
        .build()
        .unwrap();
    let parallel = Resampler::new()
        .step(2.0)
        .neighbors(4)
        .parallel(true)
        .adapter(Batch)
        .build()
        .unwrap();

    assert_eq!(
        serial.regularize(&table).unwrap().table,
        parallel.regularize(&table).unwrap().table
    );
}
