use approx::assert_relative_eq;

use resample_rs::internals::algorithms::estimate::{EstimationContext, WeightedAccumulator};
use resample_rs::internals::algorithms::types::{
    EstimateKind, KernelEstimate, KernelOptions, ZeroWeightFallback,
};
use resample_rs::internals::math::kernel::WeightFunction;
use resample_rs::internals::primitives::buffer::KernelBuffer;
use resample_rs::internals::primitives::table::ObservationTable;

/// A = [10, 15, 30, 50], B = [100, 80, 40, 20] at times [0, 3, 8, 15].
fn two_features() -> ObservationTable<f64> {
    ObservationTable::from_rows(
        vec!["A".to_string(), "B".to_string()],
        vec![0.0, 3.0, 8.0, 15.0],
        vec![vec![10.0, 15.0, 30.0, 50.0], vec![100.0, 80.0, 40.0, 20.0]],
    )
    .unwrap()
}

fn run(table: &ObservationTable<f64>, query: f64, k: usize, options: KernelOptions) -> KernelEstimate<f64> {
    let mut buffer = KernelBuffer::new(table.n_times(), table.n_features());
    EstimationContext::new(table, query, k, options, &mut buffer).estimate()
}

// ============================================================================
// Accumulator
// ============================================================================

#[test]
fn test_accumulator_starts_from_zero() {
    let mut sums = vec![0.0; 2];
    let mut acc = WeightedAccumulator::new(&mut sums);
    assert_eq!(acc.weight_sum(), 0.0);
    assert_eq!(acc.count(), 0);

    acc.add(0.5, &[2.0, 4.0]);
    acc.add(1.5, &[6.0, 8.0]);

    assert_eq!(acc.weight_sum(), 2.0);
    assert_eq!(acc.count(), 2);
    assert_eq!(acc.normalized(2.0), vec![5.0, 7.0]);
}

// ============================================================================
// Weighted Estimates
// ============================================================================

#[test]
fn test_worked_example_at_five() {
    let table = two_features();
    let est = run(&table, 5.0, 2, KernelOptions::default());

    // Distances {5, 2, 3, 10}: b = 5; weights t0: 0, t3: 0.63, t8: 0.48
    assert_eq!(est.kind, EstimateKind::Weighted);
    assert_eq!(est.bandwidth, 5.0);
    assert_eq!(est.support, 3);
    assert_relative_eq!(est.weight_sum, 1.11, epsilon = 1e-12);
    assert_relative_eq!(est.values[0], 23.85 / 1.11, epsilon = 1e-9);
    assert_relative_eq!(est.values[1], 69.6 / 1.11, epsilon = 1e-9);
}

#[test]
fn test_grid_points_of_worked_example() {
    let table = two_features();

    // t = 7: distances {7, 4, 1, 8} -> b = 7
    let at_seven = run(&table, 7.0, 2, KernelOptions::default());
    assert_eq!(at_seven.bandwidth, 7.0);
    assert_eq!(at_seven.kind, EstimateKind::Weighted);

    // t = 21: distances {21, 18, 13, 6} -> b = 18; only t8 and t15 weigh in
    let at_end = run(&table, 21.0, 2, KernelOptions::default());
    assert_eq!(at_end.bandwidth, 18.0);
    let w8 = 0.75 * (1.0 - (13.0f64 / 18.0).powi(2));
    let w15 = 0.75 * (1.0 - (6.0f64 / 18.0).powi(2));
    assert_relative_eq!(
        at_end.values[0],
        (30.0 * w8 + 50.0 * w15) / (w8 + w15),
        epsilon = 1e-9
    );
}

#[test]
fn test_result_within_contributing_range() {
    let table = two_features();
    for q in [1.0, 2.5, 5.0, 7.0, 11.0, 14.0, 21.0, -4.0] {
        let est = run(&table, q, 2, KernelOptions::default());
        assert_eq!(est.kind, EstimateKind::Weighted, "query {}", q);
        assert!(est.weight_sum > 0.0);
        assert!(est.values[0] >= 10.0 - 1e-9 && est.values[0] <= 50.0 + 1e-9);
        assert!(est.values[1] >= 20.0 - 1e-9 && est.values[1] <= 100.0 + 1e-9);
    }
}

#[test]
fn test_constant_series_reproduced() {
    let table = ObservationTable::from_rows(
        vec!["flat".to_string()],
        vec![0.0, 1.5, 4.0, 9.0, 9.5, 20.0],
        vec![vec![3.25; 6]],
    )
    .unwrap();

    for wf in [
        WeightFunction::Epanechnikov,
        WeightFunction::Tricube,
        WeightFunction::Gaussian,
    ] {
        let options = KernelOptions {
            weight_function: wf,
            ..KernelOptions::default()
        };
        let est = run(&table, 6.0, 3, options);
        assert_relative_eq!(est.values[0], 3.25, epsilon = 1e-12);
    }
}

// ============================================================================
// Exact Matches
// ============================================================================

#[test]
fn test_exact_match_returns_observation() {
    let table = two_features();
    let est = run(&table, 8.0, 2, KernelOptions::default());

    assert_eq!(est.kind, EstimateKind::ExactMatch);
    assert_eq!(est.values, vec![30.0, 40.0]);
    assert_eq!(est.support, 1);
}

#[test]
fn test_exact_match_at_hull_edges() {
    let table = two_features();

    assert_eq!(run(&table, 0.0, 3, KernelOptions::default()).values, vec![10.0, 100.0]);
    assert_eq!(run(&table, 15.0, 3, KernelOptions::default()).values, vec![50.0, 20.0]);
}

#[test]
fn test_coincident_duplicates_are_averaged() {
    let table = ObservationTable::from_columns(
        vec!["A".to_string()],
        vec![0.0, 4.0, 4.0, 9.0],
        vec![vec![1.0], vec![10.0], vec![20.0], vec![5.0]],
    )
    .unwrap();
    let est = run(&table, 4.0, 1, KernelOptions::default());

    assert_eq!(est.kind, EstimateKind::ExactMatch);
    assert_eq!(est.support, 2);
    assert_eq!(est.values, vec![15.0]);
}

// ============================================================================
// Zero-Weight Windows
// ============================================================================

#[test]
fn test_zero_weight_returns_zeros_by_default() {
    let table = ObservationTable::from_rows(
        vec!["A".to_string(), "B".to_string()],
        vec![0.0, 10.0],
        vec![vec![4.0, 8.0], vec![1.0, 3.0]],
    )
    .unwrap();
    let est = run(&table, 5.0, 1, KernelOptions::default());

    assert_eq!(est.kind, EstimateKind::ZeroWeight);
    assert_eq!(est.bandwidth, 5.0);
    assert_eq!(est.weight_sum, 0.0);
    assert_eq!(est.values, vec![0.0, 0.0]);
    assert!(est.values.iter().all(|v| v.is_finite()));
}

#[test]
fn test_zero_weight_window_mean_fallback() {
    let table = ObservationTable::from_rows(
        vec!["A".to_string()],
        vec![0.0, 10.0, 30.0],
        vec![vec![4.0, 8.0, 100.0]],
    )
    .unwrap();
    let options = KernelOptions {
        zero_weight_fallback: ZeroWeightFallback::UseWindowMean,
        ..KernelOptions::default()
    };
    let est = run(&table, 5.0, 1, options);

    assert_eq!(est.kind, EstimateKind::ZeroWeight);
    assert_eq!(est.support, 2);
    assert_eq!(est.values, vec![6.0]);
}

#[test]
fn test_uniform_kernel_keeps_boundary_columns() {
    let table = ObservationTable::from_rows(
        vec!["A".to_string()],
        vec![0.0, 10.0],
        vec![vec![4.0, 8.0]],
    )
    .unwrap();
    let options = KernelOptions {
        weight_function: WeightFunction::Uniform,
        ..KernelOptions::default()
    };
    let est = run(&table, 5.0, 1, options);

    assert_eq!(est.kind, EstimateKind::Weighted);
    assert_relative_eq!(est.values[0], 6.0, epsilon = 1e-12);
}

#[test]
fn test_buffer_reuse_across_queries() {
    let table = two_features();
    let mut buffer = KernelBuffer::new(table.n_times(), table.n_features());

    let first = EstimationContext::new(&table, 5.0, 2, KernelOptions::default(), &mut buffer).estimate();
    let _ = EstimationContext::new(&table, 12.0, 2, KernelOptions::default(), &mut buffer).estimate();
    let again = EstimationContext::new(&table, 5.0, 2, KernelOptions::default(), &mut buffer).estimate();

    assert_eq!(first, again);
}
