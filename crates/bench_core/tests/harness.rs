//! End-to-end checks of the thread path through the public harness API.

use std::time::Instant;

use bench_core::{report, ExecutionStrategy, ThreadStrategy, WorkloadSpec};

#[test]
fn single_unit_runs_are_bit_reproducible() {
    let spec = WorkloadSpec::new(50_000, 1).unwrap();
    let first = report::run(&ThreadStrategy, &spec).unwrap();
    let second = report::run(&ThreadStrategy, &spec).unwrap();
    assert_eq!(
        first.aggregated_value.to_bits(),
        second.aggregated_value.to_bits()
    );
}

#[test]
fn timed_window_starts_no_earlier_than_the_dispatch() {
    // Burn some wall-clock time after capturing an outer timestamp; the
    // harness's own window must not include it.
    let spec = WorkloadSpec::new(10_000, 2).unwrap();
    let outer = Instant::now();
    std::thread::sleep(std::time::Duration::from_millis(50));
    let report = report::run(&ThreadStrategy, &spec).unwrap();
    assert!(report.elapsed_seconds >= 0.0);
    assert!(report.elapsed_seconds < outer.elapsed().as_secs_f64());
}

#[test]
fn unit_count_changes_the_split_but_not_the_checksum_materially() {
    let reference = report::run(&ThreadStrategy, &WorkloadSpec::new(30_000, 1).unwrap())
        .unwrap()
        .aggregated_value;
    for units in [2u32, 3, 8, 16] {
        let spec = WorkloadSpec::new(30_000, units).unwrap();
        let report = report::run(&ThreadStrategy, &spec).unwrap();
        assert!(
            (report.aggregated_value - reference).abs() < 1e-9,
            "units={units} drifted: {} vs {reference}",
            report.aggregated_value
        );
    }
}

#[test]
fn strategy_label_is_stable_through_the_trait_object() {
    let strategy: &dyn ExecutionStrategy = &ThreadStrategy;
    assert_eq!(strategy.label(), "threads");
    let spec = WorkloadSpec::new(1_000, 4).unwrap();
    let results = strategy.dispatch(&spec).unwrap();
    assert_eq!(results.len(), 4);
}
