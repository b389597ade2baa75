//! Shared glue for the benchmark binaries: tracing setup and report output.

use bench_core::BenchmarkReport;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().try_init();
}

/// Prints elapsed time and checksum the way the benchmarks always have.
pub fn print_report(time_label: &str, report: &BenchmarkReport) {
    println!("{time_label}: {:.2} seconds", report.elapsed_seconds);
    println!(
        "Final checksum (keeps the workload from being optimized away): {:.6}",
        report.aggregated_value
    );
}
