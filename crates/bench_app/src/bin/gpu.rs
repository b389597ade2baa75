//! GPU benchmark entry point.
//!
//! Takes no arguments: lists the enumerated compute devices, reads one index
//! from stdin, validates it before creating any device resource, then runs a
//! single kernel launch and reports elapsed time, checksum, and throughput.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use bench_core::{report, BenchSettings};
use bench_gpu::{create_instance, enumerate, validate_selection, GpuStrategy};

fn main() -> Result<()> {
    bench_app::init_tracing();

    let settings = BenchSettings::default();
    let instance = create_instance();
    let devices = enumerate(&instance)?;

    println!("Available compute devices:");
    for (info, _) in &devices {
        println!("{info}");
    }

    let selected = prompt_for_selection(devices.len())?;
    let (info, adapter) = devices
        .into_iter()
        .nth(selected)
        .expect("selection validated against the enumerated count");
    println!("Selected device: {}", info.name);

    let strategy = GpuStrategy::new(&adapter, &settings)?;
    let spec = settings.device_spec()?;
    let report = report::run(&strategy, &spec)?;

    bench_app::print_report("Device time", &report);
    println!("Throughput: {:.2} GFLOP/s", report.throughput / 1e9);
    Ok(())
}

fn prompt_for_selection(count: usize) -> Result<usize> {
    print!("Select the device to use (0-{}): ", count - 1);
    io::stdout().flush().context("failed to flush stdout")?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read device selection")?;
    let index: i64 = line
        .trim()
        .parse()
        .context("device selection must be an integer")?;
    Ok(validate_selection(index, count)?)
}
