//! Multi-core benchmark entry point.
//!
//! Takes no arguments; the thread count comes from the `NUMCPUS` environment
//! variable (absent means one thread). Any fatal condition prints a
//! diagnostic to stderr and exits non-zero.

use anyhow::Result;
use bench_core::{config, report, BenchSettings, ThreadStrategy};

fn main() -> Result<()> {
    bench_app::init_tracing();

    let settings = BenchSettings::default();
    let thread_count = config::thread_count_from_env()?;
    let spec = settings.thread_spec(thread_count)?;

    println!("Starting multi-core benchmark with {thread_count} thread(s)...");
    let report = report::run(&ThreadStrategy, &spec)?;

    bench_app::print_report("Elapsed time", &report);
    Ok(())
}
