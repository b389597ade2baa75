//! The fixed per-iteration math term and its sequential accumulation.
//!
//! The term is an arbitrary transcendental placeholder chosen to saturate
//! floating-point units; its numerical meaning is irrelevant. The checksum it
//! produces only exists to keep the loop from being optimized away.

/// Floating-point operations attributed to one iteration of [`term`]
/// (sin, cos, multiply, accumulate). Used for the throughput figure.
pub const OPS_PER_ITERATION: f64 = 4.0;

/// Deterministic, side-effect-free function of the iteration index.
#[inline]
pub fn term(i: u64) -> f64 {
    let x = i as f64;
    x.sin() * x.cos()
}

/// Accumulates [`term`] over `[start, end)` in index order.
pub fn sum_range(start: u64, end: u64) -> f64 {
    let mut acc = 0.0;
    for i in start..end {
        acc += term(i);
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_is_bit_deterministic() {
        for i in [0u64, 1, 17, 999_983] {
            assert_eq!(term(i).to_bits(), term(i).to_bits());
        }
    }

    #[test]
    fn sum_range_matches_manual_fold() {
        let manual: f64 = (3u64..11).map(term).sum();
        assert_eq!(sum_range(3, 11).to_bits(), manual.to_bits());
    }

    #[test]
    fn empty_range_sums_to_zero() {
        assert_eq!(sum_range(42, 42), 0.0);
    }
}
