// statistic.rs - GH hybridization test from site-pattern sums
//
// Blischak et al. (2018) "HyDe: a Python package for genome-scale hybridization
// detection", building on Kubatko & Chifman (2019) phylogenetic invariants.

use crate::core::patterns::{PatternCounts, AABB, ABAB, ABBA};
use serde::{Deserialize, Serialize};

/// Pseudo-count added to each pattern before converting to a probability
const PSEUDO_COUNT: f64 = 0.05;

/// Statistics beyond this magnitude are treated as numerically degenerate
const MAX_ABS_STATISTIC: f64 = 1e5;

/// Result of a valid hybridization test for one quartet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HydeTest {
    pub zscore: f64,
    pub pvalue: f64,
    pub gamma: f64,
    pub patterns: PatternCounts,
}

/// Pattern probabilities entering the invariants
#[derive(Debug, Clone, Copy)]
struct InvariantProbabilities {
    abba: f64,
    abab: f64,
    aabb: f64,
}

impl InvariantProbabilities {
    fn new(patterns: &PatternCounts, observations: f64) -> Self {
        Self {
            abba: (patterns.get(ABBA) + PSEUDO_COUNT) / observations,
            abab: (patterns.get(ABAB) + PSEUDO_COUNT) / observations,
            aabb: (patterns.get(AABB) + PSEUDO_COUNT) / observations,
        }
    }
}

/// GH statistic, or `None` when the quartet carries no usable signal.
///
/// `avg_observations` is the observation count divided by the number of
/// individual combinations in the quartet.
pub fn gh_statistic(patterns: &PatternCounts, observations: f64, avg_observations: f64) -> Option<f64> {
    let InvariantProbabilities {
        abba: p9,
        abab: p7,
        aabb: p4,
    } = InvariantProbabilities::new(patterns, observations);

    // ABAB dominating both alternatives means no directional signal
    if p7 > p9 && p7 > p4 {
        return None;
    }

    let mut invp1 = avg_observations * (p9 - p7);
    let mut invp2 = avg_observations * (p4 - p7);
    if invp1 == 0.0 {
        invp1 += 1.0;
        invp2 += 1.0;
    }

    let var1 = avg_observations * (p9 * (1.0 - p9) + p7 * (1.0 - p7) + 2.0 * p9 * p7);
    let var2 = avg_observations * (p4 * (1.0 - p4) + p7 * (1.0 - p7) + 2.0 * p4 * p7);
    let cov = avg_observations * (-p9 * p4 + p9 * p7 + p7 * p4 + p7 * (1.0 - p7));

    let ratio = invp2 / invp1;
    let gh = invp1 * ratio / (var1 * ratio * ratio - 2.0 * cov * ratio + var2).sqrt();

    if gh.is_finite() && gh.abs() < MAX_ABS_STATISTIC {
        Some(gh)
    } else {
        None
    }
}

/// Introgression proportion estimate from the ABBA/AABB invariants
pub fn gamma(patterns: &PatternCounts, observations: f64) -> f64 {
    let p = InvariantProbabilities::new(patterns, observations);
    let ratio = (p.abba - p.abab) / (p.aabb - p.abab);
    ratio / (1.0 + ratio)
}

/// Error function, Abramowitz & Stegun 7.1.26
pub fn erf(x: f64) -> f64 {
    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;
    const P: f64 = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();
    let t = 1.0 / (1.0 + P * x);
    let y = 1.0 - (((((A5 * t + A4) * t) + A3) * t + A2) * t + A1) * t * (-x * x).exp();
    sign * y
}

/// Two-sided normal tail probability of a z statistic
pub fn pvalue(z: f64) -> f64 {
    (1.0 - erf(z.abs() / std::f64::consts::SQRT_2)).clamp(0.0, 1.0)
}

/// Run the full test on one quartet's pattern sums.
///
/// `combinations` is the number of individual combinations the counts were
/// accumulated over.
pub fn test_quartet(patterns: &PatternCounts, observations: f64, combinations: usize) -> Option<HydeTest> {
    if observations <= 0.0 || combinations == 0 {
        return None;
    }
    let avg_observations = observations / combinations as f64;
    let zscore = gh_statistic(patterns, observations, avg_observations)?;
    Some(HydeTest {
        zscore,
        pvalue: pvalue(zscore),
        gamma: gamma(patterns, observations),
        patterns: *patterns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::patterns::{AAAA, NUM_PATTERNS};

    fn patterns(entries: &[(usize, f64)]) -> PatternCounts {
        let mut values = [0.0; NUM_PATTERNS];
        for &(p, v) in entries {
            values[p] = v;
        }
        PatternCounts { values }
    }

    #[test]
    fn test_dominant_abab_is_invalid() {
        let counts = patterns(&[(AAAA, 5.0), (ABAB, 5.0)]);
        assert_eq!(gh_statistic(&counts, 10.0, 10.0), None);
        assert_eq!(test_quartet(&counts, 10.0, 1), None);

        let counts = patterns(&[(AAAA, 50.0), (ABAB, 30.0), (ABBA, 29.0), (AABB, 1.0)]);
        for avg in [0.1, 1.0, 110.0] {
            assert_eq!(gh_statistic(&counts, 110.0, avg), None);
        }
    }

    #[test]
    fn test_abba_signal_is_valid() {
        let counts = patterns(&[(AAAA, 100.0), (ABBA, 30.0), (AABB, 15.0), (ABAB, 5.0)]);
        let test = test_quartet(&counts, 150.0, 1).unwrap();
        assert!(test.zscore.is_finite());
        assert!(test.pvalue > 0.0 && test.pvalue < 1.0);
        assert!(test.gamma > 0.0 && test.gamma < 1.0);
        assert_eq!(test.patterns, counts);
    }

    #[test]
    fn test_gamma_ignores_avg_observations_scale() {
        let counts = patterns(&[(AAAA, 80.0), (ABBA, 12.0), (AABB, 20.0), (ABAB, 3.0)]);
        let a = test_quartet(&counts, 115.0, 1).unwrap();
        let b = test_quartet(&counts, 115.0, 8).unwrap();
        assert!((a.gamma - b.gamma).abs() < 1e-12);
        assert!((gamma(&counts, 115.0) - a.gamma).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_denominator_guard() {
        // ABBA == ABAB makes invp1 zero before the guard
        let counts = patterns(&[(AAAA, 40.0), (ABBA, 5.0), (ABAB, 5.0), (AABB, 10.0)]);
        // guarded: invp1 = 1, invp2 = 6
        let gh = gh_statistic(&counts, 60.0, 60.0).unwrap();
        assert!((gh - 0.336_630_944).abs() < 1e-6, "gh = {}", gh);
    }

    #[test]
    fn test_no_observations() {
        assert_eq!(test_quartet(&PatternCounts::default(), 0.0, 1), None);
    }

    #[test]
    fn test_erf_reference_values() {
        assert!(erf(0.0).abs() < 1e-8);
        assert!((erf(1.0) - 0.8427007929).abs() < 1e-6);
        assert!((erf(-1.0) + 0.8427007929).abs() < 1e-6);
        assert!((erf(3.0) - 0.9999779095).abs() < 1e-6);
    }

    #[test]
    fn test_pvalue_bounds_and_monotonicity() {
        let mut previous = pvalue(0.0);
        assert!((previous - 1.0).abs() < 1e-6);
        assert!((pvalue(1.959964) - 0.05).abs() < 1e-4);
        for i in 1..2000 {
            let z = i as f64 * 0.01;
            let p = pvalue(z);
            assert!((0.0..=1.0).contains(&p));
            assert!(p <= previous + 1e-12, "z = {}", z);
            assert_eq!(p, pvalue(-z));
            previous = p;
        }
    }
}
