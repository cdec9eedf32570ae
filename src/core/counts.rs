// counts.rs - Joint base count matrix for one quartet

use crate::core::patterns::PatternCounts;
use crate::data::bases::{is_ambiguous, is_resolved, resolve, GAP};
use crate::data::SequenceMatrix;

/// How sites with ambiguous or missing bases are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AmbiguityPolicy {
    /// Spread one observation uniformly over all compatible resolutions
    #[default]
    Distribute,
    /// Count only sites where all four bases are unambiguous
    Ignore,
}

/// Individuals sampled for each position of a quartet
#[derive(Debug, Clone, Copy)]
pub struct QuartetMembers<'a> {
    pub outgroup: &'a [usize],
    pub p1: &'a [usize],
    pub hybrid: &'a [usize],
    pub p2: &'a [usize],
}

impl QuartetMembers<'_> {
    /// Number of individual combinations (one from each position)
    pub fn combinations(&self) -> usize {
        self.outgroup.len() * self.p1.len() * self.hybrid.len() * self.p2.len()
    }
}

/// 16×16 counts indexed `[out*4 + p1][hyb*4 + p2]`
#[derive(Debug, Clone)]
pub struct CountMatrix {
    pub cells: [[f64; 16]; 16],
    pub observations: f64,
}

impl Default for CountMatrix {
    fn default() -> Self {
        Self::new()
    }
}

impl CountMatrix {
    pub fn new() -> Self {
        Self {
            cells: [[0.0; 16]; 16],
            observations: 0.0,
        }
    }

    #[inline]
    fn add(&mut self, out: u8, p1: u8, hyb: u8, p2: u8, weight: f64) {
        self.cells[(out * 4 + p1) as usize][(hyb * 4 + p2) as usize] += weight;
    }

    /// Fold one site into the matrix. Returns whether it was counted.
    pub fn add_site(&mut self, site: [u8; 4], policy: AmbiguityPolicy) -> bool {
        let [out, p1, hyb, p2] = site;

        if site.iter().all(|&b| is_resolved(b)) {
            self.add(out, p1, hyb, p2, 1.0);
            self.observations += 1.0;
            return true;
        }
        if policy == AmbiguityPolicy::Ignore || site.contains(&GAP) {
            return false;
        }
        // Three or more ambiguous positions carry too little information
        if site.iter().filter(|&&b| is_ambiguous(b)).count() >= 3 {
            return false;
        }

        let sets = match (resolve(out), resolve(p1), resolve(hyb), resolve(p2)) {
            (Some(a), Some(b), Some(c), Some(d)) => [a, b, c, d],
            _ => return false,
        };
        let weight = 1.0 / sets.iter().map(|s| s.len()).product::<usize>() as f64;
        for &o in sets[0] {
            for &a in sets[1] {
                for &h in sets[2] {
                    for &b in sets[3] {
                        self.add(o, a, h, b, weight);
                    }
                }
            }
        }
        self.observations += 1.0;
        true
    }

    /// Reduce to the fifteen site-pattern sums
    pub fn patterns(&self) -> PatternCounts {
        PatternCounts::from_cells(&self.cells)
    }
}

/// Count every site for every combination of one individual per position
pub fn build_counts(
    sequences: &SequenceMatrix,
    members: &QuartetMembers<'_>,
    policy: AmbiguityPolicy,
) -> CountMatrix {
    let mut counts = CountMatrix::new();

    for &o in members.outgroup {
        let out_row = sequences.row(o);
        for &a in members.p1 {
            let p1_row = sequences.row(a);
            for &h in members.hybrid {
                let hyb_row = sequences.row(h);
                for &b in members.p2 {
                    let p2_row = sequences.row(b);
                    for site in 0..sequences.num_sites {
                        counts.add_site(
                            [out_row[site], p1_row[site], hyb_row[site], p2_row[site]],
                            policy,
                        );
                    }
                }
            }
        }
    }

    counts
}
